use tigly_core::{NegotiationRole, RoomId, ServerMessage};

use crate::integration::{create_test_manager, init_tracing, start_test_session};
use crate::utils::{SIGNAL_TIMEOUT_MS, wait_until};

/// A fresh match while paired replaces the old negotiation wholesale but
/// keeps the local capture alive.
#[tokio::test]
async fn test_rematch_supersedes_session() {
    init_tracing();

    let manager = create_test_manager();
    let (handle, signaling, _outbound_rx, server_tx) = start_test_session(&manager, "Frank");

    server_tx
        .send(ServerMessage::NewRoom {
            kind: NegotiationRole::Offerer,
            room_id: RoomId::from("room-a"),
        })
        .await
        .unwrap();

    let first = wait_until(SIGNAL_TIMEOUT_MS, || async {
        signaling.offers().await.len() == 1
    })
    .await;
    assert!(first);

    server_tx
        .send(ServerMessage::NewRoom {
            kind: NegotiationRole::Offerer,
            room_id: RoomId::from("room-b"),
        })
        .await
        .unwrap();

    let second = wait_until(SIGNAL_TIMEOUT_MS, || async {
        signaling.offers().await.len() == 2
    })
    .await;
    assert!(second, "the new assignment should negotiate from scratch");

    let offers = signaling.offers().await;
    assert_eq!(offers[0].0, RoomId::from("room-a"));
    assert_eq!(offers[1].0, RoomId::from("room-b"));

    // Capture belongs to the view, not to the match.
    let media = handle.local_media().expect("media should survive a rematch");
    assert!(!media.is_released());
    assert_eq!(handle.assignment().unwrap().room_id, RoomId::from("room-b"));

    manager.shutdown(handle.identity()).await;
    assert!(media.is_released());
}
