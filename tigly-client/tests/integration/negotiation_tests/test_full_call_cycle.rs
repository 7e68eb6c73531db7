use tigly_core::{NegotiationRole, RoomId, ServerMessage};

use crate::integration::{create_test_manager, init_tracing, start_test_session};
use crate::utils::{
    MEDIA_TIMEOUT_MS, SIGNAL_TIMEOUT_MS, spawn_relay, spawn_sample_pump, wait_for_remote_tracks,
    wait_until,
};

/// Two sessions wired back to back through a relay: one offer, one answer,
/// and media flowing both ways over loopback ICE.
#[tokio::test]
async fn test_full_call_cycle() {
    init_tracing();

    let manager = create_test_manager();
    let (alice, alice_signaling, alice_out, alice_in) = start_test_session(&manager, "Alice");
    let (bob, bob_signaling, bob_out, bob_in) = start_test_session(&manager, "Bob");

    let _a_to_b = spawn_relay(alice_out, bob_in.clone());
    let _b_to_a = spawn_relay(bob_out, alice_in.clone());

    let alice_pump = spawn_sample_pump(&alice);
    let bob_pump = spawn_sample_pump(&bob);

    let room = RoomId::from("room-7");
    alice_in
        .send(ServerMessage::NewRoom {
            kind: NegotiationRole::Offerer,
            room_id: room.clone(),
        })
        .await
        .unwrap();
    bob_in
        .send(ServerMessage::NewRoom {
            kind: NegotiationRole::Answerer,
            room_id: room,
        })
        .await
        .unwrap();

    let negotiated = wait_until(SIGNAL_TIMEOUT_MS, || async {
        !alice_signaling.offers().await.is_empty() && !bob_signaling.answers().await.is_empty()
    })
    .await;
    assert!(negotiated, "offer/answer exchange did not complete");

    assert_eq!(alice_signaling.offers().await.len(), 1);
    assert_eq!(bob_signaling.answers().await.len(), 1);
    assert!(bob_signaling.offers().await.is_empty());
    assert!(alice_signaling.answers().await.is_empty());

    // Tracks land one by one and are accumulated, never replaced.
    wait_for_remote_tracks(&alice, 1, MEDIA_TIMEOUT_MS)
        .await
        .expect("no remote media reached the offerer");
    wait_for_remote_tracks(&bob, 1, MEDIA_TIMEOUT_MS)
        .await
        .expect("no remote media reached the answerer");

    manager.shutdown_all().await;
    alice_pump.await.unwrap();
    bob_pump.await.unwrap();
}
