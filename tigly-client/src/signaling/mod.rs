mod client;

pub use client::SignalingClient;
