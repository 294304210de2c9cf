mod client;

pub use client::KubeClient;
