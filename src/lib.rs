pub mod bookmarks;
pub mod cluster;
pub mod cmd;
pub mod config;
pub mod error;
pub mod ingress;
pub mod logging;
pub mod server;
