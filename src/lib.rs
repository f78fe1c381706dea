pub mod config;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod server;
pub mod upstream;
