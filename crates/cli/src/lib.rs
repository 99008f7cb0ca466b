pub mod client;
pub mod commands;
pub mod config;
pub mod models;
pub mod observability;

pub use client::{ClientError, Layer1Client};
pub use commands::Command;
pub use config::{Config, GlobalArgs};
pub use observability::{LogFormat, init_logging};
