pub mod config;
pub mod executor;
pub mod proto;
pub mod webserver;

pub use crate::config::Config;
pub use crate::executor::RegistryExecutor;
