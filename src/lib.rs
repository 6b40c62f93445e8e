mod board;
mod config;
mod loader;
mod logging;
mod protocol;
mod server;

pub use board::*;
pub use config::*;
pub use loader::*;
pub use logging::init_logging;
pub use protocol::*;
pub use server::*;
