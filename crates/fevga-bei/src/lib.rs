//! BEI protocol handling for fevga.

pub mod command;
pub mod error;
pub mod event;
pub mod server;

pub use command::Command;
pub use error::BeiError;
pub use event::Event;
pub use server::BeiServer;
