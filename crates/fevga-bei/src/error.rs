//! BEI protocol errors.

use fevga_core::StateError;

/// Errors that end a BEI connection. The listener logs them and keeps
/// serving other clients.
#[derive(Debug, thiserror::Error)]
pub enum BeiError {
    /// The first line of a connection was not the `bei` handshake.
    #[error("expected bei handshake, received \"{received}\"")]
    MissingHandshake {
        /// The line received instead.
        received: String,
    },

    /// An unrecognized command line.
    #[error("unknown command: \"{command}\"")]
    UnknownCommand {
        /// The offending line.
        command: String,
    },

    /// The state payload of a `move`/`choose` command failed to decode.
    #[error("invalid state: {source}")]
    InvalidState {
        /// The underlying decode error.
        #[from]
        source: StateError,
    },

    /// `choose` was requested for a game without a doubles choice.
    #[error("choose requested for a non-acey-deucey state")]
    ChooseWithoutAcey,

    /// An event failed to encode.
    #[error("failed to encode event: {source}")]
    Encode {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// An I/O error on the connection or listener.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
