//! Error types for the CLI.

use std::fmt;

#[derive(Debug)]
pub enum Error {
    /// Missing or malformed configuration.
    Config(String),
    /// RPC communication error.
    Rpc(String),
    /// Key loading or transaction signing failed.
    Signing(String),
    /// Bad command-line input.
    InvalidArgument(String),
    Io(std::io::Error),
    /// The transaction was included but its execution failed.
    TxFailed { tx_hash: String, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config error: {msg}"),
            Error::Rpc(msg) => write!(f, "rpc error: {msg}"),
            Error::Signing(msg) => write!(f, "signing error: {msg}"),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::Io(e) => write!(f, "io error: {e}"),
            Error::TxFailed { tx_hash, reason } => {
                write!(f, "transaction {tx_hash} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
