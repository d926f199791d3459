//! Serial link errors

use std::io;

/// Errors raised by the host serial link
#[derive(Debug, thiserror::Error)]
pub enum SerialLinkError {
    /// The port could not be opened or configured
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// Port enumeration failed
    #[error("failed to enumerate serial ports: {0}")]
    Enumerate(#[source] serialport::Error),

    /// Read or write failed on an open port
    #[error("serial I/O error: {0}")]
    Io(#[from] io::Error),
}
