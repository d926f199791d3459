//! Wire constants
//!
//! These values are compiled into the receiving firmware and must never
//! change independently of it.

/// Sent once by the device when it is ready to receive
pub const HANDSHAKE: u8 = b'g';

/// Sent by the device after each chunk has been consumed
pub const ACK: u8 = b'l';

/// Maximum payload bytes per write before an ack is required
///
/// Matches the device's receive buffer.
pub const CHUNK_SIZE: usize = 100;
