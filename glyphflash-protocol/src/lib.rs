//! Serial Upload Protocol
//!
//! This crate defines the byte-level protocol the host uses to stream a
//! payload to an attached microcontroller. It is deliberately tiny: the
//! device's receive buffer is fixed at build time, so flow control is a
//! static window of one chunk guarded by a single-byte acknowledgment.
//!
//! # Protocol Overview
//!
//! ```text
//!  host                                  device
//!   │ ◄──────────── 'g' (0x67) ──────────── │  ready
//!   │ ───────────── chunk ≤100B ──────────► │
//!   │ ◄──────────── 'l' (0x6C) ──────────── │  ack
//!   │                  ...                  │
//!   │ ◄──────────── text lines ──────────── │  diagnostics
//! ```
//!
//! Any unexpected byte is a framing desync and ends the session. There is
//! no retry.
//!
//! The crate performs no I/O. [`UploadSession`] is driven by the caller,
//! which reads and writes on its behalf.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod chunk;
pub mod monitor;
pub mod session;
pub mod wire;

pub use chunk::{chunk_count, Chunks};
pub use monitor::{LineAssembler, MAX_LINE_LEN};
pub use session::{ProtocolError, SessionState, Step, UploadSession};
pub use wire::{ACK, CHUNK_SIZE, HANDSHAKE};
