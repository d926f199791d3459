//! Upload session state machine
//!
//! The session decides what happens next; the caller performs the I/O and
//! reports back. One session covers exactly one upload.
//!
//! States:
//! - `AwaitGo`: waiting for the device's handshake byte
//! - `Transferring`: sending chunks, one outstanding at a time
//! - `Monitoring`: payload delivered, device output is tailed
//! - `Aborted`: a protocol or transport fault ended the session

use core::fmt;

use crate::chunk::chunk_len;
use crate::wire::{ACK, HANDSHAKE};

/// Errors that end an upload session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// First byte from the device was not the handshake
    UnexpectedHandshake(u8),
    /// Acknowledgment for the chunk starting at `offset` was wrong
    UnexpectedAck { byte: u8, offset: usize },
    /// Byte delivered while the session was not waiting for one
    UnexpectedByte(u8),
    /// The session was aborted by the caller (transport failure)
    Aborted,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedHandshake(byte) => write!(
                f,
                "expected handshake {:?}, device sent {:?} (0x{:02x})",
                HANDSHAKE as char, *byte as char, byte
            ),
            Self::UnexpectedAck { byte, offset } => write!(
                f,
                "expected ack {:?} for chunk at offset {}, device sent {:?} (0x{:02x})",
                ACK as char, offset, *byte as char, byte
            ),
            Self::UnexpectedByte(byte) => {
                write!(f, "unexpected byte 0x{:02x} outside of a read", byte)
            }
            Self::Aborted => f.write_str("session aborted"),
        }
    }
}

impl core::error::Error for ProtocolError {}

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Nothing sent yet, waiting for the handshake
    AwaitGo,
    /// Handshake received, payload in flight
    Transferring,
    /// Every chunk acknowledged
    Monitoring,
    /// Terminal failure
    Aborted(ProtocolError),
}

/// What the caller must do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Read one byte and pass it to [`UploadSession::receive`]
    AwaitHandshake,
    /// Write this chunk in full
    Send(&'a [u8]),
    /// Read one byte and pass it to [`UploadSession::receive`]
    AwaitAck,
    /// Transfer finished; tail the device output
    Monitor,
    /// Transfer failed; close the connection
    Aborted(ProtocolError),
}

/// Protocol state for one upload
#[derive(Debug, Clone)]
pub struct UploadSession<'a> {
    payload: &'a [u8],
    /// Bytes acknowledged so far
    acked: usize,
    /// Length of the chunk written but not yet acknowledged
    outstanding: Option<usize>,
    state: SessionState,
    chunks_sent: usize,
}

impl<'a> UploadSession<'a> {
    /// Start a session for `payload`
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            acked: 0,
            outstanding: None,
            state: SessionState::AwaitGo,
            chunks_sent: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Payload bytes not yet acknowledged
    pub fn remaining(&self) -> &'a [u8] {
        &self.payload[self.acked..]
    }

    /// Number of chunks handed out for writing
    pub fn chunks_sent(&self) -> usize {
        self.chunks_sent
    }

    /// Decide the next action
    ///
    /// In `Transferring` with no chunk outstanding this hands out the next
    /// chunk and marks it outstanding, so the caller must write it before
    /// polling again.
    pub fn poll(&mut self) -> Step<'a> {
        match self.state {
            SessionState::AwaitGo => Step::AwaitHandshake,
            SessionState::Transferring => {
                if self.outstanding.is_some() {
                    return Step::AwaitAck;
                }
                let remaining = self.remaining();
                let len = chunk_len(remaining.len());
                self.outstanding = Some(len);
                self.chunks_sent += 1;
                Step::Send(&remaining[..len])
            }
            SessionState::Monitoring => Step::Monitor,
            SessionState::Aborted(err) => Step::Aborted(err),
        }
    }

    /// Feed a byte read from the device
    ///
    /// Valid while waiting for the handshake or for an ack. Any mismatch
    /// aborts the session and is returned.
    pub fn receive(&mut self, byte: u8) -> Result<(), ProtocolError> {
        match self.state {
            SessionState::AwaitGo => {
                if byte != HANDSHAKE {
                    return Err(self.fail(ProtocolError::UnexpectedHandshake(byte)));
                }
                self.state = self.after_ack();
                Ok(())
            }
            SessionState::Transferring => match self.outstanding {
                Some(len) => {
                    if byte != ACK {
                        let offset = self.acked;
                        return Err(self.fail(ProtocolError::UnexpectedAck { byte, offset }));
                    }
                    self.outstanding = None;
                    self.acked += len;
                    self.state = self.after_ack();
                    Ok(())
                }
                None => Err(self.fail(ProtocolError::UnexpectedByte(byte))),
            },
            SessionState::Monitoring => Err(ProtocolError::UnexpectedByte(byte)),
            SessionState::Aborted(err) => Err(err),
        }
    }

    /// Abort after a transport failure
    pub fn abort(&mut self) {
        if !matches!(self.state, SessionState::Aborted(_)) {
            self.state = SessionState::Aborted(ProtocolError::Aborted);
        }
    }

    fn after_ack(&self) -> SessionState {
        if self.acked == self.payload.len() {
            SessionState::Monitoring
        } else {
            SessionState::Transferring
        }
    }

    fn fail(&mut self, err: ProtocolError) -> ProtocolError {
        self.outstanding = None;
        self.state = SessionState::Aborted(err);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// Drive a session against a scripted device, returning chunk sizes
    fn drive(payload: &[u8], replies: &[u8]) -> (Vec<usize>, SessionState) {
        let mut session = UploadSession::new(payload);
        let mut replies = replies.iter().copied();
        let mut writes = Vec::new();

        loop {
            match session.poll() {
                Step::AwaitHandshake | Step::AwaitAck => match replies.next() {
                    Some(byte) => {
                        let _ = session.receive(byte);
                    }
                    None => session.abort(),
                },
                Step::Send(chunk) => writes.push(chunk.len()),
                Step::Monitor | Step::Aborted(_) => break,
            }
        }

        (writes, session.state())
    }

    #[test]
    fn test_no_chunk_before_handshake() {
        let payload = [1u8; 10];
        let mut session = UploadSession::new(&payload);
        assert_eq!(session.poll(), Step::AwaitHandshake);
        assert_eq!(session.poll(), Step::AwaitHandshake);
        assert_eq!(session.chunks_sent(), 0);
    }

    #[test]
    fn test_250_bytes_acked() {
        let payload = [7u8; 250];
        let (writes, state) = drive(&payload, b"glll");
        assert_eq!(writes, [100, 100, 50]);
        assert_eq!(state, SessionState::Monitoring);
    }

    #[test]
    fn test_bad_handshake_sends_nothing() {
        let payload = [7u8; 250];
        let (writes, state) = drive(&payload, b"xlll");
        assert!(writes.is_empty());
        assert_eq!(
            state,
            SessionState::Aborted(ProtocolError::UnexpectedHandshake(b'x'))
        );
    }

    #[test]
    fn test_bad_ack_stops_transfer() {
        let payload = [7u8; 350];
        let (writes, state) = drive(&payload, b"glXll");
        assert_eq!(writes, [100, 100]);
        assert_eq!(
            state,
            SessionState::Aborted(ProtocolError::UnexpectedAck {
                byte: b'X',
                offset: 100
            })
        );
    }

    #[test]
    fn test_empty_payload_goes_straight_to_monitoring() {
        let (writes, state) = drive(&[], b"g");
        assert!(writes.is_empty());
        assert_eq!(state, SessionState::Monitoring);
    }

    #[test]
    fn test_one_outstanding_chunk() {
        let payload = [0u8; 150];
        let mut session = UploadSession::new(&payload);
        session.receive(HANDSHAKE).unwrap();

        assert!(matches!(session.poll(), Step::Send(c) if c.len() == 100));
        assert_eq!(session.poll(), Step::AwaitAck);
        assert_eq!(session.remaining().len(), 150);

        session.receive(ACK).unwrap();
        assert_eq!(session.remaining().len(), 50);
        assert!(matches!(session.poll(), Step::Send(c) if c.len() == 50));
    }

    #[test]
    fn test_byte_without_outstanding_chunk_aborts() {
        let payload = [0u8; 10];
        let mut session = UploadSession::new(&payload);
        session.receive(HANDSHAKE).unwrap();
        assert_eq!(
            session.receive(ACK),
            Err(ProtocolError::UnexpectedByte(ACK))
        );
        assert_eq!(
            session.state(),
            SessionState::Aborted(ProtocolError::UnexpectedByte(ACK))
        );
    }

    #[test]
    fn test_abort_is_sticky() {
        let payload = [0u8; 10];
        let mut session = UploadSession::new(&payload);
        session.abort();
        assert_eq!(session.poll(), Step::Aborted(ProtocolError::Aborted));
        assert_eq!(session.receive(HANDSHAKE), Err(ProtocolError::Aborted));
    }
}
