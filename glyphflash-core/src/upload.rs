//! Serial upload driver
//!
//! Runs an [`UploadSession`] over a blocking link: wait for the handshake,
//! send each chunk and wait for its ack, then tail the device output until
//! the stream ends.
//!
//! The link is taken by value and dropped before returning, so the
//! connection is closed on every exit path.

use alloc::string::String;
use core::fmt;

use glyphflash_hal::uart::{Uart, UartRx};
use glyphflash_protocol::{LineAssembler, ProtocolError, Step, UploadSession};

/// Read buffer used while tailing device output
const MONITOR_BUF_LEN: usize = 64;

/// Progress callbacks for an upload
///
/// Every method has an empty default.
pub trait UploadObserver {
    /// Handshake received, transfer starting
    fn ready(&mut self) {}

    /// Chunk written, ack pending
    fn chunk_sent(&mut self, _offset: usize, _len: usize) {}

    /// Chunk acknowledged
    fn chunk_acked(&mut self, _acked: usize, _total: usize) {}

    /// One line of device output
    fn line(&mut self, _line: &str) {}
}

impl UploadObserver for () {}

/// Why monitoring stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEnd<E> {
    /// The device closed the stream
    Closed,
    /// Reading failed; this ends the tail, not the upload
    Faulted(E),
}

/// Summary of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport<E> {
    /// Chunks written and acknowledged
    pub chunks: usize,
    /// Payload bytes delivered
    pub bytes: usize,
    /// Device output lines seen while monitoring
    pub lines: usize,
    /// How monitoring ended
    pub monitor_end: MonitorEnd<E>,
}

/// Errors that abort an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError<E> {
    /// The link failed to read or write
    Link(E),
    /// The stream ended while a handshake or ack was expected
    Closed,
    /// The device sent an unexpected byte
    Protocol(ProtocolError),
}

impl<E> From<ProtocolError> for UploadError<E> {
    fn from(e: ProtocolError) -> Self {
        UploadError::Protocol(e)
    }
}

impl<E: fmt::Display> fmt::Display for UploadError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(e) => write!(f, "serial link failed: {}", e),
            Self::Closed => f.write_str("serial stream ended during transfer"),
            Self::Protocol(e) => write!(f, "protocol error: {}", e),
        }
    }
}

impl<E> core::error::Error for UploadError<E>
where
    E: core::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Link(e) => Some(e),
            Self::Closed => None,
            Self::Protocol(e) => Some(e),
        }
    }
}

/// Upload `payload` over `link`
///
/// Fails on the first I/O error or unexpected byte, with no retry. On
/// success the device output has been tailed to its end.
pub fn upload<L, O>(
    mut link: L,
    payload: &[u8],
    observer: &mut O,
) -> Result<UploadReport<L::Error>, UploadError<L::Error>>
where
    L: Uart,
    O: UploadObserver + ?Sized,
{
    let mut session = UploadSession::new(payload);

    loop {
        match session.poll() {
            Step::AwaitHandshake => {
                let byte = read_one(&mut link, &mut session)?;
                session.receive(byte)?;
                observer.ready();
            }
            Step::Send(chunk) => {
                let offset = payload.len() - session.remaining().len();
                if let Err(e) = link.write_blocking(chunk).and_then(|()| link.flush()) {
                    session.abort();
                    return Err(UploadError::Link(e));
                }
                observer.chunk_sent(offset, chunk.len());
            }
            Step::AwaitAck => {
                let byte = read_one(&mut link, &mut session)?;
                session.receive(byte)?;
                observer.chunk_acked(payload.len() - session.remaining().len(), payload.len());
            }
            Step::Monitor => break,
            Step::Aborted(e) => return Err(e.into()),
        }
    }

    let chunks = session.chunks_sent();
    let (lines, monitor_end) = monitor(&mut link, observer);

    Ok(UploadReport {
        chunks,
        bytes: payload.len(),
        lines,
        monitor_end,
    })
}

/// Tail newline-delimited device output until the stream ends or fails
///
/// Returns the number of lines passed to the observer.
pub fn monitor<R, O>(link: &mut R, observer: &mut O) -> (usize, MonitorEnd<R::Error>)
where
    R: UartRx + ?Sized,
    O: UploadObserver + ?Sized,
{
    let mut assembler = LineAssembler::new();
    let mut buf = [0u8; MONITOR_BUF_LEN];
    let mut lines = 0;

    let mut emit = |line: &[u8]| {
        observer.line(&String::from_utf8_lossy(line));
        lines += 1;
    };

    let end = loop {
        match link.read_blocking(&mut buf) {
            Ok(0) => break MonitorEnd::Closed,
            Ok(n) => assembler.feed(&buf[..n], &mut emit),
            Err(e) => break MonitorEnd::Faulted(e),
        }
    };
    assembler.finish(&mut emit);

    (lines, end)
}

fn read_one<L: UartRx>(
    link: &mut L,
    session: &mut UploadSession<'_>,
) -> Result<u8, UploadError<L::Error>> {
    match link.read_byte() {
        Ok(Some(byte)) => Ok(byte),
        Ok(None) => {
            session.abort();
            Err(UploadError::Closed)
        }
        Err(e) => {
            session.abort();
            Err(UploadError::Link(e))
        }
    }
}
