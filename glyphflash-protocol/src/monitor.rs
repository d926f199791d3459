//! Device output line assembly
//!
//! After the transfer the device prints newline-terminated diagnostics.
//! Bytes are collected until `\n`; a trailing `\r` is dropped. Lines that
//! outgrow the buffer are emitted in `MAX_LINE_LEN` pieces.

use heapless::Vec;

/// Longest line emitted in one piece
pub const MAX_LINE_LEN: usize = 256;

/// Splits a byte stream into lines
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Vec<u8, MAX_LINE_LEN>,
    /// `\r` seen while the buffer was full, not yet known to end the line
    pending_cr: bool,
}

impl LineAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            pending_cr: false,
        }
    }

    /// Feed received bytes, calling `on_line` for every completed line
    pub fn feed(&mut self, bytes: &[u8], mut on_line: impl FnMut(&[u8])) {
        for &byte in bytes {
            if byte == b'\n' {
                on_line(trim_cr(self.buffer.as_slice()));
                self.buffer.clear();
                self.pending_cr = false;
                continue;
            }
            if self.pending_cr {
                // The held `\r` belongs to the next piece
                self.pending_cr = false;
                self.flush_piece(b'\r', &mut on_line);
            }
            if self.buffer.is_full() && byte == b'\r' {
                self.pending_cr = true;
                continue;
            }
            if self.buffer.push(byte).is_err() {
                self.flush_piece(byte, &mut on_line);
            }
        }
    }

    /// Emit whatever is left once the stream has ended
    pub fn finish(&mut self, mut on_line: impl FnMut(&[u8])) {
        if !self.buffer.is_empty() {
            on_line(trim_cr(self.buffer.as_slice()));
            self.buffer.clear();
        }
        self.pending_cr = false;
    }

    /// Emit the full buffer as one piece and start the next with `first`
    fn flush_piece(&mut self, first: u8, on_line: &mut impl FnMut(&[u8])) {
        on_line(self.buffer.as_slice());
        self.buffer.clear();
        // Cannot fail on an empty buffer
        let _ = self.buffer.push(first);
    }
}

fn trim_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
