// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-at-a-time decoder for the arm command protocol.
//!
//! The decoder is meant to be fed straight from the serial receive interrupt: every call does a
//! fixed amount of work and never blocks. It only classifies bytes and assembles payloads; acting
//! on a frame and answering bad headers is left to the caller (see [`Link`](super::Link)).

use crate::protocol::messages::*;

/// What a single byte produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// The last data byte of a frame arrived.
    Frame(Frame),
    /// An info byte that is neither a command header nor EOT.
    UnknownHeader(u8),
}

/// Receive state: the header being assembled, how many data bytes are still missing, and the
/// payload buffer.
pub struct Parser {
    kind: Option<&'static FrameKind>,
    remaining: usize,
    buffer: [u8; BUFFER_LENGTH],
}

impl Parser {
    pub const fn new() -> Self {
        Self {
            kind: None,
            remaining: 0,
            buffer: [0; BUFFER_LENGTH],
        }
    }

    /// Back to idle: no header, nothing pending, buffer zeroed.
    pub fn reset(&mut self) {
        self.kind = None;
        self.remaining = 0;
        self.buffer = [0; BUFFER_LENGTH];
    }

    /// Header of the frame being assembled, if any.
    #[inline]
    pub fn header(&self) -> Option<u8> {
        self.kind.map(|kind| kind.header)
    }

    /// Data bytes still needed to complete the current frame.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[inline]
    pub fn buffer(&self) -> &[u8; BUFFER_LENGTH] {
        &self.buffer
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.kind.is_none() && self.remaining == 0
    }

    /// Process a single incoming byte. Returns an [`Event`] when the byte completes a frame or is
    /// a bad header.
    pub fn push(&mut self, byte: u8) -> Option<Event> {
        if is_info_byte(byte) {
            self.on_info_byte(byte)
        } else {
            self.on_data_byte(byte)
        }
    }

    fn on_info_byte(&mut self, byte: u8) -> Option<Event> {
        if byte == EOT_SYMBOL {
            self.reset();
            return None;
        }

        match frame_kind(byte) {
            Some(kind) => {
                // Any frame still being assembled is dropped here.
                self.buffer = [0; BUFFER_LENGTH];
                self.kind = Some(kind);
                self.remaining = kind.payload_len;
                None
            }
            None => {
                // Counters and buffer stay put, but a frame in progress is no longer trusted: it
                // runs to completion and is then discarded.
                self.kind = None;
                Some(Event::UnknownHeader(byte))
            }
        }
    }

    fn on_data_byte(&mut self, byte: u8) -> Option<Event> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        self.buffer[self.remaining] = byte;

        if self.remaining > 0 {
            return None;
        }

        let frame = self.kind.map(|kind| (kind.decode)(&self.buffer));
        self.reset();
        frame.map(Event::Frame)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
