// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! USART abstraction layer.
//!
//! Wraps the transmit half of any `embedded-hal` serial port. Every write blocks until the
//! peripheral has taken the byte, which is what the command link expects of its reply channel.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format string to ensure correct
//! line endings on the terminal.

use core::fmt;

use embedded_hal::serial::Write;
use nb::block;

use crate::hw::SerialTx;

pub struct Usart<TX> {
    tx: TX,
}

impl<TX: Write<u8>> Usart<TX> {
    pub fn new(tx: TX) -> Self {
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn free(self) -> TX {
        self.tx
    }
}

impl<TX: Write<u8>> SerialTx for Usart<TX> {
    #[inline]
    fn write_byte(&mut self, byte: u8) {
        Usart::write_byte(self, byte);
    }
}

// Implement `core::fmt::Write` so we can use `write!` / `writeln!` on `Usart`.
impl<TX: Write<u8>> fmt::Write for Usart<TX> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Usart::write_str(self, s);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use core::fmt::Write as _;

    /// Serial port that refuses every other write once, like a busy TX register.
    struct BusyPort {
        sent: Vec<u8>,
        busy: bool,
    }

    impl Write<u8> for BusyPort {
        type Error = Infallible;

        fn write(&mut self, word: u8) -> nb::Result<(), Infallible> {
            self.busy = !self.busy;
            if self.busy {
                return Err(nb::Error::WouldBlock);
            }
            self.sent.push(word);
            Ok(())
        }

        fn flush(&mut self) -> nb::Result<(), Infallible> {
            Ok(())
        }
    }

    #[test]
    fn blocks_through_would_block() {
        let mut usart = Usart::new(BusyPort {
            sent: Vec::new(),
            busy: false,
        });
        usart.println("?");
        assert_eq!(usart.free().sent, b"?\r\n");
    }

    #[test]
    fn formats_diagnostics() {
        let mut usart = Usart::new(BusyPort {
            sent: Vec::new(),
            busy: false,
        });
        write!(usart, "J: {}, G: {:4}\r\n", 1, 60).unwrap();
        assert_eq!(usart.free().sent, b"J: 1, G:   60\r\n");
    }
}
