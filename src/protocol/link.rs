// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Receive side of the serial command link.
//!
//! Call [`Link::on_byte_received`] from the USART receive interrupt with every byte read from the
//! data register.
//!
//! ```ignore
//! #[interrupt]
//! fn USART2() {
//!     interrupt::free(|cs| {
//!         if let Some(board) = BOARD.borrow(cs).borrow_mut().as_mut() {
//!             match board.rx.read() {
//!                 Ok(byte) => {
//!                     let _ = board.link.on_byte_received(&mut board.arm, &mut board.usart, byte);
//!                 }
//!                 Err(_) => board.link.reset(),
//!             }
//!         }
//!     });
//! }
//! ```

use core::fmt::Write;

use crate::control::JointGoals;
use crate::error::Error;
use crate::hw::{JointBank, SerialTx};
use crate::protocol::dispatcher::Dispatcher;
use crate::protocol::messages::{Frame, ERROR_RESPONSE};
use crate::protocol::parser::{Event, Parser};

pub struct Link<'g> {
    parser: Parser,
    dispatcher: Dispatcher<'g>,
}

impl<'g> Link<'g> {
    pub fn new(goals: &'g JointGoals) -> Self {
        Self {
            parser: Parser::new(),
            dispatcher: Dispatcher::new(goals),
        }
    }

    #[inline]
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Feed one received byte.
    ///
    /// Bad headers are answered with `?\r\n` on `tx`. Completed frames are dispatched; a frame
    /// that cannot be acted on gets a one-line diagnostic on `tx` and its error is returned.
    /// Returns the frame that was dispatched, if this byte completed one.
    pub fn on_byte_received<A, T>(
        &mut self,
        arm: &mut A,
        tx: &mut T,
        byte: u8,
    ) -> Result<Option<Frame>, Error<A::Error>>
    where
        A: JointBank,
        T: SerialTx,
    {
        match self.parser.push(byte) {
            None => Ok(None),
            Some(Event::UnknownHeader(_)) => {
                tx.write_bytes(&ERROR_RESPONSE);
                Ok(None)
            }
            Some(Event::Frame(frame)) => match self.dispatcher.dispatch(arm, frame) {
                Ok(()) => Ok(Some(frame)),
                Err(e) => {
                    let _ = write!(tx, "E: {}\r\n", e);
                    Err(e)
                }
            },
        }
    }

    /// Drop any partially received frame.
    pub fn reset(&mut self) {
        self.parser.reset();
    }
}
