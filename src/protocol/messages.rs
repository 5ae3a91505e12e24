// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Frame layouts of the arm command protocol.
//!
//! Every byte on the wire carries its role in the MSB: set for an info (header) byte, clear for a
//! data byte, so data bytes hold at most 7 payload bits. Multi-bit fields are packed 6 bits per
//! byte.
//!
//! The decoder stores data bytes into the payload buffer from the top index down, so the first
//! data byte after a header lands at `payload[len - 1]`. Layouts below are given by buffer
//! index; on the wire they appear in reverse.
//!
//! | Header | Len | `[0]` | `[1]` | `[2]` | `[3]` |
//! | ------ | --- | ----- | ----- | ----- | ----- |
//! | `0x80` basic control    | 4 | speed\[11:6\] | speed\[5:0\] | dir\[3:2\] en\[1:0\] | id\[4:0\] |
//! | `0x81` position control | 3 | pos\[11:6\]   | pos\[5:0\]   | id\[4:0\] | |
//! | `0x82` motor state      | 1 | id\[4:0\] | | | |
//! | `0x83` force sensor     | 1 | id\[2:0\] | | | |
//! | `0x84` EOT              | 0 | | | | |

use heapless::Vec;

use crate::hw::{Direction, EnableState};

/// MSB = 1: info byte, else data byte.
pub const INFO_BYTE_MASK: u8 = 0x80;

pub const MOTOR_BASIC_CONTROL_HEADER: u8 = 0x80;
pub const MOTOR_POSITION_CONTROL_HEADER: u8 = 0x81;
pub const REQUEST_MOTOR_STATE_HEADER: u8 = 0x82;
pub const REQUEST_FORCE_SENSOR_VALUE_HEADER: u8 = 0x83;
/// End of transmission: drops whatever frame is being assembled.
pub const EOT_SYMBOL: u8 = 0x84;

pub const MOTOR_BASIC_CONTROL_PAYLOAD_NUMBER: usize = 4;
pub const MOTOR_POSITION_CONTROL_PAYLOAD_NUMBER: usize = 3;
pub const REQUEST_MOTOR_STATE_PAYLOAD_NUMBER: usize = 1;
pub const REQUEST_FORCE_SENSOR_VALUE_PAYLOAD_NUMBER: usize = 1;

/// Capacity of the receive buffer; at least the longest payload.
pub const BUFFER_LENGTH: usize = 8;

/// Longest encoded frame: header plus the largest payload.
pub const MAX_FRAME_LENGTH: usize = BUFFER_LENGTH + 1;

/// Reply sent for an unrecognised info byte.
pub const ERROR_RESPONSE: [u8; 3] = [b'?', b'\r', b'\n'];

const SIX_BITS: u8 = 0x3F;
const ID_MASK: u8 = 0x1F;
const SENSOR_ID_MASK: u8 = 0x07;

/// Largest value of a 12-bit field.
pub const FIELD_12_MAX: u16 = 0x0FFF;

#[inline]
pub fn is_info_byte(byte: u8) -> bool {
    byte & INFO_BYTE_MASK == INFO_BYTE_MASK
}

#[inline]
fn split_12(value: u16) -> (u8, u8) {
    let hi = ((value >> 6) as u8) & SIX_BITS;
    let lo = (value as u8) & SIX_BITS;
    (hi, lo)
}

#[inline]
fn join_12(hi: u8, lo: u8) -> u16 {
    u16::from(lo & SIX_BITS) | (u16::from(hi & SIX_BITS) << 6)
}

impl EnableState {
    /// Two-bit wire value. `0b11` is not produced and decodes as `Disable`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            1 => EnableState::Enable,
            2 => EnableState::Toggle,
            _ => EnableState::Disable,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            EnableState::Disable => 0,
            EnableState::Enable => 1,
            EnableState::Toggle => 2,
        }
    }
}

impl Direction {
    /// Two-bit wire value. `0b11` is not produced and decodes as `Cw`.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            1 => Direction::Ccw,
            2 => Direction::Toggle,
            _ => Direction::Cw,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Direction::Cw => 0,
            Direction::Ccw => 1,
            Direction::Toggle => 2,
        }
    }
}

/// Set a motor's enable line, direction line and speed in one go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BasicControl {
    /// Joint id, 5 bits.
    pub id: u8,
    pub enable: EnableState,
    pub direction: Direction,
    /// Raw speed, 12 bits (0..=4095).
    pub speed: u16,
}

impl BasicControl {
    pub fn decode(payload: &[u8; MOTOR_BASIC_CONTROL_PAYLOAD_NUMBER]) -> Self {
        Self {
            id: payload[3] & ID_MASK,
            enable: EnableState::from_bits(payload[2]),
            direction: Direction::from_bits((payload[2] & 0x0C) >> 2),
            speed: join_12(payload[0], payload[1]),
        }
    }

    pub fn payload(&self) -> [u8; MOTOR_BASIC_CONTROL_PAYLOAD_NUMBER] {
        let (hi, lo) = split_12(self.speed);
        [
            hi,
            lo,
            (self.direction.bits() << 2) | self.enable.bits(),
            self.id & ID_MASK,
        ]
    }

    /// Speed rescaled from the 12-bit wire range to a 0–100 % duty request.
    pub fn speed_percent(&self) -> u8 {
        let speed = u32::from(self.speed.min(FIELD_12_MAX));
        (speed * 100 / u32::from(FIELD_12_MAX)) as u8
    }
}

/// Move a joint's goal position. Raw ADC units, no rescaling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionControl {
    /// Joint id, 5 bits.
    pub id: u8,
    /// Goal position, 12 bits (0..=4095).
    pub position: u16,
}

impl PositionControl {
    pub fn decode(payload: &[u8; MOTOR_POSITION_CONTROL_PAYLOAD_NUMBER]) -> Self {
        Self {
            id: payload[2] & ID_MASK,
            position: join_12(payload[0], payload[1]),
        }
    }

    pub fn payload(&self) -> [u8; MOTOR_POSITION_CONTROL_PAYLOAD_NUMBER] {
        let (hi, lo) = split_12(self.position);
        [hi, lo, self.id & ID_MASK]
    }
}

/// Ask for a motor's state. Id is 5 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateQuery {
    pub id: u8,
}

/// Ask for a force sensor reading. Id is 3 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorQuery {
    pub id: u8,
}

/// One decoded command frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Frame {
    BasicControl(BasicControl),
    PositionControl(PositionControl),
    StateQuery(StateQuery),
    SensorQuery(SensorQuery),
}

/// Header → payload length and decoder.
///
/// `decode` reads the first `payload_len` bytes of a full receive buffer.
pub struct FrameKind {
    pub header: u8,
    pub payload_len: usize,
    pub decode: fn(&[u8; BUFFER_LENGTH]) -> Frame,
}

/// Every command the decoder accepts. Adding a frame type means adding a row here.
pub static FRAME_KINDS: [FrameKind; 4] = [
    FrameKind {
        header: MOTOR_BASIC_CONTROL_HEADER,
        payload_len: MOTOR_BASIC_CONTROL_PAYLOAD_NUMBER,
        decode: |p| Frame::BasicControl(BasicControl::decode(&[p[0], p[1], p[2], p[3]])),
    },
    FrameKind {
        header: MOTOR_POSITION_CONTROL_HEADER,
        payload_len: MOTOR_POSITION_CONTROL_PAYLOAD_NUMBER,
        decode: |p| Frame::PositionControl(PositionControl::decode(&[p[0], p[1], p[2]])),
    },
    FrameKind {
        header: REQUEST_MOTOR_STATE_HEADER,
        payload_len: REQUEST_MOTOR_STATE_PAYLOAD_NUMBER,
        decode: |p| Frame::StateQuery(StateQuery { id: p[0] & ID_MASK }),
    },
    FrameKind {
        header: REQUEST_FORCE_SENSOR_VALUE_HEADER,
        payload_len: REQUEST_FORCE_SENSOR_VALUE_PAYLOAD_NUMBER,
        decode: |p| Frame::SensorQuery(SensorQuery { id: p[0] & SENSOR_ID_MASK }),
    },
];

/// Look up the frame kind announced by an info byte.
pub fn frame_kind(header: u8) -> Option<&'static FrameKind> {
    FRAME_KINDS.iter().find(|kind| kind.header == header)
}

impl Frame {
    /// Decode a completed payload. `None` if `header` is not a command header or the payload is
    /// shorter than the frame kind requires.
    pub fn decode(header: u8, payload: &[u8]) -> Option<Self> {
        let kind = frame_kind(header)?;
        let payload = payload.get(..kind.payload_len)?;

        let mut buffer = [0u8; BUFFER_LENGTH];
        buffer[..kind.payload_len].copy_from_slice(payload);
        Some((kind.decode)(&buffer))
    }

    pub fn header(&self) -> u8 {
        match self {
            Frame::BasicControl(_) => MOTOR_BASIC_CONTROL_HEADER,
            Frame::PositionControl(_) => MOTOR_POSITION_CONTROL_HEADER,
            Frame::StateQuery(_) => REQUEST_MOTOR_STATE_HEADER,
            Frame::SensorQuery(_) => REQUEST_FORCE_SENSOR_VALUE_HEADER,
        }
    }

    /// Joint (or sensor) id the frame addresses.
    pub fn id(&self) -> u8 {
        match self {
            Frame::BasicControl(f) => f.id,
            Frame::PositionControl(f) => f.id,
            Frame::StateQuery(f) => f.id,
            Frame::SensorQuery(f) => f.id,
        }
    }

    /// Encode for transmission: header, then data bytes in the order the receiver expects them.
    pub fn encode(&self) -> Vec<u8, MAX_FRAME_LENGTH> {
        let mut payload = [0u8; BUFFER_LENGTH];
        let len = match self {
            Frame::BasicControl(f) => {
                payload[..MOTOR_BASIC_CONTROL_PAYLOAD_NUMBER].copy_from_slice(&f.payload());
                MOTOR_BASIC_CONTROL_PAYLOAD_NUMBER
            }
            Frame::PositionControl(f) => {
                payload[..MOTOR_POSITION_CONTROL_PAYLOAD_NUMBER].copy_from_slice(&f.payload());
                MOTOR_POSITION_CONTROL_PAYLOAD_NUMBER
            }
            Frame::StateQuery(f) => {
                payload[0] = f.id & ID_MASK;
                REQUEST_MOTOR_STATE_PAYLOAD_NUMBER
            }
            Frame::SensorQuery(f) => {
                payload[0] = f.id & SENSOR_ID_MASK;
                REQUEST_FORCE_SENSOR_VALUE_PAYLOAD_NUMBER
            }
        };

        let mut out = Vec::new();
        // Capacity is header + BUFFER_LENGTH, so neither push can fail.
        let _ = out.push(self.header());
        for &b in payload[..len].iter().rev() {
            let _ = out.push(b);
        }
        out
    }
}
