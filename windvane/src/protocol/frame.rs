// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Layout of the 10-byte MLX90316 response frame.
//!
//! ```text
//! byte:  0      1      2        3        4..9
//!        sync   sync   raw MSB  raw LSB  (unused)
//!                               bit 0 = valid
//! ```

use crate::protocol::angle::WindAngle;

/// First byte clocked out after select, starts a frame.
pub const START_BYTE: u8 = 0xAA;

/// Second sync byte, and the filler clocked out while receiving.
pub const FILLER_BYTE: u8 = 0xFF;

/// Bytes exchanged per frame.
pub const FRAME_LEN: usize = 10;

/// Index of the raw angle MSB.
const RAW_MSB: usize = 2;
/// Index of the raw angle LSB (also carries the validity bit).
const RAW_LSB: usize = 3;

/// A complete response frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFrame {
    bytes: [u8; FRAME_LEN],
}

impl SensorFrame {
    #[inline]
    pub fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    /// Big-endian 16-bit field formed from bytes 2 and 3.
    #[inline]
    pub fn raw(&self) -> u16 {
        u16::from_be_bytes([self.bytes[RAW_MSB], self.bytes[RAW_LSB]])
    }

    /// Validity flag: bit 0 of byte 3.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (self.bytes[RAW_LSB] & 0x01) != 0
    }

    /// Decoded wind angle, or `None` if the sensor flagged the sample as untrustworthy.
    pub fn angle(&self) -> Option<WindAngle> {
        if self.is_valid() {
            Some(WindAngle::from_raw(self.raw()))
        } else {
            None
        }
    }
}

/// Collects exchanged bytes until a full frame is present.
///
/// The current length doubles as the link's frame position `k`: `0..FRAME_LEN` while bytes are
/// still being exchanged, `FRAME_LEN` once the frame is ready to be closed.
pub struct FrameCollector {
    bytes: [u8; FRAME_LEN],
    len: usize,
}

impl FrameCollector {
    pub const fn new() -> Self {
        Self {
            bytes: [0; FRAME_LEN],
            len: 0,
        }
    }

    /// Frame position of the next exchange.
    #[inline]
    pub fn position(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.len == FRAME_LEN
    }

    /// Byte to clock out at the current position.
    #[inline]
    pub fn outgoing(&self) -> u8 {
        if self.len == 0 {
            START_BYTE
        } else {
            FILLER_BYTE
        }
    }

    /// Store one received byte. Bytes past the end of a full frame are ignored.
    pub fn push(&mut self, byte: u8) {
        if self.len < FRAME_LEN {
            self.bytes[self.len] = byte;
            self.len += 1;
        }
    }

    /// Take the frame if all bytes are in, and start over. Partial frames are never returned.
    pub fn take(&mut self) -> Option<SensorFrame> {
        if !self.is_complete() {
            return None;
        }
        self.len = 0;
        Some(SensorFrame::new(self.bytes))
    }

    /// Drop whatever has been collected so far.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }
}

impl Default for FrameCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(msb: u8, lsb: u8) -> SensorFrame {
        SensorFrame::new([0xAA, 0xFF, msb, lsb, 0, 0, 0, 0, 0, 0])
    }

    #[test]
    fn raw_field_is_big_endian() {
        assert_eq!(frame(0x12, 0x35).raw(), 0x1235);
    }

    #[test]
    fn validity_is_lsb_of_byte_three() {
        assert!(frame(0x00, 0x39).is_valid());
        assert!(!frame(0xFF, 0xFE).is_valid());
        assert_eq!(frame(0xFF, 0xFE).angle(), None);
    }

    #[test]
    fn collector_sends_start_then_filler() {
        let mut c = FrameCollector::new();
        assert_eq!(c.outgoing(), START_BYTE);
        c.push(0x00);
        assert_eq!(c.outgoing(), FILLER_BYTE);
    }

    #[test]
    fn partial_frame_is_never_taken() {
        let mut c = FrameCollector::new();
        for b in 0..(FRAME_LEN as u8 - 1) {
            c.push(b);
            assert!(c.take().is_none());
        }
        assert_eq!(c.position(), FRAME_LEN - 1);

        c.push(0x99);
        let f = c.take().unwrap();
        assert_eq!(f.bytes()[FRAME_LEN - 1], 0x99);
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn reset_discards_partial_bytes() {
        let mut c = FrameCollector::new();
        c.push(1);
        c.push(2);
        c.reset();
        assert_eq!(c.position(), 0);
        assert_eq!(c.outgoing(), START_BYTE);
    }
}
