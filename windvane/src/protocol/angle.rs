// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wind angle in degrees, decoded from the sensor's raw angle field.

/// Bits of angle magnitude left after dropping the two transport status bits.
const ANGLE_BITS: u32 = 14;
const ANGLE_MASK: u16 = (1 << ANGLE_BITS) - 1;

/// Degrees per LSB of the 14-bit magnitude (3600 / 163840 = 360 / 2^14).
pub const DEG_PER_LSB: f32 = 3600.0 / 163_840.0;

/// Sensed wind angle relative to the turbine heading, in degrees `[0, 360)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindAngle(f32);

impl WindAngle {
    pub const ZERO: Self = Self(0.0);

    /// Wrap a value already known to be in degrees.
    #[inline]
    pub fn from_degrees(deg: f32) -> Self {
        Self(deg)
    }

    /// Decode the 16-bit raw field: drop the two status LSBs, keep 14 bits, scale to degrees.
    #[inline]
    pub fn from_raw(raw: u16) -> Self {
        let counts = (raw >> 2) & ANGLE_MASK;
        Self(counts as f32 * DEG_PER_LSB)
    }

    #[inline]
    pub fn degrees(&self) -> f32 {
        self.0
    }

    /// Force the value into `[0, 360)`. NaN and negative values become 0.
    pub fn clamped(self) -> Self {
        let max = f32::from_bits(360.0_f32.to_bits() - 1);
        if self.0 >= 0.0 {
            Self(self.0.min(max))
        } else {
            Self::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_raw_value_lands_in_range() {
        for raw in 0..=u16::MAX {
            let deg = WindAngle::from_raw(raw).degrees();
            let expected = (((raw >> 2) as u32 % 16_384) as f32) * (3600.0 / 163_840.0);
            assert_eq!(deg, expected, "raw = {raw:#06x}");
            assert!((0.0..360.0).contains(&deg), "raw = {raw:#06x} gave {deg}");
        }
    }

    #[test]
    fn status_bits_do_not_move_the_angle() {
        assert_eq!(WindAngle::from_raw(0x0038), WindAngle::from_raw(0x003B));
    }

    #[test]
    fn known_sample_decodes_exactly() {
        // 0x0039 >> 2 = 14 counts
        assert_eq!(WindAngle::from_raw(0x0039).degrees(), 0.307_617_187_5);
    }

    #[test]
    fn clamp_keeps_in_range_values() {
        assert_eq!(WindAngle::from_degrees(123.5).clamped().degrees(), 123.5);
        assert_eq!(WindAngle::from_degrees(0.0).clamped().degrees(), 0.0);
    }

    #[test]
    fn clamp_pins_out_of_range_values() {
        assert_eq!(WindAngle::from_degrees(-4.0).clamped(), WindAngle::ZERO);
        assert_eq!(WindAngle::from_degrees(f32::NAN).clamped(), WindAngle::ZERO);

        let hi = WindAngle::from_degrees(720.0).clamped().degrees();
        assert!(hi < 360.0 && hi > 359.9);
    }
}
