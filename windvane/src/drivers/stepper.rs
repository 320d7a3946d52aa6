// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Four-phase stepper on four GPIO lines (P1..P4), e.g. through a ULN2003 darlington array.

use embedded_hal::digital::{OutputPin, PinState};

/// One coil energization pattern. Bit 3 is P1, bit 0 is P4.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoilPattern(u8);

impl CoilPattern {
    pub const OFF: Self = Self(0);

    #[inline]
    pub const fn new(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    #[inline]
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Line states in (P1, P2, P3, P4) order.
    #[inline]
    pub fn phases(&self) -> [bool; 4] {
        [
            (self.0 & 0b1000) != 0,
            (self.0 & 0b0100) != 0,
            (self.0 & 0b0010) != 0,
            (self.0 & 0b0001) != 0,
        ]
    }
}

/// Anything that can put a coil pattern on the motor windings.
pub trait CoilDriver {
    type Error;

    fn energize(&mut self, pattern: CoilPattern) -> Result<(), Self::Error>;
}

/// Stepper windings on four output lines sharing one error type.
pub struct FourPhaseStepper<P1, P2, P3, P4> {
    p1: P1,
    p2: P2,
    p3: P3,
    p4: P4,
    current: CoilPattern,
}

impl<P1, P2, P3, P4, E> FourPhaseStepper<P1, P2, P3, P4>
where
    P1: OutputPin<Error = E>,
    P2: OutputPin<Error = E>,
    P3: OutputPin<Error = E>,
    P4: OutputPin<Error = E>,
{
    /// Take ownership of the four lines. Nothing is driven until the first `energize`.
    pub fn new(p1: P1, p2: P2, p3: P3, p4: P4) -> Self {
        Self {
            p1,
            p2,
            p3,
            p4,
            current: CoilPattern::OFF,
        }
    }

    /// Pattern most recently put on the lines.
    #[inline]
    pub fn current(&self) -> CoilPattern {
        self.current
    }

    /// Drive all four lines low.
    pub fn release(&mut self) -> Result<(), E> {
        self.energize(CoilPattern::OFF)
    }

    pub fn free(self) -> (P1, P2, P3, P4) {
        (self.p1, self.p2, self.p3, self.p4)
    }
}

impl<P1, P2, P3, P4, E> CoilDriver for FourPhaseStepper<P1, P2, P3, P4>
where
    P1: OutputPin<Error = E>,
    P2: OutputPin<Error = E>,
    P3: OutputPin<Error = E>,
    P4: OutputPin<Error = E>,
{
    type Error = E;

    fn energize(&mut self, pattern: CoilPattern) -> Result<(), E> {
        let [a, b, c, d] = pattern.phases();
        self.p1.set_state(PinState::from(a))?;
        self.p2.set_state(PinState::from(b))?;
        self.p3.set_state(PinState::from(c))?;
        self.p4.set_state(PinState::from(d))?;
        self.current = pattern;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Line(Rc<Cell<bool>>);

    impl ErrorType for Line {
        type Error = Infallible;
    }

    impl OutputPin for Line {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.set(true);
            Ok(())
        }
    }

    #[test]
    fn pattern_bits_map_to_lines_in_order() {
        assert_eq!(CoilPattern::new(0b1100).phases(), [true, true, false, false]);
        assert_eq!(CoilPattern::new(0b1001).phases(), [true, false, false, true]);
        assert_eq!(CoilPattern::new(0xF3).bits(), 0b0011);
    }

    #[test]
    fn energize_drives_each_line() {
        let lines: [Line; 4] = Default::default();
        let mut motor = FourPhaseStepper::new(
            lines[0].clone(),
            lines[1].clone(),
            lines[2].clone(),
            lines[3].clone(),
        );

        motor.energize(CoilPattern::new(0b0110)).unwrap();
        let levels: Vec<bool> = lines.iter().map(|l| l.0.get()).collect();
        assert_eq!(levels, [false, true, true, false]);
        assert_eq!(motor.current(), CoilPattern::new(0b0110));

        motor.release().unwrap();
        assert!(lines.iter().all(|l| !l.0.get()));
    }
}
