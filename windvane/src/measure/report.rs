// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Console report line.
//!
//! ```text
//! V1=1.23V, V2=0.45V Wind = 187.50 degrees\r
//! ```
//!
//! The line ends in a bare carriage return so a terminal redraws it in place.

use core::fmt;

use crate::protocol::WindAngle;

/// ANSI sequence that clears the terminal, written once at startup.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// One snapshot of the averaged voltages and the wind angle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Report {
    pub volts: [f32; 2],
    pub wind: WindAngle,
}

impl Report {
    pub fn new(volts: [f32; 2], wind: WindAngle) -> Self {
        Self { volts, wind }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "V1={:.2}V, V2={:.2}V Wind = {:.2} degrees\r",
            self.volts[0],
            self.volts[1],
            self.wind.degrees()
        )
    }
}
