// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Measurement
//!
//! Slow-cadence analog sampling for the operator console.
//!
//! - [`meter`] - Samples two ADC channels on a tick gate and averages them over a window.
//! - [`report`] - The console line combining the averages with the current wind angle.

pub mod meter;
pub mod report;

pub use meter::VoltageMeter;
pub use report::Report;

/// Trait for reading a single channel from an ADC peripheral.
pub trait AdcRead {
    fn read_channel(&mut self, ch: u8) -> u16;
}
