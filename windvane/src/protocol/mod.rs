// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Angle Sensor Protocol
//!
//! Framing for the MLX90316 SPI response and conversion of its angle field into degrees. The wire
//! side (select line, byte exchange, settling delays) lives in [`crate::drivers::mlx90316`].
//!
//! ## Modules
//!
//! - [`frame`] - Frame layout, sync bytes and the byte collector.
//! - [`angle`] - [`WindAngle`] and raw-field decoding.

pub mod angle;
pub mod frame;

pub use angle::WindAngle;
pub use frame::{FrameCollector, SensorFrame};
