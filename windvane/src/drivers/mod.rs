// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Device-Specific Drivers
//!
//! This module contains device-specific drivers that sit above the board's HAL wrappers and below
//! the control logic. Drivers are generic over `embedded-hal` traits plus the small seam traits
//! defined here, so the firmware supplies the hardware and the host tests supply mocks.
//!
//! ## Existing drivers
//!
//! - [`mlx90316`] – Melexis MLX90316 rotary position sensor, 10-byte polled SPI frame
//! - [`stepper`] – Four-phase (two-phase-on) stepper driven from four GPIO lines
//! - [`actuator`] – 8-bit duty output for the PWM actuator channel

pub mod actuator;
pub mod mlx90316;
pub mod stepper;

pub use actuator::DutyOutput;
pub use mlx90316::{ByteLink, LinkStatus, Mlx90316};
pub use stepper::{CoilDriver, CoilPattern, FourPhaseStepper};
