// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Hardware Abstraction Layer
//!
//! Thin wrappers around `stm32f7xx-hal` peripherals. Each wrapper implements one of the seam
//! traits from the `windvane` crate (or an `embedded-hal` 1.0 trait) so the controller logic never
//! touches HAL types directly.

pub mod adc;
pub mod delay;
pub mod led;
pub mod output;
pub mod pins;
pub mod pwm;
pub mod spi;
pub mod tick;
pub mod usart;

pub use adc::Adc;
pub use delay::SysDelay;
pub use led::Led;
pub use output::Line;
pub use pins::BoardPins;
pub use pwm::Actuator;
pub use spi::{ChipSelect, SpiBus};
pub use usart::Usart;
