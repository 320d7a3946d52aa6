// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Windvane Yaw Controller
//!
//! Core logic for a wind-vane-following turbine yaw drive: an MLX90316-class angle sensor is
//! polled over SPI, the sensed wind angle is turned into a step plan, and a four-phase stepper is
//! sequenced from a periodic timer interrupt to follow it.
//!
//! The crate is `no_std` and hardware-agnostic. Board bring-up lives in the `windvane-fw` crate,
//! which implements the seam traits defined here on top of `stm32f7xx-hal`.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`config`] | Timing constants, gate divisors and the runtime [`Config`](config::Config) |
//! | [`control`] | Tick gates, step planner, coil sequencer and the interrupt/main-loop split |
//! | [`protocol`] | Sensor frame layout and wind angle decoding |
//! | [`drivers`] | Device-level drivers (MLX90316 link, four-phase stepper, actuator duty) |
//! | [`measure`] | Windowed voltage averaging and the console report line |
//!
//! ## Getting Started
//!
//! Run the host tests:
//!
//! ```bash
//! cargo test
//! ```
//!
//! Flash the board:
//!
//! ```bash
//! cd windvane_fw && cargo run --release
//! ```
//!
//! ## License
//!
//! Licensed under the **MIT License**.
//!
//! © 2025–2026 Christopher Liu

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod control;
pub mod drivers;
pub mod measure;
pub mod protocol;

pub use config::Config;
