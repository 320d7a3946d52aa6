// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Control
//!
//! Everything between a raw timer tick and a coil pattern on the motor pins.
//!
//! ## Modules
//!
//! - [`tick_gate`] - Divides the fixed tick rate into slower cadences.
//! - [`planner`] - Maps a wind angle to a direction and step budget.
//! - [`sequencer`] - Four-phase coil state machine.
//! - [`shared`] - Atomic state crossing the interrupt / main-loop boundary.
//! - [`yaw`] - The two execution contexts: [`MotorTask`] (interrupt) and [`YawLoop`] (main loop).

pub mod planner;
pub mod sequencer;
pub mod shared;
pub mod tick_gate;
pub mod yaw;

pub use planner::{Direction, StepPlan, StepPlanner};
pub use sequencer::{MotorState, Sequencer, StepOutcome};
pub use shared::{MainPort, Shared, TickPort};
pub use tick_gate::TickGate;
pub use yaw::{MotorTask, YawLoop};
