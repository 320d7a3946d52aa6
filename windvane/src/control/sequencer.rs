// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Four-phase coil sequencer.
//!
//! Called once per gated motor tick. Walks a 4-entry two-phase-on table in the commanded
//! direction. The step budget is a "steps pending" signal refreshed by the planner; it is not
//! decremented here.

use crate::control::planner::{Direction, StepPlan};
use crate::drivers::stepper::{CoilDriver, CoilPattern};

/// Clockwise energization order over (P1, P2, P3, P4).
pub const CW_SEQUENCE: [CoilPattern; 4] = [
    CoilPattern::new(0b1100),
    CoilPattern::new(0b0110),
    CoilPattern::new(0b0011),
    CoilPattern::new(0b1001),
];

/// Counter-clockwise energization order over (P1, P2, P3, P4).
pub const CCW_SEQUENCE: [CoilPattern; 4] = [
    CoilPattern::new(0b1001),
    CoilPattern::new(0b0011),
    CoilPattern::new(0b0110),
    CoilPattern::new(0b1100),
];

/// What happened on one gated tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepOutcome {
    /// Motion disabled; coils keep their last pattern for holding torque.
    Held,
    /// Motion enabled but no budget in the selected direction.
    Idle,
    /// Coils were driven with this pattern.
    Stepped(CoilPattern),
}

/// Motor state, owned by the sequencer for the life of the process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorState {
    coil_step: u8,
    enabled: bool,
    direction: Direction,
    steps_cw: u8,
    steps_ccw: u8,
    total_steps: u32,
}

impl MotorState {
    #[inline]
    pub fn coil_step(&self) -> u8 {
        self.coil_step
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn steps_cw(&self) -> u8 {
        self.steps_cw
    }

    #[inline]
    pub fn steps_ccw(&self) -> u8 {
        self.steps_ccw
    }

    /// Coil steps taken since startup (wraps at `u32::MAX`).
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Take over the latest plan. A disabled plan clears both budgets and keeps the direction.
    fn absorb(&mut self, plan: &StepPlan) {
        self.enabled = plan.enabled;
        if plan.enabled {
            self.direction = plan.direction;
            self.steps_cw = plan.steps_cw;
            self.steps_ccw = plan.steps_ccw;
        } else {
            self.steps_cw = 0;
            self.steps_ccw = 0;
        }
    }

    fn budget(&self) -> u8 {
        match self.direction {
            Direction::Cw => self.steps_cw,
            Direction::Ccw => self.steps_ccw,
        }
    }
}

pub struct Sequencer {
    state: MotorState,
}

impl Sequencer {
    /// Start at coil step 0, clockwise, no budget.
    pub const fn new() -> Self {
        Self {
            state: MotorState {
                coil_step: 0,
                enabled: false,
                direction: Direction::Cw,
                steps_cw: 0,
                steps_ccw: 0,
                total_steps: 0,
            },
        }
    }

    #[inline]
    pub fn state(&self) -> &MotorState {
        &self.state
    }

    /// Pattern that the next step in `direction` would energize.
    #[inline]
    pub fn pattern_for(&self, direction: Direction) -> CoilPattern {
        let table = match direction {
            Direction::Cw => &CW_SEQUENCE,
            Direction::Ccw => &CCW_SEQUENCE,
        };
        table[self.state.coil_step as usize]
    }

    /// Run one gated motor tick against `plan`.
    ///
    /// If the coil driver fails, the coil step and step count are not advanced.
    pub fn on_motor_tick<C: CoilDriver>(
        &mut self,
        plan: &StepPlan,
        coils: &mut C,
    ) -> Result<StepOutcome, C::Error> {
        self.state.absorb(plan);

        if !self.state.enabled {
            return Ok(StepOutcome::Held);
        }
        if self.state.budget() == 0 {
            return Ok(StepOutcome::Idle);
        }

        let pattern = self.pattern_for(self.state.direction);
        coils.energize(pattern)?;

        self.state.total_steps = self.state.total_steps.wrapping_add(1);
        self.state.coil_step = (self.state.coil_step + 1) % 4;

        Ok(StepOutcome::Stepped(pattern))
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}
