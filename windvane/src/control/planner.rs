// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Step planner: wind angle to rotation direction and step budget.
//!
//! Angles within one step of alignment (either side of 0°/360°) fall in the dead-band and disable
//! motion, so the vane does not hunt around its aligned position. Outside the dead-band the
//! circle is split at 180°: the near half turns clockwise, the far half counter-clockwise.

use micromath::F32Ext;

use crate::protocol::WindAngle;

/// Rotation direction of the yaw motor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    #[default]
    Cw,
    Ccw,
}

/// Output of the planner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepPlan {
    pub enabled: bool,
    pub direction: Direction,
    pub steps_cw: u8,
    pub steps_ccw: u8,
}

// Packed layout used to hand a plan across the interrupt boundary in one word.
const BITS_CCW_SHIFT: u32 = 8;
const BIT_DIRECTION: u32 = 1 << 16;
const BIT_ENABLED: u32 = 1 << 17;

impl StepPlan {
    /// Motion disabled, no budget.
    pub const HOLD: Self = Self {
        enabled: false,
        direction: Direction::Cw,
        steps_cw: 0,
        steps_ccw: 0,
    };

    /// Budget of the currently selected direction.
    #[inline]
    pub fn budget(&self) -> u8 {
        match self.direction {
            Direction::Cw => self.steps_cw,
            Direction::Ccw => self.steps_ccw,
        }
    }

    pub fn to_bits(self) -> u32 {
        let mut bits = self.steps_cw as u32 | ((self.steps_ccw as u32) << BITS_CCW_SHIFT);
        if self.direction == Direction::Ccw {
            bits |= BIT_DIRECTION;
        }
        if self.enabled {
            bits |= BIT_ENABLED;
        }
        bits
    }

    pub fn from_bits(bits: u32) -> Self {
        Self {
            enabled: bits & BIT_ENABLED != 0,
            direction: if bits & BIT_DIRECTION != 0 {
                Direction::Ccw
            } else {
                Direction::Cw
            },
            steps_cw: (bits & 0xFF) as u8,
            steps_ccw: ((bits >> BITS_CCW_SHIFT) & 0xFF) as u8,
        }
    }
}

/// Stateless planner parameterized by the step angle.
#[derive(Copy, Clone, Debug)]
pub struct StepPlanner {
    step_angle: f32,
}

impl StepPlanner {
    pub fn new(step_angle_deg: f32) -> Self {
        Self {
            step_angle: step_angle_deg,
        }
    }

    #[inline]
    pub fn step_angle(&self) -> f32 {
        self.step_angle
    }

    /// Compute the plan for `angle`. The input is clamped to `[0, 360)` first.
    pub fn plan(&self, angle: WindAngle) -> StepPlan {
        let deg = angle.clamped().degrees();
        let step = self.step_angle;

        // Both dead-band edges are inclusive of motion.
        if deg < step || deg > 360.0 - step {
            return StepPlan::HOLD;
        }

        if deg <= 180.0 {
            StepPlan {
                enabled: true,
                direction: Direction::Cw,
                steps_cw: F32Ext::floor(deg / step) as u8,
                steps_ccw: 0,
            }
        } else {
            StepPlan {
                enabled: true,
                direction: Direction::Ccw,
                steps_cw: 0,
                steps_ccw: F32Ext::floor((deg - 180.0) / step) as u8,
            }
        }
    }
}

impl Default for StepPlanner {
    fn default() -> Self {
        Self::new(crate::config::STEP_ANGLE_DEG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(deg: f32) -> StepPlan {
        StepPlanner::default().plan(WindAngle::from_degrees(deg))
    }

    #[test]
    fn lower_dead_band_edge_moves_one_step_cw() {
        assert_eq!(
            plan(11.25),
            StepPlan {
                enabled: true,
                direction: Direction::Cw,
                steps_cw: 1,
                steps_ccw: 0,
            }
        );
    }

    #[test]
    fn upper_dead_band_edge_moves_ccw() {
        assert_eq!(
            plan(348.75),
            StepPlan {
                enabled: true,
                direction: Direction::Ccw,
                steps_cw: 0,
                steps_ccw: 15,
            }
        );
    }

    #[test]
    fn inside_dead_band_holds() {
        assert_eq!(plan(5.0), StepPlan::HOLD);
        assert_eq!(plan(0.0), StepPlan::HOLD);
        assert_eq!(plan(11.249), StepPlan::HOLD);
        assert_eq!(plan(348.76), StepPlan::HOLD);
        assert_eq!(plan(359.9), StepPlan::HOLD);
    }

    #[test]
    fn half_circle_goes_clockwise() {
        let p = plan(180.0);
        assert!(p.enabled);
        assert_eq!(p.direction, Direction::Cw);
        assert_eq!(p.steps_cw, 16);
        assert_eq!(p.steps_ccw, 0);
    }

    #[test]
    fn just_past_half_circle_goes_ccw_with_no_budget() {
        let p = plan(180.5);
        assert!(p.enabled);
        assert_eq!(p.direction, Direction::Ccw);
        assert_eq!(p.budget(), 0);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(plan(-30.0), StepPlan::HOLD);
        assert_eq!(plan(f32::NAN), StepPlan::HOLD);
        assert_eq!(plan(1_000.0), StepPlan::HOLD);
    }

    #[test]
    fn budget_follows_direction() {
        assert_eq!(plan(90.0).budget(), 8);
        assert_eq!(plan(270.0).budget(), 8);
    }

    #[test]
    fn packed_form_preserves_every_field() {
        for deg in [0.0, 11.25, 45.0, 180.0, 200.0, 348.75] {
            let p = plan(deg);
            assert_eq!(StepPlan::from_bits(p.to_bits()), p, "deg = {deg}");
        }
        assert_eq!(StepPlan::from_bits(0), StepPlan::HOLD);
    }
}
