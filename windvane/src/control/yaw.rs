// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! The two execution contexts of the yaw controller.
//!
//! - [`MotorTask`] runs inside the periodic timer interrupt. It records every raw tick and, on
//!   each gated motor tick, runs the sequencer against the latest published plan.
//! - [`YawLoop`] runs in the cooperative main loop. It feeds the drained ticks to the sensor gate,
//!   polls the sensor link, and re-plans whenever a valid angle arrives.
//!
//! Typical usage pattern:
//!
//! ```ignore
//! // TIM2 interrupt, once per millisecond
//! motor_task.on_tick(&SHARED.tick_port());
//!
//! // main loop
//! let port = SHARED.main_port();
//! loop {
//!     let ticks = port.take_ticks();
//!     yaw.service(ticks, &port)?;
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::Config;
use crate::control::planner::{StepPlan, StepPlanner};
use crate::control::sequencer::{Sequencer, StepOutcome};
use crate::control::shared::{MainPort, TickPort};
use crate::control::tick_gate::TickGate;
use crate::drivers::mlx90316::{self, ByteLink, LinkStatus, Mlx90316};
use crate::drivers::stepper::CoilDriver;
use crate::protocol::WindAngle;

/// Interrupt-side half: tick recording and coil sequencing.
pub struct MotorTask<C> {
    gate: TickGate,
    sequencer: Sequencer,
    coils: C,
}

impl<C: CoilDriver> MotorTask<C> {
    pub fn new(coils: C, config: &Config) -> Self {
        Self {
            gate: TickGate::new(config.motor_divisor),
            sequencer: Sequencer::new(),
            coils,
        }
    }

    /// Handle one raw tick. Returns the sequencer outcome on gated ticks, `None` otherwise.
    pub fn on_tick(&mut self, port: &TickPort<'_>) -> Result<Option<StepOutcome>, C::Error> {
        port.record_tick();

        if !self.gate.tick() {
            return Ok(None);
        }

        let plan = port.plan();
        let outcome = self.sequencer.on_motor_tick(&plan, &mut self.coils)?;
        if let StepOutcome::Stepped(_) = outcome {
            port.publish_total_steps(self.sequencer.state().total_steps());
        }
        Ok(Some(outcome))
    }

    #[inline]
    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    #[inline]
    pub fn coils(&self) -> &C {
        &self.coils
    }

    pub fn free(self) -> C {
        self.coils
    }
}

/// Main-loop half: sensor polling and step planning.
pub struct YawLoop<SPI, CS, D> {
    link: Mlx90316<SPI, CS, D>,
    gate: TickGate,
    planner: StepPlanner,
    wind_angle: WindAngle,
    plan: StepPlan,
}

impl<SPI, CS, D> YawLoop<SPI, CS, D>
where
    SPI: ByteLink,
    CS: OutputPin,
    D: DelayNs,
{
    pub fn new(link: Mlx90316<SPI, CS, D>, config: &Config) -> Self {
        Self {
            link,
            gate: TickGate::new(config.sensor_divisor),
            planner: StepPlanner::new(config.step_angle_deg),
            wind_angle: WindAngle::ZERO,
            plan: StepPlan::HOLD,
        }
    }

    /// Read one complete frame before the periodic loop starts, so the first plan is based on a
    /// real sample. Returns the accepted angle, if any.
    pub fn prime(
        &mut self,
        port: &MainPort<'_>,
    ) -> Result<Option<WindAngle>, mlx90316::Error<SPI::Error, CS::Error>> {
        let status = self.link.read_frame()?;
        Ok(self.absorb(status, port))
    }

    /// Account for `ticks` raw ticks and, if the sensor gate fired, advance the link one step.
    ///
    /// Returns the new angle when a valid frame completed on this call.
    pub fn service(
        &mut self,
        ticks: u32,
        port: &MainPort<'_>,
    ) -> Result<Option<WindAngle>, mlx90316::Error<SPI::Error, CS::Error>> {
        if self.gate.advance(ticks) == 0 {
            return Ok(None);
        }

        let status = self.link.poll()?;
        Ok(self.absorb(status, port))
    }

    /// Last accepted wind angle. Stale frames never change it.
    #[inline]
    pub fn current_wind_angle(&self) -> WindAngle {
        self.wind_angle
    }

    /// Plan derived from [`current_wind_angle`](Self::current_wind_angle).
    #[inline]
    pub fn plan(&self) -> StepPlan {
        self.plan
    }

    #[inline]
    pub fn link(&self) -> &Mlx90316<SPI, CS, D> {
        &self.link
    }

    fn absorb(&mut self, status: LinkStatus, port: &MainPort<'_>) -> Option<WindAngle> {
        match status {
            LinkStatus::Accepted(angle) => {
                self.wind_angle = angle;
                self.replan(port);
                Some(angle)
            }
            LinkStatus::Busy | LinkStatus::Rejected(_) => None,
        }
    }

    fn replan(&mut self, port: &MainPort<'_>) {
        let plan = self.planner.plan(self.wind_angle);
        if plan != self.plan {
            info!(
                "yaw: {} deg, enabled={} {} cw={} ccw={}",
                self.wind_angle.degrees(),
                plan.enabled,
                plan.direction,
                plan.steps_cw,
                plan.steps_ccw
            );
        }
        self.plan = plan;
        port.publish_plan(plan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkTiming;
    use crate::control::planner::Direction;
    use crate::control::shared::Shared;
    use crate::drivers::stepper::CoilPattern;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Replays a fixed frame forever.
    struct Scripted {
        frame: [u8; 10],
        sent: usize,
    }

    impl ByteLink for Scripted {
        type Error = Infallible;

        fn exchange(&mut self, _byte: u8) -> Result<u8, Infallible> {
            let reply = self.frame[self.sent % self.frame.len()];
            self.sent += 1;
            Ok(reply)
        }
    }

    struct NoPin;

    impl ErrorType for NoPin {
        type Error = Infallible;
    }

    impl OutputPin for NoPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    #[derive(Default)]
    struct Coils(Vec<CoilPattern>);

    impl CoilDriver for Coils {
        type Error = Infallible;

        fn energize(&mut self, pattern: CoilPattern) -> Result<(), Infallible> {
            self.0.push(pattern);
            Ok(())
        }
    }

    fn yaw_loop(msb: u8, lsb: u8) -> YawLoop<Scripted, NoPin, NoDelay> {
        let spi = Scripted {
            frame: [0, 0, msb, lsb, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
            sent: 0,
        };
        let link = Mlx90316::new(spi, NoPin, NoDelay, LinkTiming::default());
        YawLoop::new(link, &Config::default())
    }

    #[test]
    fn motor_task_steps_on_every_fourth_tick() {
        let shared = Shared::new();
        let mut task = MotorTask::new(Coils::default(), &Config::default());
        shared.main_port().publish_plan(StepPlan {
            enabled: true,
            direction: Direction::Cw,
            steps_cw: 2,
            steps_ccw: 0,
        });

        let mut stepped = 0;
        for tick in 1..=12 {
            let outcome = task.on_tick(&shared.tick_port()).unwrap();
            assert_eq!(outcome.is_some(), tick % 4 == 0, "tick {tick}");
            if let Some(StepOutcome::Stepped(_)) = outcome {
                stepped += 1;
            }
        }

        assert_eq!(stepped, 3);
        assert_eq!(task.coils().0.len(), 3);
        assert_eq!(shared.main_port().total_steps_taken(), 3);
        assert_eq!(shared.main_port().take_ticks(), 12);
    }

    #[test]
    fn motor_task_holds_until_a_plan_is_published() {
        let shared = Shared::new();
        let mut task = MotorTask::new(Coils::default(), &Config::default());

        for _ in 0..8 {
            task.on_tick(&shared.tick_port()).unwrap();
        }

        assert!(task.coils().0.is_empty());
        assert_eq!(task.sequencer().state().total_steps(), 0);
    }

    #[test]
    fn one_frame_per_eleven_sensor_ticks() {
        let shared = Shared::new();
        let port = shared.main_port();
        // 0x4001 -> 90 degrees, clockwise 8 steps
        let mut yaw = yaw_loop(0x40, 0x01);

        for _ in 0..10 {
            assert_eq!(yaw.service(1, &port), Ok(None));
        }
        assert_eq!(yaw.current_wind_angle(), WindAngle::ZERO);

        assert_eq!(yaw.service(1, &port), Ok(Some(WindAngle::from_degrees(90.0))));
        assert_eq!(yaw.plan().direction, Direction::Cw);
        assert_eq!(yaw.plan().steps_cw, 8);
        assert_eq!(port.published_plan(), yaw.plan());
    }

    #[test]
    fn no_ticks_means_no_link_activity() {
        let shared = Shared::new();
        let mut yaw = yaw_loop(0x40, 0x01);

        assert_eq!(yaw.service(0, &shared.main_port()), Ok(None));
        assert_eq!(yaw.link().position(), 0);
    }

    #[test]
    fn tick_backlog_advances_one_byte_per_service() {
        let shared = Shared::new();
        let mut yaw = yaw_loop(0x40, 0x01);

        yaw.service(25, &shared.main_port()).unwrap();
        assert_eq!(yaw.link().position(), 1);
    }

    #[test]
    fn prime_reads_a_whole_frame() {
        let shared = Shared::new();
        let port = shared.main_port();
        // 348.75 degrees: 0xF800 counts << 2 with the valid bit
        let mut yaw = yaw_loop(0xF8, 0x01);

        let angle = yaw.prime(&port).unwrap();
        assert_eq!(angle, Some(WindAngle::from_degrees(348.75)));
        assert_eq!(port.published_plan().direction, Direction::Ccw);
        assert_eq!(port.published_plan().steps_ccw, 15);
    }

    #[test]
    fn rejected_frame_keeps_angle_and_plan() {
        let shared = Shared::new();
        let port = shared.main_port();
        let mut yaw = yaw_loop(0x40, 0x00);

        assert_eq!(yaw.prime(&port), Ok(None));
        assert_eq!(yaw.current_wind_angle(), WindAngle::ZERO);
        assert_eq!(yaw.plan(), StepPlan::HOLD);
    }
}
