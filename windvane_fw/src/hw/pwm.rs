// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Actuator PWM output on TIM4 channel 1.

use stm32f7xx_hal::{pac::TIM4, timer::PwmChannel};
use windvane::drivers::actuator::{scale_duty, DutyOutput};

/// TIM4 CH1 (PD12).
pub type ActuatorChannel = PwmChannel<TIM4, 0>;

pub struct Actuator {
    channel: ActuatorChannel,
}

impl Actuator {
    /// Take the channel and enable its output at 0 % duty.
    pub fn new(mut channel: ActuatorChannel) -> Self {
        channel.set_duty(0);
        channel.enable();
        Self { channel }
    }
}

impl DutyOutput for Actuator {
    fn set_duty_byte(&mut self, duty: u8) {
        let max = self.channel.get_max_duty();
        self.channel.set_duty(scale_duty(duty, max));
    }
}
