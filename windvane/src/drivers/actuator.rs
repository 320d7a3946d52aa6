// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! 8-bit duty output for the actuator PWM channel.

/// A PWM channel that accepts an 8-bit duty value (0 = off, 255 = full).
pub trait DutyOutput {
    fn set_duty_byte(&mut self, duty: u8);
}

/// Scale an 8-bit duty onto a channel whose full-on compare value is `max_duty`.
#[inline]
pub fn scale_duty(duty: u8, max_duty: u16) -> u16 {
    ((duty as u32 * max_duty as u32) / u8::MAX as u32) as u16
}
