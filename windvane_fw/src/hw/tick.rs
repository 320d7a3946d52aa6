// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Periodic tick source on TIM2.

use stm32f7xx_hal::{
    pac::TIM2,
    prelude::*,
    rcc::Clocks,
    timer::{self, CounterUs, Event},
};
use windvane::config::TICK_HZ;

/// Start TIM2 at [`TICK_HZ`] with the update interrupt enabled.
///
/// The NVIC line is left masked; unmask `Interrupt::TIM2` once the handler's state is in place.
pub fn start(tim: TIM2, clocks: &Clocks) -> Result<CounterUs<TIM2>, timer::Error> {
    let mut counter = tim.counter_us(clocks);
    counter.start((1_000_000 / TICK_HZ).micros())?;
    counter.listen(Event::Update);
    Ok(counter)
}
