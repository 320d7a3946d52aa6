// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Pin definitions for the NUCLEO-F767ZI wind-vane bench board.

use stm32f7xx_hal::{
    gpio::{gpioa, gpiob, gpioc, gpiod, gpioe, Alternate, Analog, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct this once at startup using:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
/// ```
pub struct BoardPins {
    pub led: gpiob::PB0<Output<PushPull>>, // LD1 (green)
    pub usart3: Usart3Pins,
    pub spi4: Spi4Pins,
    pub coils: CoilPins,
    pub actuator: gpiod::PD12<Alternate<2>>, // TIM4_CH1 (PWM)
    pub analog: AnalogPins,
}

/// ST-LINK virtual COM port
pub struct Usart3Pins {
    pub tx: gpiod::PD8<Alternate<7>>,
    pub rx: gpiod::PD9<Alternate<7>>,
}

/// SPI4 to the MLX90316, manual CS
pub struct Spi4Pins {
    pub sck: gpioe::PE12<Alternate<5>>,
    pub miso: gpioe::PE13<Alternate<5>>,
    pub mosi: gpioe::PE14<Alternate<5>>,
    pub cs: gpioe::PE4<Output<PushPull>>,
}

/// Yaw stepper driver inputs P1..P4
pub struct CoilPins {
    pub p1: gpioe::PE7<Output<PushPull>>,
    pub p2: gpioe::PE8<Output<PushPull>>,
    pub p3: gpioe::PE9<Output<PushPull>>,
    pub p4: gpioe::PE10<Output<PushPull>>,
}

pub struct AnalogPins {
    pub v1: gpioa::PA3<Analog>, // ADC123_IN3
    pub v2: gpioc::PC0<Analog>, // ADC123_IN10
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(
        gpioa: pac::GPIOA,
        gpiob: pac::GPIOB,
        gpioc: pac::GPIOC,
        gpiod: pac::GPIOD,
        gpioe: pac::GPIOE,
    ) -> Self {
        let gpioa = gpioa.split();
        let gpiob = gpiob.split();
        let gpioc = gpioc.split();
        let gpiod = gpiod.split();
        let gpioe = gpioe.split();

        Self {
            led: gpiob.pb0.into_push_pull_output(),

            usart3: Usart3Pins {
                tx: gpiod.pd8.into_alternate::<7>(),
                rx: gpiod.pd9.into_alternate::<7>(),
            },

            spi4: Spi4Pins {
                sck: gpioe.pe12.into_alternate::<5>(),
                miso: gpioe.pe13.into_alternate::<5>(),
                mosi: gpioe.pe14.into_alternate::<5>(),
                cs: gpioe.pe4.into_push_pull_output(),
            },

            coils: CoilPins {
                p1: gpioe.pe7.into_push_pull_output(),
                p2: gpioe.pe8.into_push_pull_output(),
                p3: gpioe.pe9.into_push_pull_output(),
                p4: gpioe.pe10.into_push_pull_output(),
            },

            actuator: gpiod.pd12.into_alternate::<2>(),

            analog: AnalogPins {
                v1: gpioa.pa3.into_analog(),
                v2: gpioc.pc0.into_analog(),
            },
        }
    }
}
