// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! ADC1 via direct PAC register access, with blocking single-channel reads.
//!
//! ```ignore
//! let mut adc1 = Adc::adc1(dp.ADC1);
//! let counts = adc1.read_channel(3);
//! ```

use stm32f7xx_hal::pac;
use windvane::measure::AdcRead;

/// Full-scale count of the 12-bit converter.
pub const FULL_SCALE: u16 = 4_095;

/// Channels sampled for the report: PA3 (ADC123_IN3) and PC0 (ADC123_IN10).
pub const REPORT_CHANNELS: [u8; 2] = [3, 10];

/// Longest sample time (480 cycles) for high-impedance dividers.
const SMP_480: u32 = 0b111;

pub struct Adc<ADC> {
    adc: ADC,
}

impl Adc<pac::ADC1> {
    /// Enable the ADC1 clock and configure 12-bit, right-aligned, software-triggered conversions.
    pub fn adc1(adc1: pac::ADC1) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb2enr.modify(|_, w| w.adc1en().set_bit());

        let common = unsafe { &*pac::ADC_COMMON::ptr() };
        // ADC prescaler: PCLK2 / 4
        common.ccr.modify(|_, w| w.adcpre().div4());

        adc1.cr2.modify(|_, w| w.adon().clear_bit());
        adc1.cr1.modify(|_, w| w.res().bits(0b00));
        adc1.cr2.modify(|_, w| {
            w.cont().clear_bit();
            w.align().right();
            w.exten().disabled();
            w
        });
        adc1.cr2.modify(|_, w| w.adon().set_bit());

        Self { adc: adc1 }
    }

    /// Blocking conversion of one channel (0..=18).
    pub fn read(&mut self, channel: u8) -> u16 {
        let adc = &self.adc;
        let channel = channel & 0x1F;

        // Channels 0..=9 live in SMPR2, 10..=18 in SMPR1, three bits each.
        if channel <= 9 {
            let shift = 3 * channel as u32;
            adc.smpr2
                .modify(|r, w| unsafe { w.bits(r.bits() | (SMP_480 << shift)) });
        } else if channel <= 18 {
            let shift = 3 * (channel as u32 - 10);
            adc.smpr1
                .modify(|r, w| unsafe { w.bits(r.bits() | (SMP_480 << shift)) });
        }

        // One conversion in the regular sequence
        adc.sqr1.modify(|_, w| w.l().bits(0));
        adc.sqr3.modify(|_, w| unsafe { w.sq1().bits(channel) });

        adc.cr2.modify(|_, w| w.swstart().set_bit());
        while adc.sr.read().eoc().bit_is_clear() {}

        adc.dr.read().data().bits()
    }
}

impl AdcRead for Adc<pac::ADC1> {
    #[inline]
    fn read_channel(&mut self, ch: u8) -> u16 {
        self.read(ch)
    }
}
