// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Windowed two-channel voltage averaging.
//!
//! Every `measure_divisor` raw ticks both channels are sampled once. After `measure_window`
//! samples the averages are converted to volts, corrected by the constant offset, and the
//! accumulators start over.

use crate::config::Config;
use crate::control::tick_gate::TickGate;
use crate::measure::AdcRead;

/// Number of channels sampled per tick.
pub const CHANNELS: usize = 2;

pub struct VoltageMeter {
    gate: TickGate,
    channels: [u8; CHANNELS],
    window: u32,
    samples: u32,
    sums: [u32; CHANNELS],
    vref: f32,
    full_scale: u16,
    offset: f32,
    last: Option<[f32; CHANNELS]>,
}

impl VoltageMeter {
    /// Sample `channels` (ADC channel numbers) at the cadence and window given by `config`.
    pub fn new(channels: [u8; CHANNELS], config: &Config) -> Self {
        Self {
            gate: TickGate::new(config.measure_divisor),
            channels,
            window: config.measure_window.max(1),
            samples: 0,
            sums: [0; CHANNELS],
            vref: config.adc_vref,
            full_scale: config.adc_full_scale.max(1),
            offset: config.voltage_offset,
            last: None,
        }
    }

    /// Convert raw ADC counts to volts.
    #[inline]
    pub fn counts_to_volts(&self, counts: f32) -> f32 {
        counts * self.vref / self.full_scale as f32
    }

    /// Samples collected towards the current window.
    #[inline]
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Averages of the last completed window, offset-corrected.
    #[inline]
    pub fn last(&self) -> Option<[f32; CHANNELS]> {
        self.last
    }

    /// Account for `ticks` raw ticks, sampling once per gate fire.
    ///
    /// Returns the averaged voltages when a window completed during this call.
    pub fn service<A: AdcRead>(&mut self, ticks: u32, adc: &mut A) -> Option<[f32; CHANNELS]> {
        let mut completed = None;

        for _ in 0..self.gate.advance(ticks) {
            for (sum, &ch) in self.sums.iter_mut().zip(self.channels.iter()) {
                *sum += adc.read_channel(ch) as u32;
            }
            self.samples += 1;

            if self.samples >= self.window {
                completed = Some(self.finish_window());
            }
        }

        completed
    }

    fn finish_window(&mut self) -> [f32; CHANNELS] {
        let mut volts = [0.0; CHANNELS];
        for (v, sum) in volts.iter_mut().zip(self.sums.iter()) {
            let mean = *sum as f32 / self.samples as f32;
            *v = self.counts_to_volts(mean) - self.offset;
        }

        trace!("meter: window of {} samples closed", self.samples);
        self.sums = [0; CHANNELS];
        self.samples = 0;
        self.last = Some(volts);
        volts
    }
}
