// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Compile-time constants and the runtime controller configuration.
//!
//! All timing values assume the periodic tick source runs at [`TICK_HZ`]. The firmware programs
//! its timer from the same constant, so changing it here keeps the gate cadences consistent.

/// Rate of the periodic tick source (one tick per millisecond).
pub const TICK_HZ: u32 = 1_000;

/// Raw ticks per coil step.
pub const MOTOR_TICK_DIVISOR: u32 = 4;

/// Raw ticks per sensor link poll.
pub const SENSOR_TICK_DIVISOR: u32 = 1;

/// Raw ticks per analog sample.
pub const MEASURE_TICK_DIVISOR: u32 = 20;

/// Number of analog samples averaged into one report.
pub const MEASURE_WINDOW: u32 = 20;

/// Angular resolution of one motor step, and the half-width of the alignment dead-band.
///
/// 360 / 32: one stepper revolution is 32 steps.
pub const STEP_ANGLE_DEG: f32 = 11.25;

/// Measured VDD used as the ADC reference.
pub const ADC_VREF: f32 = 3.291;

/// ADC full-scale count (14-bit converter).
pub const ADC_FULL_SCALE: u16 = 16_383;

/// Constant offset subtracted from each averaged voltage.
pub const VOLTAGE_OFFSET: f32 = 0.30;

/// Actuator PWM compare value loaded at startup.
pub const ACTUATOR_INITIAL_DUTY: u8 = 77;

/// Highest SCK rate the MLX90316 tolerates in slow mode.
pub const SENSOR_SCK_MAX_HZ: u32 = 142_000;

/// Settling delays of the sensor link, in microseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkTiming {
    /// Select asserted to first clock edge (datasheet: at least 6.9 µs).
    pub select_setup_us: u32,
    /// After the first sync byte.
    pub sync_gap_us: u32,
    /// After the second sync byte, before the first data byte.
    pub sync_to_data_us: u32,
    /// Between data bytes.
    pub byte_gap_us: u32,
    /// Select released until the next frame may start (datasheet: at least 1.5 ms).
    pub resync_guard_us: u32,
}

impl Default for LinkTiming {
    fn default() -> Self {
        Self {
            select_setup_us: 7,
            sync_gap_us: 40,
            sync_to_data_us: 50,
            byte_gap_us: 40,
            resync_guard_us: 1_600,
        }
    }
}

/// Runtime configuration for the yaw controller.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub motor_divisor: u32,
    pub sensor_divisor: u32,
    pub measure_divisor: u32,
    pub measure_window: u32,
    pub step_angle_deg: f32,
    pub link: LinkTiming,
    pub adc_vref: f32,
    pub adc_full_scale: u16,
    pub voltage_offset: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            motor_divisor: MOTOR_TICK_DIVISOR,
            sensor_divisor: SENSOR_TICK_DIVISOR,
            measure_divisor: MEASURE_TICK_DIVISOR,
            measure_window: MEASURE_WINDOW,
            step_angle_deg: STEP_ANGLE_DEG,
            link: LinkTiming::default(),
            adc_vref: ADC_VREF,
            adc_full_scale: ADC_FULL_SCALE,
            voltage_offset: VOLTAGE_OFFSET,
        }
    }
}

impl Config {
    /// Set the raw-tick divisor of the coil stepping cadence.
    pub fn with_motor_divisor(mut self, divisor: u32) -> Self {
        self.motor_divisor = divisor;
        self
    }

    /// Set the raw-tick divisor of the sensor polling cadence.
    pub fn with_sensor_divisor(mut self, divisor: u32) -> Self {
        self.sensor_divisor = divisor;
        self
    }

    /// Set the sampling cadence and the number of samples per report.
    pub fn with_measurement(mut self, divisor: u32, window: u32) -> Self {
        self.measure_divisor = divisor;
        self.measure_window = window;
        self
    }

    /// Set the ADC reference voltage and full-scale count.
    pub fn with_adc(mut self, vref: f32, full_scale: u16) -> Self {
        self.adc_vref = vref;
        self.adc_full_scale = full_scale;
        self
    }

    pub fn with_link_timing(mut self, link: LinkTiming) -> Self {
        self.link = link;
        self
    }
}
