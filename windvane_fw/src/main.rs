// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wind-vane yaw controller firmware for the NUCLEO-F767ZI.
//!
//! TIM2 interrupts at 1 kHz and runs the coil sequencer. The main loop drains the recorded ticks
//! and feeds them to the sensor link, the planner and the voltage meter.

#![no_main]
#![no_std]
#![allow(dead_code)]

#[macro_use]
mod fmt;
mod hw;

use core::cell::RefCell;
use core::convert::Infallible;
use core::fmt::Write as _;

use cortex_m::interrupt::Mutex;
use cortex_m_rt::entry;
#[cfg(not(feature = "defmt"))]
use panic_halt as _;
#[cfg(feature = "defmt")]
use {defmt_rtt as _, panic_probe as _};

use hal::{
    pac::{self, interrupt, Interrupt, TIM2},
    prelude::*,
    serial::{self, Serial},
    spi::{self, Mode, Phase, Polarity, Spi},
    timer::CounterUs,
};
use stm32f7xx_hal as hal;

use windvane::config::{self, Config};
use windvane::control::{MotorTask, Shared, YawLoop};
use windvane::drivers::{mlx90316, DutyOutput, FourPhaseStepper, Mlx90316};
use windvane::measure::{report::CLEAR_SCREEN, Report, VoltageMeter};

use hw::{Actuator, Adc, BoardPins, ChipSelect, Led, Line, SpiBus, SysDelay, Usart};

type Coils = FourPhaseStepper<Line<'E', 7>, Line<'E', 8>, Line<'E', 9>, Line<'E', 10>>;

static SHARED: Shared = Shared::new();

// Handed to the TIM2 handler once at startup.
static G_MOTOR: Mutex<RefCell<Option<MotorTask<Coils>>>> = Mutex::new(RefCell::new(None));
static G_TIM: Mutex<RefCell<Option<CounterUs<TIM2>>>> = Mutex::new(RefCell::new(None));

#[interrupt]
fn TIM2() {
    static mut MOTOR: Option<MotorTask<Coils>> = None;
    static mut TIM: Option<CounterUs<TIM2>> = None;

    if MOTOR.is_none() {
        *MOTOR = cortex_m::interrupt::free(|cs| G_MOTOR.borrow(cs).take());
    }
    if TIM.is_none() {
        *TIM = cortex_m::interrupt::free(|cs| G_TIM.borrow(cs).take());
    }
    let (Some(motor), Some(tim)) = (MOTOR.as_mut(), TIM.as_mut()) else {
        return;
    };

    let _ = tim.wait();

    match motor.on_tick(&SHARED.tick_port()) {
        Ok(_) => {}
        Err(never) => match never {},
    }
}

#[entry]
fn main() -> ! {
    let (Some(dp), Some(cp)) = (pac::Peripherals::take(), cortex_m::Peripherals::take()) else {
        panic!("peripherals already taken");
    };

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb2 = rcc.apb2;

    let pins = BoardPins::new(dp.GPIOA, dp.GPIOB, dp.GPIOC, dp.GPIOD, dp.GPIOE);
    let cfg = Config::default().with_adc(config::ADC_VREF, hw::adc::FULL_SCALE);

    // USART3 (ST-LINK VCP)
    let usart_cfg = serial::Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let serial = Serial::new(
        dp.USART3,
        (pins.usart3.tx, pins.usart3.rx),
        &clocks,
        usart_cfg,
    );
    let mut console = Usart::new(serial);
    console.write_str(CLEAR_SCREEN);

    let mut heartbeat = Led::active_high(Line::new(pins.led));

    // Actuator PWM
    let channel = dp.TIM4.pwm_hz(pins.actuator, 20.kHz(), &clocks).split();
    let mut actuator = Actuator::new(channel);
    actuator.set_duty_byte(config::ACTUATOR_INITIAL_DUTY);

    // SPI4 to the MLX90316: mode 1, SCK within the slow-mode limit
    let spi_mode = Mode {
        polarity: Polarity::IdleLow,
        phase: Phase::CaptureOnSecondTransition,
    };
    let spi4 = Spi::new(dp.SPI4, (pins.spi4.sck, pins.spi4.miso, pins.spi4.mosi)).enable::<u8>(
        spi_mode,
        config::SENSOR_SCK_MAX_HZ.Hz(),
        &clocks,
        &mut apb2,
    );
    let delay = SysDelay::new(cp.SYST, clocks.sysclk().raw());
    let sensor = Mlx90316::new(
        SpiBus::new(spi4),
        ChipSelect::active_low(pins.spi4.cs),
        delay,
        cfg.link,
    );
    let mut yaw = YawLoop::new(sensor, &cfg);

    let mut adc = Adc::adc1(dp.ADC1);
    let mut meter = VoltageMeter::new(hw::adc::REPORT_CHANNELS, &cfg);

    // Yaw stepper
    let coils = FourPhaseStepper::new(
        Line::new(pins.coils.p1),
        Line::new(pins.coils.p2),
        Line::new(pins.coils.p3),
        Line::new(pins.coils.p4),
    );
    let motor = MotorTask::new(coils, &cfg);

    let port = SHARED.main_port();
    match yaw.prime(&port) {
        Ok(Some(angle)) => info!("initial wind angle {} deg", angle.degrees()),
        Ok(None) => warn!("initial sensor frame rejected"),
        Err(e) => log_link_fault(&e),
    }

    let Ok(tick) = hw::tick::start(dp.TIM2, &clocks) else {
        panic!("TIM2 rejected the tick period");
    };
    cortex_m::interrupt::free(|cs| {
        G_MOTOR.borrow(cs).replace(Some(motor));
        G_TIM.borrow(cs).replace(Some(tick));
    });
    unsafe {
        cortex_m::peripheral::NVIC::unmask(Interrupt::TIM2);
    }
    info!("windvane: running at {} Hz", config::TICK_HZ);

    loop {
        let ticks = port.take_ticks();
        if ticks == 0 {
            cortex_m::asm::wfi();
            continue;
        }

        if let Err(e) = yaw.service(ticks, &port) {
            log_link_fault(&e);
        }

        if let Some(volts) = meter.service(ticks, &mut adc) {
            let report = Report::new(volts, yaw.current_wind_angle());
            let _ = write!(console, "{report}");
            heartbeat.toggle();
            debug!("steps taken: {}", port.total_steps_taken());
        }
    }
}

fn log_link_fault(err: &mlx90316::Error<spi::Error, Infallible>) {
    match err {
        mlx90316::Error::Spi(_) => warn!("sensor link: SPI fault, frame dropped"),
        mlx90316::Error::Select(never) => match *never {},
    }
}
