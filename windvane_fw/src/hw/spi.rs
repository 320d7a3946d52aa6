// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Serial Peripheral Interface (SPI) abstraction layer.
//!
//! - `SpiBus` wraps a configured HAL SPI instance with 8-bit words and serves as the sensor's
//!   [`ByteLink`].
//! - `ChipSelect` is an active-low GPIO output wrapper for manual CS control.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use stm32f7xx_hal::{
    gpio::{self, Output, PinState, PushPull},
    prelude::*,
    spi::{self, Enabled, Spi},
};
use windvane::drivers::ByteLink;

/// Wrapper around an enabled HAL SPI instance (8-bit words).
pub struct SpiBus<I, P> {
    spi: Spi<I, P, Enabled<u8>>,
}

impl<I, P> SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    pub fn new(spi: Spi<I, P, Enabled<u8>>) -> Self {
        Self { spi }
    }

    /// Perform a blocking, full-duplex transfer of one byte.
    pub fn transfer_byte(&mut self, byte: u8) -> Result<u8, spi::Error> {
        let mut tmp = [byte];
        self.spi.transfer(&mut tmp)?;
        Ok(tmp[0])
    }
}

impl<I, P> ByteLink for SpiBus<I, P>
where
    I: spi::Instance,
    P: spi::Pins<I>,
{
    type Error = spi::Error;

    #[inline]
    fn exchange(&mut self, byte: u8) -> Result<u8, spi::Error> {
        self.transfer_byte(byte)
    }
}

/// Manual chip-select line, active-low, generic over any GPIO pin.
///
/// As an [`OutputPin`] it drives the raw level: `set_low` selects the device.
pub struct ChipSelect<const P: char, const N: u8> {
    pin: gpio::Pin<P, N, Output<PushPull>>,
}

impl<const P: char, const N: u8> ChipSelect<P, N> {
    /// Create an active-low chip select and set to the inactive state (i.e., high).
    pub fn active_low<MODE>(pin: gpio::Pin<P, N, MODE>) -> Self {
        let mut pin = pin.into_push_pull_output();
        pin.set_state(PinState::High);
        Self { pin }
    }

    /// Assert the chip select.
    #[inline]
    pub fn select(&mut self) {
        self.pin.set_low();
    }

    /// Deassert the chip select.
    #[inline]
    pub fn deselect(&mut self) {
        self.pin.set_high();
    }
}

impl<const P: char, const N: u8> ErrorType for ChipSelect<P, N> {
    type Error = Infallible;
}

impl<const P: char, const N: u8> OutputPin for ChipSelect<P, N> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.select();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.deselect();
        Ok(())
    }
}
