// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Melexis MLX90316 rotary position sensor over SPI (slow mode).
//!
//! A reading is one 10-byte frame clocked out under an active-low select. The driver advances the
//! frame by a single byte per [`poll`](Mlx90316::poll) call so the main loop is never blocked for
//! a whole frame:
//!
//! | position | action | settle |
//! | -------- | ------ | ------ |
//! | 0 | assert select, wait setup time, exchange `0xAA` | 40 µs |
//! | 1 | exchange `0xFF` | 50 µs |
//! | 2..=9 | exchange `0xFF` filler | 40 µs |
//! | 10 | release select, wait resync guard, decode | 1.6 ms |
//!
//! Each settle delay is a blocking wait that completes before `poll` returns, so the next call
//! can never start early. Frames without the validity bit are dropped and the last good angle is
//! kept by the caller.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::LinkTiming;
use crate::protocol::{FrameCollector, SensorFrame, WindAngle};

/// Full-duplex single-byte exchange with the sensor.
pub trait ByteLink {
    type Error;

    fn exchange(&mut self, byte: u8) -> Result<u8, Self::Error>;
}

/// Error type for `Mlx90316` operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S, P> {
    /// Byte exchange failed.
    Spi(S),
    /// Select line could not be driven.
    Select(P),
}

/// Result of one poll.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// A byte was exchanged; the frame is not finished yet.
    Busy,
    /// Frame closed with the validity bit set.
    Accepted(WindAngle),
    /// Frame closed without the validity bit; the sample must be ignored.
    Rejected(SensorFrame),
}

pub struct Mlx90316<SPI, CS, D> {
    spi: SPI,
    cs: CS,
    delay: D,
    timing: LinkTiming,
    frame: FrameCollector,
}

impl<SPI, CS, D> Mlx90316<SPI, CS, D>
where
    SPI: ByteLink,
    CS: OutputPin,
    D: DelayNs,
{
    /// Create the driver and park the select line in its inactive (high) state.
    pub fn new(spi: SPI, mut cs: CS, delay: D, timing: LinkTiming) -> Self {
        cs.set_high().ok();
        Self {
            spi,
            cs,
            delay,
            timing,
            frame: FrameCollector::new(),
        }
    }

    /// Frame position of the next poll (`0..=10`).
    #[inline]
    pub fn position(&self) -> usize {
        self.frame.position()
    }

    /// Advance the frame by one step.
    ///
    /// On error the select line is released and the partial frame is discarded; the next poll
    /// starts a fresh frame.
    pub fn poll(&mut self) -> Result<LinkStatus, Error<SPI::Error, CS::Error>> {
        let result = if self.frame.is_complete() {
            self.close_frame()
        } else {
            self.exchange_next()
        };

        if result.is_err() {
            self.abort();
        }
        result
    }

    /// Poll until the current frame closes.
    pub fn read_frame(&mut self) -> Result<LinkStatus, Error<SPI::Error, CS::Error>> {
        loop {
            match self.poll()? {
                LinkStatus::Busy => continue,
                done => return Ok(done),
            }
        }
    }

    pub fn free(self) -> (SPI, CS, D) {
        (self.spi, self.cs, self.delay)
    }

    fn exchange_next(&mut self) -> Result<LinkStatus, Error<SPI::Error, CS::Error>> {
        let position = self.frame.position();

        if position == 0 {
            self.cs.set_low().map_err(Error::Select)?;
            self.delay.delay_us(self.timing.select_setup_us);
        }

        let rx = self.spi.exchange(self.frame.outgoing()).map_err(Error::Spi)?;
        self.frame.push(rx);

        let settle = match position {
            0 => self.timing.sync_gap_us,
            1 => self.timing.sync_to_data_us,
            _ => self.timing.byte_gap_us,
        };
        self.delay.delay_us(settle);

        Ok(LinkStatus::Busy)
    }

    fn close_frame(&mut self) -> Result<LinkStatus, Error<SPI::Error, CS::Error>> {
        self.cs.set_high().map_err(Error::Select)?;
        self.delay.delay_us(self.timing.resync_guard_us);

        let Some(frame) = self.frame.take() else {
            return Ok(LinkStatus::Busy);
        };

        match frame.angle() {
            Some(angle) => {
                debug!("mlx90316: raw {=u16:#x}, {} deg", frame.raw(), angle.degrees());
                Ok(LinkStatus::Accepted(angle))
            }
            None => {
                trace!("mlx90316: invalid frame, raw {=u16:#x}", frame.raw());
                Ok(LinkStatus::Rejected(frame))
            }
        }
    }

    fn abort(&mut self) {
        self.frame.reset();
        self.cs.set_high().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::frame::{FILLER_BYTE, FRAME_LEN, START_BYTE};
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Everything the driver did, in order.
    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Select(bool),
        Tx(u8),
        Wait(u32),
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct Spi {
        log: Log,
        replies: Vec<u8>,
        fail_at: Option<usize>,
        sent: usize,
    }

    impl ByteLink for Spi {
        type Error = ();

        fn exchange(&mut self, byte: u8) -> Result<u8, ()> {
            if self.fail_at == Some(self.sent) {
                return Err(());
            }
            self.log.borrow_mut().push(Event::Tx(byte));
            let reply = self.replies[self.sent % self.replies.len()];
            self.sent += 1;
            Ok(reply)
        }
    }

    struct Cs(Log);

    impl ErrorType for Cs {
        type Error = Infallible;
    }

    impl OutputPin for Cs {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(Event::Select(true));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().push(Event::Select(false));
            Ok(())
        }
    }

    struct Delay(Log);

    impl DelayNs for Delay {
        fn delay_ns(&mut self, ns: u32) {
            self.0.borrow_mut().push(Event::Wait(ns / 1_000));
        }

        fn delay_us(&mut self, us: u32) {
            self.0.borrow_mut().push(Event::Wait(us));
        }
    }

    fn sensor(replies: &[u8]) -> (Mlx90316<Spi, Cs, Delay>, Log) {
        let log: Log = Rc::default();
        let spi = Spi {
            log: log.clone(),
            replies: replies.to_vec(),
            fail_at: None,
            sent: 0,
        };
        let link = Mlx90316::new(spi, Cs(log.clone()), Delay(log.clone()), LinkTiming::default());
        log.borrow_mut().clear();
        (link, log)
    }

    fn reply_frame(msb: u8, lsb: u8) -> [u8; FRAME_LEN] {
        [0x00, 0x00, msb, lsb, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
    }

    #[test]
    fn frame_follows_the_wire_sequence() {
        let (mut link, log) = sensor(&reply_frame(0x40, 0x01));

        for _ in 0..FRAME_LEN {
            assert_eq!(link.poll(), Ok(LinkStatus::Busy));
        }
        assert!(matches!(link.poll(), Ok(LinkStatus::Accepted(_))));

        let mut expected = vec![
            Event::Select(true),
            Event::Wait(7),
            Event::Tx(START_BYTE),
            Event::Wait(40),
            Event::Tx(FILLER_BYTE),
            Event::Wait(50),
        ];
        for _ in 2..FRAME_LEN {
            expected.push(Event::Tx(FILLER_BYTE));
            expected.push(Event::Wait(40));
        }
        expected.push(Event::Select(false));
        expected.push(Event::Wait(1_600));

        assert_eq!(*log.borrow(), expected);
        assert_eq!(link.position(), 0);
    }

    #[test]
    fn valid_frame_yields_decoded_angle() {
        // 0x4001 >> 2 = 4096 counts = 90 degrees
        let (mut link, _) = sensor(&reply_frame(0x40, 0x01));
        assert_eq!(
            link.read_frame(),
            Ok(LinkStatus::Accepted(WindAngle::from_degrees(90.0)))
        );
    }

    #[test]
    fn invalid_frame_is_rejected() {
        let (mut link, _) = sensor(&reply_frame(0x40, 0x00));
        assert!(matches!(link.read_frame(), Ok(LinkStatus::Rejected(f)) if f.raw() == 0x4000));
    }

    #[test]
    fn transport_error_aborts_the_frame() {
        let (mut link, log) = sensor(&reply_frame(0x40, 0x01));
        link.spi.fail_at = Some(3);

        for _ in 0..3 {
            assert_eq!(link.poll(), Ok(LinkStatus::Busy));
        }
        assert_eq!(link.poll(), Err(Error::Spi(())));
        assert_eq!(link.position(), 0);
        assert_eq!(log.borrow().last(), Some(&Event::Select(false)));

        // Next poll starts a new frame with select and the start byte.
        link.spi.fail_at = None;
        log.borrow_mut().clear();
        assert_eq!(link.poll(), Ok(LinkStatus::Busy));
        assert_eq!(log.borrow()[0], Event::Select(true));
        assert_eq!(log.borrow()[2], Event::Tx(START_BYTE));
    }
}
