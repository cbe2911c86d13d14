// Licensed under the Apache-2.0 license

//! Register-level I2C hardware layer for the GD32VF103.
//!
//! [`Gd32vf103I2c`] owns one I2C peripheral instance and implements the
//! [`I2cBusInterface`] primitives over its STAT0/STAT1/CTL0/DATA registers,
//! plus [`I2cHardwareCore`] for reset, timing and enable. The transfer
//! sequencing lives in [`crate::i2c::master`].

use crate::i2c::common::{
    AckPosition, Direction, DutyCycle, Error, I2cConfig, I2cFlag, I2cSpeed, TimingConfig,
};
use crate::i2c::traits::{I2cBusInterface, I2cHardwareCore};
use core::ops::Deref;
use embedded_hal::i2c::SevenBitAddress;
use gd32vf103_pac::i2c0;

mod sealed {
    pub trait Sealed {}
}

/// An I2C peripheral instance usable with [`Gd32vf103I2c`].
pub trait Instance: sealed::Sealed + Deref<Target = i2c0::RegisterBlock> {}

impl sealed::Sealed for gd32vf103_pac::I2C0 {}
impl Instance for gd32vf103_pac::I2C0 {}
impl sealed::Sealed for gd32vf103_pac::I2C1 {}
impl Instance for gd32vf103_pac::I2C1 {}

/// Derived CKCFG/RT/CTL1 settings for one speed on one source clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Timing {
    i2cclk_mhz: u8,
    clkc: u16,
    fast: bool,
    duty_16_9: bool,
    risetime: u8,
    scl_hz: u32,
}

/// Compute peripheral timing for `speed` from the source clock in `timing`.
///
/// The I2CCLK field wants the APB1 frequency in whole MHz, valid from
/// 2 MHz up to the 54 MHz bus maximum. CLKC divides the source clock down
/// to the SCL period: by 2 in standard mode (floor 4), by 3 or 25 in fast
/// mode depending on the duty ratio. Rise time is one tick above the
/// allowed maximum (1000 ns standard, 300 ns fast) in source-clock ticks.
fn compute_timing(speed: I2cSpeed, timing: &TimingConfig) -> Result<Timing, Error> {
    let pclk = timing.clk_src.to_Hz();
    let freq_mhz = pclk / 1_000_000;
    if !(2..=54).contains(&freq_mhz) {
        return Err(Error::InvalidTiming);
    }

    let (clkc, fast, duty_16_9, risetime, period) = match speed {
        I2cSpeed::Standard => {
            let clkc = (pclk / (speed.hz() * 2)).max(4);
            (clkc, false, false, freq_mhz + 1, 2)
        }
        I2cSpeed::Fast => {
            let (divider, duty_16_9) = match timing.duty_cycle {
                DutyCycle::Ratio2to1 => (3, false),
                DutyCycle::Ratio16to9 => (25, true),
            };
            let clkc = (pclk / (speed.hz() * divider)).max(1);
            (clkc, true, duty_16_9, freq_mhz * 300 / 1000 + 1, divider)
        }
    };
    if clkc > 0x0fff {
        return Err(Error::InvalidTiming);
    }

    Ok(Timing {
        i2cclk_mhz: freq_mhz as u8,
        clkc: clkc as u16,
        fast,
        duty_16_9,
        risetime: risetime as u8,
        scl_hz: pclk / (clkc * period),
    })
}

/// One GD32VF103 I2C controller in master mode.
pub struct Gd32vf103I2c<I2C: Instance> {
    i2c: I2C,
}

impl<I2C: Instance> Gd32vf103I2c<I2C> {
    #[must_use]
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Release the owned peripheral.
    #[must_use]
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn apply_timing(&mut self, timing: &Timing) {
        self.i2c
            .ctl1
            .modify(|_, w| unsafe { w.i2cclk().bits(timing.i2cclk_mhz) });
        self.i2c
            .rt
            .write(|w| unsafe { w.risetime().bits(timing.risetime) });
        self.i2c.ckcfg.write(|w| {
            let w = unsafe { w.clkc().bits(timing.clkc) };
            w.dtcy().bit(timing.duty_16_9).fast().bit(timing.fast)
        });
    }
}

impl<I2C: Instance> I2cHardwareCore for Gd32vf103I2c<I2C> {
    type Error = Error;

    fn init(&mut self, config: &mut I2cConfig) {
        // Software reset clears any state left over from an aborted
        // transfer (for example a target still stretching SCL).
        self.i2c.ctl0.modify(|_, w| w.sreset().set_bit());
        self.i2c.ctl0.modify(|_, w| w.sreset().clear_bit());

        // Unusable source clocks fall back to the IRC8M reset defaults so
        // init itself cannot fail; configure_timing reports the problem
        // when called directly.
        if compute_timing(config.speed, &config.timing_config).is_err() {
            config.timing_config = TimingConfig::default();
        }
        if let Ok(timing) = compute_timing(config.speed, &config.timing_config) {
            self.apply_timing(&timing);
        }

        self.i2c.ctl0.modify(|_, w| w.i2cen().set_bit());
        self.i2c.ctl0.modify(|_, w| w.acken().set_bit());
    }

    fn configure_timing(
        &mut self,
        speed: I2cSpeed,
        timing: &TimingConfig,
    ) -> Result<u32, Error> {
        let derived = compute_timing(speed, timing)?;

        // Timing registers must not change under a running peripheral.
        let was_enabled = self.i2c.ctl0.read().i2cen().bit_is_set();
        if was_enabled {
            self.i2c.ctl0.modify(|_, w| w.i2cen().clear_bit());
        }
        self.apply_timing(&derived);
        if was_enabled {
            self.i2c.ctl0.modify(|_, w| w.i2cen().set_bit());
        }

        Ok(derived.scl_hz)
    }
}

impl<I2C: Instance> I2cBusInterface for Gd32vf103I2c<I2C> {
    fn flag(&self, flag: I2cFlag) -> bool {
        match flag {
            I2cFlag::BusBusy => self.i2c.stat1.read().i2cbsy().bit_is_set(),
            I2cFlag::StartSent => self.i2c.stat0.read().sbsend().bit_is_set(),
            I2cFlag::AddressSent => self.i2c.stat0.read().addsend().bit_is_set(),
            I2cFlag::TxEmpty => self.i2c.stat0.read().tbe().bit_is_set(),
            I2cFlag::RxNotEmpty => self.i2c.stat0.read().rbne().bit_is_set(),
            I2cFlag::ByteTransferComplete => self.i2c.stat0.read().btc().bit_is_set(),
        }
    }

    fn clear_flag(&mut self, flag: I2cFlag) {
        // ADDSEND clears on a STAT0 read followed by a STAT1 read. The
        // remaining flags clear as a side effect of the data-phase
        // accesses.
        if flag == I2cFlag::AddressSent {
            let _ = self.i2c.stat0.read();
            let _ = self.i2c.stat1.read();
        }
    }

    fn start_on_bus(&mut self) {
        self.i2c.ctl0.modify(|_, w| w.start().set_bit());
    }

    fn stop_on_bus(&mut self) {
        self.i2c.ctl0.modify(|_, w| w.stop().set_bit());
    }

    fn master_addressing(&mut self, address: SevenBitAddress, direction: Direction) {
        let rw = u8::from(matches!(direction, Direction::Receive));
        let byte = ((address & 0x7f) << 1) | rw;
        self.i2c.data.write(|w| unsafe { w.trb().bits(byte) });
    }

    fn data_transmit(&mut self, byte: u8) {
        self.i2c.data.write(|w| unsafe { w.trb().bits(byte) });
    }

    fn data_receive(&mut self) -> u8 {
        self.i2c.data.read().trb().bits()
    }

    fn ack_config(&mut self, enabled: bool) {
        self.i2c.ctl0.modify(|_, w| w.acken().bit(enabled));
    }

    fn ackpos_config(&mut self, position: AckPosition) {
        let next = matches!(position, AckPosition::Next);
        self.i2c.ctl0.modify(|_, w| w.poap().bit(next));
    }

    fn stop_pending(&self) -> bool {
        self.i2c.ctl0.read().stop().bit_is_set()
    }
}
