// Licensed under the Apache-2.0 license

//! Reset and clock unit (RCU) control for the peripherals this crate
//! drives.

use gd32vf103_pac::RCU;

/// Peripheral bus clocks gateable through this wrapper.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClockId {
    Afio,
    Gpioa,
    Gpiob,
    Gpioc,
    Usart0,
    I2c0,
    I2c1,
}

/// Peripheral resets reachable through this wrapper.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetId {
    Usart0,
    I2c0,
    I2c1,
}

pub struct Rcu {
    rcu: RCU,
}

impl Rcu {
    #[must_use]
    pub fn new(rcu: RCU) -> Self {
        Self { rcu }
    }

    /// Gate the given peripheral clock on.
    pub fn enable_clock(&mut self, id: ClockId) {
        match id {
            ClockId::Afio => self.rcu.apb2en.modify(|_, w| w.afen().set_bit()),
            ClockId::Gpioa => self.rcu.apb2en.modify(|_, w| w.paen().set_bit()),
            ClockId::Gpiob => self.rcu.apb2en.modify(|_, w| w.pben().set_bit()),
            ClockId::Gpioc => self.rcu.apb2en.modify(|_, w| w.pcen().set_bit()),
            ClockId::Usart0 => self.rcu.apb2en.modify(|_, w| w.usart0en().set_bit()),
            ClockId::I2c0 => self.rcu.apb1en.modify(|_, w| w.i2c0en().set_bit()),
            ClockId::I2c1 => self.rcu.apb1en.modify(|_, w| w.i2c1en().set_bit()),
        }
    }

    /// Pulse the given peripheral reset (assert then deassert).
    pub fn reset(&mut self, id: ResetId) {
        match id {
            ResetId::Usart0 => {
                self.rcu.apb2rst.modify(|_, w| w.usart0rst().set_bit());
                self.rcu.apb2rst.modify(|_, w| w.usart0rst().clear_bit());
            }
            ResetId::I2c0 => {
                self.rcu.apb1rst.modify(|_, w| w.i2c0rst().set_bit());
                self.rcu.apb1rst.modify(|_, w| w.i2c0rst().clear_bit());
            }
            ResetId::I2c1 => {
                self.rcu.apb1rst.modify(|_, w| w.i2c1rst().set_bit());
                self.rcu.apb1rst.modify(|_, w| w.i2c1rst().clear_bit());
            }
        }
    }

    /// Release the owned peripheral.
    #[must_use]
    pub fn release(self) -> RCU {
        self.rcu
    }
}
