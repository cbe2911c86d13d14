// Licensed under the Apache-2.0 license

//! I2C system setup helpers.
//!
//! Ties the I2C peripherals to the RCU clock/reset controller so callers
//! do not hardcode the bring-up ceremony: bus clock on, peripheral reset
//! pulsed, then [`crate::i2c::traits::I2cHardwareCore::init`].

use crate::rcu::{ClockId, Rcu, ResetId};

/// The two I2C buses of the GD32VF103.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum I2cBus {
    I2c0,
    I2c1,
}

/// Enable the bus clock and pulse the peripheral reset for `bus`.
///
/// Must run before the peripheral registers are touched; a disabled bus
/// clock makes every register access read as zero.
pub fn initialize_i2c_system(rcu: &mut Rcu, bus: I2cBus) {
    let (clock, reset) = match bus {
        I2cBus::I2c0 => (ClockId::I2c0, ResetId::I2c0),
        I2cBus::I2c1 => (ClockId::I2c1, ResetId::I2c1),
    };
    rcu.enable_clock(clock);
    rcu.reset(reset);
}
