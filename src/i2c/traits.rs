// Licensed under the Apache-2.0 license

//! # I2C Hardware Abstraction Traits
//!
//! Composable traits for the I2C driver stack, split by responsibility:
//!
//! ```text
//! I2cHardwareCore (init + timing)
//!     └── I2cMaster (blocking master transfers)
//!         └── RegisterAccess (8-bit register read/write convenience)
//! I2cBusInterface (register/flag primitives consumed by the master engine)
//! ```
//!
//! `I2cBusInterface` is the seam between the portable polled engine in
//! [`crate::i2c::master`] and the peripheral registers. The production
//! implementation lives in [`crate::i2c::gd32vf103_i2c`]; unit tests
//! substitute a scripted double so the spin waits resolve immediately.

use crate::i2c::common::{AckPosition, Direction, I2cConfig, I2cFlag, I2cSpeed, TimingConfig};
use embedded_hal::i2c::{AddressMode, SevenBitAddress};

/// Core I2C hardware interface providing initialization and timing setup.
pub trait I2cHardwareCore {
    /// Hardware-specific error type that implements embedded-hal error traits
    type Error: embedded_hal::i2c::Error + core::fmt::Debug;

    /// Initialize the I2C hardware with the given configuration.
    ///
    /// May normalize the config parameter in place (for example when the
    /// supplied source clock cannot satisfy the requested speed and the
    /// implementation falls back to its reset defaults). Initialization
    /// itself does not fail; use [`I2cHardwareCore::configure_timing`] to
    /// observe timing errors.
    fn init(&mut self, config: &mut I2cConfig);

    /// Configure bus timing for the given speed.
    ///
    /// # Returns
    ///
    /// The achieved SCL frequency in Hz, which may differ from the target
    /// by integer-division truncation.
    ///
    /// # Errors
    ///
    /// Returns an error if the requested speed cannot be derived from the
    /// source clock in `timing`.
    fn configure_timing(
        &mut self,
        speed: I2cSpeed,
        timing: &TimingConfig,
    ) -> Result<u32, Self::Error>;
}

/// Register/flag primitives of the I2C peripheral.
///
/// These map one to one onto the peripheral's status-flag interface; the
/// master engine composes them into complete transactions and owns all
/// sequencing. Implementations only touch registers.
pub trait I2cBusInterface {
    /// Current state of a status flag.
    fn flag(&self, flag: I2cFlag) -> bool;

    /// Explicitly clear a status flag.
    ///
    /// On this peripheral family only [`I2cFlag::AddressSent`] needs an
    /// explicit clear; the remaining flags are cleared as a side effect of
    /// the data-phase register accesses and implementations may treat them
    /// as a no-op here.
    fn clear_flag(&mut self, flag: I2cFlag);

    /// Assert a start condition.
    fn start_on_bus(&mut self);

    /// Assert a stop condition.
    fn stop_on_bus(&mut self);

    /// Send the address byte: the 7-bit address shifted left with the
    /// read/write bit taken from `direction`.
    fn master_addressing(&mut self, address: SevenBitAddress, direction: Direction);

    /// Write one byte into the transmit data register.
    fn data_transmit(&mut self, byte: u8);

    /// Read one byte from the receive data register.
    fn data_receive(&mut self) -> u8;

    /// Enable or disable acknowledge generation.
    fn ack_config(&mut self, enabled: bool);

    /// Select which byte the ACK control applies to.
    fn ackpos_config(&mut self, position: AckPosition);

    /// Whether a previously requested stop condition is still pending in
    /// the control register.
    fn stop_pending(&self) -> bool;
}

/// Blocking I2C master operations.
///
/// The address type `A` must implement `AddressMode` for embedded-hal
/// compatibility; this peripheral only supports [`SevenBitAddress`].
///
/// All operations block by spinning on status flags and do not time out.
/// A non-responding target or a stuck bus hangs the caller.
pub trait I2cMaster<A: AddressMode = SevenBitAddress>: I2cHardwareCore {
    /// Write `bytes` to the target at `addr` as one transaction.
    ///
    /// # Errors
    ///
    /// Fails with a buffer-length error when `bytes` is empty, before any
    /// hardware access.
    fn write(&mut self, addr: A, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Read `buffer.len()` bytes from the target at `addr` as one
    /// transaction. The final byte is not acknowledged, per the multi-byte
    /// read convention.
    ///
    /// # Errors
    ///
    /// Fails with a buffer-length error when `buffer` is empty, before any
    /// hardware access.
    fn read(&mut self, addr: A, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read, as two complete STOP-terminated transactions.
    ///
    /// This peripheral driver has no repeated-start path; targets that
    /// require a repeated start between the phases are not supported.
    ///
    /// # Errors
    ///
    /// Fails if either phase fails.
    fn write_read(&mut self, addr: A, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error>;
}

/// 8-bit register access on top of raw master transfers.
pub trait RegisterAccess<A: AddressMode + Copy = SevenBitAddress>: I2cMaster<A> {
    /// Write `value` to the target's 8-bit register `register`, as a single
    /// 2-byte transaction `{register, value}`.
    ///
    /// # Errors
    ///
    /// Propagates the underlying write status.
    fn write_register(&mut self, addr: A, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write(addr, &[register, value])
    }

    /// Read the target's 8-bit register `register`: a 1-byte write of the
    /// register index followed by a 1-byte read.
    ///
    /// # Errors
    ///
    /// Propagates the status of either transaction.
    fn read_register(&mut self, addr: A, register: u8) -> Result<u8, Self::Error> {
        self.write(addr, &[register])?;
        let mut value = [0u8; 1];
        self.read(addr, &mut value)?;
        let [byte] = value;
        Ok(byte)
    }
}

/// Blanket implementation: every master gets register access.
impl<T, A> RegisterAccess<A> for T
where
    T: I2cMaster<A>,
    A: AddressMode + Copy,
{
}
