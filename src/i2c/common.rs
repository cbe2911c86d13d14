// Licensed under the Apache-2.0 license

//! Common types and constants for the GD32VF103 I2C driver modules.
//!
//! This module provides shared definitions for error handling, bus timing
//! and the status-flag vocabulary used across the I2C driver implementation.

use fugit::HertzU32;

/// Bus speeds supported by the GD32VF103 I2C peripheral.
///
/// The discriminant is the SCL frequency in Hz. Fast-mode plus is not
/// available on this peripheral.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum I2cSpeed {
    Standard = 100_000,
    Fast = 400_000,
}

impl I2cSpeed {
    /// Target SCL frequency in Hz.
    #[must_use]
    pub fn hz(self) -> u32 {
        self as u32
    }
}

/// Fast-mode SCL duty cycle (low : high ratio).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DutyCycle {
    Ratio2to1,
    Ratio16to9,
}

/// Errors reported by the I2C driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A zero-length buffer was supplied for a transfer. Detected before
    /// any hardware access.
    InvalidBufferLength,
    /// The requested bus speed cannot be derived from the given source
    /// clock.
    InvalidTiming,
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        match *self {
            Error::InvalidBufferLength | Error::InvalidTiming => {
                embedded_hal::i2c::ErrorKind::Other
            }
        }
    }
}

/// Status flags exposed by the peripheral and polled by the master engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum I2cFlag {
    /// A transfer is in progress on the wire.
    BusBusy,
    /// The start condition has been sent.
    StartSent,
    /// The address byte has been sent and acknowledged.
    AddressSent,
    /// The transmit data register is empty.
    TxEmpty,
    /// The receive data register holds a byte.
    RxNotEmpty,
    /// The byte transfer on the shift register is complete.
    ByteTransferComplete,
}

/// Transfer direction encoded into the address byte.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Transmit,
    Receive,
}

/// Which byte the ACK control applies to during multi-byte receives.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AckPosition {
    Current,
    Next,
}

pub struct TimingConfig {
    /// I2C source clock (APB1 / PCLK1).
    pub clk_src: HertzU32,
    /// Fast-mode duty cycle. Ignored in standard mode.
    pub duty_cycle: DutyCycle,
}

impl Default for TimingConfig {
    fn default() -> Self {
        // IRC8M, the source clock out of reset.
        Self {
            clk_src: HertzU32::MHz(8),
            duty_cycle: DutyCycle::Ratio2to1,
        }
    }
}

pub struct I2cConfig {
    pub speed: I2cSpeed,
    pub timing_config: TimingConfig,
}

pub struct I2cConfigBuilder {
    speed: I2cSpeed,
    timing_config: Option<TimingConfig>,
}

impl Default for I2cConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl I2cConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            speed: I2cSpeed::Standard,
            timing_config: None,
        }
    }
    #[must_use]
    pub fn speed(mut self, speed: I2cSpeed) -> Self {
        self.speed = speed;
        self
    }
    #[must_use]
    pub fn timing_config(mut self, config: TimingConfig) -> Self {
        self.timing_config = Some(config);
        self
    }
    #[must_use]
    pub fn build(self) -> I2cConfig {
        I2cConfig {
            speed: self.speed,
            timing_config: self.timing_config.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = I2cConfigBuilder::new().build();
        assert_eq!(config.speed, I2cSpeed::Standard);
        assert_eq!(config.timing_config.clk_src.to_Hz(), 8_000_000);
        assert_eq!(config.timing_config.duty_cycle, DutyCycle::Ratio2to1);
    }

    #[test]
    fn builder_overrides() {
        let config = I2cConfigBuilder::new()
            .speed(I2cSpeed::Fast)
            .timing_config(TimingConfig {
                clk_src: HertzU32::MHz(54),
                duty_cycle: DutyCycle::Ratio16to9,
            })
            .build();
        assert_eq!(config.speed, I2cSpeed::Fast);
        assert_eq!(config.timing_config.clk_src.to_Hz(), 54_000_000);
        assert_eq!(config.timing_config.duty_cycle, DutyCycle::Ratio16to9);
    }
}
