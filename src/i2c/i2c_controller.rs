// Licensed under the Apache-2.0 license

//! High-level I2C controller abstraction.
//!
//! This module provides safe APIs for sending and receiving I2C
//! transactions. It implements embedded-hal compatible interfaces and is
//! designed for use in `no_std` environments with hardware abstraction
//! traits. Failed transfers are reported through the attached [`Logger`].

use crate::common::{Logger, NoOpLogger};
use crate::i2c::common::I2cConfig;
use crate::i2c::traits::{I2cMaster, RegisterAccess};
use core::fmt::Write;
use embedded_hal::i2c::{Operation, SevenBitAddress};

pub struct I2cController<H: I2cMaster, L: Logger = NoOpLogger> {
    pub hardware: H,
    pub config: I2cConfig,
    pub logger: L,
}

impl<H: I2cMaster, L: Logger> I2cController<H, L> {
    fn report(&mut self, operation: &str, addr: SevenBitAddress) {
        let mut line: heapless::String<64> = heapless::String::new();
        let _ = write!(line, "i2c: {operation} failed (addr 0x{addr:02x})");
        self.logger.log(&line);
    }

    /// Write an 8-bit target register.
    ///
    /// # Errors
    ///
    /// Propagates the underlying transfer status.
    pub fn write_register(
        &mut self,
        addr: SevenBitAddress,
        register: u8,
        value: u8,
    ) -> Result<(), H::Error> {
        let result = self.hardware.write_register(addr, register, value);
        if result.is_err() {
            self.report("register write", addr);
        }
        result
    }

    /// Read an 8-bit target register.
    ///
    /// # Errors
    ///
    /// Propagates the underlying transfer status.
    pub fn read_register(&mut self, addr: SevenBitAddress, register: u8) -> Result<u8, H::Error> {
        let result = self.hardware.read_register(addr, register);
        if result.is_err() {
            self.report("register read", addr);
        }
        result
    }
}

impl<H: I2cMaster, L: Logger> embedded_hal::i2c::ErrorType for I2cController<H, L> {
    type Error = H::Error;
}

impl<H: I2cMaster, L: Logger> embedded_hal::i2c::I2c for I2cController<H, L> {
    fn read(&mut self, addr: SevenBitAddress, buffer: &mut [u8]) -> Result<(), Self::Error> {
        let result = self.hardware.read(addr, buffer);
        if result.is_err() {
            self.report("read", addr);
        }
        result
    }

    fn write(&mut self, addr: SevenBitAddress, bytes: &[u8]) -> Result<(), Self::Error> {
        let result = self.hardware.write(addr, bytes);
        if result.is_err() {
            self.report("write", addr);
        }
        result
    }

    fn write_read(
        &mut self,
        addr: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Self::Error> {
        let result = self.hardware.write_read(addr, bytes, buffer);
        if result.is_err() {
            self.report("write_read", addr);
        }
        result
    }

    /// The polled handshake has no repeated-start path, so each operation
    /// runs as its own STOP-terminated transfer.
    fn transaction(
        &mut self,
        addr: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations.iter_mut() {
            let result = match operation {
                Operation::Read(buffer) => self.hardware.read(addr, buffer),
                Operation::Write(bytes) => self.hardware.write(addr, bytes),
            };
            if result.is_err() {
                self.report("transaction", addr);
            }
            result?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i2c::common::{
        AckPosition, Direction, Error, I2cConfig, I2cConfigBuilder, I2cFlag, I2cSpeed,
        TimingConfig,
    };
    use crate::i2c::traits::{I2cBusInterface, I2cHardwareCore};
    use embedded_hal::i2c::I2c;

    /// Bus double whose flags always read ready. The controller under test
    /// drives it through the real polled engine.
    #[derive(Default)]
    struct ReadyBus {
        starts: usize,
        stops: usize,
        transmitted: Vec<u8>,
        addressed: Vec<(u8, Direction)>,
    }

    impl I2cHardwareCore for ReadyBus {
        type Error = Error;

        fn init(&mut self, _config: &mut I2cConfig) {}

        fn configure_timing(
            &mut self,
            speed: I2cSpeed,
            _timing: &TimingConfig,
        ) -> Result<u32, Error> {
            Ok(speed.hz())
        }
    }

    impl I2cBusInterface for ReadyBus {
        fn flag(&self, flag: I2cFlag) -> bool {
            !matches!(flag, I2cFlag::BusBusy)
        }

        fn clear_flag(&mut self, _flag: I2cFlag) {}

        fn start_on_bus(&mut self) {
            self.starts += 1;
        }

        fn stop_on_bus(&mut self) {
            self.stops += 1;
        }

        fn master_addressing(&mut self, address: u8, direction: Direction) {
            self.addressed.push((address, direction));
        }

        fn data_transmit(&mut self, byte: u8) {
            self.transmitted.push(byte);
        }

        fn data_receive(&mut self) -> u8 {
            0
        }

        fn ack_config(&mut self, _enabled: bool) {}

        fn ackpos_config(&mut self, _position: AckPosition) {}

        fn stop_pending(&self) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct CaptureLogger {
        lines: Vec<String>,
    }

    impl Logger for CaptureLogger {
        fn log(&mut self, message: &str) {
            self.lines.push(message.to_owned());
        }
    }

    fn controller() -> I2cController<ReadyBus, CaptureLogger> {
        I2cController {
            hardware: ReadyBus::default(),
            config: I2cConfigBuilder::new().build(),
            logger: CaptureLogger::default(),
        }
    }

    #[test]
    fn transaction_dispatches_each_operation_as_its_own_transfer() {
        let mut i2c = controller();
        let mut buffer = [0u8; 3];
        i2c.transaction(
            0x48,
            &mut [
                Operation::Write(&[0x01, 0x02]),
                Operation::Read(&mut buffer),
            ],
        )
        .unwrap();

        assert_eq!(i2c.hardware.starts, 2);
        assert_eq!(i2c.hardware.stops, 2);
        assert_eq!(
            i2c.hardware.addressed,
            vec![(0x48, Direction::Transmit), (0x48, Direction::Receive)]
        );
        assert_eq!(i2c.hardware.transmitted, vec![0x01, 0x02]);
        assert!(i2c.logger.lines.is_empty());
    }

    #[test]
    fn failures_are_logged_with_the_target_address() {
        let mut i2c = controller();

        assert_eq!(i2c.write(0x3c, &[]), Err(Error::InvalidBufferLength));
        assert_eq!(i2c.logger.lines, vec!["i2c: write failed (addr 0x3c)"]);
        // The zero-length check fires before any hardware access.
        assert_eq!(i2c.hardware.starts, 0);
    }

    #[test]
    fn register_write_goes_out_as_one_transaction() {
        let mut i2c = controller();
        i2c.write_register(0x50, 0x10, 0xA5).unwrap();

        assert_eq!(i2c.hardware.starts, 1);
        assert_eq!(i2c.hardware.stops, 1);
        assert_eq!(i2c.hardware.transmitted, vec![0x10, 0xA5]);
    }

    #[test]
    fn register_read_is_a_pointer_write_then_a_read() {
        let mut i2c = controller();
        let _ = i2c.read_register(0x50, 0x10).unwrap();

        assert_eq!(i2c.hardware.starts, 2);
        assert_eq!(i2c.hardware.stops, 2);
        assert_eq!(i2c.hardware.transmitted, vec![0x10]);
        assert_eq!(
            i2c.hardware.addressed,
            vec![(0x50, Direction::Transmit), (0x50, Direction::Receive)]
        );
    }
}
