// Licensed under the Apache-2.0 license

//! Polled blocking master engine.
//!
//! Implements [`I2cMaster`] for any hardware that exposes the
//! register/flag primitives of [`I2cBusInterface`]. Each transaction is a
//! linear handshake: wait for an idle bus, assert start, address the
//! target, move data while polling the transmit/receive flags, assert
//! stop. All waits are unbounded spin loops; there is no NACK or bus-error
//! detection and a stuck bus hangs the caller.

use crate::i2c::common::{AckPosition, Direction, Error, I2cFlag};
use crate::i2c::traits::{I2cBusInterface, I2cHardwareCore, I2cMaster};
use embedded_hal::i2c::SevenBitAddress;

fn wait_set<H: I2cBusInterface + ?Sized>(hw: &H, flag: I2cFlag) {
    while !hw.flag(flag) {
        core::hint::spin_loop();
    }
}

fn wait_clear<H: I2cBusInterface + ?Sized>(hw: &H, flag: I2cFlag) {
    while hw.flag(flag) {
        core::hint::spin_loop();
    }
}

fn wait_stop_done<H: I2cBusInterface + ?Sized>(hw: &H) {
    while hw.stop_pending() {
        core::hint::spin_loop();
    }
}

impl<H> I2cMaster<SevenBitAddress> for H
where
    H: I2cHardwareCore<Error = Error> + I2cBusInterface,
{
    fn write(&mut self, addr: SevenBitAddress, bytes: &[u8]) -> Result<(), Error> {
        if bytes.is_empty() {
            return Err(Error::InvalidBufferLength);
        }

        wait_clear(self, I2cFlag::BusBusy);
        self.start_on_bus();
        wait_set(self, I2cFlag::StartSent);
        self.master_addressing(addr, Direction::Transmit);
        wait_set(self, I2cFlag::AddressSent);
        self.clear_flag(I2cFlag::AddressSent);
        wait_set(self, I2cFlag::TxEmpty);
        for &byte in bytes {
            self.data_transmit(byte);
            wait_set(self, I2cFlag::TxEmpty);
        }
        self.stop_on_bus();
        wait_stop_done(self);

        Ok(())
    }

    fn read(&mut self, addr: SevenBitAddress, buffer: &mut [u8]) -> Result<(), Error> {
        if buffer.is_empty() {
            return Err(Error::InvalidBufferLength);
        }

        self.ackpos_config(AckPosition::Next);
        wait_clear(self, I2cFlag::BusBusy);
        self.start_on_bus();
        wait_set(self, I2cFlag::StartSent);
        self.master_addressing(addr, Direction::Receive);
        wait_set(self, I2cFlag::AddressSent);
        self.clear_flag(I2cFlag::AddressSent);

        match buffer.len() {
            count @ 3.. => {
                for (received, slot) in buffer.iter_mut().enumerate() {
                    if received + 3 == count {
                        // The second-to-last byte is in the shift register;
                        // NACK the final byte.
                        wait_set(self, I2cFlag::ByteTransferComplete);
                        self.ack_config(false);
                    }
                    wait_set(self, I2cFlag::RxNotEmpty);
                    *slot = self.data_receive();
                }
            }
            2 => {
                // ACK handling here relies on the position configured
                // above; there is deliberately no explicit disable in this
                // branch.
                wait_set(self, I2cFlag::ByteTransferComplete);
                for slot in buffer.iter_mut() {
                    wait_set(self, I2cFlag::RxNotEmpty);
                    *slot = self.data_receive();
                }
            }
            _ => {
                wait_set(self, I2cFlag::ByteTransferComplete);
                wait_set(self, I2cFlag::RxNotEmpty);
                if let Some(slot) = buffer.first_mut() {
                    *slot = self.data_receive();
                }
            }
        }

        self.stop_on_bus();
        wait_stop_done(self);
        // Rearm acknowledge for subsequent transactions.
        self.ackpos_config(AckPosition::Current);
        self.ack_config(true);

        Ok(())
    }

    fn write_read(
        &mut self,
        addr: SevenBitAddress,
        bytes: &[u8],
        buffer: &mut [u8],
    ) -> Result<(), Error> {
        self.write(addr, bytes)?;
        self.read(addr, buffer)
    }
}
