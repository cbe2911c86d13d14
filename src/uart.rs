// Licensed under the Apache-2.0 license

//! Polled USART console driver, used for log output and the functional
//! test harness.

use core::convert::Infallible;
use core::ops::Deref;
use fugit::HertzU32;
use gd32vf103_pac::usart0;

mod sealed {
    pub trait Sealed {}
}

/// A USART peripheral instance usable with [`UartController`].
pub trait Instance: sealed::Sealed + Deref<Target = usart0::RegisterBlock> {}

impl sealed::Sealed for gd32vf103_pac::USART0 {}
impl Instance for gd32vf103_pac::USART0 {}

pub struct Config {
    pub baud_rate: u32,
    /// Bus clock feeding the peripheral (PCLK2 for USART0, PCLK1
    /// otherwise).
    pub clk_src: HertzU32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            clk_src: HertzU32::MHz(8),
        }
    }
}

/// USARTDIV for the BAUD register, rounded to the nearest sixteenth.
fn baud_divider(clk: u32, baud_rate: u32) -> u16 {
    ((clk + baud_rate / 2) / baud_rate) as u16
}

pub struct UartController<UART: Instance> {
    uart: UART,
}

impl<UART: Instance> UartController<UART> {
    /// Configure the baud rate and enable the transmitter and receiver
    /// (8 data bits, no parity, one stop bit).
    pub fn new(uart: UART, config: &Config) -> Self {
        let divider = baud_divider(config.clk_src.to_Hz(), config.baud_rate);
        uart.baud.write(|w| unsafe {
            w.intdiv()
                .bits(divider >> 4)
                .fradiv()
                .bits((divider & 0x0f) as u8)
        });
        uart.ctl0
            .modify(|_, w| w.uen().set_bit().ten().set_bit().ren().set_bit());
        Self { uart }
    }

    /// Release the owned peripheral.
    #[must_use]
    pub fn release(self) -> UART {
        self.uart
    }

    /// Blocking single-byte write.
    pub fn write_byte(&mut self, byte: u8) {
        while self.uart.stat.read().tbe().bit_is_clear() {
            core::hint::spin_loop();
        }
        self.uart
            .data
            .write(|w| unsafe { w.data().bits(u16::from(byte)) });
    }

    /// Non-blocking single-byte read.
    ///
    /// # Errors
    ///
    /// Returns [`nb::Error::WouldBlock`] while the receive buffer is empty.
    pub fn read_byte(&mut self) -> nb::Result<u8, Infallible> {
        if self.uart.stat.read().rbne().bit_is_set() {
            Ok(self.uart.data.read().data().bits() as u8)
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

impl<UART: Instance> embedded_io::ErrorType for UartController<UART> {
    type Error = Infallible;
}

impl<UART: Instance> embedded_io::Write for UartController<UART> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        for &byte in buf {
            self.write_byte(byte);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        while self.uart.stat.read().tc().bit_is_clear() {
            core::hint::spin_loop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divider_for_the_default_console() {
        // 8 MHz / 115200 is 69.44; the divider rounds to 69, so INTDIV is
        // 4 and FRADIV is 5.
        let divider = baud_divider(8_000_000, 115_200);
        assert_eq!(divider, 69);
        assert_eq!(divider >> 4, 4);
        assert_eq!(divider & 0x0f, 5);
    }

    #[test]
    fn divider_rounds_to_nearest() {
        assert_eq!(baud_divider(8_000_000, 9_600), 833);
        assert_eq!(baud_divider(54_000_000, 115_200), 469);
    }
}
