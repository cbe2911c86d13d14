// Licensed under the Apache-2.0 license

//! Shared logging seam for driver modules.

use crate::uart::{Instance, UartController};
use embedded_io::Write;

/// Sink for driver diagnostics.
pub trait Logger {
    fn log(&mut self, message: &str);
}

/// Logger that discards everything.
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&mut self, _message: &str) {}
}

/// Logger that writes one line per message through a borrowed UART.
pub struct UartLogger<'a, UART: Instance> {
    uart: &'a mut UartController<UART>,
}

impl<'a, UART: Instance> UartLogger<'a, UART> {
    pub fn new(uart: &'a mut UartController<UART>) -> Self {
        Self { uart }
    }
}

impl<UART: Instance> Logger for UartLogger<'_, UART> {
    fn log(&mut self, message: &str) {
        let _ = self.uart.write_all(message.as_bytes());
        let _ = self.uart.write_all(b"\r\n");
    }
}
