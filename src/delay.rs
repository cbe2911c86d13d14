// Licensed under the Apache-2.0 license

//! Busy-wait delay driven by the machine cycle counter.

use crate::csr;
use embedded_hal::delay::DelayNs;
use fugit::HertzU32;

/// Delay provider counting core clock cycles via `mcycle`.
pub struct McycleDelay {
    core_frequency: u32,
}

impl McycleDelay {
    #[must_use]
    pub const fn new(core_frequency: HertzU32) -> Self {
        Self {
            core_frequency: core_frequency.raw(),
        }
    }
}

impl DelayNs for McycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let ticks = u64::from(ns) * u64::from(self.core_frequency) / 1_000_000_000;
        let start = csr::mcycle_64();
        while csr::mcycle_64().wrapping_sub(start) < ticks {
            core::hint::spin_loop();
        }
    }
}
