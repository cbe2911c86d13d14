// Licensed under the Apache-2.0 license

//! Machine-mode CSR access.
//!
//! One module per register with `read`/`write`/`set`/`clear` accessors,
//! thin wrappers over the `csrr`/`csrw`/`csrs`/`csrc` instructions. The
//! 64-bit counters additionally get a torn-read-safe combined accessor
//! ([`mcycle_64`], [`minstret_64`]).

macro_rules! csr_access {
    ($csr:expr) => {
        /// Read the raw register value.
        #[inline]
        #[must_use]
        pub fn read() -> usize {
            let value: usize;
            unsafe { core::arch::asm!(concat!("csrr {0}, ", $csr), out(reg) value) };
            value
        }

        /// Write a raw register value.
        #[inline]
        pub fn write(value: usize) {
            unsafe { core::arch::asm!(concat!("csrw ", $csr, ", {0}"), in(reg) value) };
        }

        /// Set the bits in `mask`.
        #[inline]
        pub fn set(mask: usize) {
            unsafe { core::arch::asm!(concat!("csrs ", $csr, ", {0}"), in(reg) mask) };
        }

        /// Clear the bits in `mask`.
        #[inline]
        pub fn clear(mask: usize) {
            unsafe { core::arch::asm!(concat!("csrc ", $csr, ", {0}"), in(reg) mask) };
        }
    };
}

/// The machine status register.
pub mod mstatus {
    csr_access!("mstatus");
}

/// The machine trap-vector base address register.
pub mod mtvec {
    csr_access!("mtvec");
}

macro_rules! csr_counter64 {
    ($lo:ident, $lo_name:expr, $hi:ident, $hi_name:expr) => {
        pub mod $lo {
            csr_access!($lo_name);
        }

        pub mod $hi {
            csr_access!($hi_name);
        }

        paste::paste! {
            /// Combined 64-bit counter read. Re-reads the high half to
            /// detect a carry between the two accesses.
            #[inline]
            #[must_use]
            pub fn [<$lo _64>]() -> u64 {
                loop {
                    let hi = $hi::read();
                    let lo = $lo::read();
                    if hi == $hi::read() {
                        return ((hi as u64) << 32) | lo as u64;
                    }
                }
            }
        }
    };
}

csr_counter64!(mcycle, "mcycle", mcycleh, "mcycleh");
csr_counter64!(minstret, "minstret", minstreth, "minstreth");
