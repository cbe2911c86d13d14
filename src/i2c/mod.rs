// Licensed under the Apache-2.0 license

//! GD32VF103 I2C driver module.
//!
//! Polled, blocking, single-master I2C for bare-metal `no_std` use. The
//! register/flag primitives, the transfer engine and the embedded-hal
//! surface are separate layers so the engine can be exercised against a
//! scripted double on the host.

pub mod common;
pub mod gd32vf103_i2c;
pub mod i2c_controller;
pub mod master;
pub mod system_setup;
pub mod traits;

pub use common::{Error, I2cConfig, I2cConfigBuilder, I2cSpeed, TimingConfig};
pub use gd32vf103_i2c::Gd32vf103I2c;
pub use i2c_controller::I2cController;
pub use traits::{I2cBusInterface, I2cHardwareCore, I2cMaster, RegisterAccess};
