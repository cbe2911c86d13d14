// Licensed under the Apache-2.0 license

#![cfg_attr(target_arch = "riscv32", no_std)]
#![cfg_attr(target_arch = "riscv32", no_main)]

#[cfg(target_arch = "riscv32")]
mod firmware {
    use fugit::HertzU32;
    use gd32vf103_ddk::common::NoOpLogger;
    use gd32vf103_ddk::delay::McycleDelay;
    use gd32vf103_ddk::i2c::system_setup::{initialize_i2c_system, I2cBus};
    use gd32vf103_ddk::i2c::{Gd32vf103I2c, I2cConfigBuilder, I2cController, I2cHardwareCore};
    use gd32vf103_ddk::rcu::{ClockId, Rcu};
    use gd32vf103_ddk::tests::functional::i2c_test::run_i2c_tests;
    use gd32vf103_ddk::uart::{self, UartController};
    use panic_halt as _;
    use riscv_rt::entry;

    // Everything below runs on the 8 MHz IRC8M the chip boots from.
    const SYSCLK: HertzU32 = HertzU32::MHz(8);

    #[entry]
    fn main() -> ! {
        let dp = gd32vf103_pac::Peripherals::take().unwrap();

        let mut rcu = Rcu::new(dp.RCU);
        rcu.enable_clock(ClockId::Afio);
        rcu.enable_clock(ClockId::Gpioa);
        rcu.enable_clock(ClockId::Gpiob);
        rcu.enable_clock(ClockId::Usart0);
        initialize_i2c_system(&mut rcu, I2cBus::I2c0);

        // PA9 USART0_TX: alternate push-pull. PA10 USART0_RX: floating
        // input.
        dp.GPIOA.ctl1.modify(|_, w| unsafe {
            w.md9()
                .bits(0b11)
                .ctl9()
                .bits(0b10)
                .md10()
                .bits(0b00)
                .ctl10()
                .bits(0b01)
        });
        // PB6 I2C0_SCL / PB7 I2C0_SDA: alternate open-drain.
        dp.GPIOB.ctl0.modify(|_, w| unsafe {
            w.md6()
                .bits(0b11)
                .ctl6()
                .bits(0b11)
                .md7()
                .bits(0b11)
                .ctl7()
                .bits(0b11)
        });

        let mut uart = UartController::new(
            dp.USART0,
            &uart::Config {
                baud_rate: 115_200,
                clk_src: SYSCLK,
            },
        );

        let mut config = I2cConfigBuilder::new().build();
        let mut hardware = Gd32vf103I2c::new(dp.I2C0);
        hardware.init(&mut config);
        let mut i2c = I2cController {
            hardware,
            config,
            logger: NoOpLogger,
        };

        let mut delay = McycleDelay::new(SYSCLK);
        run_i2c_tests(&mut uart, &mut i2c, &mut delay);

        loop {
            unsafe { riscv::asm::wfi() };
        }
    }
}

// The image is only meaningful on the GD32VF103; host builds get a stub
// so the test harness links.
#[cfg(not(target_arch = "riscv32"))]
fn main() {}
