//! Latches a fixed number into the three-digit BCD display and logs the line
//! levels of every digit.
#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_rtt_target as _panic_handler;

#[rtic::app(device = stm32f4xx_hal::stm32, peripherals = true)]
mod app {
    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::prelude::*;

    use peripheral_exercises::bcd::{bcd_lines, to_bcd_digits};
    use peripheral_exercises::board::{self, infallible, DisplayPins};
    use peripheral_exercises::config;
    use peripheral_exercises::drivers::bcd_display::DIGITS;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {}

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        board::enable_debug_in_sleep(&ctx.device.RCC, &ctx.device.DBGMCU);
        rtt_init_print!();
        let _clocks = board::freeze_clocks(ctx.device.RCC);

        let gpiob = ctx.device.GPIOB.split();
        let gpioc = ctx.device.GPIOC.split();
        let mut display = board::display(DisplayPins {
            b0: gpioc.pc0,
            b1: gpioc.pc1,
            b2: gpioc.pc2,
            b3: gpioc.pc3,
            digit1: gpiob.pb4,
            digit2: gpiob.pb5,
            digit3: gpiob.pb6,
        });

        let value = config::display::VALUE;
        infallible(display.write(value));

        let mut digits = [0u8; DIGITS];
        to_bcd_digits(u32::from(value), &mut digits);
        rprintln!("showing {}", value);
        for (position, digit) in digits.iter().enumerate() {
            rprintln!(
                "digit {}: {} -> b0..b3 {:?}",
                position + 1,
                digit,
                bcd_lines(*digit)
            );
        }

        // the display keeps its latched value, nothing left to do
        (Shared {}, Local {}, init::Monotonics())
    }
}
