//! Drives one LED of the bar according to a [`BlinkPlan`]: on, off, or a fixed
//! number of toggles.
#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_rtt_target as _panic_handler;

#[rtic::app(
    device = stm32f4xx_hal::stm32,
    peripherals = true,
    dispatchers=[SPI2],
)]
mod app {
    use dwt_systick_monotonic::DwtSystick;
    use rtic::time::duration::Milliseconds;
    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::prelude::*;

    use peripheral_exercises::blink::{BlinkPlan, LedAction, Steps};
    use peripheral_exercises::board::{self, infallible, Leds};
    use peripheral_exercises::config;

    #[monotonic(binds = SysTick, default = true)]
    type SysMono = DwtSystick<{ config::SYSCLK_HZ }>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        leds: Leds,
        steps: Steps,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        board::enable_debug_in_sleep(&ctx.device.RCC, &ctx.device.DBGMCU);
        rtt_init_print!();
        let _clocks = board::freeze_clocks(ctx.device.RCC);

        let mut dcb = ctx.core.DCB;
        let mono = DwtSystick::new(&mut dcb, ctx.core.DWT, ctx.core.SYST, config::SYSCLK_HZ);

        let gpioa = ctx.device.GPIOA.split();
        let leds = board::led_bar(gpioa.pa5, gpioa.pa6, gpioa.pa7);

        let plan = BlinkPlan::default();
        rprintln!("blink: {:?}", plan);

        step::spawn().expect("failed to start the blink task.");
        (
            Shared {},
            Local {
                leds,
                steps: plan.steps(),
            },
            init::Monotonics(mono),
        )
    }

    /// Performs the next step of the plan and schedules the one after it.
    #[task(local = [leds, steps])]
    fn step(ctx: step::Context) {
        let next = match ctx.local.steps.next() {
            Some(step) => step,
            None => {
                rprintln!("blink: done");
                return;
            }
        };
        match next.action {
            LedAction::Set(led, on) => infallible(ctx.local.leds.set(led, on)),
            LedAction::Toggle(led) => infallible(ctx.local.leds.toggle(led)),
        }
        if step::spawn_after(Milliseconds(next.delay_ms)).is_err() {
            rprintln!("[ERROR] failed to schedule the next blink step!");
        }
    }
}
