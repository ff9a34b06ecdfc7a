//! Ultrasonic ranging driven by a periodic timer notification.
//!
//! Every [`config::ranging::TIMER_PERIOD_MS`] the trigger task notifies the
//! measurement task. SW1 starts/stops measuring (stopping clears LEDs and display),
//! SW2 holds the last reading on screen. Both switches are interrupt driven.
#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_rtt_target as _panic_handler;

#[rtic::app(
    device = stm32f4xx_hal::stm32,
    peripherals = true,
    dispatchers=[SPI2, SPI3],
)]
mod app {
    use dwt_systick_monotonic::DwtSystick;
    use rtic::{mutex_prelude::*, time::duration::Milliseconds};
    use rtt_target::{rprint, rprintln, rtt_init_print};
    use stm32f4xx_hal::{gpio::ExtiPin, prelude::*};

    use peripheral_exercises::board::{
        self, infallible, Display, DisplayPins, Leds, Sensor, Switch1, Switch2,
    };
    use peripheral_exercises::config;
    use peripheral_exercises::datamodel::command::Effect;
    use peripheral_exercises::datamodel::ranging::{MeasurePeriod, RangingState};
    use peripheral_exercises::keys::KeyEvent;

    #[monotonic(binds = SysTick, default = true)]
    type SysMono = DwtSystick<{ config::SYSCLK_HZ }>;

    #[shared]
    struct Shared {
        state: RangingState,
        leds: Leds,
        display: Display,
    }

    #[local]
    struct Local {
        sensor: Sensor,
        sw1: Switch1,
        sw2: Switch2,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        board::enable_debug_in_sleep(&ctx.device.RCC, &ctx.device.DBGMCU);
        rtt_init_print!();
        rprintln!("ranging_timer: hello, world!");
        let clocks = board::freeze_clocks(ctx.device.RCC);

        let mut dcb = ctx.core.DCB;
        let mono = DwtSystick::new(&mut dcb, ctx.core.DWT, ctx.core.SYST, config::SYSCLK_HZ);

        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();
        let gpioc = ctx.device.GPIOC.split();

        let leds = board::led_bar(gpioa.pa5, gpioa.pa6, gpioa.pa7);
        let display = board::display(DisplayPins {
            b0: gpioc.pc0,
            b1: gpioc.pc1,
            b2: gpioc.pc2,
            b3: gpioc.pc3,
            digit1: gpiob.pb4,
            digit2: gpiob.pb5,
            digit3: gpiob.pb6,
        });
        let sensor = board::sensor(gpioa.pa8, gpiob.pb10, &clocks);

        let mut syscfg = ctx.device.SYSCFG.constrain();
        let mut exti = ctx.device.EXTI;
        let (sw1, sw2) = board::switch_interrupts(gpioc.pc13, gpiob.pb1, &mut syscfg, &mut exti);

        let period_us = config::ranging::TIMER_PERIOD_MS * 1_000;
        let state = RangingState::new(MeasurePeriod::from_micros(period_us));

        tick::spawn_after(Milliseconds(config::ranging::STARTUP_DELAY_MS))
            .expect("failed to kick off the measurement trigger.");
        (
            Shared {
                state,
                leds,
                display,
            },
            Local { sensor, sw1, sw2 },
            init::Monotonics(mono),
        )
    }

    /// Periodic notification of the measurement task.
    #[task(priority = 2, shared = [state])]
    fn tick(mut ctx: tick::Context) {
        let period = ctx.shared.state.lock(|state| state.period);
        if tick::spawn_after(Milliseconds(period.as_millis())).is_err() {
            rprintln!("[ERROR] failed to re-arm the measurement trigger!");
        }
        // an unconsumed notification absorbs this one
        if measure::spawn().is_err() {
            rprintln!("[WARNING] previous measurement still pending, tick absorbed.");
        }
    }

    #[task(priority = 1, shared = [state, leds, display], local = [sensor])]
    fn measure(mut ctx: measure::Context) {
        let state = ctx.shared.state.lock(|state| *state);
        let sensor = ctx.local.sensor;
        match state.cycle(|| sensor.echo_width_us()) {
            Ok(Some(cycle)) => {
                rprint!("{}", cycle.report);
                if let Some(refresh) = cycle.refresh {
                    (ctx.shared.leds, ctx.shared.display).lock(|leds, display| {
                        infallible(leds.show(refresh.level));
                        infallible(display.write(refresh.distance));
                    });
                }
            }
            Ok(None) => {}
            Err(e) => rprintln!("[WARNING] ranging failed: {:?}", e),
        }
    }

    #[task(binds = EXTI15_10, priority = 2, local = [sw1], shared = [state, leds, display])]
    fn on_switch1(mut ctx: on_switch1::Context) {
        ctx.local.sw1.clear_interrupt_pending_bit();
        let effect = ctx
            .shared
            .state
            .lock(|state| state.apply(KeyEvent::Switch1.command()));
        if effect == Effect::OutputsCleared {
            (ctx.shared.leds, ctx.shared.display).lock(|leds, display| {
                infallible(leds.all_off());
                infallible(display.off());
            });
        }
        rprintln!("SW1 -> {:?}", effect);
    }

    #[task(binds = EXTI1, priority = 2, local = [sw2], shared = [state])]
    fn on_switch2(mut ctx: on_switch2::Context) {
        ctx.local.sw2.clear_interrupt_pending_bit();
        let hold = ctx.shared.state.lock(|state| {
            state.apply(KeyEvent::Switch2.command());
            state.hold
        });
        rprintln!("SW2 -> hold {}", hold);
    }
}
