//! Ultrasonic ranging with two periodic tasks.
//!
//! One task measures every [`config::ranging::POLLED_PERIOD_MS`] and refreshes the
//! display and LEDs; the other samples SW1/SW2 every
//! [`config::ranging::KEY_SCAN_PERIOD_MS`] and toggles the measuring and hold flags.
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
    use embedded_hal::digital::v2::InputPin;
    use rtic::{mutex_prelude::*, time::duration::Milliseconds};
    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::{
        gpio::{gpiob::PB1, gpioc::PC13, Input, PullUp},
        prelude::*,
    };

    use peripheral_exercises::board::{self, infallible, Display, DisplayPins, Leds, Sensor};
    use peripheral_exercises::config;
    use peripheral_exercises::datamodel::command::Effect;
    use peripheral_exercises::datamodel::ranging::{MeasurePeriod, RangingState};
    use peripheral_exercises::keys::KeyScanner;

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
        sw1: PC13<Input<PullUp>>,
        sw2: PB1<Input<PullUp>>,
        scanner: KeyScanner,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        board::enable_debug_in_sleep(&ctx.device.RCC, &ctx.device.DBGMCU);
        rtt_init_print!();
        rprintln!("ranging_polled: hello, world!");
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

        let state = RangingState::new(MeasurePeriod::from_micros(
            config::ranging::POLLED_PERIOD_MS * 1_000,
        ));

        measure::spawn().expect("failed to start the measurement task.");
        scan_keys::spawn().expect("failed to start the key task.");
        (
            Shared {
                state,
                leds,
                display,
            },
            Local {
                sensor,
                sw1: gpioc.pc13.into_pull_up_input(),
                sw2: gpiob.pb1.into_pull_up_input(),
                scanner: KeyScanner::new(),
            },
            init::Monotonics(mono),
        )
    }

    #[task(shared = [state, leds, display], local = [sensor])]
    fn measure(mut ctx: measure::Context) {
        let state = ctx.shared.state.lock(|state| *state);
        let sensor = ctx.local.sensor;
        match state.cycle(|| sensor.echo_width_us()) {
            Ok(Some(cycle)) => {
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
        if measure::spawn_after(Milliseconds(state.period.as_millis())).is_err() {
            rprintln!("[ERROR] failed to reschedule the measurement!");
        }
    }

    #[task(shared = [state, leds, display], local = [sw1, sw2, scanner])]
    fn scan_keys(mut ctx: scan_keys::Context) {
        // the switches pull the line low when pressed
        let sw1 = infallible(InputPin::is_low(ctx.local.sw1));
        let sw2 = infallible(InputPin::is_low(ctx.local.sw2));

        if let Some(key) = ctx.local.scanner.scan(sw1, sw2) {
            let effect = ctx.shared.state.lock(|state| state.apply(key.command()));
            if effect == Effect::OutputsCleared {
                (ctx.shared.leds, ctx.shared.display).lock(|leds, display| {
                    infallible(leds.all_off());
                    infallible(display.off());
                });
            }
            rprintln!("{:?} -> {:?}", key, effect);
        }

        if scan_keys::spawn_after(Milliseconds(config::ranging::KEY_SCAN_PERIOD_MS)).is_err() {
            rprintln!("[ERROR] failed to reschedule the key scan!");
        }
    }
}
