//! Ultrasonic ranging with LCD, LED bar and a PC command interface.
//!
//! A periodic trigger notifies the measurement task, which reads the HC-SR04,
//! reports `Distancia: <n> cm|in` over USART2 and, unless on hold, refreshes the
//! display and LEDs. SW1/SW2 and the single-letter UART commands (`O`, `H`, `I`,
//! `F`, `S`) change the shared [`RangingState`].
#![deny(unsafe_code)]
#![no_main]
#![no_std]

use panic_rtt_target as _panic_handler;

/// submodule holding task handlers
mod tasks;

/*
 Software tasks need free interrupts to be dispatched from, so we donate SPI2 and SPI3
 (unused on this board) to RTIC: one dispatcher per software task priority.
*/
#[rtic::app(
    device = stm32f4xx_hal::stm32,
    peripherals = true,
    dispatchers=[SPI2, SPI3],
)]
mod app {
    use dwt_systick_monotonic::DwtSystick;
    use rtic::time::duration::Milliseconds;
    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::{prelude::*, serial, stm32::USART2};

    use peripheral_exercises::board::{self, Display, DisplayPins, Leds, Sensor, Switch1, Switch2};
    use peripheral_exercises::config;
    use peripheral_exercises::datamodel::command::Command;
    use peripheral_exercises::datamodel::ranging::{MeasurePeriod, RangingState};

    #[monotonic(binds = SysTick, default = true)]
    type SysMono = DwtSystick<{ config::SYSCLK_HZ }>;

    /// PC serial port, transmit half
    pub(crate) type Usart2Tx = serial::Tx<USART2>;
    /// PC serial port, receive half
    pub(crate) type Usart2Rx = serial::Rx<USART2>;

    /* resources shared across RTIC tasks */
    #[shared]
    struct Shared {
        /// flags and measure period, written by the command task and read by the measurement
        state: RangingState,
        /// last distance put on the display, in the unit it was measured in
        last_distance: Option<u16>,
        leds: Leds,
        display: Display,
        tx: Usart2Tx,
    }

    /* resources local to specific RTIC tasks */
    #[local]
    struct Local {
        sensor: Sensor,
        rx: Usart2Rx,
        sw1: Switch1,
        sw2: Switch2,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        board::enable_debug_in_sleep(&ctx.device.RCC, &ctx.device.DBGMCU);

        // Enable RTT logging
        rtt_init_print!();
        rprintln!("ranging_uart: hello, world!");
        let clocks = board::freeze_clocks(ctx.device.RCC);

        // Note: the DWT cycle counter enabled here is also the sensor's time base.
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

        // USART2 is wired to the ST-LINK virtual COM port.
        let usart2_pins = (gpioa.pa2.into_alternate(), gpioa.pa3.into_alternate());
        let mut usart2 = serial::Serial::new(
            ctx.device.USART2,
            usart2_pins,
            board::serial_config(config::ranging::UART_BAUD),
            clocks,
        )
        .expect("failed to configure USART2.");
        usart2.listen(serial::Event::Rxne);
        let (tx, rx) = usart2.split();

        let state = RangingState::new(MeasurePeriod::from_micros(
            config::ranging::UART_INITIAL_PERIOD_US,
        ));
        rprintln!("measuring every {} ms", state.period.as_millis());

        // kick off the periodic trigger.
        tick::spawn_after(Milliseconds(config::ranging::STARTUP_DELAY_MS))
            .expect("failed to kick off the measurement trigger.");
        (
            Shared {
                state,
                last_distance: None,
                leds,
                display,
                tx,
            },
            Local {
                sensor,
                rx,
                sw1,
                sw2,
            },
            init::Monotonics(mono),
        )
    }

    /* bring externed tasks into scope */
    use crate::tasks::{apply_command, handle_byte, measure, on_switch1, on_switch2, on_usart2_rxne, tick};

    extern "Rust" {
        // re-arms itself every measure period and notifies `measure`
        #[task(priority = 2, shared = [state])]
        fn tick(context: tick::Context);

        // reads the sensor, reports over the UART and refreshes display and LEDs
        #[task(priority = 1, shared = [state, last_distance, leds, display, tx], local = [sensor])]
        fn measure(context: measure::Context);

        // USART2 RXNE interrupt handler
        #[task(binds = USART2, priority = 3, local = [rx])]
        fn on_usart2_rxne(context: on_usart2_rxne::Context);

        // echoes a received byte and decodes it
        #[task(priority = 2, capacity = 4, shared = [tx])]
        fn handle_byte(context: handle_byte::Context, byte: u8);

        // applies a command from the UART or the switches to the shared state
        #[task(priority = 2, capacity = 4, shared = [state, last_distance, leds, display])]
        fn apply_command(context: apply_command::Context, command: Command);

        // SW1 (PC13) press
        #[task(binds = EXTI15_10, priority = 3, local = [sw1])]
        fn on_switch1(context: on_switch1::Context);

        // SW2 (PB1) press
        #[task(binds = EXTI1, priority = 3, local = [sw2])]
        fn on_switch2(context: on_switch2::Context);
    }
}
