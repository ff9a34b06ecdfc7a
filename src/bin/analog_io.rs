//! ADC sampling and DAC waveform output at a fixed rate.
//!
//! TIM2 paces the ADC: every period one sample of PA0 is converted and sent to the
//! PC as `>analog_voltage:<n>` (serial plotter format). TIM5 paces the DAC: every
//! period the next sample of the waveform table is written to PA4.
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
    use core::fmt::Write;

    use rtt_target::{rprintln, rtt_init_print};
    use stm32f4xx_hal::{
        adc::{
            config::{AdcConfig, SampleTime},
            Adc,
        },
        dac::{self, DacOut, DacPin, C1},
        gpio::{gpioa::PA0, Analog},
        prelude::*,
        serial,
        stm32::{ADC1, TIM2, TIM5, USART2},
        timer::{CountDownTimer, Event, Timer},
    };

    use peripheral_exercises::board;
    use peripheral_exercises::config;
    use peripheral_exercises::report::analog_line;
    use peripheral_exercises::signal::{SampleGenerator, RAMP};

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        adc_timer: CountDownTimer<TIM2>,
        /// ADC ticks dropped since the last warning
        absorbed: u32,
        dac_timer: CountDownTimer<TIM5>,
        adc: Adc<ADC1>,
        adc_pin: PA0<Analog>,
        dac: C1,
        generator: SampleGenerator,
        tx: serial::Tx<USART2>,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        board::enable_debug_in_sleep(&ctx.device.RCC, &ctx.device.DBGMCU);
        rtt_init_print!();
        rprintln!("analog_io: hello, world!");
        let clocks = board::freeze_clocks(ctx.device.RCC);

        let gpioa = ctx.device.GPIOA.split();

        let tx = serial::Serial::tx(
            ctx.device.USART2,
            gpioa.pa2.into_alternate(),
            board::serial_config(config::analog::UART_BAUD),
            clocks,
        )
        .expect("failed to configure USART2.");

        let adc = Adc::adc1(ctx.device.ADC1, true, AdcConfig::default());
        let adc_pin = gpioa.pa0.into_analog();

        let mut dac = dac::dac(ctx.device.DAC, gpioa.pa4.into_analog());
        dac.enable();

        let rate = config::analog::SAMPLE_RATE_HZ.hz();
        let mut adc_timer = Timer::new(ctx.device.TIM2, &clocks).start_count_down(rate);
        adc_timer.listen(Event::TimeOut);
        let mut dac_timer = Timer::new(ctx.device.TIM5, &clocks).start_count_down(rate);
        dac_timer.listen(Event::TimeOut);

        (
            Shared {},
            Local {
                adc_timer,
                absorbed: 0,
                dac_timer,
                adc,
                adc_pin,
                dac,
                generator: SampleGenerator::new(&RAMP),
                tx,
            },
            init::Monotonics(),
        )
    }

    #[task(binds = TIM2, priority = 2, local = [adc_timer, absorbed])]
    fn on_adc_timer(ctx: on_adc_timer::Context) {
        ctx.local.adc_timer.clear_interrupt(Event::TimeOut);
        // A line takes longer on the wire than one sample period, so a conversion
        // still being sent absorbs this tick. Reported once per second of ticks.
        if read_and_send::spawn().is_err() {
            *ctx.local.absorbed += 1;
            if *ctx.local.absorbed >= config::analog::SAMPLE_RATE_HZ {
                rprintln!("[WARNING] {} ADC ticks absorbed by the UART", ctx.local.absorbed);
                *ctx.local.absorbed = 0;
            }
        }
    }

    #[task(binds = TIM5, priority = 2, local = [dac_timer])]
    fn on_dac_timer(ctx: on_dac_timer::Context) {
        ctx.local.dac_timer.clear_interrupt(Event::TimeOut);
        if write_sample::spawn().is_err() {
            rprintln!("[WARNING] previous DAC sample still pending, tick absorbed.");
        }
    }

    /// Converts PA0 and sends the raw 12-bit value to the PC.
    #[task(priority = 1, local = [adc, adc_pin, tx])]
    fn read_and_send(ctx: read_and_send::Context) {
        let value = ctx.local.adc.convert(&*ctx.local.adc_pin, SampleTime::Cycles_480);
        if ctx.local.tx.write_str(&analog_line(value)).is_err() {
            rprintln!("[WARNING] failed to send ADC sample {}", value);
        }
    }

    #[task(priority = 1, local = [dac, generator])]
    fn write_sample(ctx: write_sample::Context) {
        let sample = ctx.local.generator.next_sample();
        ctx.local
            .dac
            .set_value(u16::from(sample) << config::analog::DAC_SHIFT);
    }
}
