//! Nucleo-F446RE wiring shared by the exercise binaries.
//!
//! | Signal          | Pin   |
//! |-----------------|-------|
//! | LED1 / LED2 / LED3 | PA5 (LD2) / PA6 / PA7 |
//! | SW1 / SW2       | PC13 (B1) / PB1, active low |
//! | HC-SR04 trigger | PA8   |
//! | HC-SR04 echo    | PB10 (5 V tolerant) |
//! | BCD b0..b3      | PC0..PC3 |
//! | digit 1..3 select | PB4 / PB5 / PB6 |
//! | PC UART (ST-LINK VCP) | USART2, PA2 TX / PA3 RX |
//! | ADC input       | PA0 (ADC1_IN0) |
//! | DAC output      | PA4 (DAC_OUT1) |

use core::convert::Infallible;

use cortex_m::peripheral::DWT;
use stm32f4xx_hal::{
    gpio::{
        gpioa::{PA5, PA6, PA7, PA8},
        gpiob::{PB1, PB10, PB4, PB5, PB6},
        gpioc::{PC0, PC1, PC13, PC2, PC3},
        Edge, EPin, ExtiPin, Floating, Input, Output, PullUp, PushPull,
    },
    prelude::*,
    rcc::Clocks,
    serial,
    stm32::{DBGMCU, EXTI, RCC},
    syscfg::SysCfg,
};

use crate::config;
use crate::datamodel::rx_errors::RxError;
use crate::drivers::bcd_display::BcdDisplay;
use crate::drivers::hc_sr04::HcSr04;
use crate::drivers::leds::LedBar;
use crate::drivers::TickClock;

/// any push-pull output, type-erased so pins of different ports fit one array.
pub type OutPin = EPin<Output<PushPull>>;
pub type Leds = LedBar<OutPin>;
pub type Display = BcdDisplay<OutPin>;
pub type Sensor = HcSr04<PA8<Output<PushPull>>, PB10<Input<Floating>>, DwtClock>;
pub type Switch1 = PC13<Input<PullUp>>;
pub type Switch2 = PB1<Input<PullUp>>;

/// Unwraps the result of a HAL call that cannot fail (GPIO writes on this chip).
pub fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Keeps the debugger attached while the core sleeps in WFI between tasks.
///
/// See the STM32F446 errata on debugging in sleep modes; the DMA1 master has to be
/// clocked for the debug access port to keep working.
pub fn enable_debug_in_sleep(rcc: &RCC, dbgmcu: &DBGMCU) {
    rcc.ahb1enr.modify(|_, w| w.dma1en().enabled());
    dbgmcu.cr.modify(|_, w| {
        w.dbg_sleep().set_bit();
        w.dbg_standby().set_bit();
        w.dbg_stop().set_bit()
    });
}

/// Switches the core to the HSE-fed PLL at [`config::SYSCLK_HZ`].
pub fn freeze_clocks(rcc: RCC) -> Clocks {
    rcc.constrain()
        .cfgr
        .use_hse(config::HSE_HZ.hz())
        .sysclk(config::SYSCLK_HZ.hz())
        .freeze()
}

/// [`TickClock`] on the DWT cycle counter.
///
/// The counter is enabled by the RTIC monotonic (`DwtSystick::new`), so this must
/// only be used after init created the monotonic.
pub struct DwtClock {
    ticks_per_us: u32,
}

impl DwtClock {
    pub fn new(clocks: &Clocks) -> Self {
        DwtClock {
            ticks_per_us: clocks.sysclk().0 / 1_000_000,
        }
    }
}

impl TickClock for DwtClock {
    fn ticks(&self) -> u32 {
        DWT::cycle_count()
    }

    fn ticks_per_us(&self) -> u32 {
        self.ticks_per_us
    }
}

pub fn led_bar<M1, M2, M3>(led1: PA5<M1>, led2: PA6<M2>, led3: PA7<M3>) -> Leds {
    let pins = [
        led1.into_push_pull_output().erase(),
        led2.into_push_pull_output().erase(),
        led3.into_push_pull_output().erase(),
    ];
    infallible(LedBar::new(pins))
}

pub struct DisplayPins<M> {
    pub b0: PC0<M>,
    pub b1: PC1<M>,
    pub b2: PC2<M>,
    pub b3: PC3<M>,
    pub digit1: PB4<M>,
    pub digit2: PB5<M>,
    pub digit3: PB6<M>,
}

pub fn display<M>(pins: DisplayPins<M>) -> Display {
    let data = [
        pins.b0.into_push_pull_output().erase(),
        pins.b1.into_push_pull_output().erase(),
        pins.b2.into_push_pull_output().erase(),
        pins.b3.into_push_pull_output().erase(),
    ];
    let select = [
        pins.digit1.into_push_pull_output().erase(),
        pins.digit2.into_push_pull_output().erase(),
        pins.digit3.into_push_pull_output().erase(),
    ];
    infallible(BcdDisplay::new(data, select))
}

pub fn sensor<M1, M2>(trigger: PA8<M1>, echo: PB10<M2>, clocks: &Clocks) -> Sensor {
    HcSr04::new(
        trigger.into_push_pull_output(),
        echo.into_floating_input(),
        DwtClock::new(clocks),
    )
}

/// Configures both switches as pull-up inputs interrupting on the press (falling) edge.
pub fn switch_interrupts<M1, M2>(
    sw1: PC13<M1>,
    sw2: PB1<M2>,
    syscfg: &mut SysCfg,
    exti: &mut EXTI,
) -> (Switch1, Switch2) {
    let mut sw1 = sw1.into_pull_up_input();
    sw1.make_interrupt_source(syscfg);
    sw1.trigger_on_edge(exti, Edge::Falling);
    sw1.enable_interrupt(exti);

    let mut sw2 = sw2.into_pull_up_input();
    sw2.make_interrupt_source(syscfg);
    sw2.trigger_on_edge(exti, Edge::Falling);
    sw2.enable_interrupt(exti);
    (sw1, sw2)
}

/// 8N1 without DMA at `baud`.
pub fn serial_config(baud: u32) -> serial::config::Config {
    serial::config::Config {
        baudrate: baud.bps(),
        wordlength: serial::config::WordLength::DataBits8,
        parity: serial::config::Parity::ParityNone,
        stopbits: serial::config::StopBits::STOP1,
        dma: serial::config::DmaConfig::None,
    }
}

impl From<serial::Error> for RxError {
    fn from(error: serial::Error) -> Self {
        match error {
            serial::Error::Overrun => RxError::Overrun,
            serial::Error::Framing => RxError::Framing,
            serial::Error::Noise => RxError::Noise,
            serial::Error::Parity => RxError::Parity,
            _ => RxError::Other,
        }
    }
}
