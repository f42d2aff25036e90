//! Trip computer firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Shows speed, fuel consumption and trip totals on the Pimoroni PIM715
//! Display Pack 2.8".
//!
//! # Architecture
//!
//! - Interrupt executor (SWI_IRQ_1): distance and injector edge tasks. They
//!   preempt everything else and touch the shared counters only inside one
//!   critical section per edge.
//! - Thread executor: the 250 ms foreground loop (sampling scheduler and
//!   rendering), button polling and the framebuffer flush task.
//!
//! # Button Controls
//!
//! - **Y**: Next display mode (fuel totals → speed → instant consumption)
//! - **X**: Toggle calibration (count distance counter overflows)
//! - **B**: Reset average speed and consumption

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

mod display;
mod frame;
mod st7789;
mod tasks;

use defmt::{debug, info, unwrap, warn};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::spi::Spi;
use embassy_time::{Duration, Ticker};
use embedded_graphics::prelude::*;
use static_cell::StaticCell;
use tripcomp_common::colors::BLACK;
use tripcomp_common::config::TICK_PERIOD_MS;
use tripcomp_common::{FuelSample, SamplingScheduler, SpeedSample, TickOutcome, TripConfig, TripShared};
use tripcomp_pico2::pins;
use {defmt_rtt as _, panic_probe as _};

use crate::display::display_spi_config;
use crate::frame::{ActivePopup, Frame};
use crate::st7789::{FrameBuffers, St7789Flusher, St7789Renderer};
use crate::tasks::{
    ButtonPins,
    FLUSH_DONE,
    FLUSH_SIGNAL,
    POPUP_REQUEST,
    RESET_REQUEST,
    button_task,
    display_flush_task,
    distance_edge_task,
    injector_edge_task,
};

/// State shared between the edge tasks and the foreground loop.
pub static SHARED: TripShared = TripShared::new();

static EDGE_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    // SAFETY: SWI_IRQ_1 is reserved for the edge executor
    unsafe { EDGE_EXECUTOR.on_interrupt() }
}

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-trip-computer"),
    embassy_rp::binary_info::rp_program_description!(c"Pulse-timing trip computer on PIM715 Display"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

fn trip_config() -> TripConfig {
    #[cfg(feature = "exact-speed")]
    {
        TripConfig::default().with_speed_scaling(tripcomp_common::SpeedScaling::Exact)
    }
    #[cfg(not(feature = "exact-speed"))]
    {
        TripConfig::default()
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Trip computer starting...");

    let p = embassy_rp::init(Default::default());

    let config = trip_config();
    let mut scheduler = unwrap!(SamplingScheduler::new(config));
    info!("Trip config: {}", config);

    // Sensor lines on the high-priority executor
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let edge_spawner = EDGE_EXECUTOR.start(interrupt::SWI_IRQ_1);

    let distance_line = Input::new(p.PIN_2, Pull::Up);
    let injector_line = Input::new(p.PIN_3, Pull::Up);
    edge_spawner.spawn(distance_edge_task(distance_line)).unwrap();
    edge_spawner.spawn(injector_edge_task(injector_line)).unwrap();
    info!(
        "Edge tasks spawned (distance GPIO{}, injector GPIO{})",
        pins::DISTANCE_PULSE,
        pins::INJECTOR
    );

    info!(
        "Display pins: CS GPIO{}, DC GPIO{}, CLK GPIO{}, MOSI GPIO{}, backlight GPIO{}",
        pins::DISPLAY_CS,
        pins::DISPLAY_DC,
        pins::DISPLAY_CLK,
        pins::DISPLAY_MOSI,
        pins::DISPLAY_BACKLIGHT
    );
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let _backlight = Output::new(p.PIN_20, Level::High);

    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, display_spi_config());
    let mut flusher = St7789Flusher::new(spi, dc, cs);
    flusher.init().await;

    // SAFETY: the only FrameBuffers instance
    let mut buffers = unsafe { FrameBuffers::take() };
    for _ in 0..2 {
        let buffer = unsafe { buffers.render_buffer() };
        St7789Renderer::new(buffer).clear(BLACK).ok();
        let idx = buffers.swap();
        flusher.flush(unsafe { FrameBuffers::flush_buffer(idx) }).await;
    }
    info!("Display initialized");

    static FLUSHER: StaticCell<St7789Flusher<'static>> = StaticCell::new();
    let flusher: &'static mut St7789Flusher<'static> = FLUSHER.init(flusher);
    spawner.spawn(display_flush_task(flusher)).unwrap();

    // Buttons (active-low with internal pull-up)
    let buttons = ButtonPins {
        b: Input::new(p.PIN_13, Pull::Up),
        x: Input::new(p.PIN_14, Pull::Up),
        y: Input::new(p.PIN_15, Pull::Up),
    };
    spawner.spawn(button_task(buttons)).unwrap();
    info!(
        "Buttons initialized (B GPIO{}, X GPIO{}, Y GPIO{})",
        pins::BUTTON_B,
        pins::BUTTON_X,
        pins::BUTTON_Y
    );

    let mut popup: Option<ActivePopup> = None;
    let mut flush_in_progress = false;
    let mut ticker = Ticker::every(Duration::from_millis(TICK_PERIOD_MS));

    info!("Foreground loop starting");

    loop {
        ticker.next().await;

        if RESET_REQUEST.try_take().is_some() {
            scheduler.reset_averages();
            info!("Averages reset");
        }
        if let Some(requested) = POPUP_REQUEST.try_take() {
            popup = Some(ActivePopup::new(requested));
        }
        if popup.is_some_and(|active| active.is_expired()) {
            popup = None;
        }

        // SAFETY: the flush task only reads the buffer handed over last swap
        let buffer = unsafe { buffers.render_buffer() };
        let mut frame = Frame::new(
            St7789Renderer::new(buffer),
            SHARED.calibration(),
            popup.map(|active| active.popup),
        );
        let outcome = scheduler.step(&SHARED, &mut frame);
        log_outcome(&outcome);

        if flush_in_progress {
            FLUSH_DONE.wait().await;
        }
        FLUSH_SIGNAL.signal(buffers.swap());
        flush_in_progress = true;
    }
}

fn log_outcome(outcome: &TickOutcome) {
    let TickOutcome::Sampled(report) = outcome else {
        return;
    };
    let m = &report.metrics;

    debug!(
        "Sample: {} km/h ({} pulses), {} {}, avg {} km/h {} L/100, used {} L",
        m.speed,
        m.window_pulses,
        m.instant_consumption,
        m.consumption_unit.label(),
        m.avg_speed,
        m.avg_consumption,
        m.used_fuel
    );

    if report.new_overflow_epochs > 0 {
        warn!(
            "Distance counter overflow: {} new, {} total",
            report.new_overflow_epochs, m.pulse_overflows
        );
    }
    if report.speed == SpeedSample::Degenerate {
        warn!("Speed sample skipped ({} km/h)", m.speed);
    }
    if report.fuel == FuelSample::Degenerate {
        warn!("Consumption sample skipped ({})", m.instant_consumption);
    }
}
