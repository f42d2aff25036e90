//! Button polling task.
//!
//! Mode and calibration changes go straight to the shared state. The reset
//! and popup requests are handed to the foreground loop, which owns the
//! scheduler and the screen.

use defmt::info;
use embassy_rp::gpio::Input;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Instant, Timer};
use tripcomp_common::widgets::Popup;
use tripcomp_pico2::input::{ButtonLevels, Buttons};
use tripcomp_pico2::pins::BUTTON_POLL_MS;

use crate::SHARED;

/// Set when B was pressed.
pub static RESET_REQUEST: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Popup to show from the next frame on.
pub static POPUP_REQUEST: Signal<CriticalSectionRawMutex, Popup> = Signal::new();

/// Active-low PIM715 buttons used by the trip computer.
pub struct ButtonPins {
    pub b: Input<'static>,
    pub x: Input<'static>,
    pub y: Input<'static>,
}

impl ButtonPins {
    fn levels(&self) -> ButtonLevels {
        ButtonLevels {
            b: self.b.is_low(),
            x: self.x.is_low(),
            y: self.y.is_low(),
        }
    }
}

#[embassy_executor::task]
pub async fn button_task(pins: ButtonPins) {
    info!("Button task started");

    let mut buttons = Buttons::new();
    loop {
        let now_ms = Instant::now().as_millis();
        let result = buttons.process(pins.levels(), now_ms, &SHARED);

        if let Some(mode) = result.new_mode {
            info!("Mode: {}", mode);
        }
        if let Some(enabled) = result.calibration {
            info!("Calibration: {}", if enabled { "ON" } else { "OFF" });
        }
        if result.reset_requested {
            RESET_REQUEST.signal(());
        }
        if let Some(popup) = result.show_popup {
            POPUP_REQUEST.signal(popup);
        }

        Timer::after_millis(BUTTON_POLL_MS).await;
    }
}
