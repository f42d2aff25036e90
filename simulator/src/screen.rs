//! Simulated 320x240 panel receiving the per-tick metric views.

use std::path::Path;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use tracing::{info, warn};
use tripcomp_common::colors::BLACK;
use tripcomp_common::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};
use tripcomp_common::widgets::{Popup, draw_header, draw_popup, draw_view};
use tripcomp_common::{MetricsSink, MetricsView};

use crate::popup::ActivePopup;

pub struct Screen {
    display: SimulatorDisplay<Rgb565>,
    output_settings: OutputSettings,
    popup: Option<ActivePopup>,
    calibration: bool,
    frames: u64,
}

impl Screen {
    pub fn new() -> Self {
        let mut display = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        display.clear(BLACK).ok();

        Self {
            display,
            output_settings: OutputSettingsBuilder::new().scale(2).build(),
            popup: None,
            calibration: false,
            frames: 0,
        }
    }

    /// Calibration state shown in the header from the next frame on.
    pub fn set_calibration(
        &mut self,
        enabled: bool,
    ) {
        self.calibration = enabled;
    }

    pub fn show_popup(
        &mut self,
        popup: Popup,
    ) {
        self.popup = Some(ActivePopup::new(popup));
    }

    #[cfg(feature = "window")]
    #[inline]
    pub const fn display(&self) -> &SimulatorDisplay<Rgb565> { &self.display }

    #[cfg(feature = "window")]
    #[inline]
    pub const fn output_settings(&self) -> &OutputSettings { &self.output_settings }

    /// Write the current frame as a PNG.
    pub fn save_png(
        &self,
        path: &Path,
    ) {
        let image = self.display.to_rgb_output_image(&self.output_settings);
        match image.save_png(path) {
            Ok(()) => info!(path = %path.display(), frames = self.frames, "saved screenshot"),
            Err(e) => warn!(path = %path.display(), error = %e, "failed to save screenshot"),
        }
    }
}

impl Default for Screen {
    fn default() -> Self { Self::new() }
}

impl MetricsSink for Screen {
    fn show(
        &mut self,
        view: &MetricsView,
    ) {
        if self.popup.is_some_and(|p| p.is_expired()) {
            self.popup = None;
        }

        draw_header(&mut self.display, view.mode(), self.calibration);
        draw_view(&mut self.display, view);
        if let Some(active) = self.popup {
            draw_popup(&mut self.display, active.popup);
        }
        self.frames += 1;
    }
}
