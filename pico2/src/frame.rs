//! One rendered frame: header, mode view and popup overlay.

use embassy_time::{Duration, Instant};
use embedded_graphics::prelude::*;
use tripcomp_common::colors::BLACK;
use tripcomp_common::widgets::{Popup, draw_header, draw_popup, draw_view};
use tripcomp_common::{MetricsSink, MetricsView};

use crate::st7789::St7789Renderer;

/// How long a popup stays over the view.
pub const POPUP_DURATION: Duration = Duration::from_secs(3);

/// Popup on screen and when it was triggered.
#[derive(Clone, Copy, Debug)]
pub struct ActivePopup {
    pub popup: Popup,
    pub since: Instant,
}

impl ActivePopup {
    pub fn new(popup: Popup) -> Self {
        Self {
            popup,
            since: Instant::now(),
        }
    }

    #[inline]
    pub fn is_expired(&self) -> bool { self.since.elapsed() >= POPUP_DURATION }
}

/// Metrics sink drawing into the current render buffer.
pub struct Frame<'a> {
    renderer: St7789Renderer<'a>,
    calibration: bool,
    popup: Option<Popup>,
}

impl<'a> Frame<'a> {
    pub fn new(
        renderer: St7789Renderer<'a>,
        calibration: bool,
        popup: Option<Popup>,
    ) -> Self {
        Self {
            renderer,
            calibration,
            popup,
        }
    }
}

impl MetricsSink for Frame<'_> {
    fn show(
        &mut self,
        view: &MetricsView,
    ) {
        // Each buffer alternates frames, so every frame is drawn from scratch
        self.renderer.clear(BLACK).ok();
        draw_header(&mut self.renderer, view.mode(), self.calibration);
        draw_view(&mut self.renderer, view);
        if let Some(popup) = self.popup {
            draw_popup(&mut self.renderer, popup);
        }
    }
}
