//! Popup state with time-based expiration.

use std::time::Instant;

use tripcomp_common::widgets::Popup;

use crate::timing::POPUP_DURATION;

/// Popup currently on screen and when it was triggered.
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
