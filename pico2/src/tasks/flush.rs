//! Framebuffer flush task.
//!
//! Receives the index of a completed framebuffer from the foreground loop
//! and streams it to the panel while the next frame is rendered into the
//! other buffer.

use defmt::{debug, info};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::Instant;

use crate::st7789::{FrameBuffers, St7789Flusher};

/// Index of the framebuffer to flush.
pub static FLUSH_SIGNAL: Signal<CriticalSectionRawMutex, usize> = Signal::new();

/// Raised when the last requested flush finished.
pub static FLUSH_DONE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

#[embassy_executor::task]
pub async fn display_flush_task(flusher: &'static mut St7789Flusher<'static>) {
    info!("Display flush task started");

    loop {
        let idx = FLUSH_SIGNAL.wait().await;
        let started = Instant::now();

        // SAFETY: the foreground loop renders into the other buffer until FLUSH_DONE
        let frame = unsafe { FrameBuffers::flush_buffer(idx) };
        flusher.flush(frame).await;

        debug!("Flushed buffer {} in {} us", idx, started.elapsed().as_micros());
        FLUSH_DONE.signal(());
    }
}
