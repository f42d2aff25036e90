//! Sensor edge handlers.
//!
//! Both tasks run on the interrupt executor so an edge preempts rendering
//! in the foreground loop. Each edge does a bounded amount of work: one
//! critical section on the shared counters.

use defmt::{info, trace, warn};
use embassy_rp::gpio::Input;
use embassy_time::Instant;
use tripcomp_common::InjectorPulseTimer;

use crate::SHARED;

/// Count every distance edge (rising and falling, as wired on the sensor).
#[embassy_executor::task]
pub async fn distance_edge_task(mut line: Input<'static>) {
    info!("Distance edge task started");

    loop {
        line.wait_for_any_edge().await;
        let edge = SHARED.record_distance_edge();

        if edge.epoch_completed {
            warn!("Distance counter wrapped while calibrating");
        }
    }
}

/// Time injector open pulses (line low while open).
///
/// The level is read after the edge wakes the task. A pulse shorter than the
/// wake-up latency reads high on its falling edge and is dropped with its
/// rising edge; the timer stays closed and the next pulse is timed normally.
#[embassy_executor::task]
pub async fn injector_edge_task(mut line: Input<'static>) {
    info!("Injector edge task started");

    let mut timer = InjectorPulseTimer::new();
    loop {
        line.wait_for_any_edge().await;
        let now_us = Instant::now().as_micros();

        if let Some(open_ms) = timer.on_edge(&SHARED, line.is_low(), now_us) {
            trace!("Injector pulse {} ms", open_ms);
        }
    }
}
