//! Trip computer firmware library - host-testable pieces of the firmware.
//!
//! The binary (`main.rs`) adds the RP2350 specific code: edge tasks, the
//! ST7789 driver and the foreground sampling loop.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p tripcomp-pico2 --lib --target x86_64-unknown-linux-gnu
//! ```

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

#[cfg(test)]
use critical_section as _;

pub mod button;
pub mod input;
pub mod pins;
