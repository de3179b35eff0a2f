//! Tachometer library - testable modules for the motor measurement rig.
//!
//! This library contains the measurement and control logic that can be tested
//! on the host machine. The binary (`main.rs`) uses this library and adds the
//! embedded-specific code (GPIO, PWM, SPI display, embassy tasks).
//!
//! All timing-sensitive logic takes explicit microsecond timestamps instead of
//! reading a clock, so the full control flow - debounce, power selection,
//! measurement windows, redraw suppression - runs under the standard test
//! harness with a simulated clock.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test --lib --target x86_64-pc-windows-msvc    # Windows
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the actual firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Configuration
pub mod config;

// Input conditioning
pub mod debounce;
pub mod pulse;

// Measurement and control
pub mod controller;
pub mod measure;
pub mod power;
pub mod speed;

// Presentation
pub mod presenter;
