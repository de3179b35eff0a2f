//! Motor speed measurement firmware for Raspberry Pi Pico 2 (RP2350).
//!
//! Drives a DC motor at one of four fixed power levels, counts Hall sensor
//! pulses during a timed window, and locks the computed angular speed on the
//! display until reset.
//!
//! # Architecture
//!
//! Three embassy tasks share the work:
//! - Control loop (this file's `main`): polls the buttons every 2 ms, runs
//!   the measurement state machine, writes the motor PWM, and publishes
//!   display frames over a `Watch` channel.
//! - Pulse edge task: awaits rising edges on the Hall line and feeds the
//!   shared atomic pulse counter; the control loop drains it at the window
//!   boundary.
//! - Display task: receives frames, drops unchanged ones, and flushes the
//!   ST7789 framebuffer via DMA, so a ~20 ms flush never stalls the control
//!   loop.
//!
//! # Wiring
//!
//! - **GPIO2**: Hall pulse sensor (pull-up, rising edges)
//! - **GPIO4**: start/reset button (active-low)
//! - **GPIO5**: half-speed button (active-low)
//! - **GPIO6**: dual-function 75%/100% button (active-low)
//! - **GPIO10**: motor PWM (slice 5 channel A, 8-bit duty)
//! - **GPIO16-20**: ST7789 display (DC, CS, CLK, MOSI, backlight)

#![no_std]
#![no_main]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

// Modules only used in the binary (not testable on host)
mod colors;
mod screen;
mod st7789;
mod styles;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::Spi;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::{DynReceiver, Watch};
use embassy_time::{Duration, Instant, Ticker};
use static_cell::StaticCell;
use tacho_pico2::config::TICK_INTERVAL_MS;
use tacho_pico2::controller::{ButtonInputs, Controller};
use tacho_pico2::debounce::DebounceRecord;
use tacho_pico2::presenter::{DisplayFrame, RenderState};
use tacho_pico2::pulse::PulseCounter;
use {defmt_rtt as _, panic_probe as _};

use crate::screen::draw_status_screen;
use crate::st7789::{St7789, display_spi_config};

/// Pulse counter shared between the edge task and the control loop. This is
/// the only cross-task mutable state; everything else lives in the control
/// loop.
static PULSES: PulseCounter = PulseCounter::new();

/// Watch channel publishing the latest display frame to the display task.
static FRAMES: Watch<CriticalSectionRawMutex, DisplayFrame, 2> = Watch::new();

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"pico2-tacho"),
    embassy_rp::binary_info::rp_program_description!(c"Motor speed measurement rig on RP2350"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

/// Hall sensor edge task.
///
/// The debounce record is local: only this task reads the pulse timestamps,
/// the control loop sees nothing but the atomic count.
#[embassy_executor::task]
async fn pulse_edge_task(mut pin: Input<'static>) {
    info!("Pulse edge task started");

    let mut debounce = DebounceRecord::new();
    loop {
        pin.wait_for_rising_edge().await;
        PULSES.on_edge(&mut debounce, Instant::now().as_micros());
    }
}

/// Display task - redraws the status screen when the frame content changes.
#[embassy_executor::task]
async fn display_task(
    display: &'static mut St7789<'static>,
    mut frames: DynReceiver<'static, DisplayFrame>,
) {
    info!("Display task started");

    let mut render_state = RenderState::new();
    loop {
        let frame = frames.changed().await;
        if render_state.check_dirty(&frame) {
            draw_status_screen(display, &frame);
            display.flush().await;
        }
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Motor rig starting...");

    let p = embassy_rp::init(Default::default());

    // Display pins: CS=17, DC=16, CLK=18, MOSI=19, Backlight=20
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let mut _backlight = Output::new(p.PIN_20, Level::High);

    // Async SPI with DMA (TX-only, the display has no MISO)
    let spi = Spi::new_txonly(p.SPI0, p.PIN_18, p.PIN_19, p.DMA_CH0, display_spi_config());

    let mut display = St7789::new(spi, dc, cs);
    display.init().await;
    info!("Display initialized");

    // Move the display to a static and hand it to the display task
    static DISPLAY: StaticCell<St7789<'static>> = StaticCell::new();
    let display: &'static mut St7789<'static> = DISPLAY.init(display);
    spawner.spawn(display_task(display, FRAMES.dyn_receiver().unwrap())).unwrap();

    // Hall sensor line, rising edges
    let pulse_pin = Input::new(p.PIN_2, Pull::Up);
    spawner.spawn(pulse_edge_task(pulse_pin)).unwrap();

    // Buttons (active-low with internal pull-up)
    let btn_start = Input::new(p.PIN_4, Pull::Up);
    let btn_half = Input::new(p.PIN_5, Pull::Up);
    let btn_dual = Input::new(p.PIN_6, Pull::Up);

    // Motor PWM: top = 255 so the drive values load directly as duty
    let mut motor_cfg = PwmConfig::default();
    motor_cfg.top = 255;
    motor_cfg.compare_a = 0;
    let mut motor = Pwm::new_output_a(p.PWM_SLICE5, p.PIN_10, motor_cfg.clone());

    let mut controller = Controller::new();
    let frame_sender = FRAMES.dyn_sender();

    // Initial "ready" frame before any input arrives
    frame_sender.send(controller.display_frame());
    info!("Ready to measure");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    loop {
        ticker.next().await;

        let now_us = Instant::now().as_micros();
        let inputs = ButtonInputs {
            start_pressed: btn_start.is_low(),
            half_pressed: btn_half.is_low(),
            dual_pressed: btn_dual.is_low(),
        };

        let tick = controller.tick(&PULSES, inputs, now_us);

        // Motor drive is a last-writer-wins effector, written on change only
        if let Some(drive) = tick.drive {
            motor_cfg.compare_a = drive as u16;
            motor.set_config(&motor_cfg);
        }

        // Status sink: one line per observable transition
        if tick.started {
            info!("Measurement started");
        }
        if tick.counting_started {
            info!("Counting pulses...");
        }
        if let Some((count, result)) = tick.completed {
            info!(
                "Locked: {} rad/s, {} Hz ({} pulses)",
                result.angular_speed, result.frequency, count
            );
        }
        if tick.unlocked {
            info!("Reset: ready to measure");
        }
        if let Some(level) = tick.power_selected {
            info!("Power level: {}", level.label());
        }

        frame_sender.send(controller.display_frame());
    }
}
