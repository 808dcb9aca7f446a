//! Vision-tracking pan/tilt gimbal for RP2040.
//!
//! This crate provides the embedded side of the gimbal: a UART link to the
//! vision sensor and PWM output for the two servos. The control logic lives
//! in [`gimbal_core`].
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Checks the sensor is alive (self-check handshake, 115200 baud, 8N1)
//! 2. Reads the servo angles stored on the sensor
//! 3. Parks both servos at their home position
//! 4. Tracks the target coordinates streamed by the sensor
//!
//! # Hardware Configuration
//!
//! | Function  | GPIO | Description |
//! |-----------|------|-------------|
//! | UART1 TX  | 8    | Commands to the sensor |
//! | UART1 RX  | 9    | Coordinate stream and command responses |
//! | PWM0 A    | 16   | Pan (base) servo |
//! | PWM0 B    | 17   | Tilt (arm) servo |
//! | LED       | 25   | On-board LED (lit on self-check failure, toggles on UART errors) |
//!
//! # Architecture
//!
//! Startup command exchanges run in `main` while it still owns the UART.
//! The UART then moves into the stream task for good, so the command
//! protocol and the coordinate stream never share it. Two tasks follow:
//!
//! - **Stream Task**: Reads UART bytes into a [`CoordinateIntake`]
//! - **Control Task**: Polls the [`CoordinateCell`] every servo period and
//!   drives the [`ControlLoop`]
//!
//! # Modules
//!
//! - [`link`]: UART transport ([`UartLink`])
//! - [`servo_output`]: PWM servo output ([`PwmServoOutput`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features");

// Re-export core types for convenience
pub use gimbal_core::{
    ChannelError, ChannelTiming, CommandChannel, ControlLoop, CoordinateCell, CoordinateIntake,
    GimbalConfig, LinkError, OutputError, QueryError, SerialLink, ServoChannel, ServoOutput,
    ServoPulses, DEFAULT_CONFIG, DEFAULT_TIMING,
};

pub mod link;
pub mod servo_output;

pub use link::UartLink;
pub use servo_output::{servo_pwm_config, PwmServoOutput};

/// Command code asking the sensor for its stored servo angles.
pub const SERVO_PARAMS_CMD: u8 = 0x1D;

/// Control period, one servo PWM frame.
pub const CONTROL_PERIOD_MS: u64 = 20;

/// Per-byte read timeout used for the startup exchanges, so a missing
/// sensor cannot stall boot.
pub const STARTUP_READ_TIMEOUT_MS: u32 = 1_000;
