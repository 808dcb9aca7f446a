//! PWM servo output.
//!
//! Both servos share PWM slice 0 at 50 Hz: channel A (GPIO 16) drives the
//! pan servo, channel B (GPIO 17) the tilt servo.
//!
//! The slice counter runs at 640 kHz with `top = 12799`, one 20 ms period.
//! Pulse widths arrive in 25 µs servo ticks, so each tick is 16 counts.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;
use gimbal_core::{OutputError, ServoChannel, ServoOutput};

/// Counter frequency of the servo slice.
pub const COUNTER_HZ: u32 = 640_000;

/// Counts per 20 ms servo period.
pub const PERIOD_COUNTS: u16 = 12_800;

/// Counter counts per 25 µs servo tick.
pub const COUNTS_PER_TICK: u16 = 16;

/// Slice configuration for 50 Hz servo drive, both outputs low.
///
/// The divider is derived from the running system clock, so this must be
/// called after `embassy_rp::init`.
#[must_use]
pub fn servo_pwm_config() -> PwmConfig {
    // divider = clk / 640 kHz in 8.4 fixed point: bits = clk * 16 / 640 kHz
    let bits = clk_sys_freq() / (COUNTER_HZ / 16);

    let mut config = PwmConfig::default();
    config.divider = FixedU16::<U4>::from_bits(bits as u16);
    config.top = PERIOD_COUNTS - 1;
    config.compare_a = 0;
    config.compare_b = 0;
    config
}

/// Two servos on one PWM slice.
pub struct PwmServoOutput<'d> {
    pwm: Pwm<'d>,
    config: PwmConfig,
}

impl<'d> PwmServoOutput<'d> {
    /// Wrap a slice created with `Pwm::new_output_ab` and `config`.
    #[must_use]
    pub fn new(pwm: Pwm<'d>, config: PwmConfig) -> Self {
        Self { pwm, config }
    }
}

impl ServoOutput for PwmServoOutput<'_> {
    fn set_pulse(&mut self, channel: ServoChannel, pulse: u16) -> Result<(), OutputError> {
        let compare = pulse
            .checked_mul(COUNTS_PER_TICK)
            .filter(|&c| c <= self.config.top)
            .ok_or(OutputError::Io)?;

        match channel {
            ServoChannel::Pan => self.config.compare_a = compare,
            ServoChannel::Tilt => self.config.compare_b = compare,
        }
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
