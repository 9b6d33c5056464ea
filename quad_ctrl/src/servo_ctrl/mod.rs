//! # Servo Controller Module
//!
//! This module provides a unified servo control interface which can abstract over different types
//! of servo driver boards, and the [`Actuator`] handle which is shared by every limb of the robot.
//!
//! The actuator may be absent (no board fitted, or the board failed to initialise). In that case
//! every actuation call becomes a no-op, so the robot can still be driven logically for testing
//! or simulation.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// [`ServoDriver`] implementation for the Adafruit PCA9685 16 channel servo driver board.
pub mod pca9685;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::{cell::RefCell, fmt, rc::Rc};
use log::warn;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// The highest channel index available on a driver board.
pub const MAX_CHANNEL: u8 = 15;

/// The number of steps in one PWM cycle. A pulse equal to this value holds the output fully on.
pub const MAX_PULSE: u16 = 4096;

/// PWM frequency used for the servos.
///
/// Units: Hertz
pub const PWM_FREQ_HZ: f64 = 60.0;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Trait to provide a unified API for accessing servo driver boards.
pub trait ServoDriver {

    /// Set the on and off ticks of a channel within one PWM cycle.
    ///
    /// ## Arguments
    /// - `channel` - The channel to set, between 0 and [`MAX_CHANNEL`]
    /// - `on` - The tick at which the output turns on
    /// - `off` - The tick at which the output turns off, between 0 and [`MAX_PULSE`]
    fn set_pwm(&mut self, channel: u8, on: u16, off: u16) -> Result<(), ServoError>;

}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ServoError {
    #[error("An I2C error occured")]
    I2c,

    #[error("Channel {0} is not between 0 and 15")]
    InvalidChannel(u8),

    #[error("Pulse {0} is not between 0 and 4096")]
    InvalidPulse(u16),
}

/// Handle onto the servo driver shared by all limbs of a robot.
///
/// Cloning the handle shares the same underlying driver.
#[derive(Clone)]
pub enum Actuator {
    /// A driver board is available.
    Driver(Rc<RefCell<dyn ServoDriver>>),

    /// No driver board, all actuation is skipped.
    Absent,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Actuator {
    /// Wrap an initialised driver into an actuator handle.
    pub fn new<D: ServoDriver + 'static>(driver: D) -> Self {
        Actuator::Driver(Rc::new(RefCell::new(driver)))
    }

    /// Returns `true` if a driver board is behind this handle.
    pub fn is_available(&self) -> bool {
        matches!(self, Actuator::Driver(_))
    }

    /// Send a pulse to the driver.
    ///
    /// Driver failures are logged and swallowed. Returns `true` only if the pulse reached the
    /// driver.
    pub fn set_pulse(&self, channel: u8, on: u16, off: u16) -> bool {
        match self {
            Actuator::Absent => false,
            Actuator::Driver(driver) => match driver.borrow_mut().set_pwm(channel, on, off) {
                Ok(_) => true,
                Err(e) => {
                    warn!(
                        "Failed to set pwm on channel {} - did the servo driver initialise \
                        correctly? {}",
                        channel, e
                    );
                    false
                }
            }
        }
    }

    /// Set a raw servo pulse on a channel.
    ///
    /// The channel must be between 0 and 15, and the pulse between 0 and 4096, otherwise a
    /// warning is logged and `false` returned. Valid input returns `true` even if the actuator is
    /// absent or the driver failed.
    pub fn set_servo_pulse(&self, channel: i32, pulse: i32) -> bool {
        if channel < 0 || channel > i32::from(MAX_CHANNEL) || pulse < 0 || pulse > i32::from(MAX_PULSE) {
            warn!(
                "Channel must be between 0 and 15 and pulse between 0 and 4096 (got channel {}, \
                pulse {})",
                channel, pulse
            );
            return false
        }

        self.set_pulse(channel as u8, 0, pulse as u16);

        true
    }
}

impl fmt::Debug for Actuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Actuator::Driver(_) => write!(f, "Actuator::Driver"),
            Actuator::Absent => write!(f, "Actuator::Absent"),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TEST SUPPORT
// ------------------------------------------------------------------------------------------------

/// Driver which records every pulse it is sent, used to observe actuation in tests.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct RecordingDriver {
    pub pulses: Rc<RefCell<Vec<(u8, u16, u16)>>>,
    pub fail: bool,
}

#[cfg(test)]
impl RecordingDriver {
    /// Pulses sent to a single channel, in order.
    pub fn on_channel(&self, channel: u8) -> Vec<u16> {
        self.pulses
            .borrow()
            .iter()
            .filter(|(c, _, _)| *c == channel)
            .map(|(_, _, off)| *off)
            .collect()
    }
}

#[cfg(test)]
impl ServoDriver for RecordingDriver {
    fn set_pwm(&mut self, channel: u8, on: u16, off: u16) -> Result<(), ServoError> {
        if self.fail {
            return Err(ServoError::I2c)
        }
        self.pulses.borrow_mut().push((channel, on, off));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_set_servo_pulse_limits() {
        let driver = RecordingDriver::default();
        let act = Actuator::new(driver.clone());

        for channel in 0..16 {
            assert!(act.set_servo_pulse(channel, 10));
        }
        assert!(act.set_servo_pulse(0, 0));
        assert!(act.set_servo_pulse(0, 4096));
        assert!(act.set_servo_pulse(0, 2000));
        assert!(!act.set_servo_pulse(0, 4097));
        assert!(!act.set_servo_pulse(0, -1));
        assert!(!act.set_servo_pulse(16, 10));
        assert!(!act.set_servo_pulse(-1, 10));

        assert_eq!(driver.pulses.borrow().len(), 19);
        assert_eq!(driver.pulses.borrow()[0], (0, 0, 10));
    }

    #[test]
    fn test_absent_actuator() {
        let act = Actuator::Absent;

        assert!(!act.is_available());
        assert!(!act.set_pulse(3, 0, 300));

        // Valid input is still accepted without hardware
        assert!(act.set_servo_pulse(3, 300));
    }

    #[test]
    fn test_driver_failure_is_swallowed() {
        let driver = RecordingDriver { fail: true, ..Default::default() };
        let act = Actuator::new(driver);

        assert!(act.is_available());
        assert!(!act.set_pulse(1, 0, 200));
        assert!(act.set_servo_pulse(1, 200));
    }
}
