//! [`ServoDriver`] implementation for the PCA9685 driver

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::info;
use pwm_pca9685::{Channel, Pca9685};
use embedded_hal::blocking::i2c::{Write, WriteRead};

use super::{ServoDriver, ServoError, MAX_PULSE};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Frequency of the PCA9685 internal oscillator.
///
/// Units: Hertz
const OSC_CLOCK_HZ: f64 = 25_000_000.0;

/// Lowest prescale value accepted by the chip.
const MIN_PRESCALE: f64 = 3.0;

/// Default I2C address of the board.
pub const DEFAULT_ADDRESS: u8 = 0x40;

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<I2C, E> ServoDriver for Pca9685<I2C>
where
    I2C: Write<Error = E> + WriteRead<Error = E>
{
    fn set_pwm(
        &mut self,
        channel: u8,
        on: u16,
        off: u16
    ) -> Result<(), ServoError> {

        let channel = to_channel(channel)?;

        // If either tick is out of range return an error
        if on >= MAX_PULSE {
            return Err(ServoError::InvalidPulse(on))
        }
        if off > MAX_PULSE {
            return Err(ServoError::InvalidPulse(off))
        }

        // A full cycle pulse can't be expressed as an off tick, use the full on bit instead
        let result = if off == MAX_PULSE {
            self.set_channel_full_on(channel, on)
        }
        else {
            self.set_channel_on_off(channel, on, off)
        };

        result.map_err(|e| to_servo_error(e, off))
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Create and configure a PCA9685 on the given bus.
///
/// The board is set to run at `freq_hz` and its outputs are enabled.
pub fn init<I2C, E>(i2c: I2C, address: u8, freq_hz: f64) -> Result<Pca9685<I2C>, ServoError>
where
    I2C: Write<Error = E> + WriteRead<Error = E>
{
    let prescale = prescale_for(freq_hz);

    let mut pwm = Pca9685::new(i2c, address).map_err(|e| to_servo_error(e, 0))?;
    pwm.set_prescale(prescale).map_err(|e| to_servo_error(e, 0))?;
    pwm.enable().map_err(|e| to_servo_error(e, 0))?;

    info!(
        "PCA9685 at {:#04x} initialised at {} Hz (prescale {})",
        address, freq_hz, prescale
    );

    Ok(pwm)
}

/// Calculate the prescale value which sets the PWM frequency of the chip.
///
/// Units: `freq_hz` in Hertz
pub fn prescale_for(freq_hz: f64) -> u8 {
    let prescale = (OSC_CLOCK_HZ / f64::from(MAX_PULSE) / freq_hz - 1.0 + 0.5).floor();

    prescale.max(MIN_PRESCALE).min(f64::from(u8::MAX)) as u8
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn to_channel(channel: u8) -> Result<Channel, ServoError> {
    let ch = match channel {
        0 => Channel::C0,
        1 => Channel::C1,
        2 => Channel::C2,
        3 => Channel::C3,
        4 => Channel::C4,
        5 => Channel::C5,
        6 => Channel::C6,
        7 => Channel::C7,
        8 => Channel::C8,
        9 => Channel::C9,
        10 => Channel::C10,
        11 => Channel::C11,
        12 => Channel::C12,
        13 => Channel::C13,
        14 => Channel::C14,
        15 => Channel::C15,
        _ => return Err(ServoError::InvalidChannel(channel))
    };

    Ok(ch)
}

fn to_servo_error<E>(e: pwm_pca9685::Error<E>, pulse: u16) -> ServoError {
    match e {
        pwm_pca9685::Error::I2C(_) => ServoError::I2c,
        pwm_pca9685::Error::InvalidInputData => ServoError::InvalidPulse(pulse)
    }
}
