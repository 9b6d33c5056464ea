//! # Servo hardware bring-up
//!
//! On a Raspberry Pi the servo driver is opened on the configured I2C bus. Everywhere else, or if
//! the driver can't be opened, the robot runs without an actuator.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::error;

use quad_ctrl::Actuator;
use crate::params::QuadExecParams;

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open the servo driver, falling back to an absent actuator if that isn't possible.
#[cfg(all(target_arch = "arm", target_os = "linux"))]
pub fn init_actuator(params: &QuadExecParams) -> Actuator {
    use log::info;
    use quad_ctrl::servo_ctrl::pca9685;
    use rppal::i2c::I2c;

    let i2c = match I2c::with_bus(params.i2c_bus) {
        Ok(i) => i,
        Err(e) => {
            error!("Cannot open I2C bus {}: {}", params.i2c_bus, e);
            return Actuator::Absent
        }
    };

    match pca9685::init(i2c, params.pca9685_address, params.pwm_freq_hz) {
        Ok(pwm) => {
            info!("Servo driver available on I2C bus {}", params.i2c_bus);
            Actuator::new(pwm)
        },
        Err(e) => {
            error!("Cannot initialise the servo driver: {}", e);
            Actuator::Absent
        }
    }
}

/// Open the servo driver, falling back to an absent actuator if that isn't possible.
#[cfg(not(all(target_arch = "arm", target_os = "linux")))]
pub fn init_actuator(params: &QuadExecParams) -> Actuator {
    error!(
        "No servo driver support on this platform (I2C bus {}, address {:#04x})",
        params.i2c_bus, params.pca9685_address
    );
    Actuator::Absent
}
