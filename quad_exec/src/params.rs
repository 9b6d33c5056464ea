//! # Quadruped Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Deserialize;

use quad_ctrl::{servo_ctrl::{pca9685, PWM_FREQ_HZ}, RobotParams};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct QuadExecParams {

    /// Parameters of the robot itself
    pub robot: RobotParams,

    /// Number of the I2C bus the servo driver is connected to
    pub i2c_bus: u8,

    /// Address of the servo driver on the I2C bus
    pub pca9685_address: u8,

    /// PWM frequency of the servo driver
    ///
    /// Units: Hertz
    pub pwm_freq_hz: f64,

    /// Path to the command script to run, relative to the software root. If not given the robot
    /// stands up and sits back down.
    pub script_path: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for QuadExecParams {
    fn default() -> Self {
        Self {
            robot: RobotParams::default(),
            i2c_bus: 1,
            pca9685_address: pca9685::DEFAULT_ADDRESS,
            pwm_freq_hz: PWM_FREQ_HZ,
            script_path: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_params_file() {
        let params: QuadExecParams = util::params::parse(include_str!("../../params/quad_exec.toml"))
            .unwrap();

        assert_eq!(params.i2c_bus, 1);
        assert_eq!(params.pca9685_address, 0x40);
        assert_eq!(params.pwm_freq_hz, 60.0);
        assert_eq!(params.robot.name, "Quad");
        assert_eq!(params.script_path.as_deref(), Some("scripts/demo.qs"));
    }

    #[test]
    fn test_defaults() {
        let params: QuadExecParams = util::params::parse("").unwrap();

        assert_eq!(params.i2c_bus, 1);
        assert_eq!(params.robot.settle_ms, 50);
        assert!(params.script_path.is_none());
    }
}
