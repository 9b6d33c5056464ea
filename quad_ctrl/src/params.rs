//! Parameters structure for the robot

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::time::Duration;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for building a [`Robot`](crate::Robot).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RobotParams {

    /// Name the robot announces itself with.
    pub name: String,

    /// Enables extra diagnostic logging. Does not affect actuation.
    pub debug: bool,

    // ---- PACING ----

    /// Time given for the servos to settle between pose changes.
    ///
    /// Units: milliseconds
    pub settle_ms: u64,

    /// Time between iterations of the walk loop.
    ///
    /// Units: milliseconds
    pub tick_ms: u64,

    /// Time between the steps of the diagnostic wiggle.
    ///
    /// Units: milliseconds
    pub identify_ms: u64,

    // ---- CALIBRATION ----

    /// Set if the chassis has been assembled with the feet mirrored.
    pub invert_feet: bool,

    /// Overrides of the default calibration for individual limbs.
    pub limbs: Vec<LimbParams>,
}

/// Calibration override for a single limb. Anything left unset keeps its default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimbParams {
    /// Name of the limb's role, e.g. `LeftLegFront`.
    pub role: String,

    pub channel: Option<u8>,

    /// Units: degrees
    pub min_angle: Option<i32>,

    /// Units: degrees
    pub max_angle: Option<i32>,

    pub invert: Option<bool>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for RobotParams {
    fn default() -> Self {
        Self {
            name: String::from("Quad"),
            debug: false,
            settle_ms: 50,
            tick_ms: 0,
            identify_ms: 250,
            invert_feet: false,
            limbs: Vec::new(),
        }
    }
}

impl RobotParams {
    /// Parameters with all pacing delays removed, for driving a robot without hardware.
    pub fn immediate() -> Self {
        Self {
            settle_ms: 0,
            tick_ms: 0,
            identify_ms: 0,
            ..Default::default()
        }
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn identify(&self) -> Duration {
        Duration::from_millis(self.identify_ms)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let params: RobotParams = toml::from_str("").unwrap();

        assert_eq!(params.name, "Quad");
        assert_eq!(params.settle(), Duration::from_millis(50));
        assert!(params.limbs.is_empty());
    }

    #[test]
    fn test_limb_overrides() {
        let params: RobotParams = toml::from_str(r#"
            name = "Scout"
            settle_ms = 20

            [[limbs]]
            role = "LeftLegFront"
            channel = 8
            min_angle = 15

            [[limbs]]
            role = "RIGHT_FOOT_BACK"
            invert = true
        "#).unwrap();

        assert_eq!(params.name, "Scout");
        assert_eq!(params.settle_ms, 20);
        assert_eq!(params.identify_ms, 250);
        assert_eq!(params.limbs.len(), 2);
        assert_eq!(params.limbs[0].channel, Some(8));
        assert_eq!(params.limbs[0].min_angle, Some(15));
        assert_eq!(params.limbs[0].max_angle, None);
        assert_eq!(params.limbs[1].invert, Some(true));
    }
}
