//! # Limb model
//!
//! A limb is a single servo actuated joint. It owns the joint's calibration (the angle bounds it
//! may safely move between, and whether its mounting is inverted) and converts requested angles
//! into servo pulses which are sent to the robot's [`Actuator`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{fmt, thread, time::Duration};
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    channel_map::LimbRole,
    servo_ctrl::{Actuator, MAX_CHANNEL},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Pulse which drives a servo to 0 degrees.
pub const HW_PULSE_MIN: u16 = 150;

/// Pulse which drives a servo to 180 degrees.
pub const HW_PULSE_MAX: u16 = 600;

/// Lowest angle any servo can be set to.
///
/// Units: degrees
pub const SERVO_MIN_ANGLE: i32 = 0;

/// Highest angle any servo can be set to.
///
/// Units: degrees
pub const SERVO_MAX_ANGLE: i32 = 180;

/// Angles visited by the diagnostic wiggle.
const IDENTIFY_ANGLES: (i32, i32, i32) = (80, 100, 90);

/// Number of wiggles performed when identifying a limb.
const IDENTIFY_REPEATS: usize = 4;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A single servo actuated joint, either a leg or a foot.
#[derive(Debug, Clone)]
pub struct Limb {
    role: LimbRole,

    /// Driver channel the servo is wired to.
    channel: u8,

    /// Units: degrees
    min_angle: i32,

    /// Units: degrees
    max_angle: i32,

    invert: bool,

    /// The last angle successfully commanded.
    ///
    /// Units: degrees
    current_angle: i32,

    body_angle: i32,
    stretch_angle: i32,
    swing_angle: i32,

    actuator: Actuator,
}

/// Calibration snapshot of a limb.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimbConfig {
    pub name: LimbRole,
    pub channel: u8,
    pub invert: bool,
    pub min_angle: i32,
    pub max_angle: i32,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Named target positions for a limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    /// Pulled in towards the chassis.
    Body,
    /// Extended away from the chassis.
    Stretch,
    /// Midpoint of the stride.
    Swing,
    /// Foot raised, same target as `Body`.
    Up,
    /// Foot lowered, same target as `Stretch`.
    Down,
    Middle,
    Default,
}

/// Errors which can occur when moving or calibrating a limb.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimbError {
    #[error("Angle {0} is outside the servo range of 0 to 180 degrees")]
    AngleOutOfRange(i32),

    #[error("Angle {angle} is outside of the bounds for {role} ({min} to {max} degrees)")]
    AngleOutOfBounds {
        role: LimbRole,
        angle: i32,
        min: i32,
        max: i32,
    },

    #[error("Channel {0} is outside the driver range of 0 to 15")]
    InvalidChannel(i32),

    #[error("Invalid bounds for {role}: minimum {min} is greater than maximum {max}")]
    InvalidBounds {
        role: LimbRole,
        min: i32,
        max: i32,
    },
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Map an angle onto the servo pulse which realises it.
///
/// The arithmetic is done in floating point and truncated towards zero, so `0` maps to
/// [`HW_PULSE_MIN`] and `180` to [`HW_PULSE_MAX`].
pub fn pulse_for(angle: i32) -> u16 {
    let map_max = f64::from(HW_PULSE_MAX - HW_PULSE_MIN);
    let percentage = (f64::from(angle) / 180.0) * 100.0;

    ((map_max / 100.0) * percentage + f64::from(HW_PULSE_MIN)) as u16
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Limb {
    /// Create a new limb.
    ///
    /// The limb starts logically in its body position. Nothing is sent to the actuator until the
    /// limb is first moved.
    pub fn new(
        role: LimbRole,
        channel: u8,
        min_angle: i32,
        max_angle: i32,
        invert: bool,
        actuator: Actuator,
    ) -> Result<Self, LimbError> {
        check_channel(i32::from(channel))?;
        check_bounds(role, min_angle, max_angle)?;

        let mut limb = Self {
            role,
            channel,
            min_angle,
            max_angle,
            invert,
            current_angle: 0,
            body_angle: 0,
            stretch_angle: 0,
            swing_angle: 0,
            actuator,
        };
        limb.update_poses();
        limb.current_angle = limb.body_angle;

        Ok(limb)
    }

    // ---- ACCESSORS ----

    pub fn role(&self) -> LimbRole {
        self.role
    }

    pub fn name(&self) -> &'static str {
        self.role.name()
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn min_angle(&self) -> i32 {
        self.min_angle
    }

    pub fn max_angle(&self) -> i32 {
        self.max_angle
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    /// The last angle successfully commanded.
    pub fn angle(&self) -> i32 {
        self.current_angle
    }

    pub fn body_angle(&self) -> i32 {
        self.body_angle
    }

    pub fn stretch_angle(&self) -> i32 {
        self.stretch_angle
    }

    pub fn swing_angle(&self) -> i32 {
        self.swing_angle
    }

    pub fn config(&self) -> LimbConfig {
        LimbConfig {
            name: self.role,
            channel: self.channel,
            invert: self.invert,
            min_angle: self.min_angle,
            max_angle: self.max_angle,
        }
    }

    // ---- CALIBRATION ----

    pub fn set_channel(&mut self, channel: i32) -> Result<(), LimbError> {
        check_channel(channel)?;
        self.channel = channel as u8;
        Ok(())
    }

    /// Change the lowest angle the limb may move to.
    ///
    /// If the limb is currently below the new minimum it is moved up onto it.
    pub fn set_min_angle(&mut self, min_angle: i32) -> Result<(), LimbError> {
        check_angle(min_angle)?;
        self.set_bounds(min_angle, self.max_angle)
    }

    /// Change the highest angle the limb may move to.
    ///
    /// If the limb is currently above the new maximum it is moved down onto it.
    pub fn set_max_angle(&mut self, max_angle: i32) -> Result<(), LimbError> {
        check_angle(max_angle)?;
        self.set_bounds(self.min_angle, max_angle)
    }

    pub fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
        self.update_poses();
    }

    // ---- MOVEMENT ----

    /// Move the limb to the given angle.
    ///
    /// Returns `false` and leaves the limb where it is if the angle is outside the servo range
    /// or the limb's bounds. Probing outside the bounds is allowed, so this is only a warning.
    pub fn set_angle(&mut self, angle: i32) -> bool {
        match self.try_set_angle(angle) {
            Ok(_) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }

    /// Move the limb to the given angle, returning the pulse that was sent.
    ///
    /// The limb's angle is updated even if the actuator is absent or fails.
    pub fn try_set_angle(&mut self, angle: i32) -> Result<u16, LimbError> {
        check_angle(angle)?;

        if angle < self.min_angle || angle > self.max_angle {
            return Err(LimbError::AngleOutOfBounds {
                role: self.role,
                angle,
                min: self.min_angle,
                max: self.max_angle,
            })
        }

        let pulse = pulse_for(angle);
        self.actuator.set_pulse(self.channel, 0, pulse);
        self.current_angle = angle;

        trace!("{} -> {} deg (pulse {})", self.role, angle, pulse);

        Ok(pulse)
    }

    /// The angle a pose resolves to for this limb's calibration.
    pub fn target(&self, pose: Pose) -> i32 {
        match pose {
            Pose::Body | Pose::Up => self.body_angle,
            Pose::Stretch | Pose::Down => self.stretch_angle,
            Pose::Swing => self.swing_angle,
            Pose::Middle | Pose::Default => self.max_angle - self.min_angle,
        }
    }

    /// Move the limb to a named pose.
    pub fn pose(&mut self, pose: Pose) -> bool {
        self.set_angle(self.target(pose))
    }

    pub fn body(&mut self) -> bool {
        self.pose(Pose::Body)
    }

    pub fn stretch(&mut self) -> bool {
        self.pose(Pose::Stretch)
    }

    pub fn swing(&mut self) -> bool {
        self.pose(Pose::Swing)
    }

    pub fn up(&mut self) -> bool {
        self.pose(Pose::Up)
    }

    pub fn down(&mut self) -> bool {
        self.pose(Pose::Down)
    }

    pub fn middle(&mut self) -> bool {
        self.pose(Pose::Middle)
    }

    pub fn default(&mut self) -> bool {
        self.pose(Pose::Default)
    }

    /// Wiggle the limb between 80 and 100 degrees and settle at 90, so the wiring can be checked
    /// by eye.
    pub fn identify(&mut self, delay: Duration) {
        let (low, high, rest) = IDENTIFY_ANGLES;

        for _ in 0..IDENTIFY_REPEATS {
            self.set_angle(low);
            pause(delay);
            self.set_angle(high);
            pause(delay);
        }
        self.set_angle(rest);
    }

    // ---- PRIVATE ----

    /// Apply new bounds, keeping the current angle inside them.
    fn set_bounds(&mut self, min_angle: i32, max_angle: i32) -> Result<(), LimbError> {
        check_bounds(self.role, min_angle, max_angle)?;

        let old = (self.min_angle, self.max_angle);
        self.min_angle = min_angle;
        self.max_angle = max_angle;

        let clamped = self.current_angle.max(min_angle).min(max_angle);
        if clamped != self.current_angle {
            if let Err(e) = self.try_set_angle(clamped) {
                self.min_angle = old.0;
                self.max_angle = old.1;
                return Err(e)
            }
        }

        self.update_poses();
        Ok(())
    }

    fn update_poses(&mut self) {
        if !self.invert {
            self.body_angle = self.min_angle;
            self.stretch_angle = self.max_angle;
            self.swing_angle = self.min_angle + self.min_angle / 2;
        }
        else {
            self.body_angle = self.max_angle;
            self.stretch_angle = self.min_angle;
            self.swing_angle = (self.max_angle - self.min_angle) / 2;
        }
    }
}

impl fmt::Display for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (channel {})", self.role, self.channel)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn check_angle(angle: i32) -> Result<(), LimbError> {
    if angle < SERVO_MIN_ANGLE || angle > SERVO_MAX_ANGLE {
        return Err(LimbError::AngleOutOfRange(angle))
    }
    Ok(())
}

fn check_channel(channel: i32) -> Result<(), LimbError> {
    if channel < 0 || channel > i32::from(MAX_CHANNEL) {
        return Err(LimbError::InvalidChannel(channel))
    }
    Ok(())
}

fn check_bounds(role: LimbRole, min: i32, max: i32) -> Result<(), LimbError> {
    check_angle(min)?;
    check_angle(max)?;
    if min > max {
        return Err(LimbError::InvalidBounds { role, min, max })
    }
    Ok(())
}

pub(crate) fn pause(delay: Duration) {
    if delay > Duration::from_millis(0) {
        thread::sleep(delay);
    }
}
