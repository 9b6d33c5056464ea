//! # Robot
//!
//! The robot owns the four legs and four feet of the chassis, and builds postures and gaits out
//! of the limbs' individual poses.
//!
//! Leg `i` and foot `i` are always the same corner of the chassis, so a leg can be lifted by
//! lowering the foot at the same index first.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod exec;
mod motion;
mod posture;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::time::Duration;
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;

// Internal
pub use exec::Response;
use crate::{
    channel_map::{ChannelMap, End, LimbKind, LimbRole, Side, UnknownLimbError},
    history::CommandHistory,
    limb::{self, Limb, LimbConfig, LimbError},
    params::RobotParams,
    servo_ctrl::Actuator,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of legs on the robot.
pub const NUM_LEGS: usize = 4;

/// The number of feet on the robot.
pub const NUM_FEET: usize = 4;

/// Roles of the legs, in index order.
pub const LEG_ROLES: [LimbRole; NUM_LEGS] = [
    LimbRole::LeftLegFront,
    LimbRole::LeftLegBack,
    LimbRole::RightLegFront,
    LimbRole::RightLegBack,
];

/// Roles of the feet, in index order.
pub const FOOT_ROLES: [LimbRole; NUM_FEET] = [
    LimbRole::LeftFootFront,
    LimbRole::LeftFootBack,
    LimbRole::RightFootFront,
    LimbRole::RightFootBack,
];

// Corner indices into the leg and foot arrays
const LEFT_FRONT: usize = 0;
const LEFT_BACK: usize = 1;
const RIGHT_FRONT: usize = 2;
const RIGHT_BACK: usize = 3;

/// Order of the entries returned by [`Robot::telemetry`].
pub const TELEMETRY_ORDER: [LimbRole; NUM_LEGS + NUM_FEET] = [
    LimbRole::LeftLegFront,
    LimbRole::RightLegFront,
    LimbRole::LeftLegBack,
    LimbRole::RightLegBack,
    LimbRole::LeftFootFront,
    LimbRole::RightFootFront,
    LimbRole::LeftFootBack,
    LimbRole::RightFootBack,
];

/// Default calibration of each limb: minimum angle, maximum angle, invert.
///
/// Units: degrees
const DEFAULT_CALIBRATION: [(LimbRole, i32, i32, bool); NUM_LEGS + NUM_FEET] = [
    (LimbRole::LeftLegFront, 9, 90, true),
    (LimbRole::LeftFootFront, 50, 150, false),
    (LimbRole::LeftLegBack, 90, 180, false),
    (LimbRole::LeftFootBack, 50, 150, true),
    (LimbRole::RightLegBack, 9, 90, true),
    (LimbRole::RightFootBack, 50, 150, false),
    (LimbRole::RightLegFront, 90, 180, false),
    (LimbRole::RightFootFront, 50, 150, true),
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A four legged walking robot.
#[derive(Debug)]
pub struct Robot {
    name: String,

    legs: [Limb; NUM_LEGS],
    feet: [Limb; NUM_FEET],

    debug: bool,

    history: CommandHistory,

    channel_map: ChannelMap,

    settle_delay: Duration,
    tick_delay: Duration,
    identify_delay: Duration,
}

/// The angle of a single limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LimbTelemetry {
    pub role: LimbRole,

    /// Units: degrees
    pub angle: i32,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while building a robot.
#[derive(Debug, Error)]
pub enum RobotError {
    #[error("Invalid limb override: {0}")]
    UnknownLimb(#[from] UnknownLimbError),

    #[error("Invalid limb calibration: {0}")]
    InvalidCalibration(#[from] LimbError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Robot {
    /// Build a new robot.
    ///
    /// Each limb gets the default calibration unless overridden in `params`, and shares the
    /// given actuator. Limbs start logically in their body position.
    pub fn new(params: &RobotParams, actuator: Actuator) -> Result<Self, RobotError> {
        info!("*** Initialising Robot ***");

        // Check all overrides refer to a real limb before building anything
        for over in params.limbs.iter() {
            over.role.parse::<LimbRole>()?;
        }

        let build = |role: LimbRole| build_limb(role, params, actuator.clone());

        let legs = [
            build(LEG_ROLES[LEFT_FRONT])?,
            build(LEG_ROLES[LEFT_BACK])?,
            build(LEG_ROLES[RIGHT_FRONT])?,
            build(LEG_ROLES[RIGHT_BACK])?,
        ];
        let feet = [
            build(FOOT_ROLES[LEFT_FRONT])?,
            build(FOOT_ROLES[LEFT_BACK])?,
            build(FOOT_ROLES[RIGHT_FRONT])?,
            build(FOOT_ROLES[RIGHT_BACK])?,
        ];

        let mut channel_map = ChannelMap::default();
        for limb in legs.iter().chain(feet.iter()) {
            channel_map.set(limb.role(), limb.channel());
        }

        if !actuator.is_available() {
            warn!("No servo driver available, the robot will only move logically");
        }

        let mut robot = Self {
            name: params.name.clone(),
            legs,
            feet,
            debug: params.debug,
            history: CommandHistory::new(),
            channel_map,
            settle_delay: params.settle(),
            tick_delay: params.tick(),
            identify_delay: params.identify(),
        };

        if params.invert_feet {
            robot.invert_feet();
        }

        Ok(robot)
    }

    // ---- ACCESSORS ----

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the robot's name and announce it.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();

        info!("*** {} Online ***", self.name);

        // The name can be tapped out by a message encoder at this point, which lives outside the
        // robot core.

        if self.debug {
            debug!("Changed name to {}", self.name);
        }
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn legs(&self) -> &[Limb] {
        &self.legs
    }

    pub fn feet(&self) -> &[Limb] {
        &self.feet
    }

    pub fn limb(&self, role: LimbRole) -> &Limb {
        match slot(role) {
            (LimbKind::Leg, i) => &self.legs[i],
            (LimbKind::Foot, i) => &self.feet[i],
        }
    }

    pub fn limb_mut(&mut self, role: LimbRole) -> &mut Limb {
        match slot(role) {
            (LimbKind::Leg, i) => &mut self.legs[i],
            (LimbKind::Foot, i) => &mut self.feet[i],
        }
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }

    pub fn channel_map(&self) -> &ChannelMap {
        &self.channel_map
    }

    // ---- SNAPSHOTS ----

    /// Calibration of every limb, feet first then legs.
    pub fn config(&self) -> Vec<LimbConfig> {
        self.feet
            .iter()
            .chain(self.legs.iter())
            .map(Limb::config)
            .collect()
    }

    /// Current angle of every limb, legs first then feet, in [`TELEMETRY_ORDER`].
    pub fn telemetry(&self) -> Vec<LimbTelemetry> {
        TELEMETRY_ORDER
            .iter()
            .map(|role| LimbTelemetry {
                role: *role,
                angle: self.limb(*role).angle(),
            })
            .collect()
    }

    // ---- RECALIBRATION ----

    /// Swap the invert flag of every foot, for chassis assembled with the feet mirrored.
    pub fn invert_feet(&mut self) {
        for foot in self.feet.iter_mut() {
            let invert = !foot.invert();
            foot.set_invert(invert);
        }
    }

    /// Move a limb onto a new channel.
    ///
    /// Returns `false` if the limb name or channel is invalid. If another limb is still using the
    /// channel a warning is logged, resolving the collision is up to the caller.
    pub fn set_limb_channel(&mut self, limb_name: &str, channel: i32) -> bool {
        let role = match limb_name.parse::<LimbRole>() {
            Ok(r) => r,
            Err(e) => {
                warn!("Cannot set limb channel: {}", e);
                return false
            }
        };

        if let Err(e) = self.limb_mut(role).set_channel(channel) {
            warn!("Cannot set the channel of {}: {}", role, e);
            return false
        }

        let channel = self.limb(role).channel();
        self.channel_map.set(role, channel);

        for other in self.legs.iter().chain(self.feet.iter()) {
            if other.role() != role && other.channel() == channel {
                warn!(
                    "Remember to change {} as this is still using channel {}",
                    other.role(), channel
                );
            }
        }

        true
    }

    /// Wiggle whichever limb is on the given channel so it can be found by eye.
    ///
    /// Feet are searched before legs. Returns the role of the limb, or `None` if no limb uses the
    /// channel.
    pub fn identify(&mut self, channel: u8) -> Option<LimbRole> {
        let delay = self.identify_delay;

        for limb in self.feet.iter_mut().chain(self.legs.iter_mut()) {
            if limb.channel() == channel {
                info!("Identifying {}", limb);
                limb.identify(delay);
                return Some(limb.role())
            }
        }

        warn!("Limb not found on channel {}", channel);
        None
    }

    // ---- PRIVATE ----

    /// Wait for the servos to settle, `count` times the settle delay.
    fn settle(&self, count: u32) {
        limb::pause(self.settle_delay * count);
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Which array a role's limb lives in and at what index.
fn slot(role: LimbRole) -> (LimbKind, usize) {
    let index = match (role.side(), role.end()) {
        (Side::Left, End::Front) => LEFT_FRONT,
        (Side::Left, End::Back) => LEFT_BACK,
        (Side::Right, End::Front) => RIGHT_FRONT,
        (Side::Right, End::Back) => RIGHT_BACK,
    };

    (role.kind(), index)
}

/// Build a limb from its default calibration and any overrides in the parameters.
fn build_limb(role: LimbRole, params: &RobotParams, actuator: Actuator) -> Result<Limb, RobotError> {
    let default_channel = ChannelMap::default().channel(role);
    let (mut min, mut max, mut invert) = DEFAULT_CALIBRATION
        .iter()
        .find(|(r, _, _, _)| *r == role)
        .map(|(_, min, max, invert)| (*min, *max, *invert))
        .unwrap_or((0, 180, false));
    let mut channel = default_channel;

    // Later overrides win
    for over in params.limbs.iter() {
        if over.role.parse::<LimbRole>().ok() != Some(role) {
            continue
        }
        channel = over.channel.unwrap_or(channel);
        min = over.min_angle.unwrap_or(min);
        max = over.max_angle.unwrap_or(max);
        invert = over.invert.unwrap_or(invert);
    }

    Ok(Limb::new(role, channel, min, max, invert, actuator)?)
}
