//! # Gait stepper
//!
//! Walking is animated by advancing every leg a fixed number of degrees per call of the walk loop
//! until the leg reaches the end of its sweep. When a leg arrives the walk loop lifts the leg,
//! swaps it back to the start of its sweep, and puts it down again.
//!
//! Left and right legs rotate in opposite senses during a stride, and walking backwards swaps the
//! senses over.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::{
    channel_map::{LimbKind, LimbRole, Side},
    limb::{Limb, Pose},
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Angle advanced by each tick.
///
/// Units: degrees
pub const TICK_STEP_DEG: i32 = 2;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Direction of travel for a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Whether a leg's angle increases or decreases through a stride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Increasing,
    Decreasing,
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// The sense in which a limb sweeps when walking in the given direction.
///
/// Feet do not sweep, so `None` is returned for them.
pub fn sweep(role: LimbRole, direction: Direction) -> Option<Sweep> {
    if role.kind() != LimbKind::Leg {
        return None
    }

    Some(match (role.side(), direction) {
        (Side::Left, Direction::Forward) | (Side::Right, Direction::Backward) => Sweep::Increasing,
        (Side::Right, Direction::Forward) | (Side::Left, Direction::Backward) => Sweep::Decreasing,
    })
}

/// The pose a leg is swapped to once it completes its stride.
pub fn arrival_pose(role: LimbRole, invert: bool, direction: Direction) -> Pose {
    match direction {
        Direction::Forward => match (role, invert) {
            (LimbRole::RightLegFront, false) => Pose::Stretch,
            (_, false) => Pose::Body,
            (LimbRole::RightLegBack, true) => Pose::Body,
            (_, true) => Pose::Stretch,
        },
        Direction::Backward => match (role, invert) {
            (LimbRole::LeftLegBack, false) => Pose::Stretch,
            (_, false) => Pose::Body,
            (LimbRole::LeftLegFront, true) => Pose::Body,
            (_, true) => Pose::Stretch,
        },
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Limb {
    /// Advance the leg one step of a forward stride.
    ///
    /// Returns `false` while the leg is still advancing and `true` once it has reached the end of
    /// its sweep. Feet always report `true`.
    pub fn tick(&mut self) -> bool {
        self.step(Direction::Forward)
    }

    /// Advance the leg one step of a backward stride, see [`Limb::tick`].
    pub fn untick(&mut self) -> bool {
        self.step(Direction::Backward)
    }

    /// Advance the leg one step in the given direction.
    pub fn step(&mut self, direction: Direction) -> bool {
        let current = self.angle();

        let next = match sweep(self.role(), direction) {
            Some(Sweep::Increasing) => {
                if current >= self.max_angle() {
                    return true
                }
                current + TICK_STEP_DEG
            },
            Some(Sweep::Decreasing) => {
                if current <= self.min_angle() {
                    return true
                }
                current - TICK_STEP_DEG
            },
            None => return true
        };

        // Never step past the bounds, the last step of a sweep lands on the boundary
        let next = next.max(self.min_angle()).min(self.max_angle());

        // The clamped angle is always valid, but a leg that can't move has nowhere left to go
        !self.set_angle(next)
    }
}
