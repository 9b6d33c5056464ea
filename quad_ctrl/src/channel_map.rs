//! Limb roles and the mapping between roles and driver channels

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of limbs on the robot.
pub const NUM_LIMBS: usize = 8;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The role a limb plays on the chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimbRole {
    LeftLegFront,
    LeftFootFront,
    LeftLegBack,
    LeftFootBack,
    RightLegBack,
    RightFootBack,
    RightLegFront,
    RightFootFront,
}

/// Which side of the chassis a limb is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Which end of the chassis a limb is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Front,
    Back,
}

/// Legs rotate forwards and backwards, feet lift up and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimbKind {
    Leg,
    Foot,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} is not a recognised limb name")]
pub struct UnknownLimbError(pub String);

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Bidirectional lookup between limb roles and driver channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMap {
    entries: [(LimbRole, u8); NUM_LIMBS],
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LimbRole {
    /// All roles, in default channel order.
    pub const ALL: [LimbRole; NUM_LIMBS] = [
        LimbRole::LeftLegFront,
        LimbRole::LeftFootFront,
        LimbRole::LeftLegBack,
        LimbRole::LeftFootBack,
        LimbRole::RightLegBack,
        LimbRole::RightFootBack,
        LimbRole::RightLegFront,
        LimbRole::RightFootFront,
    ];

    pub fn side(&self) -> Side {
        match self {
            LimbRole::LeftLegFront
            | LimbRole::LeftFootFront
            | LimbRole::LeftLegBack
            | LimbRole::LeftFootBack => Side::Left,
            _ => Side::Right,
        }
    }

    pub fn end(&self) -> End {
        match self {
            LimbRole::LeftLegFront
            | LimbRole::LeftFootFront
            | LimbRole::RightLegFront
            | LimbRole::RightFootFront => End::Front,
            _ => End::Back,
        }
    }

    pub fn kind(&self) -> LimbKind {
        match self {
            LimbRole::LeftLegFront
            | LimbRole::LeftLegBack
            | LimbRole::RightLegBack
            | LimbRole::RightLegFront => LimbKind::Leg,
            _ => LimbKind::Foot,
        }
    }

    /// The role's name, e.g. `LeftLegFront`.
    pub fn name(&self) -> &'static str {
        match self {
            LimbRole::LeftLegFront => "LeftLegFront",
            LimbRole::LeftFootFront => "LeftFootFront",
            LimbRole::LeftLegBack => "LeftLegBack",
            LimbRole::LeftFootBack => "LeftFootBack",
            LimbRole::RightLegBack => "RightLegBack",
            LimbRole::RightFootBack => "RightFootBack",
            LimbRole::RightLegFront => "RightLegFront",
            LimbRole::RightFootFront => "RightFootFront",
        }
    }

    /// Lowercase label used in telemetry, e.g. `left_leg_front`.
    pub fn snake_name(&self) -> &'static str {
        match self {
            LimbRole::LeftLegFront => "left_leg_front",
            LimbRole::LeftFootFront => "left_foot_front",
            LimbRole::LeftLegBack => "left_leg_back",
            LimbRole::LeftFootBack => "left_foot_back",
            LimbRole::RightLegBack => "right_leg_back",
            LimbRole::RightFootBack => "right_foot_back",
            LimbRole::RightLegFront => "right_leg_front",
            LimbRole::RightFootFront => "right_foot_front",
        }
    }
}

impl fmt::Display for LimbRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LimbRole {
    type Err = UnknownLimbError;

    /// Accepts `LeftLegFront`, `LEFT_LEG_FRONT` and `left_leg_front`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        LimbRole::ALL
            .iter()
            .find(|r| r.name().to_lowercase() == key)
            .copied()
            .ok_or_else(|| UnknownLimbError(s.to_string()))
    }
}

impl Default for ChannelMap {
    fn default() -> Self {
        let mut entries = [(LimbRole::LeftLegFront, 0); NUM_LIMBS];
        for (i, role) in LimbRole::ALL.iter().enumerate() {
            entries[i] = (*role, i as u8);
        }

        Self { entries }
    }
}

impl ChannelMap {
    /// The channel assigned to a role.
    pub fn channel(&self, role: LimbRole) -> u8 {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, c)| *c)
            // Every role has exactly one entry
            .unwrap_or_default()
    }

    /// The first role assigned to a channel, or `None` if the channel is unused.
    pub fn role(&self, channel: u8) -> Option<LimbRole> {
        self.entries
            .iter()
            .find(|(_, c)| *c == channel)
            .map(|(r, _)| *r)
    }

    /// Reassign a role's channel.
    ///
    /// Only used when recalibrating a robot, the caller is responsible for resolving collisions.
    pub fn set(&mut self, role: LimbRole, channel: u8) {
        if let Some(entry) = self.entries.iter_mut().find(|(r, _)| *r == role) {
            entry.1 = channel;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &(LimbRole, u8)> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_numbering() {
        let map = ChannelMap::default();

        assert_eq!(map.channel(LimbRole::LeftLegFront), 0);
        assert_eq!(map.channel(LimbRole::LeftFootFront), 1);
        assert_eq!(map.channel(LimbRole::LeftLegBack), 2);
        assert_eq!(map.channel(LimbRole::LeftFootBack), 3);
        assert_eq!(map.channel(LimbRole::RightLegBack), 4);
        assert_eq!(map.channel(LimbRole::RightFootBack), 5);
        assert_eq!(map.channel(LimbRole::RightLegFront), 6);
        assert_eq!(map.channel(LimbRole::RightFootFront), 7);

        for (role, channel) in map.iter() {
            assert_eq!(map.role(*channel), Some(*role));
        }
        assert_eq!(map.role(8), None);
    }

    #[test]
    fn test_set_channel() {
        let mut map = ChannelMap::default();
        map.set(LimbRole::RightFootFront, 12);

        assert_eq!(map.channel(LimbRole::RightFootFront), 12);
        assert_eq!(map.role(12), Some(LimbRole::RightFootFront));
        assert_eq!(map.role(7), None);
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("LeftLegFront".parse(), Ok(LimbRole::LeftLegFront));
        assert_eq!("RIGHT_FOOT_BACK".parse(), Ok(LimbRole::RightFootBack));
        assert_eq!("left_foot_front".parse(), Ok(LimbRole::LeftFootFront));
        assert_eq!(
            "MiddleLeg".parse::<LimbRole>(),
            Err(UnknownLimbError(String::from("MiddleLeg")))
        );
    }

    #[test]
    fn test_classification() {
        let legs = LimbRole::ALL.iter().filter(|r| r.kind() == LimbKind::Leg).count();
        let left = LimbRole::ALL.iter().filter(|r| r.side() == Side::Left).count();
        let front = LimbRole::ALL.iter().filter(|r| r.end() == End::Front).count();

        assert_eq!((legs, left, front), (4, 4, 4));
        assert_eq!(LimbRole::RightLegBack.side(), Side::Right);
        assert_eq!(LimbRole::RightLegBack.end(), End::Back);
    }
}
