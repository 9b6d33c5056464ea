//! # Quadruped Control Library
//!
//! Drives a four legged walking robot with eight servos: one rotational joint (leg) and one lift
//! joint (foot) at each corner of the chassis.
//!
//! Commands are turned into sequences of limb poses, each pose into an angle, and each angle into
//! a pulse sent to the servo driver through an [`Actuator`]. If no driver is available the robot
//! still tracks its state, it just doesn't move anything.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod channel_map;
pub mod cmd;
pub mod gait;
pub mod history;
pub mod limb;
pub mod params;
pub mod robot;

/// Driver used to control servos.
pub mod servo_ctrl;

// ---------------------------------------------------------------------------
// REEXPORTS
// ---------------------------------------------------------------------------

pub use channel_map::{ChannelMap, LimbRole};
pub use cmd::{Command, CommandParseError};
pub use history::CommandHistory;
pub use limb::{Limb, LimbConfig, LimbError, Pose};
pub use params::{LimbParams, RobotParams};
pub use robot::{LimbTelemetry, Response, Robot, RobotError};
pub use servo_ctrl::{Actuator, ServoDriver, ServoError};
