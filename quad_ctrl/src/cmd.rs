//! Commands which can be issued to the robot
//!
//! Commands deserialise from JSON (as used in scripts), and also have a short text form which is
//! what gets recorded in the command history, e.g. `walkforward 3` or
//! `set_limb_channel LeftLegFront 8`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A command for the robot to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Sit,
    Stand,
    Swing,
    Body,
    Stretch,
    Middle,
    Default,
    LegReset,
    TurnLeft,
    TurnRight,
    WalkForward {
        #[serde(default)]
        steps: Option<i32>,
    },
    WalkBackward {
        #[serde(default)]
        steps: Option<i32>,
    },
    Clap {
        #[serde(default)]
        count: Option<i32>,
    },
    Wiggle {
        #[serde(default)]
        count: Option<i32>,
    },
    InvertFeet,
    Identify {
        channel: u8,
    },
    SetLimbChannel {
        limb: String,
        channel: i32,
    },
    SetName {
        name: String,
    },
    Telemetry,
}

/// Possible errors when parsing the text form of a command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("No command given")]
    Empty,

    #[error("{0} is not a recognised command")]
    UnknownCommand(String),

    #[error("{0} expects a {1} argument")]
    MissingArgument(&'static str, &'static str),

    #[error("{1} is not a valid argument for {0}")]
    InvalidArgument(&'static str, String),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Sit => write!(f, "sit"),
            Command::Stand => write!(f, "stand"),
            Command::Swing => write!(f, "swing"),
            Command::Body => write!(f, "body"),
            Command::Stretch => write!(f, "stretch"),
            Command::Middle => write!(f, "middle"),
            Command::Default => write!(f, "default"),
            Command::LegReset => write!(f, "leg_reset"),
            Command::TurnLeft => write!(f, "turnleft"),
            Command::TurnRight => write!(f, "turnright"),
            Command::WalkForward { steps } => write_opt(f, "walkforward", steps),
            Command::WalkBackward { steps } => write_opt(f, "walkbackward", steps),
            Command::Clap { count } => write_opt(f, "clap", count),
            Command::Wiggle { count } => write_opt(f, "wiggle", count),
            Command::InvertFeet => write!(f, "invert_feet"),
            Command::Identify { channel } => write!(f, "identify {}", channel),
            Command::SetLimbChannel { limb, channel } => {
                write!(f, "set_limb_channel {} {}", limb, channel)
            },
            Command::SetName { name } => write!(f, "name {}", name),
            Command::Telemetry => write!(f, "telemetry"),
        }
    }
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();

        let keyword = match words.next() {
            Some(w) => w.to_lowercase(),
            None => return Err(CommandParseError::Empty)
        };

        let cmd = match keyword.as_str() {
            "sit" => Command::Sit,
            "stand" => Command::Stand,
            "swing" => Command::Swing,
            "body" => Command::Body,
            "stretch" => Command::Stretch,
            "middle" => Command::Middle,
            "default" => Command::Default,
            "leg_reset" => Command::LegReset,
            "turnleft" => Command::TurnLeft,
            "turnright" => Command::TurnRight,
            "walkforward" | "forward" => Command::WalkForward {
                steps: parse_opt("walkforward", words.next())?
            },
            "walkbackward" | "backward" => Command::WalkBackward {
                steps: parse_opt("walkbackward", words.next())?
            },
            "clap" => Command::Clap {
                count: parse_opt("clap", words.next())?
            },
            "wiggle" => Command::Wiggle {
                count: parse_opt("wiggle", words.next())?
            },
            "invert_feet" => Command::InvertFeet,
            "identify" => Command::Identify {
                channel: parse_req("identify", "channel", words.next())?
            },
            "set_limb_channel" => {
                let limb = match words.next() {
                    Some(l) => l.to_string(),
                    None => return Err(CommandParseError::MissingArgument("set_limb_channel", "limb"))
                };
                Command::SetLimbChannel {
                    limb,
                    channel: parse_req("set_limb_channel", "channel", words.next())?
                }
            },
            "name" => {
                let name = words.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(CommandParseError::MissingArgument("name", "name"))
                }
                return Ok(Command::SetName { name })
            },
            "telemetry" => Command::Telemetry,
            _ => return Err(CommandParseError::UnknownCommand(keyword))
        };

        Ok(cmd)
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

fn write_opt(f: &mut fmt::Formatter<'_>, keyword: &str, arg: &Option<i32>) -> fmt::Result {
    match arg {
        Some(a) => write!(f, "{} {}", keyword, a),
        None => write!(f, "{}", keyword),
    }
}

fn parse_opt(command: &'static str, word: Option<&str>) -> Result<Option<i32>, CommandParseError> {
    match word {
        Some(w) => w
            .parse()
            .map(Some)
            .map_err(|_| CommandParseError::InvalidArgument(command, w.to_string())),
        None => Ok(None),
    }
}

fn parse_req<T: FromStr>(
    command: &'static str,
    arg: &'static str,
    word: Option<&str>,
) -> Result<T, CommandParseError> {
    match word {
        Some(w) => w
            .parse()
            .map_err(|_| CommandParseError::InvalidArgument(command, w.to_string())),
        None => Err(CommandParseError::MissingArgument(command, arg)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_text() {
        assert_eq!("sit".parse(), Ok(Command::Sit));
        assert_eq!("  TurnLeft ".parse(), Ok(Command::TurnLeft));
        assert_eq!("walkforward 3".parse(), Ok(Command::WalkForward { steps: Some(3) }));
        assert_eq!("backward".parse(), Ok(Command::WalkBackward { steps: None }));
        assert_eq!("clap -1".parse(), Ok(Command::Clap { count: Some(-1) }));
        assert_eq!("identify 4".parse(), Ok(Command::Identify { channel: 4 }));
        assert_eq!(
            "set_limb_channel LEFT_LEG_FRONT 9".parse(),
            Ok(Command::SetLimbChannel { limb: String::from("LEFT_LEG_FRONT"), channel: 9 })
        );
        assert_eq!(
            "name Quad One".parse(),
            Ok(Command::SetName { name: String::from("Quad One") })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandParseError::Empty));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(CommandParseError::UnknownCommand(String::from("dance")))
        );
        assert_eq!(
            "identify".parse::<Command>(),
            Err(CommandParseError::MissingArgument("identify", "channel"))
        );
        assert_eq!(
            "wiggle lots".parse::<Command>(),
            Err(CommandParseError::InvalidArgument("wiggle", String::from("lots")))
        );
        assert_eq!(
            "identify 300".parse::<Command>(),
            Err(CommandParseError::InvalidArgument("identify", String::from("300")))
        );
    }

    #[test]
    fn test_text_form_is_reparsable() {
        let cmds = vec![
            Command::LegReset,
            Command::WalkForward { steps: None },
            Command::Wiggle { count: Some(2) },
            Command::SetLimbChannel { limb: String::from("RightFootBack"), channel: 11 },
            Command::SetName { name: String::from("Quad One") },
        ];

        for cmd in cmds {
            assert_eq!(cmd.to_string().parse(), Ok(cmd));
        }
    }

    #[test]
    fn test_json() {
        let cmd: Command = serde_json::from_str(r#""turn_right""#).unwrap();
        assert_eq!(cmd, Command::TurnRight);

        let cmd: Command = serde_json::from_str(r#"{"walk_forward": {"steps": 3}}"#).unwrap();
        assert_eq!(cmd, Command::WalkForward { steps: Some(3) });

        let cmd: Command = serde_json::from_str(r#"{"clap": {}}"#).unwrap();
        assert_eq!(cmd, Command::Clap { count: None });

        assert!(serde_json::from_str::<Command>(r#""fly""#).is_err());
    }
}
