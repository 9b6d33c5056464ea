//! # Script interpreter module
//!
//! This module provides an interpreter for timed command scripts. Each entry in a script is a
//! time in seconds since the start of the session, followed by a command in JSON:
//!
//! ```text
//! 0.0: "stand";
//! 2.5: {"walk_forward": {"steps": 3}};
//! ```
//!
//! The interpreter is generic over the command type, which only needs to be deserialisable.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::Path;
use std::fs;
use regex::RegexBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;

// Internal
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Matches one `<time>: <payload>;` entry of a script.
///
/// The payload runs up to the first `;` outside of a JSON string.
const ENTRY_PATTERN: &str = r#"^\s*(\d+(\.\d+)?)\s*:\s*((?:[^;"]|"(?:[^"\\]|\\.)*")*);"#;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
struct ScriptedCmd<T> {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    cmd: T
}

/// A script interpreter.
///
/// After loading the script use `.get_pending_cmds` to acquire a list of commands that need
/// executing.
pub struct ScriptInterpreter<T> {
    cmds: VecDeque<ScriptedCmd<T>>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0}")]
    ScriptNotFound(String),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid command at {0} s: {1}")]
    InvalidCmd(f64, serde_json::Error),

    #[error("Could not build the script pattern: {0}")]
    InvalidPattern(regex::Error)
}

/// Commands which are due for execution.
#[derive(Debug, PartialEq)]
pub enum PendingCmds<T> {
    /// Nothing is due yet.
    None,

    Some(Vec<T>),

    /// Every command in the script has been returned.
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<T: DeserializeOwned> ScriptInterpreter<T> {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {
        let path = script_path.as_ref();

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path.display().to_string()));
        }

        let script = fs::read_to_string(path).map_err(ScriptError::ScriptLoadError)?;

        Self::from_script(&script)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_script(script: &str) -> Result<Self, ScriptError> {
        let re = RegexBuilder::new(ENTRY_PATTERN)
            .multi_line(true)
            .build()
            .map_err(ScriptError::InvalidPattern)?;

        let mut cmds = VecDeque::new();

        for cap in re.captures_iter(script) {
            // Groups 1 and 3 always take part in a match
            let (time_str, payload) = match (cap.get(1), cap.get(3)) {
                (Some(t), Some(p)) => (t.as_str(), p.as_str()),
                _ => continue
            };

            // Parse the exec time
            let exec_time_s: f64 = time_str
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // Parse the command from the payload. The scripts contain JSON only.
            let cmd: T = serde_json::from_str(payload)
                .map_err(|e| ScriptError::InvalidCmd(exec_time_s, e))?;

            cmds.push_back(ScriptedCmd { exec_time_s, cmd });
        }

        if cmds.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        Ok(ScriptInterpreter { cmds })
    }
}

impl<T> ScriptInterpreter<T> {

    /// Return the commands due at the current session time.
    pub fn get_pending_cmds(&mut self) -> PendingCmds<T> {
        self.get_pending_at(get_elapsed_seconds())
    }

    /// Return the commands due at the given time since the start of the session.
    ///
    /// Commands are returned in script order. A command whose time is earlier than a command
    /// before it is returned along with that earlier entry.
    pub fn get_pending_at(&mut self, current_time_s: f64) -> PendingCmds<T> {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingCmds::EndOfScript
        }

        let mut cmd_vec: Vec<T> = vec![];

        // Pop commands off the front of the queue until one is in the future
        while let Some(front) = self.cmds.front() {
            if front.exec_time_s > current_time_s {
                break
            }
            if let Some(c) = self.cmds.pop_front() {
                cmd_vec.push(c.cmd);
            }
        }

        if cmd_vec.is_empty() {
            PendingCmds::None
        }
        else {
            PendingCmds::Some(cmd_vec)
        }
    }

    /// Get the number of commands left in the script
    pub fn get_num_cmds(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "snake_case")]
    enum TestCmd {
        Stop,
        Go { speed: u32 },
        Say { text: String },
    }

    const SCRIPT: &str = r#"
        0.0: "stop";
        1.5: {"go": {"speed": 3}};
          1.5 : {"go": {"speed": 4}};
        this line is ignored
        4: "stop";
    "#;

    #[test]
    fn test_parse_script() {
        let script: ScriptInterpreter<TestCmd> = ScriptInterpreter::from_script(SCRIPT).unwrap();

        assert_eq!(script.get_num_cmds(), 4);
        assert_eq!(script.get_duration(), 4.0);
    }

    #[test]
    fn test_pending_cmds() {
        let mut script: ScriptInterpreter<TestCmd> =
            ScriptInterpreter::from_script(SCRIPT).unwrap();

        assert_eq!(script.get_pending_at(0.0), PendingCmds::Some(vec![TestCmd::Stop]));
        assert_eq!(script.get_pending_at(1.0), PendingCmds::None);
        assert_eq!(
            script.get_pending_at(2.0),
            PendingCmds::Some(vec![TestCmd::Go { speed: 3 }, TestCmd::Go { speed: 4 }])
        );
        assert_eq!(script.get_num_cmds(), 1);
        assert_eq!(script.get_pending_at(10.0), PendingCmds::Some(vec![TestCmd::Stop]));
        assert_eq!(script.get_pending_at(11.0), PendingCmds::EndOfScript);
    }

    #[test]
    fn test_semicolons_in_strings() {
        let mut script: ScriptInterpreter<TestCmd> = ScriptInterpreter::from_script(
            r#"
            0.5: {"say": {"text": "left; right; \"quoted;\""}};
            1.0: "stop";
            "#
        ).unwrap();

        assert_eq!(script.get_num_cmds(), 2);
        assert_eq!(
            script.get_pending_at(2.0),
            PendingCmds::Some(vec![
                TestCmd::Say { text: String::from("left; right; \"quoted;\"") },
                TestCmd::Stop,
            ])
        );
    }

    #[test]
    fn test_script_errors() {
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::from_script("nothing to see here"),
            Err(ScriptError::ScriptEmpty)
        ));
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::from_script(r#"1.0: "fly";"#),
            Err(ScriptError::InvalidCmd(t, _)) if t == 1.0
        ));
        assert!(matches!(
            ScriptInterpreter::<TestCmd>::new("/no/such/script.qs"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
