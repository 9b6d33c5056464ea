//! Command dispatch

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;
use serde::Serialize;

use super::{LimbTelemetry, Robot};
use crate::{channel_map::LimbRole, cmd::Command};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// What the robot reports back after executing a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// The command ran to completion.
    Done,

    /// A walk finished after this many stride cycles.
    Walked(usize),

    /// The limb found on the requested channel, if any.
    Identified(Option<LimbRole>),

    /// Whether the limb's channel was changed.
    ChannelSet(bool),

    Telemetry(Vec<LimbTelemetry>),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Robot {
    /// Execute a command, recording it in the command history first.
    ///
    /// Commands always run to completion, there is no way to interrupt one part way through.
    pub fn execute(&mut self, cmd: &Command) -> Response {
        self.history.append(cmd.to_string());

        if self.debug {
            debug!("Executing: {}", cmd);
        }

        match cmd {
            Command::Sit => self.sit(),
            Command::Stand => self.stand(),
            Command::Swing => self.swing(),
            Command::Body => self.body(),
            Command::Stretch => self.stretch(),
            Command::Middle => self.middle(),
            Command::Default => self.default(),
            Command::LegReset => self.leg_reset(),
            Command::TurnLeft => self.turn_left(),
            Command::TurnRight => self.turn_right(),
            Command::WalkForward { steps } => return Response::Walked(self.walk_forward(*steps)),
            Command::WalkBackward { steps } => return Response::Walked(self.walk_backward(*steps)),
            Command::Clap { count } => self.clap(*count),
            Command::Wiggle { count } => self.wiggle(*count),
            Command::InvertFeet => self.invert_feet(),
            Command::Identify { channel } => return Response::Identified(self.identify(*channel)),
            Command::SetLimbChannel { limb, channel } => {
                return Response::ChannelSet(self.set_limb_channel(limb, *channel))
            },
            Command::SetName { name } => self.set_name(name.clone()),
            Command::Telemetry => return Response::Telemetry(self.telemetry()),
        }

        Response::Done
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::robot::test::test_robot;

    #[test]
    fn test_execute_records_history() {
        let (mut robot, _) = test_robot();

        let cmds: Vec<Command> = vec!["sit", "walkforward 2", "clap", "name Scout", "telemetry"]
            .into_iter()
            .map(|c| c.parse().unwrap())
            .collect();

        for cmd in cmds.iter() {
            robot.execute(cmd);
        }

        assert_eq!(robot.history().history(), &[
            String::from("*** new history ***"),
            String::from("sit"),
            String::from("walkforward 2"),
            String::from("clap"),
            String::from("name Scout"),
            String::from("telemetry"),
        ]);
        assert_eq!(robot.name(), "Scout");
    }

    #[test]
    fn test_execute_responses() {
        let (mut robot, _) = test_robot();

        assert_eq!(robot.execute(&Command::Stand), Response::Done);
        assert_eq!(
            robot.execute(&Command::WalkBackward { steps: Some(2) }),
            Response::Walked(2)
        );
        assert_eq!(
            robot.execute(&Command::Identify { channel: 7 }),
            Response::Identified(Some(LimbRole::RightFootFront))
        );
        assert_eq!(
            robot.execute(&Command::Identify { channel: 15 }),
            Response::Identified(None)
        );
        assert_eq!(
            robot.execute(&Command::SetLimbChannel { limb: String::from("Tail"), channel: 3 }),
            Response::ChannelSet(false)
        );

        match robot.execute(&Command::Telemetry) {
            Response::Telemetry(t) => assert_eq!(t.len(), 8),
            r => panic!("Expected telemetry, got {:?}", r),
        }

        assert_eq!(robot.history().last_ten().len(), 7);
    }
}
