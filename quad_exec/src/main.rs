//! # Quadruped Executable
//!
//! This executable brings up the servo driver, builds the robot and runs a command script
//! against it. At the end of the run the command history, the final limb angles and the limb
//! calibration are saved into the session directory.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Servo driver bring-up.
mod hardware;

/// Parameters for the quadruped executable.
mod params;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use std::{thread, time::Duration};
use log::{debug, info, warn};
use color_eyre::{Result, eyre::WrapErr};

// Internal
use params::QuadExecParams;
use quad_ctrl::{Command, Response, Robot};
use util::{
    host,
    logger::{logger_init, LevelFilter},
    script_interpreter::{PendingCmds, ScriptInterpreter},
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Time to wait between checks for pending script commands.
const SCRIPT_POLL_PERIOD: Duration = Duration::from_millis(10);

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {

    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "quad_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Quadruped Executable\n");
    info!(
        "Software root: {:?}",
        host::get_sw_root().wrap_err("Failed to get the software root")?
    );
    info!("Session directory: {:?}\n", session.session_root);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let params: QuadExecParams = util::params::load("quad_exec.toml")
        .wrap_err("Failed to load the quad_exec parameters")?;

    info!("Parameters loaded");

    // ---- ROBOT INITIALISATION ----

    let actuator = hardware::init_actuator(&params);

    let mut robot = Robot::new(&params.robot, actuator)
        .wrap_err("Failed to initialise the robot")?;

    robot.execute(&Command::SetName { name: params.robot.name.clone() });

    info!("Robot initialised");

    // ---- SCRIPT ----

    match params.script_path {
        Some(ref script_path) => {
            let mut path = host::get_sw_root().wrap_err("Failed to get the software root")?;
            path.push(script_path);

            let script: ScriptInterpreter<Command> = ScriptInterpreter::new(&path)
                .wrap_err_with(|| format!("Failed to load the script at {:?}", path))?;

            info!(
                "Loaded script with {} commands, lasting {} s",
                script.get_num_cmds(),
                script.get_duration()
            );

            run_script(&mut robot, script);
        },
        None => {
            info!("No script given, standing up and sitting down");

            for cmd in [Command::Stand, Command::Sit].iter() {
                report(robot.execute(cmd));
            }
        }
    }

    // ---- SHUTDOWN ----

    info!("Saving session data");

    session.save("history.json", robot.history().clone());
    session.save("telemetry.json", robot.telemetry());
    session.save("config.json", robot.config());

    info!("End of session");

    session.exit();

    Ok(())
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Execute each command in the script once its time has come.
fn run_script(robot: &mut Robot, mut script: ScriptInterpreter<Command>) {
    loop {
        match script.get_pending_cmds() {
            PendingCmds::Some(cmds) => {
                for cmd in cmds.iter() {
                    info!("Executing \"{}\"", cmd);
                    report(robot.execute(cmd));
                }
            },
            PendingCmds::None => thread::sleep(SCRIPT_POLL_PERIOD),
            PendingCmds::EndOfScript => {
                info!("End of script reached");
                break
            }
        }
    }
}

/// Log the response to a command.
fn report(response: Response) {
    match response {
        Response::Done => debug!("Command complete"),
        Response::Walked(strides) => info!("Walked {} strides", strides),
        Response::Identified(Some(role)) => info!("Identified {}", role),
        Response::Identified(None) => warn!("No limb identified"),
        Response::ChannelSet(true) => info!("Limb channel changed"),
        Response::ChannelSet(false) => warn!("Limb channel unchanged"),
        Response::Telemetry(t) => {
            for limb in t.iter() {
                info!("    {}: {}", limb.role.snake_name(), limb.angle);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quad_ctrl::{Actuator, RobotParams};

    #[test]
    fn test_demo_script() {
        let mut script: ScriptInterpreter<Command> =
            ScriptInterpreter::from_script(include_str!("../../scripts/demo.qs")).unwrap();
        let mut robot = Robot::new(&RobotParams::immediate(), Actuator::Absent).unwrap();

        assert_eq!(script.get_num_cmds(), 10);

        match script.get_pending_at(f64::MAX) {
            PendingCmds::Some(cmds) => {
                for cmd in cmds.iter() {
                    report(robot.execute(cmd));
                }
            },
            _ => panic!("Expected the whole script to be pending"),
        }

        assert_eq!(script.get_pending_at(f64::MAX), PendingCmds::EndOfScript);
        assert_eq!(robot.history().len(), 11);
        assert_eq!(robot.history().history()[4], "walkforward 3");
        assert_eq!(robot.history().last_ten().last().map(String::as_str), Some("sit"));
    }
}
