//! Whole-robot postures

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, info};

use super::{Robot, LEFT_BACK, LEFT_FRONT, NUM_LEGS, RIGHT_BACK, RIGHT_FRONT};
use crate::{channel_map::Side, limb::Pose};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Robot {
    /// Sit the robot down by lowering all the feet.
    pub fn sit(&mut self) {
        info!("{} sitting down", self.name);
        for foot in self.feet.iter_mut() {
            foot.down();
        }
    }

    /// Stand the robot up by raising all the feet.
    pub fn stand(&mut self) {
        info!("{} standing up", self.name);
        for foot in self.feet.iter_mut() {
            foot.up();
        }
    }

    /// Move every leg to its swing position, making a large X shape.
    pub fn swing(&mut self) {
        self.place_legs(Pose::Swing);
    }

    /// Move every leg to its body position, close to the chassis.
    pub fn body(&mut self) {
        self.place_legs(Pose::Body);
    }

    /// Move every leg to its stretch position, out towards the head and tail.
    pub fn stretch(&mut self) {
        self.place_legs(Pose::Stretch);
    }

    /// Turn on the spot to the left.
    pub fn turn_left(&mut self) {
        info!("{} turning left", self.name);
        self.turn(Side::Left);
    }

    /// Turn on the spot to the right.
    pub fn turn_right(&mut self) {
        info!("{} turning right", self.name);
        self.turn(Side::Right);
    }

    /// Move every leg to its middle position.
    pub fn middle(&mut self) {
        for leg in self.legs.iter_mut() {
            leg.middle();
        }
    }

    /// Move every leg to its default position.
    pub fn leg_reset(&mut self) {
        let debug = self.debug;
        for leg in self.legs.iter_mut() {
            leg.default();
            if debug {
                debug!("Setting {} to the default position", leg);
            }
        }
    }

    /// Move every leg, then every foot, to its default position.
    pub fn default(&mut self) {
        for limb in self.legs.iter_mut().chain(self.feet.iter_mut()) {
            limb.default();
        }
    }

    // ---- PRIVATE ----

    /// Move each leg in turn to the pose, lifting its foot while it moves so it doesn't drag.
    fn place_legs(&mut self, pose: Pose) {
        for i in 0..NUM_LEGS {
            self.feet[i].down();
            self.settle(1);
            self.legs[i].pose(pose);
            self.settle(1);
            self.feet[i].up();
            self.settle(1);
        }
    }

    /// Twist the body towards `side` between two swing postures.
    fn turn(&mut self, side: Side) {
        let (front, back, other_front, other_back) = match side {
            Side::Left => (LEFT_FRONT, LEFT_BACK, RIGHT_FRONT, RIGHT_BACK),
            Side::Right => (RIGHT_FRONT, RIGHT_BACK, LEFT_FRONT, LEFT_BACK),
        };

        self.swing();

        self.legs[front].stretch();
        self.legs[back].body();
        self.legs[other_front].body();
        self.legs[other_back].stretch();
        self.settle(1);

        self.swing();
    }
}

#[cfg(test)]
mod test {
    use crate::{
        channel_map::LimbRole,
        limb::pulse_for,
        params::RobotParams,
        robot::{test::test_robot, Robot},
        servo_ctrl::{Actuator, RecordingDriver},
    };

    #[test]
    fn test_sit_stand() {
        let (mut robot, driver) = test_robot();

        robot.sit();
        assert_eq!(robot.limb(LimbRole::LeftFootFront).angle(), 150);
        assert_eq!(robot.limb(LimbRole::LeftFootBack).angle(), 50);

        robot.stand();
        assert_eq!(robot.limb(LimbRole::LeftFootFront).angle(), 50);
        assert_eq!(robot.limb(LimbRole::LeftFootBack).angle(), 150);

        assert_eq!(driver.on_channel(1), vec![pulse_for(150), pulse_for(50)]);

        // Legs don't move
        assert!(driver.on_channel(0).is_empty());
    }

    #[test]
    fn test_sit_with_failing_driver() {
        let driver = RecordingDriver { fail: true, ..Default::default() };
        let mut robot = Robot::new(&RobotParams::immediate(), Actuator::new(driver.clone()))
            .unwrap();

        robot.sit();

        for foot in robot.feet() {
            assert_eq!(foot.angle(), foot.stretch_angle());
        }
        assert!(driver.pulses.borrow().is_empty());
    }

    #[test]
    fn test_swing_lifts_each_foot() {
        let (mut robot, driver) = test_robot();

        robot.swing();

        // Each corner is foot down, leg, foot up, one corner at a time
        let channels: Vec<u8> = driver.pulses.borrow().iter().map(|p| p.0).collect();
        assert_eq!(channels, vec![1, 0, 1, 3, 2, 3, 7, 6, 7, 5, 4, 5]);

        assert_eq!(robot.limb(LimbRole::LeftLegFront).angle(), 40);
        assert_eq!(robot.limb(LimbRole::LeftLegBack).angle(), 135);
        assert_eq!(robot.limb(LimbRole::RightLegFront).angle(), 135);
        assert_eq!(robot.limb(LimbRole::RightLegBack).angle(), 40);
    }

    #[test]
    fn test_body_and_stretch() {
        let (mut robot, _) = test_robot();

        robot.stretch();
        for leg in robot.legs() {
            assert_eq!(leg.angle(), leg.stretch_angle());
        }

        robot.body();
        for leg in robot.legs() {
            assert_eq!(leg.angle(), leg.body_angle());
        }
    }

    #[test]
    fn test_turns_end_in_swing() {
        let (mut robot, driver) = test_robot();

        robot.turn_right();
        for leg in robot.legs() {
            assert_eq!(leg.angle(), leg.swing_angle());
        }

        // Right front was stretched during the twist
        assert!(driver.on_channel(6).contains(&pulse_for(180)));

        robot.turn_left();
        for leg in robot.legs() {
            assert_eq!(leg.angle(), leg.swing_angle());
        }

        // Left front stretched to its minimum when turning left
        assert!(driver.on_channel(0).contains(&pulse_for(9)));
    }

    #[test]
    fn test_middle_and_reset() {
        let (mut robot, _) = test_robot();

        robot.middle();
        assert_eq!(robot.limb(LimbRole::LeftLegFront).angle(), 81);
        assert_eq!(robot.limb(LimbRole::RightLegFront).angle(), 90);

        robot.body();
        robot.leg_reset();
        assert_eq!(robot.limb(LimbRole::LeftLegFront).angle(), 81);
        assert_eq!(robot.limb(LimbRole::LeftLegBack).angle(), 90);

        robot.default();
        assert_eq!(robot.limb(LimbRole::LeftFootFront).angle(), 100);
    }
}
