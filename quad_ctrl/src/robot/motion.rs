//! Walking and other composite behaviours

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::{debug, info};

use super::{Robot, LEFT_BACK, LEFT_FRONT, NUM_LEGS, RIGHT_BACK, RIGHT_FRONT};
use crate::{
    gait::{arrival_pose, Direction},
    limb,
};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Robot {
    /// Walk forwards, one step if `steps` is not given or not positive.
    ///
    /// Returns the number of stride cycles walked.
    pub fn walk_forward(&mut self, steps: Option<i32>) -> usize {
        info!("{} moving forward", self.name);
        self.walk(steps, Direction::Forward)
    }

    /// Walk backwards, one step if `steps` is not given or not positive.
    ///
    /// Returns the number of stride cycles walked.
    pub fn walk_backward(&mut self, steps: Option<i32>) -> usize {
        info!("{} moving backward", self.name);
        self.walk(steps, Direction::Backward)
    }

    pub fn forward(&mut self, steps: Option<i32>) -> usize {
        self.walk_forward(steps)
    }

    pub fn backward(&mut self, steps: Option<i32>) -> usize {
        self.walk_backward(steps)
    }

    /// Clap the two front legs together, once if `count` is not given.
    pub fn clap(&mut self, count: Option<i32>) {
        info!("{} clapping", self.name);

        self.sit();
        for _ in 0..repeats(count) {
            self.legs[LEFT_FRONT].body();
            self.legs[RIGHT_FRONT].body();
            self.settle(2);
            self.legs[LEFT_FRONT].stretch();
            self.legs[RIGHT_FRONT].stretch();
            self.settle(2);
        }
        self.stand();
    }

    /// Lift the back of the robot and wiggle the back legs, once if `count` is not given.
    pub fn wiggle(&mut self, count: Option<i32>) {
        info!("{} wiggling", self.name);

        self.sit();
        self.feet[LEFT_BACK].up();
        self.feet[RIGHT_BACK].up();
        self.settle(5);

        for _ in 0..repeats(count) {
            self.legs[LEFT_BACK].body();
            self.legs[RIGHT_BACK].stretch();
            self.settle(5);
            self.legs[LEFT_BACK].stretch();
            self.legs[RIGHT_BACK].body();
            self.settle(5);
        }
        self.stand();
    }

    // ---- PRIVATE ----

    /// Put the legs into the starting position for walking.
    fn ready_to_walk(&mut self) {
        self.sit();
        self.legs[LEFT_FRONT].body();
        self.legs[LEFT_BACK].body();
        self.legs[RIGHT_FRONT].swing();
        self.legs[RIGHT_BACK].swing();
        self.stand();
    }

    /// Walk a number of stride cycles.
    ///
    /// Within a cycle every leg is ticked once per iteration until it reaches the end of its
    /// sweep, at which point it is lifted, swapped back to the start of the sweep and put down.
    /// The cycle ends once all four legs have arrived.
    fn walk(&mut self, steps: Option<i32>, direction: Direction) -> usize {
        let steps = match steps {
            Some(s) if s > 0 => s as usize,
            _ => 1,
        };

        self.ready_to_walk();

        for step in 0..steps {
            let mut arrived = [false; NUM_LEGS];

            while arrived.iter().any(|a| !a) {
                for i in 0..NUM_LEGS {
                    if arrived[i] {
                        continue
                    }

                    if self.legs[i].step(direction) {
                        self.swap_leg(i, direction);
                        arrived[i] = true;
                    }
                }

                limb::pause(self.tick_delay);
            }

            if self.debug {
                debug!("Stride {} of {} complete", step + 1, steps);
            }
        }

        steps
    }

    /// Lift a leg that has finished its stride and swap it to its next pose.
    fn swap_leg(&mut self, index: usize, direction: Direction) {
        let pose = arrival_pose(self.legs[index].role(), self.legs[index].invert(), direction);

        self.feet[index].down();
        self.settle(1);
        self.legs[index].pose(pose);
        self.settle(1);
        self.feet[index].up();
        self.settle(1);

        if self.debug {
            debug!("{} swapped to {:?}", self.legs[index], pose);
        }
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Number of repetitions for clap and wiggle. Defaults to one, negative counts do nothing.
fn repeats(count: Option<i32>) -> usize {
    count.unwrap_or(1).max(0) as usize
}

#[cfg(test)]
mod test {
    use crate::{
        channel_map::LimbRole,
        limb::{pulse_for, Limb, Pose},
        robot::{test::test_robot, FOOT_ROLES, LEG_ROLES},
    };

    /// Check every pulse sent to a leg stayed within its bounds.
    fn assert_in_bounds(leg: &Limb, pulses: &[u16]) {
        let (lo, hi) = (pulse_for(leg.min_angle()), pulse_for(leg.max_angle()));
        for p in pulses {
            assert!(*p >= lo && *p <= hi, "{} pulse {} outside {}..{}", leg, p, lo, hi);
        }
    }

    #[test]
    fn test_walk_forward_three_strides() {
        let (mut robot, driver) = test_robot();

        assert_eq!(robot.walk_forward(Some(3)), 3);

        for role in FOOT_ROLES.iter() {
            let foot = robot.limb(*role);
            let down = pulse_for(foot.target(Pose::Down));
            let up = pulse_for(foot.target(Pose::Up));

            // Sit and stand, then one down/up around each of the three arrivals
            let mut expected = vec![];
            for _ in 0..4 {
                expected.push(down);
                expected.push(up);
            }
            assert_eq!(driver.on_channel(foot.channel()), expected, "{}", role);
        }

        for role in LEG_ROLES.iter() {
            let leg = robot.limb(*role);
            assert_in_bounds(leg, &driver.on_channel(leg.channel()));
        }
    }

    #[test]
    fn test_walk_legs_end_at_sweep_start() {
        let (mut robot, _) = test_robot();

        robot.walk_forward(Some(2));

        // Left legs sweep up from their minimum, right legs down from their maximum
        assert_eq!(robot.limb(LimbRole::LeftLegFront).angle(), 9);
        assert_eq!(robot.limb(LimbRole::LeftLegBack).angle(), 90);
        assert_eq!(robot.limb(LimbRole::RightLegFront).angle(), 180);
        assert_eq!(robot.limb(LimbRole::RightLegBack).angle(), 90);

        robot.walk_backward(None);

        assert_eq!(robot.limb(LimbRole::LeftLegFront).angle(), 90);
        assert_eq!(robot.limb(LimbRole::LeftLegBack).angle(), 180);
        assert_eq!(robot.limb(LimbRole::RightLegFront).angle(), 90);
        assert_eq!(robot.limb(LimbRole::RightLegBack).angle(), 9);
    }

    #[test]
    fn test_walk_backward_in_bounds() {
        let (mut robot, driver) = test_robot();

        assert_eq!(robot.backward(Some(2)), 2);

        for role in LEG_ROLES.iter() {
            let leg = robot.limb(*role);
            assert_in_bounds(leg, &driver.on_channel(leg.channel()));
        }

        // Feet: sit, stand and two arrivals
        assert_eq!(driver.on_channel(1).len(), 6);
    }

    #[test]
    fn test_walk_step_defaults() {
        let (mut robot, _) = test_robot();

        assert_eq!(robot.forward(None), 1);
        assert_eq!(robot.walk_forward(Some(0)), 1);
        assert_eq!(robot.walk_backward(Some(-4)), 1);
    }

    #[test]
    fn test_clap() {
        let (mut robot, driver) = test_robot();

        robot.clap(Some(2));

        // Front left leg: body, stretch, body, stretch
        assert_eq!(
            driver.on_channel(0),
            vec![pulse_for(90), pulse_for(9), pulse_for(90), pulse_for(9)]
        );
        // Front right leg: body, stretch, body, stretch
        assert_eq!(
            driver.on_channel(6),
            vec![pulse_for(90), pulse_for(180), pulse_for(90), pulse_for(180)]
        );
        // Ends standing
        assert_eq!(robot.limb(LimbRole::LeftFootFront).angle(), 50);
    }

    #[test]
    fn test_wiggle() {
        let (mut robot, driver) = test_robot();

        robot.wiggle(None);

        // Back feet: sit (down), lifted, stand (up)
        assert_eq!(
            driver.on_channel(3),
            vec![pulse_for(50), pulse_for(150), pulse_for(150)]
        );
        // Back left leg: body then stretch
        assert_eq!(driver.on_channel(2), vec![pulse_for(90), pulse_for(180)]);
        // Back right leg: stretch then body
        assert_eq!(driver.on_channel(4), vec![pulse_for(9), pulse_for(90)]);

        // Front legs untouched
        assert!(driver.on_channel(0).is_empty());
    }

    #[test]
    fn test_negative_count_only_sits_and_stands() {
        let (mut robot, driver) = test_robot();

        robot.clap(Some(-1));

        assert!(driver.on_channel(0).is_empty());
        assert_eq!(driver.on_channel(1).len(), 2);
    }
}
