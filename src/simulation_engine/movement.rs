use crate::global_variables::{
    BASE_SPEED, CORNER_OFFSETS_DEGREES, MIN_SPEED, SPEED_STEP, TURN_STEP_DEGREES,
};
use serde::{Deserialize, Serialize};

/// A discrete control action. The discriminant order matches a policy's output index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    TurnLeft,
    TurnRight,
    SlowDown,
    SpeedUp,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::TurnLeft,
        Action::TurnRight,
        Action::SlowDown,
        Action::SpeedUp,
    ];

    /// Maps an output index (0..4) to an action. Anything past the last index speeds up.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Action::TurnLeft,
            1 => Action::TurnRight,
            2 => Action::SlowDown,
            _ => Action::SpeedUp,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::TurnLeft => write!(f, "turn-left"),
            Action::TurnRight => write!(f, "turn-right"),
            Action::SlowDown => write!(f, "slow-down"),
            Action::SpeedUp => write!(f, "speed-up"),
        }
    }
}

/// A continuous point in track space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The track cell sampled for this point. Coordinates truncate toward zero,
    /// so anything in (-1, 0) still lands on row or column 0.
    pub fn cell(&self) -> (i64, i64) {
        (self.x.trunc() as i64, self.y.trunc() as i64)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Unit direction for an angle in degrees, using the screen-space "360 - angle" convention.
pub fn direction(angle_degrees: f64) -> (f64, f64) {
    let radians = (360.0 - angle_degrees).to_radians();
    (radians.cos(), radians.sin())
}

/// The point `length` units from `origin` along `angle_degrees`.
pub fn project(origin: Point, angle_degrees: f64, length: f64) -> Point {
    let (dx, dy) = direction(angle_degrees);
    Point::new(origin.x + dx * length, origin.y + dy * length)
}

/// Center of the `length` x `width` box whose top-left corner is `position`.
pub fn box_center(position: Point, length: f64, width: f64) -> Point {
    Point::new(position.x + length / 2.0, position.y + width / 2.0)
}

/// The four corners around `center`, ordered front-left, back-left, back-right, front-right.
pub fn corners_around(center: Point, heading: f64, width: f64) -> [Point; 4] {
    CORNER_OFFSETS_DEGREES.map(|offset| project(center, heading + offset, width))
}

/// Applies `action` to a heading, starting from the base speed.
///
/// Returns the new heading and the advisory speed value. The speed is reset to
/// [`BASE_SPEED`] every tick before the action's delta, so it never carries over.
pub fn apply_action(heading: f64, action: Action) -> (f64, f64) {
    let speed = BASE_SPEED;
    match action {
        Action::TurnLeft => (heading + TURN_STEP_DEGREES, speed),
        Action::TurnRight => (heading - TURN_STEP_DEGREES, speed),
        Action::SlowDown => (heading, (speed - SPEED_STEP).max(MIN_SPEED)),
        Action::SpeedUp => (heading, speed + SPEED_STEP),
    }
}
