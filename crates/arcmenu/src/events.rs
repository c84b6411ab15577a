use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
}

/// Pointer velocity in screen pixels per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dominant(&self) -> f64 {
        self.x.abs().max(self.y.abs())
    }
}

/// A single-pointer touch sample in container coordinates. `velocity` is
/// only meaningful on `Up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub position: Point,
    pub velocity: Velocity,
}

impl TouchEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self {
            phase: TouchPhase::Down,
            position: Point::new(x, y),
            velocity: Velocity::default(),
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            phase: TouchPhase::Move,
            position: Point::new(x, y),
            velocity: Velocity::default(),
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            phase: TouchPhase::Up,
            position: Point::new(x, y),
            velocity: Velocity::default(),
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = Velocity::new(vx, vy);
        self
    }
}
