use super::resolver::pivot;
use super::{
    FLING_DURATION_BASE_MS, FLING_VELOCITY_DIVISOR, INTAKE_ANGLE, ItemId, MIN_ANIMATED_DELTA,
    SNAP_DURATION_BASE_MS,
};
use crate::config::{MenuConfig, Mode};
use crate::error::MenuError;
use crate::events::{TouchEvent, TouchPhase, Velocity};
use crate::geometry::{Point, Quadrant, Rect, Size, shortest_delta, wrap_degrees};
use crate::presenter::{Animation, AnimationHandle, Easing, Presenter, RotateSpec};
use log::{debug, warn};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    Snapping,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    /// Angle of slot 0, always in `[0, 360)`.
    pub rotation: f64,
    pub target: Option<f64>,
    pub phase: Phase,
    pub last_touch_angle: f64,
    pub selected: usize,
    pub quadrants_touched: [bool; 4],
    pub moved: bool,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            rotation: INTAKE_ANGLE,
            target: None,
            phase: Phase::Idle,
            last_touch_angle: 0.0,
            selected: 0,
            quadrants_touched: [false; 4],
            moved: false,
        }
    }
}

/// What a finished touch sequence asks the menu to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    None,
    Click(usize),
    /// Tap that missed every item and landed farther from the pivot than
    /// the container is tall.
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveRotation {
    handle: AnimationHandle,
    spec: RotateSpec,
}

/// Ring of items that can be dragged, flung and snapped so one of them sits
/// at the intake position at the top.
#[derive(Debug)]
pub struct Carousel {
    mode: Mode,
    size: Size,
    items: Vec<(ItemId, Size)>,
    speed: u32,
    /// Caller override; half the shorter container side otherwise.
    radius: Option<f64>,
    rotation_enabled: bool,
    touch_slop: f64,
    min_fling_velocity: f64,
    down_at: Point,
    state: CarouselState,
    active: Option<ActiveRotation>,
}

impl Carousel {
    pub fn new(
        items: Vec<(ItemId, Size)>,
        size: Size,
        config: &MenuConfig,
    ) -> Result<Self, MenuError> {
        if !size.is_valid() {
            return Err(MenuError::DegenerateGeometry("container has no area"));
        }
        if items.is_empty() {
            return Err(MenuError::ItemCount(0));
        }
        if config.speed == 0 {
            return Err(MenuError::InvalidSpeed(config.speed));
        }

        let mut carousel = Self {
            mode: config.mode,
            size,
            items,
            speed: config.speed,
            radius: None,
            rotation_enabled: config.rotation_enabled,
            touch_slop: config.touch_slop,
            min_fling_velocity: config.min_fling_velocity,
            down_at: Point::default(),
            state: CarouselState::default(),
            active: None,
        };
        carousel.state.selected = carousel.nearest_to_intake();
        Ok(carousel)
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn rotation(&self) -> f64 {
        self.state.rotation
    }

    pub fn selected(&self) -> usize {
        self.state.selected
    }

    pub fn selected_id(&self) -> ItemId {
        self.items[self.state.selected].0
    }

    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn radius(&self) -> f64 {
        self.radius
            .unwrap_or_else(|| self.size.width.min(self.size.height) / 2.0)
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn owns(&self, handle: AnimationHandle) -> bool {
        self.active.is_some_and(|active| active.handle == handle)
    }

    pub fn set_speed(&mut self, speed: u32) -> Result<(), MenuError> {
        if speed == 0 {
            warn!("Rejected carousel speed {speed}");
            return Err(MenuError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), MenuError> {
        if radius < 0.0 || !radius.is_finite() {
            warn!("Rejected carousel radius {radius}");
            return Err(MenuError::InvalidRadius(radius));
        }
        self.radius = Some(radius);
        Ok(())
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.rotation_enabled = enabled;
    }

    pub fn set_rotation<P: Presenter>(&mut self, degrees: f64, presenter: &mut P) {
        self.state.rotation = wrap_degrees(degrees);
        self.layout(presenter);
    }

    pub fn resize<P: Presenter>(&mut self, size: Size, presenter: &mut P) -> Result<(), MenuError> {
        if !size.is_valid() {
            return Err(MenuError::DegenerateGeometry("container has no area"));
        }
        self.size = size;
        self.layout(presenter);
        Ok(())
    }

    fn step(&self) -> f64 {
        360.0 / self.items.len() as f64
    }

    /// Current angle of slot `index`, in `[0, 360)`.
    pub fn slot_angle(&self, index: usize) -> f64 {
        wrap_degrees(self.state.rotation + self.step() * index as f64)
    }

    fn intake_distance(&self, index: usize) -> f64 {
        shortest_delta(self.slot_angle(index), INTAKE_ANGLE).abs()
    }

    fn nearest_to_intake(&self) -> usize {
        (0..self.items.len())
            .min_by(|&a, &b| self.intake_distance(a).total_cmp(&self.intake_distance(b)))
            .unwrap_or(0)
    }

    /// Pixels added below every item when a radial container hosts the ring.
    fn bottom_extension(&self) -> f64 {
        match (self.mode, self.items.len()) {
            (Mode::Radial, 9..=10) => (self.size.width / 2.5).floor(),
            (Mode::Radial, 6..=8) => (self.size.width / 1.7).floor(),
            _ => 0.0,
        }
    }

    pub fn slot_rect(&self, index: usize) -> Rect {
        let (w, h) = (self.size.width, self.size.height);
        let item = self.items[index].1;
        let a = self.slot_angle(index).to_radians();
        let left = round_half_up(w / 2.5 - item.width / 3.0 + w / 2.5 * a.cos());
        let top = round_half_up(h / 2.5 - item.height / 3.0 + w / 2.5 * a.sin());
        let err = (w / 11.0).floor();
        Rect::new(
            left + err,
            top + err,
            left + item.width + err,
            top + item.height + err + self.bottom_extension(),
        )
    }

    pub fn rects(&self) -> Vec<Rect> {
        (0..self.items.len()).map(|i| self.slot_rect(i)).collect()
    }

    /// Recomputes the selection and pushes every item rect to the presenter.
    pub fn layout<P: Presenter>(&mut self, presenter: &mut P) {
        self.update_selection();
        for (i, (id, _)) in self.items.iter().enumerate() {
            presenter.place_item(*id, self.slot_rect(i));
        }
    }

    fn update_selection(&mut self) {
        let nearest = self.nearest_to_intake();
        // on a tie the current selection stays
        if self.intake_distance(nearest) < self.intake_distance(self.state.selected) {
            self.state.selected = nearest;
        }
    }

    /// Offset from the container centre with y pointing up.
    fn gesture_offset(&self, p: Point) -> (f64, f64) {
        let (w, h) = (self.size.width, self.size.height);
        (p.x - w / 2.0, h - p.y - h / 2.0)
    }

    fn quadrant_of(&self, p: Point) -> Quadrant {
        let (x, y) = self.gesture_offset(p);
        Quadrant::of(x, y)
    }

    /// Touch angle in the mathematical convention, `[0, 360]`.
    pub fn gesture_angle(&self, p: Point) -> f64 {
        let (x, y) = self.gesture_offset(p);
        let hypot = x.hypot(y);
        if hypot == 0.0 {
            return 0.0;
        }
        let theta = (y / hypot).asin().to_degrees();
        match Quadrant::of(x, y) {
            Quadrant::First => theta,
            Quadrant::Second | Quadrant::Third => 180.0 - theta,
            Quadrant::Fourth => 360.0 + theta,
        }
    }

    pub fn touch<P: Presenter>(&mut self, event: TouchEvent, presenter: &mut P) -> Gesture {
        let p = event.position;
        let gesture = match event.phase {
            TouchPhase::Down => {
                self.state.quadrants_touched = [false; 4];
                self.stop(presenter);
                self.down_at = p;
                self.state.last_touch_angle = self.gesture_angle(p);
                self.state.moved = false;
                self.state.phase = Phase::Dragging;
                Gesture::None
            }
            TouchPhase::Move => {
                self.drag(p, presenter);
                Gesture::None
            }
            TouchPhase::Up => self.release(p, event.velocity, presenter),
        };
        self.state.quadrants_touched[self.quadrant_of(p).as_index()] = true;
        gesture
    }

    fn drag<P: Presenter>(&mut self, p: Point, presenter: &mut P) {
        if self.state.phase != Phase::Dragging {
            return;
        }
        if !self.state.moved {
            if self.down_at.distance(p) <= self.touch_slop {
                return;
            }
            self.state.moved = true;
        }
        if !self.rotation_enabled {
            return;
        }

        let current = self.gesture_angle(p);
        let delta = self.state.last_touch_angle - current;
        self.state.last_touch_angle = current;
        self.set_rotation(self.state.rotation + delta, presenter);
    }

    fn release<P: Presenter>(&mut self, p: Point, velocity: Velocity, presenter: &mut P) -> Gesture {
        let dragged = self.state.moved;
        self.state.phase = Phase::Idle;

        if !dragged {
            return self.tap(p, presenter);
        }
        if self.rotation_enabled {
            if velocity.dominant() >= self.min_fling_velocity {
                self.fling(p, velocity, presenter);
            } else {
                self.snap_to_intake(self.state.selected, presenter);
            }
        }
        Gesture::None
    }

    fn tap<P: Presenter>(&mut self, p: Point, presenter: &mut P) -> Gesture {
        let Some(hit) = (0..self.items.len()).find(|&i| self.slot_rect(i).contains(p)) else {
            return if pivot(self.mode, self.size).distance(p) > self.size.height {
                Gesture::Outside
            } else {
                Gesture::None
            };
        };

        if hit != self.state.selected {
            self.snap_to_intake(hit, presenter);
        }
        Gesture::Click(hit)
    }

    /// Whether a fling between these quadrants turns the ring against the
    /// raw velocity sum.
    fn fling_inverted(&self, from: Quadrant, to: Quadrant, velocity: Velocity) -> bool {
        use Quadrant::*;
        let third_touched = self.state.quadrants_touched[Third.as_index()];
        let (vx, vy) = (velocity.x.abs(), velocity.y.abs());
        match (from, to) {
            (Second, Second) => vx < vy,
            (Fourth, Fourth) => vx > vy,
            (Third, Third) | (First, Third) => true,
            (Second, Third) | (Third, Second) | (Third, Fourth) | (Fourth, Third) => true,
            (Second, Fourth) | (Fourth, Second) => third_touched,
            _ => false,
        }
    }

    fn fling<P: Presenter>(&mut self, p: Point, velocity: Velocity, presenter: &mut P) {
        let from = self.quadrant_of(self.down_at);
        let to = self.quadrant_of(p);
        let push = (velocity.x + velocity.y) / FLING_VELOCITY_DIVISOR;
        let raw = if self.fling_inverted(from, to, velocity) {
            self.state.rotation - push
        } else {
            self.state.rotation + push
        };
        debug!(
            "Fling from Q{} to Q{} at ({:.0}, {:.0}) px/s",
            from.number(),
            to.number(),
            velocity.x,
            velocity.y
        );
        let duration = Duration::from_millis(FLING_DURATION_BASE_MS / u64::from(self.speed));
        self.animate_to(self.centred(raw), duration, presenter);
    }

    /// Nearest rotation that puts some slot exactly on the intake.
    pub fn centred(&self, rotation: f64) -> f64 {
        let step = self.step();
        let offset = (rotation - INTAKE_ANGLE).rem_euclid(step);
        if offset > step / 2.0 {
            rotation + (step - offset)
        } else {
            rotation - offset
        }
    }

    /// Turns the ring the short way round until slot `index` sits on the
    /// intake. Does nothing while rotation is disabled.
    pub fn snap_to_intake<P: Presenter>(&mut self, index: usize, presenter: &mut P) -> bool {
        if !self.rotation_enabled || index >= self.items.len() {
            return false;
        }
        let delta = shortest_delta(self.slot_angle(index), INTAKE_ANGLE);
        let duration = Duration::from_millis(SNAP_DURATION_BASE_MS / u64::from(self.speed));
        self.animate_to(self.state.rotation + delta, duration, presenter)
    }

    fn animate_to<P: Presenter>(&mut self, target: f64, duration: Duration, presenter: &mut P) -> bool {
        self.stop(presenter);
        if (target - self.state.rotation).abs() < MIN_ANIMATED_DELTA {
            return false;
        }

        let spec = RotateSpec {
            from: self.state.rotation,
            to: target,
            duration,
            easing: Easing::Decelerate,
        };
        let handle = AnimationHandle::next();
        debug!(
            "Rotating {:.1} -> {:.1} over {}ms ({handle})",
            spec.from,
            spec.to,
            duration.as_millis()
        );
        self.active = Some(ActiveRotation { handle, spec });
        self.state.target = Some(target);
        self.state.phase = Phase::Snapping;
        presenter.run_animation(handle, &Animation::Rotate(spec));
        true
    }

    /// Cancels the running rotation, if any. Its completion is never
    /// reported.
    pub fn stop<P: Presenter>(&mut self, presenter: &mut P) {
        if let Some(active) = self.active.take() {
            debug!("Cancelling rotation {}", active.handle);
            presenter.cancel_animation(active.handle);
            self.state.target = None;
            if self.state.phase == Phase::Snapping {
                self.state.phase = Phase::Idle;
            }
        }
    }

    pub fn progress<P: Presenter>(&mut self, handle: AnimationHandle, t: f64, presenter: &mut P) -> bool {
        let Some(active) = self.active.filter(|active| active.handle == handle) else {
            return false;
        };
        self.set_rotation(active.spec.angle_at(t), presenter);
        true
    }

    /// Completes the running rotation and returns the slot now selected, or
    /// `None` when `handle` is not the current rotation.
    pub fn finish<P: Presenter>(&mut self, handle: AnimationHandle, presenter: &mut P) -> Option<usize> {
        let active = self.active.filter(|active| active.handle == handle)?;
        self.active = None;
        self.state.target = None;
        self.state.phase = Phase::Idle;
        self.set_rotation(active.spec.to, presenter);
        Some(self.state.selected)
    }

    pub fn cancelled(&mut self, handle: AnimationHandle) -> bool {
        if !self.owns(handle) {
            return false;
        }
        self.active = None;
        self.state.target = None;
        self.state.phase = Phase::Idle;
        true
    }
}

fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}
