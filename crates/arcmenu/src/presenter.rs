//! Ports between the menu core and its host.
//!
//! The host owns rendering, timing and haptics. The core tells it where items
//! go and which animations to run through [`Presenter`], and reports user
//! intent through [`MenuListener`]. Animations are identified by an
//! [`AnimationHandle`]; the host reports progress and completion back to the
//! menu on the same thread that delivers touch events.

use crate::error::MenuError;
use crate::geometry::{Point, Rect};
use crate::menu::ItemId;
use derive_more::{Display, From, Into};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("anim#{_0}")]
pub struct AnimationHandle(u64);

static NEXT_HANDLE: AtomicU64 = AtomicU64::new(1);

impl AnimationHandle {
    pub fn next() -> Self {
        Self(NEXT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Fast start, slow settle: `1 - (1 - t)^2`.
    Decelerate,
}

impl Easing {
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Moves one item's top-left corner from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TranslateSpec {
    pub item: ItemId,
    pub from: Point,
    pub to: Point,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
}

impl TranslateSpec {
    pub fn position_at(&self, t: f64) -> Point {
        let e = self.easing.apply(t);
        Point::new(
            self.from.x + (self.to.x - self.from.x) * e,
            self.from.y + (self.to.y - self.from.y) * e,
        )
    }
}

/// Drives the carousel rotation angle; the core receives progress and
/// re-lays out the ring itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateSpec {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub easing: Easing,
}

impl RotateSpec {
    pub fn angle_at(&self, t: f64) -> f64 {
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    Translate(TranslateSpec),
    Rotate(RotateSpec),
}

/// Circular clip of the whole container, growing or shrinking around
/// `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WipeSpec {
    pub center: Point,
    pub from_radius: f64,
    pub to_radius: f64,
    pub delay: Duration,
    pub duration: Duration,
}

impl WipeSpec {
    pub fn radius_at(&self, t: f64) -> f64 {
        self.from_radius + (self.to_radius - self.from_radius) * t.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticPulse {
    pub duration: Duration,
    pub amplitude: u8,
}

impl HapticPulse {
    pub const SELECTION: Self = Self {
        duration: Duration::from_millis(20),
        amplitude: 1,
    };
}

pub trait Presenter {
    fn place_item(&mut self, id: ItemId, rect: Rect);

    /// Starts an animation. The host must eventually call exactly one of
    /// `Menu::animation_finished` or `Menu::animation_cancelled` for it, and
    /// may call `Menu::animation_progress` with the linear time fraction in
    /// between.
    fn run_animation(&mut self, handle: AnimationHandle, animation: &Animation);

    fn run_wipe(&mut self, handle: AnimationHandle, wipe: &WipeSpec);

    /// Stops a running animation. The core has already forgotten the handle;
    /// a late cancellation notification for it is ignored.
    fn cancel_animation(&mut self, handle: AnimationHandle);

    fn set_visible(&mut self, visible: bool);

    fn vibrate(&mut self, pulse: HapticPulse);
}

pub trait MenuListener {
    fn on_item_click(&mut self, id: ItemId);

    fn on_rotation_finished(&mut self, id: ItemId);

    fn on_error(&mut self, error: &MenuError);
}

impl<T: Presenter + ?Sized> Presenter for &mut T {
    fn place_item(&mut self, id: ItemId, rect: Rect) {
        (**self).place_item(id, rect);
    }

    fn run_animation(&mut self, handle: AnimationHandle, animation: &Animation) {
        (**self).run_animation(handle, animation);
    }

    fn run_wipe(&mut self, handle: AnimationHandle, wipe: &WipeSpec) {
        (**self).run_wipe(handle, wipe);
    }

    fn cancel_animation(&mut self, handle: AnimationHandle) {
        (**self).cancel_animation(handle);
    }

    fn set_visible(&mut self, visible: bool) {
        (**self).set_visible(visible);
    }

    fn vibrate(&mut self, pulse: HapticPulse) {
        (**self).vibrate(pulse);
    }
}

impl<T: MenuListener + ?Sized> MenuListener for &mut T {
    fn on_item_click(&mut self, id: ItemId) {
        (**self).on_item_click(id);
    }

    fn on_rotation_finished(&mut self, id: ItemId) {
        (**self).on_rotation_finished(id);
    }

    fn on_error(&mut self, error: &MenuError) {
        (**self).on_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::Decelerate] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert_eq!(Easing::Decelerate.apply(0.5), 0.75);
    }

    #[test]
    fn test_rotation_interpolates_past_full_turn() {
        let spec = RotateSpec {
            from: 350.0,
            to: 380.0,
            duration: Duration::from_millis(300),
            easing: Easing::Linear,
        };
        assert_eq!(spec.angle_at(0.5), 365.0);
    }

    #[test]
    fn test_handles_are_unique() {
        let a = AnimationHandle::next();
        let b = AnimationHandle::next();
        assert_ne!(a, b);
    }
}
