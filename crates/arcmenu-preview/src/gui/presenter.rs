use arcmenu::geometry::{Point, Rect, Size};
use arcmenu::presenter::{
    Animation, AnimationHandle, HapticPulse, MenuListener, Presenter, RotateSpec, TranslateSpec,
    WipeSpec,
};
use arcmenu::{ItemId, MenuError, Mode};
use gdk4::prelude::DisplayExt;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::theme::Palette;

#[derive(Debug, Clone, Copy)]
pub struct Running<T> {
    pub spec: T,
    pub started: Instant,
}

impl<T> Running<T> {
    fn new(spec: T) -> Self {
        Self {
            spec,
            started: Instant::now(),
        }
    }

    /// Linear time fraction after `delay`, clamped to `[0, 1]`.
    fn fraction(&self, now: Instant, delay: Duration, duration: Duration) -> f64 {
        let elapsed = now.saturating_duration_since(self.started);
        let Some(active) = elapsed.checked_sub(delay) else {
            return 0.0;
        };
        if duration.is_zero() {
            return 1.0;
        }
        (active.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }
}

impl Running<TranslateSpec> {
    pub fn at(&self, now: Instant) -> f64 {
        self.fraction(now, self.spec.delay, self.spec.duration)
    }
}

impl Running<RotateSpec> {
    pub fn at(&self, now: Instant) -> f64 {
        self.fraction(now, Duration::ZERO, self.spec.duration)
    }
}

impl Running<WipeSpec> {
    pub fn at(&self, now: Instant) -> f64 {
        self.fraction(now, self.spec.delay, self.spec.duration)
    }
}

/// Everything the draw function needs, shared between the presenter, the
/// listener and the drawing area.
#[derive(Debug)]
pub struct Scene {
    pub visible: bool,
    pub mode: Mode,
    pub size: Size,
    pub palette: Palette,
    pub skeleton: bool,
    pub separators: bool,
    pub close_button: bool,
    pub items: BTreeMap<ItemId, Rect>,
    pub translations: HashMap<AnimationHandle, Running<TranslateSpec>>,
    pub rotations: HashMap<AnimationHandle, Running<RotateSpec>>,
    pub wipe: Option<(AnimationHandle, Running<WipeSpec>)>,
    pub selected: Option<ItemId>,
    pub last_click: Option<ItemId>,
    pub ring_radius: Option<f64>,
}

impl Scene {
    pub fn new(mode: Mode, size: Size, palette: Palette) -> Self {
        Self {
            visible: false,
            mode,
            size,
            palette,
            skeleton: false,
            separators: false,
            close_button: true,
            items: BTreeMap::new(),
            translations: HashMap::new(),
            rotations: HashMap::new(),
            wipe: None,
            selected: None,
            last_click: None,
            ring_radius: None,
        }
    }

    /// Drops everything a previous menu left behind.
    pub fn reset(&mut self, mode: Mode, size: Size) {
        self.visible = false;
        self.mode = mode;
        self.size = size;
        self.items.clear();
        self.translations.clear();
        self.rotations.clear();
        self.wipe = None;
        self.selected = None;
        self.ring_radius = None;
    }

    pub fn is_animating(&self) -> bool {
        !self.translations.is_empty() || !self.rotations.is_empty() || self.wipe.is_some()
    }

    /// Rotation progress to report, and every animation whose time is up.
    pub fn due(&self, now: Instant) -> (Vec<(AnimationHandle, f64)>, Vec<AnimationHandle>) {
        let mut progress = Vec::new();
        let mut done = Vec::new();

        for (handle, running) in &self.rotations {
            match running.at(now) {
                t if t >= 1.0 => done.push(*handle),
                t => progress.push((*handle, t)),
            }
        }
        for (handle, running) in &self.translations {
            if running.at(now) >= 1.0 {
                done.push(*handle);
            }
        }
        if let Some((handle, running)) = &self.wipe
            && running.at(now) >= 1.0
        {
            done.push(*handle);
        }
        (progress, done)
    }

    pub fn forget(&mut self, handle: AnimationHandle) {
        self.translations.remove(&handle);
        self.rotations.remove(&handle);
        if self.wipe.as_ref().is_some_and(|(h, _)| *h == handle) {
            self.wipe = None;
        }
    }

    /// Forgets a finished animation, leaving a translated item where its
    /// flight ended.
    pub fn complete(&mut self, handle: AnimationHandle) {
        if let Some(running) = self.translations.remove(&handle)
            && let Some(rect) = self.items.get_mut(&running.spec.item)
        {
            *rect = Rect::from_origin(running.spec.to, Size::new(rect.width(), rect.height()));
        }
        self.forget(handle);
    }

    /// Where an item is drawn right now: mid-flight for translated items,
    /// at its placed rect otherwise.
    pub fn item_rect(&self, id: ItemId, now: Instant) -> Option<Rect> {
        let placed = self.items.get(&id).copied();
        let flight = self
            .translations
            .values()
            .find(|running| running.spec.item == id);
        match (flight, placed) {
            (Some(running), Some(rect)) => {
                let origin: Point = running.spec.position_at(running.at(now));
                Some(Rect::from_origin(origin, Size::new(rect.width(), rect.height())))
            }
            (_, placed) => placed,
        }
    }

    pub fn wipe_radius(&self, now: Instant) -> Option<(Point, f64)> {
        self.wipe
            .as_ref()
            .map(|(_, running)| (running.spec.center, running.spec.radius_at(running.at(now))))
    }
}

pub type SharedScene = Rc<RefCell<Scene>>;

pub struct GtkPresenter {
    scene: SharedScene,
}

impl GtkPresenter {
    pub fn new(scene: SharedScene) -> Self {
        Self { scene }
    }
}

impl Presenter for GtkPresenter {
    fn place_item(&mut self, id: ItemId, rect: Rect) {
        self.scene.borrow_mut().items.insert(id, rect);
    }

    fn run_animation(&mut self, handle: AnimationHandle, animation: &Animation) {
        let mut scene = self.scene.borrow_mut();
        match animation {
            Animation::Translate(spec) => {
                scene.translations.insert(handle, Running::new(*spec));
            }
            Animation::Rotate(spec) => {
                scene.rotations.insert(handle, Running::new(*spec));
            }
        }
    }

    fn run_wipe(&mut self, handle: AnimationHandle, wipe: &WipeSpec) {
        self.scene.borrow_mut().wipe = Some((handle, Running::new(*wipe)));
    }

    fn cancel_animation(&mut self, handle: AnimationHandle) {
        self.scene.borrow_mut().forget(handle);
    }

    fn set_visible(&mut self, visible: bool) {
        self.scene.borrow_mut().visible = visible;
    }

    fn vibrate(&mut self, pulse: HapticPulse) {
        // no haptics on the desktop, the display bell stands in
        log::debug!("Haptic pulse {:?}", pulse.duration);
        if let Some(display) = gdk4::Display::default() {
            display.beep();
        }
    }
}

pub struct PreviewListener {
    scene: SharedScene,
}

impl PreviewListener {
    pub fn new(scene: SharedScene) -> Self {
        Self { scene }
    }
}

impl MenuListener for PreviewListener {
    fn on_item_click(&mut self, id: ItemId) {
        log::info!("Item {id} clicked");
        self.scene.borrow_mut().last_click = Some(id);
    }

    fn on_rotation_finished(&mut self, id: ItemId) {
        log::info!("Rotation finished on item {id}");
    }

    fn on_error(&mut self, error: &MenuError) {
        log::error!("Menu error: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcmenu::presenter::Easing;

    fn scene() -> Scene {
        Scene::new(Mode::Circular, Size::new(400.0, 400.0), Palette::default())
    }

    #[test]
    fn test_fraction_respects_delay() {
        let running = Running::new(WipeSpec {
            center: Point::default(),
            from_radius: 0.0,
            to_radius: 100.0,
            delay: Duration::from_millis(600),
            duration: Duration::from_millis(500),
        });
        let start = running.started;
        assert_eq!(running.at(start + Duration::from_millis(300)), 0.0);
        assert!((running.at(start + Duration::from_millis(850)) - 0.5).abs() < 1e-9);
        assert_eq!(running.at(start + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_due_splits_progress_and_done() {
        let shared = Rc::new(RefCell::new(scene()));
        let rotation = AnimationHandle::next();
        let translation = AnimationHandle::next();
        let mut presenter = GtkPresenter::new(shared.clone());
        presenter.run_animation(
            rotation,
            &Animation::Rotate(RotateSpec {
                from: 0.0,
                to: 90.0,
                duration: Duration::from_millis(300),
                easing: Easing::Decelerate,
            }),
        );
        presenter.run_animation(
            translation,
            &Animation::Translate(TranslateSpec {
                item: ItemId::from(1),
                from: Point::default(),
                to: Point::new(10.0, 10.0),
                delay: Duration::ZERO,
                duration: Duration::from_millis(100),
                easing: Easing::Linear,
            }),
        );
        let now = Instant::now() + Duration::from_millis(200);
        let (progress, done) = shared.borrow().due(now);
        assert_eq!(progress.len(), 1);
        assert_eq!(progress[0].0, rotation);
        assert_eq!(done, vec![translation]);

        presenter.cancel_animation(translation);
        assert!(shared.borrow().translations.is_empty());
        assert!(shared.borrow().is_animating());
    }

    #[test]
    fn test_item_rect_follows_translation() {
        let shared = Rc::new(RefCell::new(scene()));
        let mut presenter = GtkPresenter::new(shared.clone());
        let id = ItemId::from(7);
        presenter.place_item(id, Rect::new(100.0, 100.0, 140.0, 140.0));
        assert_eq!(
            shared.borrow().item_rect(id, Instant::now()),
            Some(Rect::new(100.0, 100.0, 140.0, 140.0))
        );

        presenter.run_animation(
            AnimationHandle::next(),
            &Animation::Translate(TranslateSpec {
                item: id,
                from: Point::new(0.0, 0.0),
                to: Point::new(100.0, 100.0),
                delay: Duration::from_secs(60),
                duration: Duration::from_millis(700),
                easing: Easing::Linear,
            }),
        );
        // still waiting for its stagger delay
        let rect = shared.borrow().item_rect(id, Instant::now()).unwrap();
        assert_eq!(rect.origin(), Point::new(0.0, 0.0));
        assert_eq!(rect.width(), 40.0);
    }

    #[test]
    fn test_completed_translation_rests_at_destination() {
        let shared = Rc::new(RefCell::new(scene()));
        let mut presenter = GtkPresenter::new(shared.clone());
        let id = ItemId::from(3);
        let handle = AnimationHandle::next();
        presenter.place_item(id, Rect::new(10.0, 10.0, 50.0, 50.0));
        presenter.run_animation(
            handle,
            &Animation::Translate(TranslateSpec {
                item: id,
                from: Point::new(10.0, 10.0),
                to: Point::new(180.0, 360.0),
                delay: Duration::ZERO,
                duration: Duration::from_millis(700),
                easing: Easing::Linear,
            }),
        );

        shared.borrow_mut().complete(handle);
        let scene = shared.borrow();
        assert!(!scene.is_animating());
        assert_eq!(scene.items[&id], Rect::new(180.0, 360.0, 220.0, 400.0));
    }
}
