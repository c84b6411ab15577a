use super::anchors::{Anchor, compute_anchors};
use super::carousel::{Carousel, Gesture};
use super::resolver::{Resolution, resolve};
use super::{MAX_ITEMS, choreo, tables};
use crate::config::MenuConfig;
use crate::error::MenuError;
use crate::events::{TouchEvent, TouchPhase};
use crate::geometry::{Point, Rect, Size};
use crate::presenter::{
    Animation, AnimationHandle, HapticPulse, MenuListener, Presenter, TranslateSpec,
};
use derive_more::{Deref, Display, From, Into};
use log::{debug, error};

/// Caller-assigned identifier of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into, Deref)]
pub struct ItemId(i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct ItemCount(usize);

impl ItemCount {
    pub fn new(count: usize) -> Result<Self, MenuError> {
        if (1..=MAX_ITEMS).contains(&count) {
            Ok(Self(count))
        } else {
            Err(MenuError::ItemCount(count))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for ItemCount {
    type Error = MenuError;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

/// An item as handed in by the caller. A missing id is a configuration
/// error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSpec {
    pub id: Option<ItemId>,
    pub size: Size,
}

impl ItemSpec {
    pub fn new(id: impl Into<ItemId>, size: Size) -> Self {
        Self {
            id: Some(id.into()),
            size,
        }
    }

    pub fn anonymous(size: Size) -> Self {
        Self { id: None, size }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSlot {
    pub index: usize,
    pub id: ItemId,
    pub anchor_angle: f64,
    /// Current top-left corner.
    pub position: Point,
    pub size: Size,
}

impl ItemSlot {
    pub fn rect(&self) -> Rect {
        Rect::from_origin(self.position, self.size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealing,
    Open,
    Closing,
    Dismissed,
}

/// Top-left corner that centres an item horizontally on its anchor.
fn resting_position(anchor: &Anchor, size: Size) -> Point {
    Point::new(anchor.point.x - size.width / 2.0, anchor.point.y)
}

pub struct Menu<P: Presenter, L: MenuListener> {
    config: MenuConfig,
    size: Size,
    count: ItemCount,
    slots: Vec<ItemSlot>,
    carousel: Option<Carousel>,
    visibility: Visibility,
    wipe: Option<AnimationHandle>,
    translations: Vec<AnimationHandle>,
    presenter: P,
    listener: L,
}

impl<P: Presenter, L: MenuListener> Menu<P, L> {
    pub fn new(
        items: Vec<ItemSpec>,
        config: MenuConfig,
        size: Size,
        presenter: P,
        mut listener: L,
    ) -> Result<Self, MenuError> {
        match Self::prepare(&items, &config, size) {
            Ok((count, slots, carousel)) => {
                debug!(
                    "Built {} menu with {count} items ({})",
                    config.mode,
                    if carousel.is_some() { "carousel" } else { "static" }
                );
                Ok(Self {
                    config,
                    size,
                    count,
                    slots,
                    carousel,
                    visibility: Visibility::Hidden,
                    wipe: None,
                    translations: Vec::new(),
                    presenter,
                    listener,
                })
            }
            Err(err) => {
                error!("Failed to build menu: {err}");
                listener.on_error(&err);
                Err(err)
            }
        }
    }

    #[allow(clippy::type_complexity)]
    fn prepare(
        items: &[ItemSpec],
        config: &MenuConfig,
        size: Size,
    ) -> Result<(ItemCount, Vec<ItemSlot>, Option<Carousel>), MenuError> {
        let count = ItemCount::new(items.len())?;
        let specs = items
            .iter()
            .enumerate()
            .map(|(i, item)| item.id.map(|id| (id, item.size)).ok_or(MenuError::MissingId(i)))
            .collect::<Result<Vec<_>, _>>()?;
        if config.speed == 0 {
            return Err(MenuError::InvalidSpeed(config.speed));
        }

        let anchors = compute_anchors(config.mode, count, size)?;
        let carousel = if tables::is_static_layout(config.mode, count) {
            None
        } else {
            Some(Carousel::new(specs.clone(), size, config)?)
        };

        let slots = specs
            .iter()
            .zip(&anchors)
            .enumerate()
            .map(|(index, (&(id, item_size), anchor))| ItemSlot {
                index,
                id,
                anchor_angle: anchor.angle,
                position: match &carousel {
                    Some(carousel) => carousel.slot_rect(index).origin(),
                    None => resting_position(anchor, item_size),
                },
                size: item_size,
            })
            .collect();

        Ok((count, slots, carousel))
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn count(&self) -> ItemCount {
        self.count
    }

    pub fn slots(&self) -> &[ItemSlot] {
        &self.slots
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    /// The item sitting on the intake of a carousel. Static menus have no
    /// selection between taps.
    pub fn selected_item(&self) -> Option<ItemId> {
        self.carousel.as_ref().map(Carousel::selected_id)
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn open(&mut self) {
        if !matches!(self.visibility, Visibility::Hidden | Visibility::Dismissed) {
            debug!("Ignoring open while {:?}", self.visibility);
            return;
        }
        self.presenter.set_visible(true);

        match &mut self.carousel {
            Some(carousel) => carousel.layout(&mut self.presenter),
            None => {
                for slot in &self.slots {
                    self.presenter.place_item(slot.id, slot.rect());
                }
                let plan = choreo::open_plan(&self.slots, self.size.hinge());
                self.run_translations(plan);
            }
        }
        self.sync_slots();

        match choreo::reveal(self.config.animation, self.config.mode, self.size) {
            Some(wipe) => {
                let handle = AnimationHandle::next();
                self.presenter.run_wipe(handle, &wipe);
                self.wipe = Some(handle);
                self.visibility = Visibility::Revealing;
            }
            None => self.visibility = Visibility::Open,
        }
    }

    pub fn close(&mut self) {
        if !matches!(self.visibility, Visibility::Revealing | Visibility::Open) {
            debug!("Ignoring close while {:?}", self.visibility);
            return;
        }
        if let Some(handle) = self.wipe.take() {
            self.presenter.cancel_animation(handle);
        }
        for handle in self.translations.drain(..) {
            self.presenter.cancel_animation(handle);
        }

        match &mut self.carousel {
            Some(carousel) => carousel.stop(&mut self.presenter),
            None => {
                let plan = choreo::close_plan(&self.slots, self.size.hinge());
                self.run_translations(plan);
            }
        }
        self.visibility = Visibility::Closing;

        match choreo::conceal(self.config.animation, self.config.mode, self.size) {
            Some(wipe) => {
                let handle = AnimationHandle::next();
                self.presenter.run_wipe(handle, &wipe);
                self.wipe = Some(handle);
            }
            None => self.presenter.set_visible(false),
        }
        self.settle_closing();
    }

    pub fn close_button_pressed(&mut self) {
        if !self.config.close_button_enabled {
            debug!("Close button is disabled");
            return;
        }
        if self.config.vibrate_on_select {
            self.presenter.vibrate(HapticPulse::SELECTION);
        }
        self.close();
    }

    pub fn touch(&mut self, event: TouchEvent) {
        if self.visibility != Visibility::Open {
            return;
        }

        match &mut self.carousel {
            Some(carousel) => {
                let gesture = carousel.touch(event, &mut self.presenter);
                self.sync_slots();
                match gesture {
                    Gesture::Click(index) => self.select(index),
                    Gesture::Outside => self.touched_outside(),
                    Gesture::None => {}
                }
            }
            None if event.phase == TouchPhase::Up => {
                match resolve(event.position, self.config.mode, self.count, self.size) {
                    Resolution::Selected(index) => self.select(index),
                    Resolution::Outside => self.touched_outside(),
                }
            }
            None => {}
        }
    }

    fn select(&mut self, index: usize) {
        let Some(slot) = self.slots.get(index) else {
            return;
        };
        if self.config.vibrate_on_select {
            self.presenter.vibrate(HapticPulse::SELECTION);
        }
        debug!("Item {} selected", slot.id);
        self.listener.on_item_click(slot.id);
    }

    fn touched_outside(&mut self) {
        if self.config.close_on_touch_outside {
            debug!("Touch outside the menu, closing");
            self.close();
        }
    }

    pub fn resize(&mut self, size: Size) -> Result<(), MenuError> {
        let anchors = compute_anchors(self.config.mode, self.count, size)?;
        if let Some(carousel) = &mut self.carousel {
            carousel.resize(size, &mut self.presenter)?;
        }
        self.size = size;

        let is_static = self.carousel.is_none();
        for (slot, anchor) in self.slots.iter_mut().zip(&anchors) {
            slot.anchor_angle = anchor.angle;
            if is_static {
                slot.position = resting_position(anchor, slot.size);
            }
        }
        self.sync_slots();

        if is_static && self.visibility == Visibility::Open {
            for slot in &self.slots {
                self.presenter.place_item(slot.id, slot.rect());
            }
        }
        Ok(())
    }

    pub fn set_speed(&mut self, speed: u32) -> Result<(), MenuError> {
        if let Some(carousel) = &mut self.carousel {
            carousel.set_speed(speed)?;
        } else if speed == 0 {
            return Err(MenuError::InvalidSpeed(speed));
        }
        self.config.speed = speed;
        Ok(())
    }

    pub fn set_radius(&mut self, radius: f64) -> Result<(), MenuError> {
        match &mut self.carousel {
            Some(carousel) => carousel.set_radius(radius),
            None if radius < 0.0 || !radius.is_finite() => Err(MenuError::InvalidRadius(radius)),
            None => Ok(()),
        }
    }

    pub fn animation_progress(&mut self, handle: AnimationHandle, t: f64) {
        if let Some(carousel) = &mut self.carousel {
            if carousel.progress(handle, t, &mut self.presenter) {
                self.sync_slots();
            }
        }
    }

    pub fn animation_finished(&mut self, handle: AnimationHandle) {
        if self.retire(handle) {
            return;
        }
        let Some(carousel) = &mut self.carousel else {
            return;
        };
        if let Some(index) = carousel.finish(handle, &mut self.presenter) {
            self.sync_slots();
            let id = self.slots[index].id;
            debug!("Rotation {handle} settled on item {id}");
            self.listener.on_rotation_finished(id);
        }
    }

    pub fn animation_cancelled(&mut self, handle: AnimationHandle) {
        if self.retire(handle) {
            return;
        }
        if let Some(carousel) = &mut self.carousel {
            carousel.cancelled(handle);
        }
    }

    /// Forgets a wipe or item translation and advances the visibility
    /// lifecycle. Returns false for handles this menu does not track.
    fn retire(&mut self, handle: AnimationHandle) -> bool {
        if self.wipe == Some(handle) {
            self.wipe = None;
            match self.visibility {
                Visibility::Revealing => self.visibility = Visibility::Open,
                Visibility::Closing => {
                    self.presenter.set_visible(false);
                    self.settle_closing();
                }
                _ => {}
            }
            return true;
        }

        if let Some(pos) = self.translations.iter().position(|h| *h == handle) {
            self.translations.swap_remove(pos);
            self.settle_closing();
            return true;
        }
        false
    }

    fn settle_closing(&mut self) {
        if self.visibility == Visibility::Closing
            && self.wipe.is_none()
            && self.translations.is_empty()
        {
            debug!("Menu dismissed");
            self.visibility = Visibility::Dismissed;
        }
    }

    fn run_translations(&mut self, plan: Vec<TranslateSpec>) {
        for spec in plan {
            let handle = AnimationHandle::next();
            self.presenter
                .run_animation(handle, &Animation::Translate(spec));
            self.translations.push(handle);
        }
    }

    fn sync_slots(&mut self) {
        if let Some(carousel) = &self.carousel {
            for slot in &mut self.slots {
                slot.position = carousel.slot_rect(slot.index).origin();
            }
        }
    }
}
