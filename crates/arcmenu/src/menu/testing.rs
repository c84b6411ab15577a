use super::ItemId;
use crate::error::MenuError;
use crate::geometry::Rect;
use crate::presenter::{Animation, AnimationHandle, HapticPulse, MenuListener, Presenter, WipeSpec};

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub placed: Vec<(ItemId, Rect)>,
    pub animations: Vec<(AnimationHandle, Animation)>,
    pub wipes: Vec<(AnimationHandle, WipeSpec)>,
    pub cancelled: Vec<AnimationHandle>,
    pub visible: Vec<bool>,
    pub pulses: Vec<HapticPulse>,
}

impl RecordingPresenter {
    pub fn last_wipe(&self) -> Option<AnimationHandle> {
        self.wipes.last().map(|(handle, _)| *handle)
    }

    pub fn translations(&self) -> Vec<AnimationHandle> {
        self.animations
            .iter()
            .filter(|(_, animation)| matches!(animation, Animation::Translate(_)))
            .map(|(handle, _)| *handle)
            .collect()
    }

    pub fn rotations(&self) -> Vec<AnimationHandle> {
        self.animations
            .iter()
            .filter(|(_, animation)| matches!(animation, Animation::Rotate(_)))
            .map(|(handle, _)| *handle)
            .collect()
    }
}

impl Presenter for RecordingPresenter {
    fn place_item(&mut self, id: ItemId, rect: Rect) {
        self.placed.push((id, rect));
    }

    fn run_animation(&mut self, handle: AnimationHandle, animation: &Animation) {
        self.animations.push((handle, *animation));
    }

    fn run_wipe(&mut self, handle: AnimationHandle, wipe: &WipeSpec) {
        self.wipes.push((handle, *wipe));
    }

    fn cancel_animation(&mut self, handle: AnimationHandle) {
        self.cancelled.push(handle);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible.push(visible);
    }

    fn vibrate(&mut self, pulse: HapticPulse) {
        self.pulses.push(pulse);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Click(ItemId),
    RotationFinished(ItemId),
    Error(MenuError),
}

#[derive(Debug, Default)]
pub struct RecordingListener {
    pub events: Vec<Notification>,
}

impl RecordingListener {
    pub fn clicks(&self) -> Vec<ItemId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Notification::Click(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl MenuListener for RecordingListener {
    fn on_item_click(&mut self, id: ItemId) {
        self.events.push(Notification::Click(id));
    }

    fn on_rotation_finished(&mut self, id: ItemId) {
        self.events.push(Notification::RotationFinished(id));
    }

    fn on_error(&mut self, error: &MenuError) {
        self.events.push(Notification::Error(error.clone()));
    }
}
