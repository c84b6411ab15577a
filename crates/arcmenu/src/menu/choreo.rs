use super::{ITEM_DURATION, ItemSlot, STAGGER, WIPE_CONCEAL_CENTER_DELAY, WIPE_DURATION};
use crate::config::{AnimationType, Mode};
use crate::geometry::{Point, Size};
use crate::presenter::{Easing, TranslateSpec, WipeSpec};
use std::time::Duration;

/// Fly every item out of `origin` to its slot, one after another.
pub fn open_plan(slots: &[ItemSlot], origin: Point) -> Vec<TranslateSpec> {
    slots
        .iter()
        .map(|slot| translate(slot, origin, slot.position))
        .collect()
}

/// Mirror of [`open_plan`]: every item returns to `origin`.
pub fn close_plan(slots: &[ItemSlot], origin: Point) -> Vec<TranslateSpec> {
    slots
        .iter()
        .map(|slot| translate(slot, slot.position, origin))
        .collect()
}

fn translate(slot: &ItemSlot, from: Point, to: Point) -> TranslateSpec {
    TranslateSpec {
        item: slot.id,
        from,
        to,
        delay: STAGGER * slot.index as u32,
        duration: ITEM_DURATION,
        easing: Easing::Linear,
    }
}

/// Vertical position of the wipe centre: the hinge row for radial menus,
/// the middle row for circular ones.
fn wipe_row(mode: Mode, size: Size) -> f64 {
    match mode {
        Mode::Radial => size.height,
        Mode::Circular => (size.height / 2.0).floor(),
    }
}

fn wipe_geometry(animation: AnimationType, mode: Mode, size: Size) -> Option<(Point, f64)> {
    if !animation.is_wipe() {
        return None;
    }
    let row = wipe_row(mode, size);
    Some(match animation {
        AnimationType::FromLeft => (Point::new(0.0, row), size.width),
        AnimationType::FromRight => (Point::new(size.width, row), size.width),
        _ => {
            let (cx, cy) = ((size.width / 2.0).floor(), (size.height / 2.0).floor());
            (Point::new(cx, row), cx.hypot(cy))
        }
    })
}

/// Circular reveal of the container; `None` means show it immediately.
pub fn reveal(animation: AnimationType, mode: Mode, size: Size) -> Option<WipeSpec> {
    wipe_geometry(animation, mode, size).map(|(center, radius)| WipeSpec {
        center,
        from_radius: 0.0,
        to_radius: radius,
        delay: Duration::ZERO,
        duration: WIPE_DURATION,
    })
}

/// Mirrored wipe that hides the container; `None` means hide immediately.
pub fn conceal(animation: AnimationType, mode: Mode, size: Size) -> Option<WipeSpec> {
    // centre wipes wait for the items to fly home first
    let delay = match animation {
        AnimationType::FromCenter => WIPE_CONCEAL_CENTER_DELAY,
        _ => Duration::ZERO,
    };
    wipe_geometry(animation, mode, size).map(|(center, radius)| WipeSpec {
        center,
        from_radius: radius,
        to_radius: 0.0,
        delay,
        duration: WIPE_DURATION,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::ItemId;
    use strum::IntoEnumIterator;

    fn slots(n: usize) -> Vec<ItemSlot> {
        (0..n)
            .map(|i| ItemSlot {
                index: i,
                id: ItemId::from(10 + i as i32),
                anchor_angle: 0.0,
                position: Point::new(100.0 * i as f64, 50.0),
                size: Size::new(40.0, 40.0),
            })
            .collect()
    }

    #[test]
    fn test_open_is_staggered() {
        let plan = open_plan(&slots(5), Point::new(500.0, 500.0));
        assert_eq!(plan.len(), 5);
        for (i, spec) in plan.iter().enumerate() {
            assert_eq!(spec.delay, Duration::from_millis(100 * i as u64));
            assert_eq!(spec.duration, Duration::from_millis(700));
            assert_eq!(spec.from, Point::new(500.0, 500.0));
            assert_eq!(spec.to, Point::new(100.0 * i as f64, 50.0));
            assert_eq!(spec.easing, Easing::Linear);
        }
    }

    #[test]
    fn test_close_mirrors_open() {
        let slots = slots(3);
        let origin = Point::new(500.0, 500.0);
        let open = open_plan(&slots, origin);
        let close = close_plan(&slots, origin);
        for (o, c) in open.iter().zip(&close) {
            assert_eq!(o.from, c.to);
            assert_eq!(o.to, c.from);
            assert_eq!(o.delay, c.delay);
            assert_eq!(o.item, c.item);
        }
    }

    #[test]
    fn test_wipe_variants() {
        let size = Size::new(1000.0, 500.0);
        assert!(reveal(AnimationType::None, Mode::Radial, size).is_none());
        assert!(reveal(AnimationType::Disperse, Mode::Radial, size).is_none());

        let left = reveal(AnimationType::FromLeft, Mode::Radial, size).unwrap();
        assert_eq!(left.center, Point::new(0.0, 500.0));
        assert_eq!((left.from_radius, left.to_radius), (0.0, 1000.0));
        assert_eq!(left.duration, Duration::from_millis(500));

        let right = conceal(AnimationType::FromRight, Mode::Circular, size).unwrap();
        assert_eq!(right.center, Point::new(1000.0, 250.0));
        assert_eq!((right.from_radius, right.to_radius), (1000.0, 0.0));
        assert_eq!(right.delay, Duration::ZERO);

        let center = conceal(AnimationType::FromCenter, Mode::Radial, size).unwrap();
        assert_eq!(center.center, Point::new(500.0, 500.0));
        assert_eq!(center.from_radius, 500.0f64.hypot(250.0));
        assert_eq!(center.delay, Duration::from_millis(600));
    }

    #[test]
    fn test_only_wipe_types_build_wipes() {
        let size = Size::new(1000.0, 500.0);
        for animation in AnimationType::iter() {
            for mode in [Mode::Radial, Mode::Circular] {
                assert_eq!(reveal(animation, mode, size).is_some(), animation.is_wipe());
                assert_eq!(conceal(animation, mode, size).is_some(), animation.is_wipe());
            }
        }
    }
}
