use super::ItemCount;
use super::tables::{CIRCULAR_SECTOR_BASE, SectorTable};
use crate::config::Mode;
use crate::geometry::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Selected(usize),
    Outside,
}

/// Centre the touch angle is measured from.
pub fn pivot(mode: Mode, size: Size) -> Point {
    match mode {
        Mode::Radial => size.hinge(),
        Mode::Circular => size.center(),
    }
}

/// Maps an atan2 angle in `(-180, 180]` into the range the sector tables
/// are written in.
pub fn working_angle(mode: Mode, degrees: f64) -> f64 {
    let working = degrees + 360.0;
    match mode {
        Mode::Radial => working,
        Mode::Circular if working > 180.0 && working < CIRCULAR_SECTOR_BASE => working + 360.0,
        Mode::Circular => working,
    }
}

pub fn resolve(point: Point, mode: Mode, count: ItemCount, size: Size) -> Resolution {
    let pivot = pivot(mode, size);
    let (dx, dy) = (point.x - pivot.x, point.y - pivot.y);
    if dx.hypot(dy) > size.height {
        return Resolution::Outside;
    }

    let degrees = dy.atan2(dx).to_degrees();
    let table = SectorTable::for_layout(mode, count);
    Resolution::Selected(table.index_of(working_angle(mode, degrees)))
}
