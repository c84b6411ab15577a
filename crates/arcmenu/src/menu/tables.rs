//! Hand-tuned design tables, indexed by mode and item count.
//!
//! Angles are degrees in screen space (y down, 270° is up). The 7 and 9 item
//! rings are deliberately not evenly offset.

use crate::config::Mode;
use crate::menu::ItemCount;

const RADIAL_ANCHORS: [&[f64]; 5] = [
    &[270.0],
    &[225.0, 315.0],
    &[210.0, 270.0, 330.0],
    &[202.5, 247.5, 292.5, 337.5],
    &[198.0, 234.0, 270.0, 306.0, 342.0],
];

const CIRCULAR_ANCHORS: [&[f64]; 10] = [
    &[270.0],
    &[0.0, 180.0],
    &[330.0, 90.0, 210.0],
    &[315.0, 45.0, 135.0, 225.0],
    &[306.0, 18.0, 90.0, 162.0, 234.0],
    &[300.0, 360.0, 60.0, 120.0, 180.0, 240.0],
    &[295.7, 347.1, 38.5, 89.9, 141.3, 192.7, 244.1],
    &[292.5, 337.5, 22.5, 67.5, 112.5, 157.5, 202.5, 247.5],
    &[290.0, 330.0, 10.0, 50.0, 90.0, 130.0, 170.0, 210.0, 250.0],
    &[288.0, 324.0, 360.0, 36.0, 72.0, 108.0, 144.0, 180.0, 216.0, 252.0],
];

/// Upper sector boundaries in the circular working range `[270, 630)`.
const CIRCULAR_SECTORS: [&[f64]; 10] = [
    &[],
    &[450.0],
    &[390.0, 510.0],
    &[360.0, 450.0, 540.0],
    &[342.0, 414.0, 486.0, 558.0],
    &[330.0, 390.0, 450.0, 510.0, 570.0],
    &[321.4, 372.8, 424.2, 475.6, 527.0, 578.4],
    &[315.0, 360.0, 405.0, 450.0, 495.0, 540.0, 585.0],
    &[310.0, 350.0, 390.0, 430.0, 470.0, 510.0, 550.0, 590.0],
    &[306.0, 342.0, 378.0, 414.0, 450.0, 486.0, 522.0, 558.0, 594.0],
];

const RADIAL_SECTORS: [&[f64]; 5] = [
    &[],
    &[270.0],
    &[240.0, 300.0],
    &[225.0, 270.0, 315.0],
    &[216.0, 252.0, 288.0, 324.0],
];

pub const CIRCULAR_SECTOR_BASE: f64 = 270.0;
pub const RADIAL_SECTOR_BASE: f64 = 180.0;

/// Whether this combination is placed statically and choreographed, as
/// opposed to living on the rotating ring.
pub fn is_static_layout(mode: Mode, count: ItemCount) -> bool {
    mode == Mode::Radial && count.get() <= RADIAL_ANCHORS.len()
}

/// Design angle of every index. Radial menus with more items than the
/// half-circle tables cover reuse the circular ring.
pub fn anchor_angles(mode: Mode, count: ItemCount) -> &'static [f64] {
    let n = count.get();
    if is_static_layout(mode, count) {
        RADIAL_ANCHORS[n - 1]
    } else {
        CIRCULAR_ANCHORS[n - 1]
    }
}

/// Index whose raw anchor is measured against the container corner when
/// pulling radial anchors toward the hinge. The four item layout pairs odd
/// items with the second anchor.
pub fn radial_distance_reference(count: ItemCount, index: usize) -> usize {
    if count.get() == 4 && index % 2 == 1 { 1 } else { 0 }
}

/// Vertical pull-in fraction divisor for radial anchors.
pub fn radial_vertical_divisor(count: ItemCount) -> f64 {
    match count.get() {
        1 => 3.0,
        n => n as f64,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorTable {
    pub base: f64,
    /// Exclusive upper bound of every sector but the last, which takes the
    /// rest of the circle.
    pub bounds: Vec<f64>,
}

impl SectorTable {
    pub fn for_layout(mode: Mode, count: ItemCount) -> Self {
        let n = count.get();
        match mode {
            Mode::Circular => Self {
                base: CIRCULAR_SECTOR_BASE,
                bounds: CIRCULAR_SECTORS[n - 1].to_vec(),
            },
            Mode::Radial if n <= RADIAL_SECTORS.len() => Self {
                base: RADIAL_SECTOR_BASE,
                bounds: RADIAL_SECTORS[n - 1].to_vec(),
            },
            Mode::Radial => {
                let step = 180.0 / n as f64;
                Self {
                    base: RADIAL_SECTOR_BASE,
                    bounds: (1..n).map(|i| RADIAL_SECTOR_BASE + step * i as f64).collect(),
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bounds.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Sector index of an angle already mapped into the working range.
    pub fn index_of(&self, degree: f64) -> usize {
        self.bounds
            .iter()
            .position(|&bound| degree < bound)
            .unwrap_or(self.bounds.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> impl Iterator<Item = ItemCount> {
        (1..=10).filter_map(|n| ItemCount::new(n).ok())
    }

    #[test]
    fn test_every_layout_has_one_angle_per_item() {
        for mode in [Mode::Radial, Mode::Circular] {
            for count in counts() {
                assert_eq!(anchor_angles(mode, count).len(), count.get());
                assert_eq!(SectorTable::for_layout(mode, count).len(), count.get());
            }
        }
    }

    #[test]
    fn test_sector_bounds_increase() {
        for mode in [Mode::Radial, Mode::Circular] {
            for count in counts() {
                let table = SectorTable::for_layout(mode, count);
                let mut prev = table.base;
                for &bound in &table.bounds {
                    assert!(bound > prev, "{mode} x{count}: {bound} <= {prev}");
                    prev = bound;
                }
            }
        }
    }

    #[test]
    fn test_circular_anchor_sits_in_its_own_sector() {
        for count in counts() {
            let table = SectorTable::for_layout(Mode::Circular, count);
            for (i, &angle) in anchor_angles(Mode::Circular, count).iter().enumerate() {
                let mut working = angle.rem_euclid(360.0);
                if working < CIRCULAR_SECTOR_BASE {
                    working += 360.0;
                }
                assert_eq!(table.index_of(working), i, "x{count} angle {angle}");
            }
        }
    }

    #[test]
    fn test_radial_anchor_sits_in_its_own_sector() {
        for count in counts().filter(|c| c.get() <= 5) {
            let table = SectorTable::for_layout(Mode::Radial, count);
            for (i, &angle) in anchor_angles(Mode::Radial, count).iter().enumerate() {
                assert_eq!(table.index_of(angle), i, "x{count} angle {angle}");
            }
        }
    }

    #[test]
    fn test_only_small_radial_layouts_are_static() {
        let five = ItemCount::new(5).unwrap();
        let six = ItemCount::new(6).unwrap();
        assert!(is_static_layout(Mode::Radial, five));
        assert!(!is_static_layout(Mode::Radial, six));
        assert!(!is_static_layout(Mode::Circular, five));
        assert_eq!(anchor_angles(Mode::Radial, six), anchor_angles(Mode::Circular, six));
    }
}
