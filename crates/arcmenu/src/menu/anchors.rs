use super::tables::{self, anchor_angles};
use super::ItemCount;
use crate::config::Mode;
use crate::error::MenuError;
use crate::geometry::{Point, Size};

/// Static design position of one item index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub angle: f64,
    pub point: Point,
}

pub fn compute_anchors(
    mode: Mode,
    count: ItemCount,
    size: Size,
) -> Result<Vec<Anchor>, MenuError> {
    if !size.is_valid() {
        return Err(MenuError::DegenerateGeometry("container has no area"));
    }

    if tables::is_static_layout(mode, count) {
        radial_anchors(count, size)
    } else {
        circular_anchors(count, size)
    }
}

/// Anchors on the upper half circle around the bottom-centre hinge, each
/// pulled toward the hinge so icons clear the rim.
fn radial_anchors(count: ItemCount, size: Size) -> Result<Vec<Anchor>, MenuError> {
    let half_width = (size.width / 2.0).floor();
    let hinge = Point::new(half_width, size.height);
    let corner = Point::new(size.width, size.height);
    let pull_x = (size.width / 5.0).floor();
    let pull_y = (size.height / tables::radial_vertical_divisor(count)).floor();

    let angles = anchor_angles(Mode::Radial, count);
    let raw: Vec<Point> = angles
        .iter()
        .map(|&angle| hinge.on_circle(half_width, angle))
        .collect();

    angles
        .iter()
        .zip(&raw)
        .enumerate()
        .map(|(i, (&angle, &p))| {
            let reference = raw[tables::radial_distance_reference(count, i)];
            let d = nonzero(reference.distance(corner))?;
            let point = Point::new(
                p.x - pull_x * (p.x - hinge.x) / d,
                p.y - pull_y * (p.y - hinge.y) / d,
            );
            Ok(Anchor { angle, point })
        })
        .collect()
}

/// Anchors on a ring of radius `width / 3` around the container centre.
fn circular_anchors(count: ItemCount, size: Size) -> Result<Vec<Anchor>, MenuError> {
    let center = Point::new((size.width / 2.0).floor(), (size.height / 2.0).floor());
    let rim = (size.width / 2.0).floor();

    let angles = anchor_angles(Mode::Circular, count);
    let first = center.on_circle(rim, angles[0]);
    let d = nonzero(first.distance(center))?;

    Ok(angles
        .iter()
        .map(|&angle| {
            let p = center.on_circle(rim, angle);
            let point = Point::new(
                center.x + (p.x - center.x) / d * size.width / 3.0,
                center.y + (p.y - center.y) / d * size.width / 3.0,
            );
            Anchor { angle, point }
        })
        .collect())
}

fn nonzero(d: f64) -> Result<f64, MenuError> {
    if d == 0.0 || !d.is_finite() {
        Err(MenuError::DegenerateGeometry("coincident points in anchor correction"))
    } else {
        Ok(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn count(n: usize) -> ItemCount {
        ItemCount::new(n).unwrap()
    }

    fn native_size(mode: Mode) -> Size {
        Size::for_mode(mode, 1080.0)
    }

    #[test]
    fn test_anchor_count_matches_items() {
        for mode in [Mode::Radial, Mode::Circular] {
            for n in 1..=10 {
                let anchors = compute_anchors(mode, count(n), native_size(mode)).unwrap();
                assert_eq!(anchors.len(), n);
            }
        }
    }

    #[test]
    fn test_anchors_never_coincide() {
        for mode in [Mode::Radial, Mode::Circular] {
            for n in 1..=10 {
                let anchors = compute_anchors(mode, count(n), native_size(mode)).unwrap();
                for (i, a) in anchors.iter().enumerate() {
                    for b in &anchors[i + 1..] {
                        assert!(a.point.distance(b.point) > 1.0, "{mode} x{n}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_anchors_stay_inside_native_containers() {
        for n in 1..=10 {
            let size = native_size(Mode::Circular);
            for anchor in compute_anchors(Mode::Circular, count(n), size).unwrap() {
                assert!(size.contains(anchor.point), "circular x{n}: {anchor:?}");
            }
        }
        for n in 1..=5 {
            let size = native_size(Mode::Radial);
            for anchor in compute_anchors(Mode::Radial, count(n), size).unwrap() {
                assert!(size.contains(anchor.point), "radial x{n}: {anchor:?}");
            }
        }
    }

    #[test]
    fn test_circular_ring_radius_is_a_third_of_width() {
        let size = Size::new(900.0, 900.0);
        for anchor in compute_anchors(Mode::Circular, count(8), size).unwrap() {
            assert!((anchor.point.distance(size.center()) - 300.0).abs() < EPS);
        }
    }

    #[test]
    fn test_radial_top_item_pulled_toward_hinge() {
        // 1080 x 540: top raw point is (540, 0), the reference distance is
        // measured from the 198° raw point, vertical pull is 540 / 5 = 108.
        let anchors = compute_anchors(Mode::Radial, count(5), Size::new(1080.0, 540.0)).unwrap();
        let top = anchors[2];
        assert_eq!(top.angle, 270.0);
        let d = Point::new(540.0, 540.0)
            .on_circle(540.0, 198.0)
            .distance(Point::new(1080.0, 540.0));
        assert!((top.point.x - 540.0).abs() < 1e-6);
        assert!((top.point.y - 108.0 * 540.0 / d).abs() < 1e-6);
    }

    #[test]
    fn test_single_radial_item_uses_third_height_pull() {
        let size = Size::new(1080.0, 540.0);
        let anchor = compute_anchors(Mode::Radial, count(1), size).unwrap()[0];
        let d = 540.0f64.hypot(540.0);
        assert!((anchor.point.y - 180.0 * 540.0 / d).abs() < 1e-6);
    }

    #[test]
    fn test_four_item_radial_alternates_reference() {
        let size = Size::new(1000.0, 500.0);
        let anchors = compute_anchors(Mode::Radial, count(4), size).unwrap();
        let hinge = Point::new(500.0, 500.0);
        let corner = Point::new(1000.0, 500.0);
        let raw1 = hinge.on_circle(500.0, 247.5);
        let d2 = raw1.distance(corner);
        let expected_x = raw1.x - 200.0 * (raw1.x - 500.0) / d2;
        assert!((anchors[1].point.x - expected_x).abs() < EPS);
    }

    #[test]
    fn test_degenerate_container_is_rejected() {
        let err = compute_anchors(Mode::Circular, count(3), Size::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, MenuError::DegenerateGeometry(_)));
        let err = compute_anchors(Mode::Radial, count(3), Size::new(0.0, 10.0)).unwrap_err();
        assert!(matches!(err, MenuError::DegenerateGeometry(_)));
    }

    #[test]
    fn test_large_radial_layouts_reuse_the_ring() {
        let size = Size::new(1080.0, 540.0);
        let radial = compute_anchors(Mode::Radial, count(8), size).unwrap();
        let circular = compute_anchors(Mode::Circular, count(8), size).unwrap();
        assert_eq!(radial, circular);
    }
}
