use super::presenter::Scene;
use arcmenu::geometry::{Point, Rect, wrap_degrees};
use arcmenu::menu::resolver::pivot;
use arcmenu::Mode;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;
use std::time::Instant;

/// Close disc radius as a fraction of the container width.
const CLOSE_RADIUS_CIRCULAR: f64 = 1.0 / 9.9;
const CLOSE_RADIUS_RADIAL: f64 = 1.0 / 7.9;
const SELECTED_OUTLINE: f64 = 3.0;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn close_button_radius(scene: &Scene) -> f64 {
    match scene.mode {
        Mode::Circular => scene.size.width * CLOSE_RADIUS_CIRCULAR,
        Mode::Radial => scene.size.width * CLOSE_RADIUS_RADIAL,
    }
}

/// Whether `p` hits the close disc drawn around the pivot.
pub fn hits_close_button(scene: &Scene, p: Point) -> bool {
    scene.visible
        && scene.close_button
        && pivot(scene.mode, scene.size).distance(p) <= close_button_radius(scene)
}

const RADIAL_SEPARATORS_FEW: &[f64] = &[240.0, 300.0];
const RADIAL_SEPARATORS_MANY: &[f64] = &[216.0, 252.0, 288.0, 324.0];

/// Divider angles drawn between items, in screen degrees.
pub fn separator_angles(mode: Mode, count: usize) -> Vec<f64> {
    match (mode, count) {
        (Mode::Radial, 2) => vec![270.0],
        (Mode::Radial, 3 | 6 | 7 | 8) => RADIAL_SEPARATORS_FEW.to_vec(),
        (Mode::Radial, 4) => vec![225.0, 270.0, 315.0],
        (Mode::Radial, 5 | 9 | 10) => RADIAL_SEPARATORS_MANY.to_vec(),
        (Mode::Circular, 2) => vec![0.0, 180.0],
        (Mode::Circular, 3) => vec![210.0, 330.0, 90.0],
        (Mode::Circular, 4) => vec![45.0, 135.0, 225.0, 315.0],
        (Mode::Circular, 5) => vec![162.0, 18.0, 234.0, 306.0, 90.0],
        (Mode::Circular, 6) => vec![300.0, 0.0, 60.0, 120.0, 180.0, 240.0],
        (Mode::Circular, 7) => vec![90.0, 141.4, 192.8, 244.2, 295.6, 347.0, 38.4],
        (Mode::Circular, 8) => (0..8).map(|k| wrap_degrees(292.5 + 45.0 * k as f64)).collect(),
        (Mode::Circular, 9) => (0..9).map(|k| 10.0 + 40.0 * k as f64).collect(),
        (Mode::Circular, 10) => (0..10).map(|k| 36.0 * (k + 1) as f64).collect(),
        _ => Vec::new(),
    }
}

pub fn draw(cr: &Context, scene: &Scene, now: Instant) -> Result<(), cairo::Error> {
    if !scene.visible {
        return draw_hint(cr, scene);
    }

    cr.save()?;
    if let Some((center, radius)) = scene.wipe_radius(now) {
        cr.arc(center.x, center.y, radius.max(0.0), 0.0, 2.0 * PI);
        cr.clip();
    }

    draw_panel(cr, scene)?;
    if scene.separators {
        draw_separators(cr, scene)?;
    }
    if scene.skeleton {
        draw_skeleton(cr, scene)?;
    }
    for (index, id) in scene.items.keys().enumerate() {
        if let Some(rect) = scene.item_rect(*id, now) {
            ItemRenderer {
                rect,
                label: index + 1,
                selected: scene.selected == Some(*id),
            }
            .draw(cr, scene)?;
        }
    }
    if scene.close_button {
        draw_close_button(cr, scene)?;
    }
    cr.restore()
}

fn draw_panel(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let center = pivot(scene.mode, scene.size);
    set_source(cr, scene.palette.panel);
    match scene.mode {
        Mode::Circular => cr.arc(center.x, center.y, scene.size.width / 2.0, 0.0, 2.0 * PI),
        Mode::Radial => cr.arc(center.x, center.y, scene.size.width / 2.0, PI, 2.0 * PI),
    }
    cr.fill()
}

fn draw_separators(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let center = pivot(scene.mode, scene.size);
    let reach = scene.size.width / 2.0;
    set_source(cr, scene.palette.separator);
    cr.set_line_width(1.5);
    for angle in separator_angles(scene.mode, scene.items.len()) {
        let end = center.on_circle(reach, angle);
        cr.move_to(center.x, center.y);
        cr.line_to(end.x, end.y);
    }
    cr.stroke()
}

fn draw_skeleton(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let Some(radius) = scene.ring_radius else {
        return Ok(());
    };
    let center = pivot(scene.mode, scene.size);
    set_source(cr, scene.palette.skeleton);
    cr.set_line_width(1.0);
    cr.set_dash(&[4.0, 4.0], 0.0);
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    cr.stroke()?;
    cr.set_dash(&[], 0.0);
    Ok(())
}

struct ItemRenderer {
    rect: Rect,
    label: usize,
    selected: bool,
}

impl ItemRenderer {
    fn draw(&self, cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
        let center = self.rect.center();
        let radius = self.rect.width().min(self.rect.height()) / 2.0;

        set_source(cr, scene.palette.button);
        cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        cr.fill()?;

        if self.selected {
            set_source(cr, scene.palette.selected);
            cr.set_line_width(SELECTED_OUTLINE);
            cr.arc(center.x, center.y, radius - SELECTED_OUTLINE / 2.0, 0.0, 2.0 * PI);
            cr.stroke()?;
        }

        self.draw_label(cr, scene, center, radius)
    }

    fn draw_label(
        &self,
        cr: &Context,
        scene: &Scene,
        center: Point,
        radius: f64,
    ) -> Result<(), cairo::Error> {
        let text = self.label.to_string();
        set_source(cr, scene.palette.close_icon);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(radius * 0.8);
        if let Ok(ext) = cr.text_extents(&text) {
            cr.move_to(center.x - ext.width() / 2.0, center.y + ext.height() / 2.0);
            cr.show_text(&text)?;
        }
        Ok(())
    }
}

fn draw_close_button(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let center = pivot(scene.mode, scene.size);
    let radius = close_button_radius(scene);

    set_source(cr, scene.palette.button);
    match scene.mode {
        Mode::Circular => cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI),
        Mode::Radial => cr.arc(center.x, center.y, radius, PI, 2.0 * PI),
    }
    cr.fill()?;

    // the cross sits in the visible part of the disc
    let mark = match scene.mode {
        Mode::Circular => center,
        Mode::Radial => Point::new(center.x, center.y - radius / 2.0),
    };
    let arm = radius / 4.0;
    set_source(cr, scene.palette.close_icon);
    cr.set_line_width(2.0);
    cr.move_to(mark.x - arm, mark.y - arm);
    cr.line_to(mark.x + arm, mark.y + arm);
    cr.move_to(mark.x + arm, mark.y - arm);
    cr.line_to(mark.x - arm, mark.y + arm);
    cr.stroke()
}

fn draw_hint(cr: &Context, scene: &Scene) -> Result<(), cairo::Error> {
    let text = match scene.last_click {
        Some(id) => format!("Picked item {id}. Press Enter to open"),
        None => "Press Enter to open".to_string(),
    };
    set_source(cr, scene.palette.close_icon);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(16.0);
    if let Ok(ext) = cr.text_extents(&text) {
        let center = scene.size.center();
        cr.move_to(center.x - ext.width() / 2.0, center.y + ext.height() / 2.0);
        cr.show_text(&text)?;
    }
    Ok(())
}
