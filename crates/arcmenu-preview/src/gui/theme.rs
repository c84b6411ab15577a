use crate::config::{HexColor, StyleConfig};
use gtk::gdk;
use gtk4 as gtk;
use palette::{Srgba, WithAlpha};

const SEPARATOR_ALPHA: f64 = 0.6;
const SKELETON_ALPHA: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub panel: Srgba<f64>,
    pub separator: Srgba<f64>,
    pub button: Srgba<f64>,
    pub close_icon: Srgba<f64>,
    pub skeleton: Srgba<f64>,
    pub selected: Srgba<f64>,
}

impl Palette {
    pub fn from_style(style: &StyleConfig) -> Self {
        Self {
            panel: opaque(style.panel),
            separator: with_alpha(style.separator, SEPARATOR_ALPHA),
            button: opaque(style.button),
            close_icon: opaque(style.close_icon),
            skeleton: with_alpha(style.close_icon, SKELETON_ALPHA),
            selected: opaque(style.close_icon),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_style(&StyleConfig::default())
    }
}

fn with_alpha(color: HexColor, alpha: f64) -> Srgba<f64> {
    (*color).into_format::<f64>().with_alpha(alpha)
}

fn opaque(color: HexColor) -> Srgba<f64> {
    with_alpha(color, 1.0)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.arcmenu-window {
    background-color: #1e1e2e;
}
.arcmenu-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_from_style() {
        let palette = Palette::from_style(&StyleConfig {
            separator: HexColor::new(255, 0, 0),
            ..StyleConfig::default()
        });
        let (r, g, b, a) = palette.separator.into_components();
        assert_eq!((r, g, b), (1.0, 0.0, 0.0));
        assert_eq!(a, SEPARATOR_ALPHA);
        assert_eq!(palette.close_icon.alpha, 1.0);
    }
}
