use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Half circle above a bottom-centre hinge.
    #[strum(serialize = "Radial", serialize = "half")]
    Radial,
    /// Full ring around the container centre; rotatable.
    #[default]
    #[strum(serialize = "Circular", serialize = "ring")]
    Circular,
}

/// How the container is revealed and hidden.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum AnimationType {
    #[strum(serialize = "None")]
    None,
    #[strum(serialize = "FromLeft", serialize = "from_left", serialize = "left")]
    FromLeft,
    #[default]
    #[strum(serialize = "FromCenter", serialize = "from_center", serialize = "center")]
    FromCenter,
    #[strum(serialize = "FromRight", serialize = "from_right", serialize = "right")]
    FromRight,
    #[strum(serialize = "Disperse")]
    Disperse,
    #[strum(serialize = "DisperseIndividual", serialize = "disperse_individual")]
    DisperseIndividual,
    #[strum(serialize = "FromLeftAndDisperse", serialize = "from_left_and_disperse")]
    FromLeftAndDisperse,
    #[strum(serialize = "FromRightAndDisperse", serialize = "from_right_and_disperse")]
    FromRightAndDisperse,
    #[strum(serialize = "FromCenterAndDisperse", serialize = "from_center_and_disperse")]
    FromCenterAndDisperse,
}

impl AnimationType {
    pub fn is_wipe(&self) -> bool {
        matches!(self, Self::FromLeft | Self::FromCenter | Self::FromRight)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MenuConfig {
    pub mode: Mode,
    pub animation: AnimationType,
    pub close_button_enabled: bool,
    pub rotation_enabled: bool,
    pub vibrate_on_select: bool,
    pub close_on_touch_outside: bool,
    /// Carousel speed; snap animations last `7500 / speed` ms.
    pub speed: u32,
    /// Distance a press may travel before it counts as a drag.
    pub touch_slop: f64,
    /// Release velocity (px/s) above which a drag counts as a fling.
    pub min_fling_velocity: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Circular,
            animation: AnimationType::FromCenter,
            close_button_enabled: true,
            rotation_enabled: true,
            vibrate_on_select: false,
            close_on_touch_outside: true,
            speed: 25,
            touch_slop: 8.0,
            min_fling_velocity: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_deserialization() {
        let cases = vec![
            ("\"radial\"", Mode::Radial),
            ("\"Radial\"", Mode::Radial),
            ("\"HALF\"", Mode::Radial),
            ("\"circular\"", Mode::Circular),
            ("\"ring\"", Mode::Circular),
        ];

        for (json, expected) in cases {
            let deserialized: Mode = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_animation_type_deserialization() {
        let cases = vec![
            ("\"none\"", AnimationType::None),
            ("\"from_left\"", AnimationType::FromLeft),
            ("\"FromRight\"", AnimationType::FromRight),
            ("\"center\"", AnimationType::FromCenter),
            ("\"disperse_individual\"", AnimationType::DisperseIndividual),
        ];

        for (json, expected) in cases {
            let deserialized: AnimationType = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<AnimationType>("\"sideways\"").is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: MenuConfig =
            serde_json::from_str(r#"{ "mode": "radial", "speed": 50 }"#).unwrap();
        assert_eq!(config.mode, Mode::Radial);
        assert_eq!(config.speed, 50);
        assert_eq!(config.animation, AnimationType::FromCenter);
        assert!(config.close_on_touch_outside);
        assert!(!config.vibrate_on_select);
    }
}
