//! Device capability model
//!
//! A [`DeviceCapability`] is a snapshot of what one light currently reports
//! supporting. It is built fresh for every compile pass and never cached.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// Color modes a light can report (Home Assistant naming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// On/Off only
    #[serde(rename = "onoff")]
    OnOff,
    /// Brightness only (no color)
    Brightness,
    /// Color temperature (in mireds)
    ColorTemp,
    /// Hue and saturation
    Hs,
    /// CIE xy chromaticity
    Xy,
    /// RGB color mode
    Rgb,
    /// RGB plus a white channel
    Rgbw,
    /// RGB plus cold and warm white channels
    Rgbww,
    /// White channel only
    White,
}

impl ColorMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ColorMode::OnOff => "onoff",
            ColorMode::Brightness => "brightness",
            ColorMode::ColorTemp => "color_temp",
            ColorMode::Hs => "hs",
            ColorMode::Xy => "xy",
            ColorMode::Rgb => "rgb",
            ColorMode::Rgbw => "rgbw",
            ColorMode::Rgbww => "rgbww",
            ColorMode::White => "white",
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Some(match s {
            "onoff" => ColorMode::OnOff,
            "brightness" => ColorMode::Brightness,
            "color_temp" => ColorMode::ColorTemp,
            "hs" => ColorMode::Hs,
            "xy" => ColorMode::Xy,
            "rgb" => ColorMode::Rgb,
            "rgbw" => ColorMode::Rgbw,
            "rgbww" => ColorMode::Rgbww,
            "white" => ColorMode::White,
            _ => return None,
        })
    }
}

/// Device class, selecting an entry of the quirk table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceClass {
    #[default]
    Generic,
    /// Individually addressable LED controllers that need command shaping.
    QuirkyAddressable,
}

/// What a device currently reports supporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceCapability {
    /// Target entity identifier
    pub entity_id: String,
    /// Supported color modes; empty when the device does not report them
    pub supported_color_modes: BTreeSet<ColorMode>,
    /// Effect names exactly as the device reports them
    #[serde(alias = "effect_list")]
    pub supported_effects: Vec<String>,
    /// Minimum color temperature in mireds
    pub min_mireds: Option<u16>,
    /// Maximum color temperature in mireds
    pub max_mireds: Option<u16>,
    pub device_class: DeviceClass,
}

impl DeviceCapability {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Self::default()
        }
    }

    /// Set color modes
    #[must_use]
    pub fn with_color_modes(mut self, modes: impl IntoIterator<Item = ColorMode>) -> Self {
        self.supported_color_modes = modes.into_iter().collect();
        self
    }

    /// Set effects list
    #[must_use]
    pub fn with_effects<S: Into<String>>(mut self, effects: impl IntoIterator<Item = S>) -> Self {
        self.supported_effects = effects.into_iter().map(Into::into).collect();
        self
    }

    /// Set color temperature range
    #[must_use]
    pub fn with_mireds_range(mut self, min: u16, max: u16) -> Self {
        self.min_mireds = Some(min);
        self.max_mireds = Some(max);
        self
    }

    /// Set device class
    #[must_use]
    pub fn with_device_class(mut self, class: DeviceClass) -> Self {
        self.device_class = class;
        self
    }

    pub fn supports(&self, mode: ColorMode) -> bool {
        self.supported_color_modes.contains(&mode)
    }

    /// Whether the device reports its color modes at all.
    pub fn reports_color_modes(&self) -> bool {
        !self.supported_color_modes.is_empty()
    }
}

/// Supplies a capability snapshot per target entity at compile time.
pub trait CapabilitySource {
    /// Current capability of `entity_id`, or `None` when unavailable.
    fn capability(&self, entity_id: &str) -> Option<DeviceCapability>;
}

impl CapabilitySource for [DeviceCapability] {
    fn capability(&self, entity_id: &str) -> Option<DeviceCapability> {
        self.iter().find(|d| d.entity_id == entity_id).cloned()
    }
}

impl CapabilitySource for Vec<DeviceCapability> {
    fn capability(&self, entity_id: &str) -> Option<DeviceCapability> {
        self.as_slice().capability(entity_id)
    }
}

impl CapabilitySource for HashMap<String, DeviceCapability> {
    fn capability(&self, entity_id: &str) -> Option<DeviceCapability> {
        self.get(entity_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mode_names_roundtrip() {
        for mode in [
            ColorMode::OnOff,
            ColorMode::Brightness,
            ColorMode::ColorTemp,
            ColorMode::Hs,
            ColorMode::Xy,
            ColorMode::Rgb,
            ColorMode::Rgbw,
            ColorMode::Rgbww,
            ColorMode::White,
        ] {
            assert_eq!(ColorMode::parse_from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(ColorMode::parse_from_str("rainbow"), None);
    }

    #[test]
    fn slice_source_finds_by_entity() {
        let devices = vec![
            DeviceCapability::new("light.desk"),
            DeviceCapability::new("light.strip").with_device_class(DeviceClass::QuirkyAddressable),
        ];
        let found = devices.capability("light.strip");
        assert_eq!(
            found.map(|d| d.device_class),
            Some(DeviceClass::QuirkyAddressable)
        );
        assert!(devices.capability("light.missing").is_none());
    }
}
