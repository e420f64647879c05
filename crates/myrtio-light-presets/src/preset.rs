//! Preset model
//!
//! A [`Preset`] is a named desired light state. Its color is a [`ColorSpec`],
//! so at most one color mode (or an effect) can be set at a time.
//!
//! The editor UI works on a looser [`PresetDraft`] where several mode fields
//! may be populated at once while the user switches tabs; converting it into
//! a [`Preset`] applies the mode priority.

use myrtio_color::{ColorValue, Hs, Rgb, SymbolResolver, Xy};
use serde::{Deserialize, Serialize};

use crate::device::ColorMode;

/// A target device of a preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRef {
    pub entity_id: String,
    /// Overrides the preset transition for this device, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<f32>,
}

impl DeviceRef {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            transition: None,
        }
    }

    /// Set transition override
    #[must_use]
    pub fn with_transition(mut self, seconds: f32) -> Self {
        self.transition = Some(seconds);
        self
    }
}

/// The single color or effect of a preset.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ColorSpec {
    /// Brightness only
    #[default]
    None,
    /// Color temperature in mireds
    ColorTemp { mired: u16 },
    Hs(Hs),
    Xy(Xy),
    Rgb(Rgb),
    Rgbw([u8; 4]),
    Rgbww([u8; 5]),
    White(u8),
    /// Dynamic effect, by the name the user picked
    Effect(String),
}

impl ColorSpec {
    /// Color mode this spec selects, if any.
    pub fn mode(&self) -> Option<ColorMode> {
        Some(match self {
            Self::ColorTemp { .. } => ColorMode::ColorTemp,
            Self::Hs(_) => ColorMode::Hs,
            Self::Xy(_) => ColorMode::Xy,
            Self::Rgb(_) => ColorMode::Rgb,
            Self::Rgbw(_) => ColorMode::Rgbw,
            Self::Rgbww(_) => ColorMode::Rgbww,
            Self::White(_) => ColorMode::White,
            Self::None | Self::Effect(_) => return None,
        })
    }

    /// Effect name, if this is a non-blank effect.
    pub fn effect(&self) -> Option<&str> {
        match self {
            Self::Effect(name) if !name.trim().is_empty() => Some(name),
            _ => None,
        }
    }

    pub fn is_effect(&self) -> bool {
        self.effect().is_some()
    }

    /// Color spec for a picked [`ColorValue`].
    ///
    /// Numeric representations keep their mode. Hex strings and symbolic
    /// references become rgb; `None` when they do not resolve.
    pub fn from_value<R: SymbolResolver + ?Sized>(value: &ColorValue, resolver: &R) -> Option<Self> {
        Some(match value {
            ColorValue::Rgb(rgb) => Self::Rgb(*rgb),
            ColorValue::Hs(hs) => Self::Hs(*hs),
            ColorValue::Xy(xy) => Self::Xy(*xy),
            ColorValue::ColorTemp { mired } => Self::ColorTemp { mired: *mired },
            ColorValue::Hex(_) | ColorValue::Symbolic(_) => Self::Rgb(value.to_rgb(resolver)?),
        })
    }
}

/// A named, reusable desired light state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preset {
    pub id: String,
    pub name: String,
    /// MDI icon (e.g., "mdi:lightbulb")
    pub icon: Option<String>,
    pub entities: Vec<DeviceRef>,
    /// Brightness (0-255), passed through unscaled
    pub brightness: Option<u8>,
    pub color: ColorSpec,
    /// Transition in seconds
    pub transition: Option<f32>,
}

impl Preset {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set icon
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Add a target device
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<DeviceRef>) -> Self {
        self.entities.push(entity.into());
        self
    }

    /// Set brightness
    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Set color or effect
    #[must_use]
    pub fn with_color(mut self, color: ColorSpec) -> Self {
        self.color = color;
        self
    }

    /// Set transition
    #[must_use]
    pub fn with_transition(mut self, seconds: f32) -> Self {
        self.transition = Some(seconds);
        self
    }

    /// Transition for `entity_id`: the device override, else the preset's.
    ///
    /// Negative or non-finite values count as unset.
    pub fn transition_for(&self, entity_id: &str) -> Option<f32> {
        self.entities
            .iter()
            .find(|e| e.entity_id == entity_id)
            .and_then(|e| e.transition)
            .or(self.transition)
            .filter(|t| t.is_finite() && *t >= 0.0)
    }
}

impl From<&str> for DeviceRef {
    fn from(entity_id: &str) -> Self {
        Self::new(entity_id)
    }
}

impl From<String> for DeviceRef {
    fn from(entity_id: String) -> Self {
        Self::new(entity_id)
    }
}

/// Preset as authored in the editor, with every mode field optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresetDraft {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub entities: Vec<DeviceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    /// Tab the user last had open; informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_temp: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs_color: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy_color: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb_color: Option<[u8; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgbw_color: Option<[u8; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgbww_color: Option<[u8; 5]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<f32>,
}

impl PresetDraft {
    /// Collapse the populated mode fields into one [`ColorSpec`].
    ///
    /// Priority, highest first: effect, color temperature, rgb, hs, xy,
    /// rgbw, rgbww, white. Lower-priority fields are dropped.
    pub fn color_spec(&self) -> ColorSpec {
        let candidates = [
            self.effect
                .as_deref()
                .filter(|e| !e.trim().is_empty())
                .map(|e| ColorSpec::Effect(e.to_owned())),
            self.color_temp.map(|mired| ColorSpec::ColorTemp { mired }),
            self.rgb_color.map(|[r, g, b]| ColorSpec::Rgb(Rgb { r, g, b })),
            self.hs_color.map(|[h, s]| ColorSpec::Hs(hs_from_floats(h, s))),
            self.xy_color.map(|[x, y]| ColorSpec::Xy(Xy::new(x, y).clamped())),
            self.rgbw_color.map(ColorSpec::Rgbw),
            self.rgbww_color.map(ColorSpec::Rgbww),
            self.white.map(ColorSpec::White),
        ];

        let populated = candidates.iter().flatten().count();
        if populated > 1 {
            log::debug!(
                "preset {}: {} color modes populated, keeping the highest priority",
                self.id,
                populated
            );
        }

        candidates.into_iter().flatten().next().unwrap_or_default()
    }

    pub fn into_preset(self) -> Preset {
        let color = self.color_spec();
        Preset {
            id: self.id,
            name: self.name,
            icon: self.icon,
            entities: self.entities,
            brightness: self.brightness,
            color,
            transition: self.transition,
        }
    }
}

impl From<PresetDraft> for Preset {
    fn from(draft: PresetDraft) -> Self {
        draft.into_preset()
    }
}

fn hs_from_floats(h: f64, s: f64) -> Hs {
    let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
    let s = if s.is_finite() { s.clamp(0.0, 100.0) } else { 0.0 };
    Hs::new((h.round() as u16) % 360, s.round() as u8)
}
