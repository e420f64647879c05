//! Compiled per-device commands
//!
//! [`LightParameters`] holds at most one color parameter at a time; its
//! setters clear whatever would conflict, so a finished [`Command`] can never
//! carry two color modes or an effect next to a color.

use myrtio_color::{Hs, Rgb, Xy};
use serde::Serialize;

/// The single color parameter of a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorParameter {
    /// Mireds
    ColorTemp(u16),
    Hs(Hs),
    Xy(Xy),
    Rgb(Rgb),
    Rgbw([u8; 4]),
    Rgbww([u8; 5]),
    White(u8),
}

impl ColorParameter {
    /// Parameter key as the light service names it.
    pub const fn key(&self) -> &'static str {
        match self {
            ColorParameter::ColorTemp(_) => "color_temp",
            ColorParameter::Hs(_) => "hs_color",
            ColorParameter::Xy(_) => "xy_color",
            ColorParameter::Rgb(_) => "rgb_color",
            ColorParameter::Rgbw(_) => "rgbw_color",
            ColorParameter::Rgbww(_) => "rgbww_color",
            ColorParameter::White(_) => "white",
        }
    }
}

/// Parameters of one light command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightParameters {
    transition: Option<f32>,
    brightness: Option<u8>,
    effect: Option<String>,
    color: Option<ColorParameter>,
}

impl LightParameters {
    pub const fn new() -> Self {
        Self {
            transition: None,
            brightness: None,
            effect: None,
            color: None,
        }
    }

    pub fn set_transition(&mut self, seconds: f32) {
        self.transition = Some(seconds);
    }

    pub fn clear_transition(&mut self) {
        self.transition = None;
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = Some(brightness);
    }

    /// Select an effect, dropping any color.
    pub fn select_effect(&mut self, effect: impl Into<String>) {
        self.effect = Some(effect.into());
        self.color = None;
    }

    /// Select a color, dropping any effect.
    pub fn select_color(&mut self, color: ColorParameter) {
        self.color = Some(color);
        self.effect = None;
    }

    /// Set the effect while keeping the color.
    ///
    /// Only for devices that need their baseline effect restated next to an
    /// rgb color.
    pub(crate) fn force_effect(&mut self, effect: impl Into<String>) {
        self.effect = Some(effect.into());
    }

    pub fn clear_color_and_effect(&mut self) {
        self.effect = None;
        self.color = None;
    }

    pub fn transition(&self) -> Option<f32> {
        self.transition
    }

    pub fn brightness(&self) -> Option<u8> {
        self.brightness
    }

    pub fn effect(&self) -> Option<&str> {
        self.effect.as_deref()
    }

    pub fn color(&self) -> Option<&ColorParameter> {
        self.color.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Keys that are set, in wire order.
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::with_capacity(4);
        if self.transition.is_some() {
            keys.push("transition");
        }
        if self.brightness.is_some() {
            keys.push("brightness");
        }
        if self.effect.is_some() {
            keys.push("effect");
        }
        if let Some(color) = &self.color {
            keys.push(color.key());
        }
        keys
    }
}

/// A command for one target device. Immutable once compiled.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    target_entity: String,
    parameters: LightParameters,
}

impl Command {
    pub fn new(target_entity: impl Into<String>, parameters: LightParameters) -> Self {
        Self {
            target_entity: target_entity.into(),
            parameters,
        }
    }

    pub fn target_entity(&self) -> &str {
        &self.target_entity
    }

    pub fn parameters(&self) -> &LightParameters {
        &self.parameters
    }

    /// Borrowed `light.turn_on` service payload for this command.
    pub fn payload(&self) -> TurnOnPayload<'_> {
        let params = &self.parameters;
        let mut payload = TurnOnPayload {
            entity_id: &self.target_entity,
            transition: params.transition,
            brightness: params.brightness,
            effect: params.effect.as_deref(),
            ..TurnOnPayload::default()
        };
        match params.color {
            Some(ColorParameter::ColorTemp(mired)) => payload.color_temp = Some(mired),
            Some(ColorParameter::Hs(hs)) => payload.hs_color = Some((hs.h, hs.s)),
            Some(ColorParameter::Xy(xy)) => payload.xy_color = Some((xy.x, xy.y)),
            Some(ColorParameter::Rgb(rgb)) => payload.rgb_color = Some([rgb.r, rgb.g, rgb.b]),
            Some(ColorParameter::Rgbw(rgbw)) => payload.rgbw_color = Some(rgbw),
            Some(ColorParameter::Rgbww(rgbww)) => payload.rgbww_color = Some(rgbww),
            Some(ColorParameter::White(white)) => payload.white = Some(white),
            None => {}
        }
        payload
    }
}

impl Serialize for Command {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload().serialize(serializer)
    }
}

/// `light.turn_on` service payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct TurnOnPayload<'a> {
    pub entity_id: &'a str,
    /// Transition in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<f32>,
    /// Brightness (0-255)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<&'a str>,
    /// Color temperature in mireds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_temp: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs_color: Option<(u16, u8)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy_color: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgb_color: Option<[u8; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgbw_color: Option<[u8; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rgbww_color: Option<[u8; 5]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn color_and_effect_are_exclusive() {
        let mut params = LightParameters::new();
        params.select_effect("Rainbow");
        params.select_color(ColorParameter::ColorTemp(300));
        assert_eq!(params.effect(), None);
        assert_eq!(params.keys(), vec!["color_temp"]);

        params.select_effect("Rainbow");
        assert_eq!(params.color(), None);
        assert_eq!(params.keys(), vec!["effect"]);
    }

    #[test]
    fn forced_effect_keeps_rgb() {
        let mut params = LightParameters::new();
        params.set_brightness(10);
        params.select_color(ColorParameter::Rgb(Rgb { r: 1, g: 2, b: 3 }));
        params.force_effect("Solid");
        assert_eq!(params.keys(), vec!["brightness", "effect", "rgb_color"]);
    }

    #[test]
    fn cleared_parameters_keep_brightness() {
        let mut params = LightParameters::new();
        params.set_transition(1.0);
        params.set_brightness(128);
        params.select_effect("Fire");
        params.clear_color_and_effect();
        params.clear_transition();
        assert_eq!(params.keys(), vec!["brightness"]);
        assert!(!params.is_empty());
        assert!(LightParameters::default().is_empty());
    }

    #[test]
    fn payload_carries_only_the_selected_color() {
        let mut params = LightParameters::new();
        params.select_color(ColorParameter::Hs(Hs::new(30, 80)));
        let command = Command::new("light.desk", params);
        let payload = command.payload();
        assert_eq!(payload.entity_id, "light.desk");
        assert_eq!(payload.hs_color, Some((30, 80)));
        assert_eq!(payload.rgb_color, None);
        assert_eq!(payload.effect, None);
    }
}
