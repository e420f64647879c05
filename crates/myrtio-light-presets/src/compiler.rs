//! Preset to per-device command compilation
//!
//! Every target device is compiled on its own: what one device can or cannot
//! do never changes the command of another. For each device the parameters
//! are built in a fixed order:
//!
//! 1. transition (device override, else the preset's), unless the device
//!    class forbids transitions next to effects and the preset is an effect;
//!    generic devices keep the transition next to effects
//! 2. brightness, passed through unscaled
//! 3. color or effect, in mode priority order, shaped by the device-class
//!    quirks
//!
//! Hue/saturation and xy colors are brought into range before they are sent.
//! An effect the device cannot resolve drops the effect and any color, but
//! brightness is still delivered.

use myrtio_color::space;
use myrtio_color::{Hs, Rgb};

use crate::command::{ColorParameter, Command, LightParameters};
use crate::config::CompilerConfig;
use crate::device::{CapabilitySource, ColorMode, DeviceCapability};
use crate::effect::EffectResolver;
use crate::error::CompileError;
use crate::preset::{ColorSpec, Preset};
use crate::quirks::QuirkTable;

/// Fallback order when a device lacks the preset's color mode.
const ADAPTATION_ORDER: [ColorMode; 3] = [ColorMode::Rgb, ColorMode::Hs, ColorMode::Xy];

/// Result of compiling a preset against a capability source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileReport {
    pub commands: Vec<Command>,
    /// Targets without a capability snapshot
    pub skipped: Vec<String>,
}

/// Compiles presets into device commands.
#[derive(Debug, Clone)]
pub struct PresetCompiler {
    config: CompilerConfig,
    effects: EffectResolver,
    quirks: QuirkTable,
}

impl Default for PresetCompiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl PresetCompiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            effects: config.effect_resolver(),
            config,
            quirks: QuirkTable::default(),
        }
    }

    /// Replace the device-class quirk table
    #[must_use]
    pub fn with_quirks(mut self, quirks: QuirkTable) -> Self {
        self.quirks = quirks;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn effects(&self) -> &EffectResolver {
        &self.effects
    }

    /// One command per device, in device order.
    pub fn compile(&self, preset: &Preset, devices: &[DeviceCapability]) -> Vec<Command> {
        devices
            .iter()
            .map(|device| self.compile_device(preset, device))
            .collect()
    }

    /// Compile for the preset's own targets.
    ///
    /// Targets the source has no capability for are skipped and listed in the
    /// report. A preset without targets is an error.
    pub fn compile_targets<S>(&self, preset: &Preset, source: &S) -> Result<CompileReport, CompileError>
    where
        S: CapabilitySource + ?Sized,
    {
        if preset.entities.is_empty() {
            return Err(CompileError::NoTargets {
                preset_id: preset.id.clone(),
            });
        }

        let mut report = CompileReport::default();
        for target in &preset.entities {
            match source.capability(&target.entity_id) {
                Some(device) => report.commands.push(self.compile_device(preset, &device)),
                None => {
                    log::warn!(
                        "preset {}: no capability for {}, skipping",
                        preset.id,
                        target.entity_id
                    );
                    report.skipped.push(target.entity_id.clone());
                }
            }
        }
        Ok(report)
    }

    pub fn compile_device(&self, preset: &Preset, device: &DeviceCapability) -> Command {
        let quirks = self.quirks.lookup(device.device_class);
        let mut params = LightParameters::new();

        if let Some(transition) = preset.transition_for(&device.entity_id) {
            if preset.color.is_effect() && !quirks.transition_with_effect {
                log::debug!("{}: transition dropped next to effect", device.entity_id);
            } else {
                params.set_transition(transition);
            }
        }

        if let Some(brightness) = preset.brightness {
            params.set_brightness(brightness);
        }

        if let Some(desired) = preset.color.effect() {
            match self.effects.resolve(desired, &device.supported_effects) {
                Some(effect) => {
                    log::debug!("{}: effect {desired} -> {effect}", device.entity_id);
                    params.select_effect(effect);
                }
                None => {
                    log::debug!("{}: effect {desired} unsupported, omitted", device.entity_id);
                    params.clear_color_and_effect();
                }
            }
        } else if let Some(color) = self.color_parameter(&preset.color, device) {
            params.select_color(color);
            if matches!(color, ColorParameter::Rgb(_)) && quirks.solid_effect_with_rgb {
                let solid = self
                    .effects
                    .baseline_effect(&device.supported_effects)
                    .unwrap_or(self.config.solid_effect.as_str());
                log::debug!("{}: forcing {solid} next to rgb", device.entity_id);
                params.force_effect(solid);
            }
        }

        Command::new(device.entity_id.clone(), params)
    }

    fn color_parameter(&self, color: &ColorSpec, device: &DeviceCapability) -> Option<ColorParameter> {
        let requested = match *color {
            ColorSpec::ColorTemp { mired } if self.config.clamp_color_temp => {
                let clamped = space::clamp_mired(mired, device.min_mireds, device.max_mireds);
                if clamped != mired {
                    log::debug!("{}: color temp {mired} clamped to {clamped}", device.entity_id);
                }
                ColorParameter::ColorTemp(clamped)
            }
            ColorSpec::ColorTemp { mired } => ColorParameter::ColorTemp(mired),
            ColorSpec::Hs(hs) => ColorParameter::Hs(hs.normalized()),
            ColorSpec::Xy(xy) => ColorParameter::Xy(xy.clamped()),
            ColorSpec::Rgb(rgb) => ColorParameter::Rgb(rgb),
            // Channel-level modes have no lossless conversion and pass through.
            ColorSpec::Rgbw(rgbw) => return Some(ColorParameter::Rgbw(rgbw)),
            ColorSpec::Rgbww(rgbww) => return Some(ColorParameter::Rgbww(rgbww)),
            ColorSpec::White(white) => return Some(ColorParameter::White(white)),
            ColorSpec::None | ColorSpec::Effect(_) => return None,
        };

        let mode = color.mode()?;
        if !self.config.adapt_color_modes
            || !device.reports_color_modes()
            || device.supports(mode)
        {
            return Some(requested);
        }

        let Some(target) = ADAPTATION_ORDER.into_iter().find(|m| device.supports(*m)) else {
            return Some(requested);
        };
        log::debug!(
            "{}: {} unsupported, sending {}",
            device.entity_id,
            mode.as_str(),
            target.as_str()
        );
        Some(adapt_color(requested, target))
    }
}

/// Convert a chromatic color parameter to `target` (rgb, hs or xy).
fn adapt_color(color: ColorParameter, target: ColorMode) -> ColorParameter {
    let hs: Hs = match color {
        ColorParameter::Rgb(rgb) => return from_rgb(rgb, target),
        ColorParameter::ColorTemp(mired) => {
            return from_rgb(space::mired_to_rgb(u32::from(mired)), target);
        }
        ColorParameter::Hs(hs) => hs,
        ColorParameter::Xy(xy) if target == ColorMode::Hs => {
            return ColorParameter::Hs(space::xy_to_hs(xy.x, xy.y));
        }
        // xy carries no luminance; going through hs lands the color at full value
        ColorParameter::Xy(xy) => space::xy_to_hs(xy.x, xy.y),
        other => return other,
    };

    match target {
        ColorMode::Xy => ColorParameter::Xy(space::hs_to_xy(f64::from(hs.h), f64::from(hs.s))),
        ColorMode::Hs => ColorParameter::Hs(hs),
        _ => ColorParameter::Rgb(space::hs_to_rgb(f64::from(hs.h), f64::from(hs.s))),
    }
}

fn from_rgb(rgb: Rgb, target: ColorMode) -> ColorParameter {
    match target {
        ColorMode::Hs => ColorParameter::Hs(space::rgb_to_hs(rgb)),
        ColorMode::Xy => ColorParameter::Xy(space::rgb_to_xy(rgb)),
        _ => ColorParameter::Rgb(rgb),
    }
}
