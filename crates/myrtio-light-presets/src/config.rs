//! Compiler configuration
//!
//! Every field has a default, so a configuration document only needs the
//! options it changes:
//!
//! ```json
//! {"clamp_color_temp": false, "effect_categories": [{"name": "fire", "synonyms": ["flame", "candle"]}]}
//! ```

use serde::Deserialize;

use crate::effect::{EffectCategory, EffectResolver};
use crate::error::ConfigError;

/// Default name of the baseline solid effect.
pub const DEFAULT_SOLID_EFFECT: &str = "Solid";

/// Extra effect category, or extra synonyms for a seed category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EffectCategoryConfig {
    pub name: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Options for [`PresetCompiler`](crate::PresetCompiler).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Clamp color temperature to the device's reported mired range
    pub clamp_color_temp: bool,
    /// Convert colors to a mode the device supports
    pub adapt_color_modes: bool,
    /// Effect forced next to rgb when the device has no solid/static effect
    pub solid_effect: String,
    pub effect_categories: Vec<EffectCategoryConfig>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            clamp_color_temp: true,
            adapt_color_modes: true,
            solid_effect: DEFAULT_SOLID_EFFECT.to_owned(),
            effect_categories: Vec::new(),
        }
    }
}

impl CompilerConfig {
    /// Parse configuration from a JSON document.
    pub fn from_json(json: &[u8]) -> Result<Self, ConfigError> {
        let (config, _) = serde_json_core::from_slice::<Self>(json)?;
        Ok(config)
    }

    /// Set color temperature clamping
    #[must_use]
    pub const fn with_clamp_color_temp(mut self, enabled: bool) -> Self {
        self.clamp_color_temp = enabled;
        self
    }

    /// Set color mode adaptation
    #[must_use]
    pub const fn with_adapt_color_modes(mut self, enabled: bool) -> Self {
        self.adapt_color_modes = enabled;
        self
    }

    /// Set fallback solid effect name
    #[must_use]
    pub fn with_solid_effect(mut self, name: impl Into<String>) -> Self {
        self.solid_effect = name.into();
        self
    }

    /// Add an effect category
    #[must_use]
    pub fn with_effect_category(mut self, name: impl Into<String>, synonyms: &[&str]) -> Self {
        self.effect_categories.push(EffectCategoryConfig {
            name: name.into(),
            synonyms: synonyms.iter().map(|s| (*s).to_owned()).collect(),
        });
        self
    }

    /// Effect resolver with the seed table plus the configured categories.
    pub fn effect_resolver(&self) -> EffectResolver {
        self.effect_categories
            .iter()
            .fold(EffectResolver::new(), |resolver, category| {
                resolver.with_category(EffectCategory::new(
                    category.name.clone(),
                    category.synonyms.iter().cloned(),
                ))
            })
    }
}
