//! Effect name resolution
//!
//! Devices name the same effect differently ("Rainbow", "colorloop",
//! "Color Cycle"). [`EffectResolver`] maps a desired effect onto one entry of
//! a device's own list, trying in order:
//!
//! 1. exact match, case-insensitive
//! 2. partial match, either name containing the other
//! 3. semantic category match through a synonym table
//!
//! The category table is a seed and can be extended.

use std::borrow::Cow;

pub const CATEGORY_COLOR_CYCLE: &str = "color_cycle";
pub const CATEGORY_STROBE: &str = "strobe";
pub const CATEGORY_BREATHE: &str = "breathe";
pub const CATEGORY_SOLID: &str = "solid";

/// Offered by [`EffectResolver::common_effects`] when nothing else is shared.
pub const FALLBACK_EFFECTS: [&str; 3] = ["Solid", "Rainbow", "Strobe"];

const SEED_CATEGORIES: &[(&str, &[&str])] = &[
    (
        CATEGORY_COLOR_CYCLE,
        &[
            "rainbow",
            "colorloop",
            "color loop",
            "color_loop",
            "cycle",
            "spectrum",
            "colorful",
        ],
    ),
    (CATEGORY_STROBE, &["strobe", "flash", "blink", "lightning"]),
    (CATEGORY_BREATHE, &["breathe", "breath", "fade", "pulse", "glow"]),
    (CATEGORY_SOLID, &["solid", "static"]),
];

/// A semantic effect concept and the substrings that identify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectCategory {
    pub name: Cow<'static, str>,
    /// Lowercase substrings
    pub synonyms: Vec<Cow<'static, str>>,
}

impl EffectCategory {
    pub fn new<S>(name: impl Into<Cow<'static, str>>, synonyms: impl IntoIterator<Item = S>) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self {
            name: name.into(),
            synonyms: synonyms
                .into_iter()
                .map(|s| Cow::Owned(s.into().to_lowercase()))
                .collect(),
        }
    }

    /// Whether the lowercase effect name belongs to this category.
    fn matches(&self, lower: &str) -> bool {
        self.synonyms.iter().any(|s| lower.contains(s.as_ref()))
    }
}

/// Resolves desired effects against per-device effect lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectResolver {
    categories: Vec<EffectCategory>,
}

impl Default for EffectResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectResolver {
    /// Resolver with the seed category table.
    pub fn new() -> Self {
        let categories = SEED_CATEGORIES
            .iter()
            .map(|(name, synonyms)| EffectCategory {
                name: Cow::Borrowed(*name),
                synonyms: synonyms.iter().map(|s| Cow::Borrowed(*s)).collect(),
            })
            .collect();
        Self { categories }
    }

    /// Add a category, or extend the synonyms of an existing one.
    #[must_use]
    pub fn with_category(mut self, category: EffectCategory) -> Self {
        match self.categories.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => {
                for synonym in category.synonyms {
                    if !existing.synonyms.contains(&synonym) {
                        existing.synonyms.push(synonym);
                    }
                }
            }
            None => self.categories.push(category),
        }
        self
    }

    pub fn categories(&self) -> &[EffectCategory] {
        &self.categories
    }

    /// Find the device's own name for `desired`.
    ///
    /// Returns `None` when the device has nothing usable; the caller must then
    /// omit the effect for that device.
    pub fn resolve<'a, S: AsRef<str>>(&self, desired: &str, supported: &'a [S]) -> Option<&'a str> {
        let desired = desired.trim().to_lowercase();
        if desired.is_empty() {
            return None;
        }

        let lowered: Vec<(String, &'a str)> = supported
            .iter()
            .map(|s| (s.as_ref().to_lowercase(), s.as_ref()))
            .collect();

        if let Some((_, name)) = lowered.iter().find(|(lower, _)| *lower == desired) {
            return Some(*name);
        }

        let partial = lowered.iter().find(|(lower, _)| {
            !lower.is_empty() && (lower.contains(desired.as_str()) || desired.contains(lower.as_str()))
        });
        if let Some((_, name)) = partial {
            return Some(*name);
        }

        self.categories
            .iter()
            .filter(|category| category.matches(&desired))
            .find_map(|category| {
                lowered
                    .iter()
                    .find(|(lower, _)| category.matches(lower))
                    .map(|(_, name)| *name)
            })
    }

    /// The device's baseline solid/static effect, if it has one.
    pub fn baseline_effect<'a, S: AsRef<str>>(&self, supported: &'a [S]) -> Option<&'a str> {
        let solid = self.categories.iter().find(|c| c.name == CATEGORY_SOLID)?;
        supported
            .iter()
            .map(<S as AsRef<str>>::as_ref)
            .find(|name| solid.matches(&name.to_lowercase()))
    }

    /// Effects usable on every device at once, for populating a picker.
    ///
    /// Tries the case-insensitive intersection first, then the semantic
    /// categories every device can express, then [`FALLBACK_EFFECTS`]. Never
    /// decides what is sent to a device.
    pub fn common_effects<L, S>(&self, lists: &[L]) -> Vec<String>
    where
        L: AsRef<[S]>,
        S: AsRef<str>,
    {
        let Some((first, rest)) = lists.split_first() else {
            return fallback_effects();
        };

        let mut common: Vec<String> = Vec::new();
        for effect in first.as_ref() {
            let effect = effect.as_ref();
            let shared = rest.iter().all(|list| {
                list.as_ref()
                    .iter()
                    .any(|other| other.as_ref().eq_ignore_ascii_case(effect))
            });
            if shared && !common.iter().any(|c| c.eq_ignore_ascii_case(effect)) {
                common.push(effect.to_owned());
            }
        }
        if !common.is_empty() {
            return common;
        }

        for category in &self.categories {
            let mut found = lists.iter().map(|list| {
                list.as_ref()
                    .iter()
                    .map(<S as AsRef<str>>::as_ref)
                    .find(|name| category.matches(&name.to_lowercase()))
            });
            let Some(Some(representative)) = found.next() else {
                continue;
            };
            if found.all(|hit| hit.is_some()) {
                common.push(representative.to_owned());
            }
        }
        if !common.is_empty() {
            return common;
        }

        fallback_effects()
    }
}

fn fallback_effects() -> Vec<String> {
    FALLBACK_EFFECTS.iter().map(|s| (*s).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_match_ignores_case() {
        let resolver = EffectResolver::new();
        assert_eq!(resolver.resolve("STROBE", &["Rainbow", "Strobe"]), Some("Strobe"));
    }

    #[test]
    fn partial_match_either_direction() {
        let resolver = EffectResolver::new();
        assert_eq!(resolver.resolve("Fire", &["Fire 2012", "Solid"]), Some("Fire 2012"));
        assert_eq!(resolver.resolve("Candle Multi", &["Solid", "Candle"]), Some("Candle"));
    }

    #[test]
    fn semantic_category_match() {
        let resolver = EffectResolver::new();
        assert_eq!(resolver.resolve("Rainbow", &["colorloop", "strobe"]), Some("colorloop"));
        assert_eq!(resolver.resolve("Breathe", &["Solid", "Pulse"]), Some("Pulse"));
    }

    #[test]
    fn unresolvable_effects() {
        let resolver = EffectResolver::new();
        let empty: [&str; 0] = [];
        assert_eq!(resolver.resolve("xyz123", &empty), None);
        assert_eq!(resolver.resolve("xyz123", &["Solid", "Rainbow"]), None);
        assert_eq!(resolver.resolve("  ", &["Solid"]), None);
    }

    #[test]
    fn category_table_is_extensible() {
        let resolver = EffectResolver::new()
            .with_category(EffectCategory::new(CATEGORY_COLOR_CYCLE, ["prism"]))
            .with_category(EffectCategory::new("fire", ["fire", "flame", "candle"]));
        assert_eq!(resolver.resolve("Prism", &["Colorloop"]), Some("Colorloop"));
        assert_eq!(resolver.resolve("Flame", &["Solid", "Candle"]), Some("Candle"));
        assert_eq!(resolver.categories().len(), 5);
    }

    #[test]
    fn baseline_effect_finds_solid_or_static() {
        let resolver = EffectResolver::new();
        assert_eq!(resolver.baseline_effect(&["Rainbow", "Solid"]), Some("Solid"));
        assert_eq!(resolver.baseline_effect(&["Static", "Blink"]), Some("Static"));
        assert_eq!(resolver.baseline_effect(&["Rainbow"]), None);
    }

    #[test]
    fn common_effects_prefers_exact_intersection() {
        let resolver = EffectResolver::new();
        let lists = [vec!["Solid", "Rainbow", "Fire"], vec!["rainbow", "solid"]];
        assert_eq!(resolver.common_effects(&lists), vec!["Solid", "Rainbow"]);
    }

    #[test]
    fn common_effects_falls_back_to_concepts() {
        let resolver = EffectResolver::new();
        let lists = [vec!["Rainbow", "Strobe Mega"], vec!["colorloop", "Blink"]];
        assert_eq!(resolver.common_effects(&lists), vec!["Rainbow", "Strobe Mega"]);
    }

    #[test]
    fn common_effects_always_offers_something() {
        let resolver = EffectResolver::new();
        let lists = [vec!["Fire"], vec!["Twinkle"]];
        assert_eq!(resolver.common_effects(&lists), vec!["Solid", "Rainbow", "Strobe"]);
        let none: [Vec<&str>; 0] = [];
        assert_eq!(resolver.common_effects(&none), vec!["Solid", "Rainbow", "Strobe"]);
    }
}
