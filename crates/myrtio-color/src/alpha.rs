//! Opacity as an orthogonal axis over textual colors
//!
//! Alpha is never stored inside a color; it is extracted from, stripped
//! from, or composed into a textual color at the point of use. Symbolic
//! references are resolved through the injected [`SymbolResolver`] only
//! when a concrete value is actually needed, so fully opaque theme colors
//! stay theme-driven.

use crate::css::{self, CssColor};
use crate::resolver::SymbolResolver;

/// Fully opaque, in percent.
pub const OPAQUE: u8 = 100;

/// Returned by [`AlphaColorModel::apply_alpha`] at zero opacity.
pub const TRANSPARENT: &str = "transparent";

/// Rendered in place of `transparent` when an opaque base is required.
pub const TRANSPARENT_BASE: &str = "#ffffff";

/// Symbolic lookups allowed per resolution; longer chains are unresolved.
const MAX_RESOLVE_DEPTH: usize = 8;

/// Alpha extraction and composition over any supported textual color.
#[derive(Debug, Clone, Default)]
pub struct AlphaColorModel<R> {
    resolver: R,
}

impl<R: SymbolResolver> AlphaColorModel<R> {
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Opacity of `color` as a percentage.
    ///
    /// Gradients and anything that cannot be parsed or resolved report
    /// fully opaque.
    pub fn extract_alpha(&self, color: &str) -> u8 {
        self.concrete(color)
            .map(|parsed| parsed.alpha_percent())
            .unwrap_or(OPAQUE)
    }

    /// `color` with its alpha channel stripped.
    ///
    /// Gradients and opaque colors pass through unchanged, `transparent`
    /// maps to opaque white. A symbolic reference is only replaced by its
    /// resolved value when that value carries an alpha channel.
    pub fn base_color(&self, color: &str) -> String {
        let Some(parsed) = CssColor::parse(color) else {
            return color.to_owned();
        };

        match parsed {
            CssColor::Gradient => color.to_owned(),
            CssColor::Transparent => TRANSPARENT_BASE.to_owned(),
            CssColor::Symbolic { .. } => match resolve_concrete(parsed, &self.resolver) {
                Some(CssColor::Transparent) => TRANSPARENT_BASE.to_owned(),
                Some(resolved) if resolved.alpha().is_some() => resolved
                    .format_opaque()
                    .unwrap_or_else(|| color.to_owned()),
                _ => color.to_owned(),
            },
            other if other.alpha().is_some() => {
                other.format_opaque().unwrap_or_else(|| color.to_owned())
            }
            _ => color.to_owned(),
        }
    }

    /// Compose `alpha` (percent) into `base`.
    ///
    /// At 100 the input is returned untouched, at 0 the result is
    /// `transparent`. Otherwise the base is resolved to concrete channels and
    /// emitted as `rgba()` or `hsla()`. Gradients, malformed input and
    /// unresolvable references are returned unchanged.
    pub fn apply_alpha(&self, base: &str, alpha: u8) -> String {
        if alpha >= OPAQUE {
            return base.to_owned();
        }
        if alpha == 0 {
            return TRANSPARENT.to_owned();
        }

        let fraction = f64::from(alpha) / 100.0;
        let composed = match self.concrete(base) {
            Some(CssColor::Transparent) => {
                CssColor::parse(TRANSPARENT_BASE).and_then(|white| white.format_with_alpha(fraction))
            }
            Some(concrete) => concrete.format_with_alpha(fraction),
            None => None,
        };

        composed.unwrap_or_else(|| {
            log::debug!("alpha: refusing to compose alpha into {:?}", base);
            base.to_owned()
        })
    }

    /// Whether `color` is any recognised textual color.
    pub fn is_valid_color(&self, color: &str) -> bool {
        css::is_valid_color(color)
    }

    /// Parse and resolve `color` to a concrete, non-symbolic form.
    fn concrete(&self, color: &str) -> Option<CssColor> {
        resolve_concrete(CssColor::parse(color)?, &self.resolver)
    }
}

/// Follow symbolic references until a concrete color is reached.
///
/// Uses `var()` fallbacks when the resolver has no value. Returns `None` when
/// nothing concrete can be reached; gradients count as concrete.
pub(crate) fn resolve_concrete<R>(color: CssColor, resolver: &R) -> Option<CssColor>
where
    R: SymbolResolver + ?Sized,
{
    let mut current = color;
    for _ in 0..=MAX_RESOLVE_DEPTH {
        let (name, fallback) = match current {
            CssColor::Symbolic { name, fallback } => (name, fallback),
            concrete => return Some(concrete),
        };
        let next = resolver
            .resolve(&name)
            .and_then(|value| CssColor::parse(&value))
            .or_else(|| fallback.as_deref().and_then(CssColor::parse));
        match next {
            Some(next) => current = next,
            None => {
                log::debug!("alpha: unresolved color reference {}", name);
                return None;
            }
        }
    }
    log::debug!("alpha: color reference chain too deep");
    None
}
