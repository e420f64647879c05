//! Color value representations
//!
//! A [`ColorValue`] holds exactly one authoritative representation. Other
//! representations are derived from it on demand and never stored alongside.

use crate::css::CssColor;
use crate::resolver::SymbolResolver;
use crate::{Rgb, alpha, space};

/// Hue (degrees, `0..360`) and saturation (percent, `0..=100`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hs {
    pub h: u16,
    pub s: u8,
}

impl Hs {
    pub const fn new(h: u16, s: u8) -> Self {
        Self { h, s }
    }

    /// Hue wrapped into `0..360`, saturation capped at 100.
    #[must_use]
    pub const fn normalized(self) -> Self {
        Self {
            h: self.h % 360,
            s: if self.s > 100 { 100 } else { self.s },
        }
    }
}

/// CIE 1931 xy chromaticity.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Xy {
    pub x: f64,
    pub y: f64,
}

impl Xy {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Components clamped into `0.0..=1.0`; non-finite input becomes the
    /// D65 white point.
    #[must_use]
    pub fn clamped(self) -> Self {
        if !self.x.is_finite() || !self.y.is_finite() {
            return space::D65_WHITE_POINT;
        }
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// A color in one authoritative representation.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorValue {
    Rgb(Rgb),
    Hs(Hs),
    Xy(Xy),
    /// Color temperature in mireds.
    ColorTemp { mired: u16 },
    /// `#rrggbb` string as authored.
    Hex(String),
    /// Reference resolved through a [`SymbolResolver`], e.g. `var(--primary)`.
    Symbolic(String),
}

impl ColorValue {
    /// Derive RGB from the stored representation.
    ///
    /// Returns `None` for malformed hex strings and unresolvable references.
    pub fn to_rgb<R: SymbolResolver + ?Sized>(&self, resolver: &R) -> Option<Rgb> {
        match self {
            Self::Rgb(rgb) => Some(*rgb),
            Self::Hs(hs) => Some(space::hs_to_rgb(f64::from(hs.h), f64::from(hs.s))),
            Self::Xy(xy) => Some(space::xy_to_rgb(xy.x, xy.y, 1.0)),
            Self::ColorTemp { mired } => Some(space::mired_to_rgb(u32::from(*mired))),
            Self::Hex(hex) => space::hex_to_rgb(hex),
            Self::Symbolic(reference) => {
                let parsed = CssColor::parse(reference)?;
                alpha::resolve_concrete(parsed, resolver)?.to_rgb()
            }
        }
    }

    /// Derive hue/saturation from the stored representation.
    pub fn to_hs<R: SymbolResolver + ?Sized>(&self, resolver: &R) -> Option<Hs> {
        match self {
            Self::Hs(hs) => Some(*hs),
            other => other.to_rgb(resolver).map(space::rgb_to_hs),
        }
    }

    /// Derive xy chromaticity from the stored representation.
    pub fn to_xy<R: SymbolResolver + ?Sized>(&self, resolver: &R) -> Option<Xy> {
        match self {
            Self::Xy(xy) => Some(*xy),
            other => other.to_rgb(resolver).map(space::rgb_to_xy),
        }
    }

    /// Derive a `#rrggbb` string from the stored representation.
    pub fn to_hex<R: SymbolResolver + ?Sized>(&self, resolver: &R) -> Option<String> {
        match self {
            Self::Hex(hex) if space::hex_to_rgb(hex).is_some() => Some(hex.to_ascii_lowercase()),
            other => other.to_rgb(resolver).map(space::rgb_to_hex),
        }
    }
}

impl From<Rgb> for ColorValue {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb)
    }
}

impl From<Hs> for ColorValue {
    fn from(hs: Hs) -> Self {
        Self::Hs(hs)
    }
}

impl From<Xy> for ColorValue {
    fn from(xy: Xy) -> Self {
        Self::Xy(xy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{MapResolver, NoopResolver};

    #[test]
    fn derives_from_stored_representation() {
        let red = ColorValue::Hex("#FF0000".into());
        assert_eq!(red.to_rgb(&NoopResolver), Some(Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(red.to_hs(&NoopResolver), Some(Hs::new(0, 100)));
        assert_eq!(red.to_hex(&NoopResolver).as_deref(), Some("#ff0000"));

        let hs = ColorValue::Hs(Hs::new(120, 100));
        assert_eq!(hs.to_hs(&NoopResolver), Some(Hs::new(120, 100)));
        assert_eq!(hs.to_hex(&NoopResolver).as_deref(), Some("#00ff00"));
    }

    #[test]
    fn repeated_derivation_does_not_drift() {
        let stored = ColorValue::Hs(Hs::new(200, 60));
        let first = stored.to_rgb(&NoopResolver);
        for _ in 0..10 {
            assert_eq!(stored.to_rgb(&NoopResolver), first);
        }
    }

    #[test]
    fn symbolic_goes_through_resolver() {
        let theme = MapResolver::new().with("--primary-color", "rgb(3, 169, 244)");
        let value = ColorValue::Symbolic("var(--primary-color)".into());
        assert_eq!(value.to_rgb(&theme), Some(Rgb { r: 3, g: 169, b: 244 }));
        assert_eq!(value.to_rgb(&NoopResolver), None);
    }

    #[test]
    fn out_of_range_components_are_brought_into_range() {
        assert_eq!(Hs::new(400, 250).normalized(), Hs::new(40, 100));
        assert_eq!(Hs::new(359, 100).normalized(), Hs::new(359, 100));
        assert_eq!(Xy::new(1.4, -0.2).clamped(), Xy::new(1.0, 0.0));
        assert_eq!(Xy::new(f64::NAN, 0.3).clamped(), space::D65_WHITE_POINT);
    }

    #[test]
    fn malformed_hex_is_unset() {
        assert_eq!(ColorValue::Hex("#12".into()).to_rgb(&NoopResolver), None);
    }
}
