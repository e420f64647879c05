//! Textual color parsing
//!
//! Recognises the encodings used by the dashboard color pickers: hex
//! (3, 6 or 8 digits), `rgb()`/`rgba()`, `hsl()`/`hsla()`, `transparent`,
//! named colors, `var(--token)` references and gradients.
//!
//! Malformed input yields `None`. Nothing in here allocates unless a
//! symbolic reference or a formatted output is involved.

use core::fmt::Write;

use crate::Rgb;
use crate::named;

const GRADIENT_PREFIXES: &[&str] = &[
    "linear-gradient(",
    "radial-gradient(",
    "conic-gradient(",
    "repeating-linear-gradient(",
    "repeating-radial-gradient(",
    "repeating-conic-gradient(",
];

/// A parsed textual color.
#[derive(Debug, Clone, PartialEq)]
pub enum CssColor {
    /// `#rgb`, `#rrggbb` or `#rrggbbaa`; `alpha` is the raw alpha byte.
    Hex { rgb: Rgb, alpha: Option<u8> },
    /// `rgb()` / `rgba()`; `alpha` is a fraction in `0.0..=1.0`.
    Rgb { rgb: Rgb, alpha: Option<f64> },
    /// `hsl()` / `hsla()`; saturation and lightness in percent.
    Hsl {
        h: f64,
        s: f64,
        l: f64,
        alpha: Option<f64>,
    },
    /// A CSS named color.
    Named(Rgb),
    /// The `transparent` keyword.
    Transparent,
    /// `var(--name)` or `var(--name, fallback)`.
    Symbolic {
        name: String,
        fallback: Option<String>,
    },
    /// Any gradient function. Stops are not parsed.
    Gradient,
}

impl CssColor {
    /// Parse a textual color.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(digits) = input.strip_prefix('#') {
            return parse_hex(digits);
        }

        let lower = input.to_ascii_lowercase();
        if lower == "transparent" {
            return Some(Self::Transparent);
        }
        if is_gradient(&lower) {
            return Some(Self::Gradient);
        }

        let Some((function, args)) = split_function(input) else {
            return named::lookup(input).map(Self::Named);
        };

        match function.to_ascii_lowercase().as_str() {
            "rgb" | "rgba" => parse_rgb(args),
            "hsl" | "hsla" => parse_hsl(args),
            "var" => parse_var(args),
            _ => None,
        }
    }

    /// Alpha as a fraction, if this form carries one explicitly.
    pub fn alpha(&self) -> Option<f64> {
        match self {
            Self::Hex { alpha, .. } => alpha.map(|a| f64::from(a) / 255.0),
            Self::Rgb { alpha, .. } | Self::Hsl { alpha, .. } => *alpha,
            Self::Transparent => Some(0.0),
            Self::Named(_) | Self::Symbolic { .. } | Self::Gradient => None,
        }
    }

    /// Alpha as a whole percentage, defaulting to fully opaque.
    pub fn alpha_percent(&self) -> u8 {
        match self {
            Self::Hex {
                alpha: Some(byte), ..
            } => (f64::from(*byte) / 255.0 * 100.0).round() as u8,
            Self::Gradient | Self::Symbolic { .. } => 100,
            other => fraction_to_percent(other.alpha().unwrap_or(1.0)),
        }
    }

    /// Concrete RGB channels, if this form has them.
    pub fn to_rgb(&self) -> Option<Rgb> {
        match self {
            Self::Hex { rgb, .. } | Self::Rgb { rgb, .. } | Self::Named(rgb) => Some(*rgb),
            Self::Hsl { h, s, l, .. } => Some(hsl_to_rgb(*h, *s, *l)),
            Self::Transparent | Self::Symbolic { .. } | Self::Gradient => None,
        }
    }

    /// Format this color with the given alpha fraction.
    ///
    /// HSL colors keep their HSL form; everything with concrete channels is
    /// emitted as `rgba()`. Returns `None` for forms without channels.
    pub fn format_with_alpha(&self, alpha: f64) -> Option<String> {
        let mut out = String::new();
        match self {
            Self::Hsl { h, s, l, .. } => {
                let _ = write!(out, "hsla({}, {}%, {}%, {:.2})", h, s, l, alpha);
            }
            other => {
                let rgb = other.to_rgb()?;
                let _ = write!(out, "rgba({}, {}, {}, {:.2})", rgb.r, rgb.g, rgb.b, alpha);
            }
        }
        Some(out)
    }

    /// Format this color without an alpha channel.
    pub fn format_opaque(&self) -> Option<String> {
        let mut out = String::new();
        match self {
            Self::Hex { rgb, .. } => {
                let _ = write!(out, "#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b);
            }
            Self::Hsl { h, s, l, .. } => {
                let _ = write!(out, "hsl({}, {}%, {}%)", h, s, l);
            }
            other => {
                let rgb = other.to_rgb()?;
                let _ = write!(out, "rgb({}, {}, {})", rgb.r, rgb.g, rgb.b);
            }
        }
        Some(out)
    }
}

/// Whether `input` is any recognised textual color.
pub fn is_valid_color(input: &str) -> bool {
    CssColor::parse(input).is_some()
}

fn fraction_to_percent(alpha: f64) -> u8 {
    (alpha.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn parse_hex(digits: &str) -> Option<CssColor> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    match digits.len() {
        3 => {
            let nibble = |i: usize| {
                u8::from_str_radix(&digits[i..=i], 16)
                    .ok()
                    .map(|n| n * 17)
            };
            Some(CssColor::Hex {
                rgb: Rgb {
                    r: nibble(0)?,
                    g: nibble(1)?,
                    b: nibble(2)?,
                },
                alpha: None,
            })
        }
        6 | 8 => Some(CssColor::Hex {
            rgb: Rgb {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
            },
            alpha: if digits.len() == 8 { Some(byte(6)?) } else { None },
        }),
        _ => None,
    }
}

fn is_gradient(lower: &str) -> bool {
    GRADIENT_PREFIXES.iter().any(|p| lower.starts_with(p))
        && lower.ends_with(')')
        && parens_balanced(lower)
}

fn parens_balanced(input: &str) -> bool {
    let mut depth: usize = 0;
    for c in input.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

/// Split `name(args)` into its name and argument list.
fn split_function(input: &str) -> Option<(&str, &str)> {
    let open = input.find('(')?;
    let args = input[open + 1..].strip_suffix(')')?;
    let name = input[..open].trim_end();
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    if !parens_balanced(&input[open..]) {
        return None;
    }
    Some((name, args))
}

/// Split color function arguments, accepting both the legacy comma syntax
/// and the space-separated syntax with `/` before alpha.
fn split_args(args: &str) -> Vec<&str> {
    if args.contains(',') {
        args.split(',').map(str::trim).collect()
    } else {
        args.split(|c: char| c.is_whitespace() || c == '/')
            .filter(|part| !part.is_empty())
            .collect()
    }
}

fn parse_number(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_channel(input: &str) -> Option<u8> {
    let value = match input.strip_suffix('%') {
        Some(percent) => parse_number(percent)? * 2.55,
        None => parse_number(input)?,
    };
    Some(value.clamp(0.0, 255.0).round() as u8)
}

fn parse_alpha(input: &str) -> Option<f64> {
    let value = match input.strip_suffix('%') {
        Some(percent) => parse_number(percent)? / 100.0,
        None => parse_number(input)?,
    };
    Some(value.clamp(0.0, 1.0))
}

fn parse_percent(input: &str) -> Option<f64> {
    let value = parse_number(input.strip_suffix('%').unwrap_or(input))?;
    Some(value.clamp(0.0, 100.0))
}

fn parse_hue(input: &str) -> Option<f64> {
    let value = parse_number(input.strip_suffix("deg").unwrap_or(input))?;
    Some(value.rem_euclid(360.0))
}

fn parse_rgb(args: &str) -> Option<CssColor> {
    let parts = split_args(args);
    let (channels, alpha) = match parts.as_slice() {
        [r, g, b] => ([*r, *g, *b], None),
        [r, g, b, a] => ([*r, *g, *b], Some(parse_alpha(a)?)),
        _ => return None,
    };
    Some(CssColor::Rgb {
        rgb: Rgb {
            r: parse_channel(channels[0])?,
            g: parse_channel(channels[1])?,
            b: parse_channel(channels[2])?,
        },
        alpha,
    })
}

fn parse_hsl(args: &str) -> Option<CssColor> {
    let parts = split_args(args);
    let (h, s, l, alpha) = match parts.as_slice() {
        [h, s, l] => (*h, *s, *l, None),
        [h, s, l, a] => (*h, *s, *l, Some(parse_alpha(a)?)),
        _ => return None,
    };
    Some(CssColor::Hsl {
        h: parse_hue(h)?,
        s: parse_percent(s)?,
        l: parse_percent(l)?,
        alpha,
    })
}

fn parse_var(args: &str) -> Option<CssColor> {
    let (name, fallback) = match args.split_once(',') {
        Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
        None => (args.trim(), None),
    };
    let ident = name.strip_prefix("--")?;
    if ident.is_empty()
        || !ident
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return None;
    }
    Some(CssColor::Symbolic {
        name: name.to_owned(),
        fallback: fallback.filter(|f| !f.is_empty()).map(str::to_owned),
    })
}

/// Standard HSL to RGB conversion.
pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);
    let h = h.rem_euclid(360.0);

    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let sector = h / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let m = l - chroma / 2.0;

    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let channel = |v: f64| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u8;

    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(
            CssColor::parse("#f00"),
            Some(CssColor::Hex {
                rgb: rgb(255, 0, 0),
                alpha: None
            })
        );
        assert_eq!(
            CssColor::parse("#FF000080"),
            Some(CssColor::Hex {
                rgb: rgb(255, 0, 0),
                alpha: Some(0x80)
            })
        );
        assert_eq!(CssColor::parse("#ff00"), None);
        assert_eq!(CssColor::parse("#zzzzzz"), None);
    }

    #[test]
    fn parses_rgb_functions() {
        assert_eq!(
            CssColor::parse("rgba(1,2,3,0.42)"),
            Some(CssColor::Rgb {
                rgb: rgb(1, 2, 3),
                alpha: Some(0.42)
            })
        );
        assert_eq!(
            CssColor::parse("rgb(10 20 30 / 50%)"),
            Some(CssColor::Rgb {
                rgb: rgb(10, 20, 30),
                alpha: Some(0.5)
            })
        );
        assert_eq!(
            CssColor::parse("RGB(100%, 0%, 0%)"),
            Some(CssColor::Rgb {
                rgb: rgb(255, 0, 0),
                alpha: None
            })
        );
        assert_eq!(CssColor::parse("rgb(1, 2)"), None);
        assert_eq!(CssColor::parse("rgb(1, 2, x)"), None);
        assert_eq!(CssColor::parse("rgb(1, 2, 3"), None);
    }

    #[test]
    fn parses_hsl_functions() {
        assert_eq!(
            CssColor::parse("hsla(120deg, 100%, 50%, 0.3)"),
            Some(CssColor::Hsl {
                h: 120.0,
                s: 100.0,
                l: 50.0,
                alpha: Some(0.3)
            })
        );
        let hsl = CssColor::parse("hsl(240, 100%, 50%)").unwrap();
        assert_eq!(hsl.to_rgb(), Some(rgb(0, 0, 255)));
    }

    #[test]
    fn parses_symbolic_references() {
        assert_eq!(
            CssColor::parse("var(--primary-color)"),
            Some(CssColor::Symbolic {
                name: "--primary-color".into(),
                fallback: None
            })
        );
        assert_eq!(
            CssColor::parse("var(--accent, #ff0000)"),
            Some(CssColor::Symbolic {
                name: "--accent".into(),
                fallback: Some("#ff0000".into())
            })
        );
        assert_eq!(CssColor::parse("var(primary)"), None);
        assert_eq!(CssColor::parse("var(--)"), None);
    }

    #[test]
    fn gradients_are_validated_structurally() {
        assert!(is_valid_color(
            "linear-gradient(90deg, rgba(255,0,0,0.5) 0%, #00f 100%)"
        ));
        assert!(is_valid_color("repeating-radial-gradient(circle, red, blue)"));
        assert!(!is_valid_color("linear-gradient(90deg, red"));
        assert!(!is_valid_color("linear-gradient(90deg, red))"));
        assert!(!is_valid_color("sparkle-gradient(red, blue)"));
    }

    #[test]
    fn validity_covers_keywords_and_names() {
        assert!(is_valid_color("transparent"));
        assert!(is_valid_color("Tomato"));
        assert!(is_valid_color("  #abc  "));
        assert!(!is_valid_color(""));
        assert!(!is_valid_color("not-a-color"));
        assert!(!is_valid_color("#abcd"));
    }

    #[test]
    fn alpha_defaults() {
        assert_eq!(CssColor::parse("rgb(1,2,3)").unwrap().alpha_percent(), 100);
        assert_eq!(CssColor::parse("transparent").unwrap().alpha_percent(), 0);
        assert_eq!(CssColor::parse("#00000000").unwrap().alpha_percent(), 0);
        assert_eq!(CssColor::parse("#000000ff").unwrap().alpha_percent(), 100);
    }

    #[test]
    fn formats_with_alpha() {
        let red = CssColor::parse("#ff0000").unwrap();
        assert_eq!(
            red.format_with_alpha(0.5).as_deref(),
            Some("rgba(255, 0, 0, 0.50)")
        );
        let hsl = CssColor::parse("hsl(200, 40%, 30%)").unwrap();
        assert_eq!(
            hsl.format_with_alpha(0.07).as_deref(),
            Some("hsla(200, 40%, 30%, 0.07)")
        );
        assert_eq!(CssColor::Gradient.format_with_alpha(0.5), None);
    }
}
