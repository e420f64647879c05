//! Color space conversions
//!
//! Stateless conversions between RGB, hue/saturation, CIE 1931 xy chromaticity,
//! color temperature (kelvin and mired) and hex strings.
//!
//! Every function clamps out-of-range input instead of failing, so callers can
//! feed raw slider values during live preview.

use core::fmt::Write;

use crate::Rgb;
use crate::value::{Hs, Xy};

/// D65 white point, returned when chromaticity is undefined (black).
pub const D65_WHITE_POINT: Xy = Xy {
    x: 0.3127,
    y: 0.3290,
};

const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.4124, 0.3576, 0.1805],
    [0.2126, 0.7152, 0.0722],
    [0.0193, 0.1192, 0.9505],
];

const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2406, -1.5372, -0.4986],
    [-0.9689, 1.8758, 0.0415],
    [0.0557, -0.2040, 1.0570],
];

/// Convert RGB to hue (whole degrees) and saturation (whole percent).
///
/// Value is discarded: brightness travels as a separate light parameter.
pub fn rgb_to_hs(rgb: Rgb) -> Hs {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let saturation = if max == 0.0 { 0.0 } else { delta / max * 100.0 };

    Hs {
        h: (hue.round() as u16) % 360,
        s: saturation.round() as u8,
    }
}

/// Convert hue (degrees) and saturation (percent) to RGB at full value.
pub fn hs_to_rgb(hue: f64, saturation: f64) -> Rgb {
    let h = if hue.is_finite() {
        hue.rem_euclid(360.0)
    } else {
        0.0
    };
    let s = clamp_unit(saturation / 100.0);

    let chroma = s;
    let sector = h / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let m = 1.0 - chroma;

    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Rgb {
        r: to_channel(r + m),
        g: to_channel(g + m),
        b: to_channel(b + m),
    }
}

/// Convert RGB to CIE 1931 xy chromaticity, rounded to 4 decimal places.
///
/// Black has no chromaticity and maps to [`D65_WHITE_POINT`].
pub fn rgb_to_xy(rgb: Rgb) -> Xy {
    let linear = [
        srgb_to_linear(f64::from(rgb.r) / 255.0),
        srgb_to_linear(f64::from(rgb.g) / 255.0),
        srgb_to_linear(f64::from(rgb.b) / 255.0),
    ];
    let [x, y, z] = mul(&SRGB_TO_XYZ, linear);

    let sum = x + y + z;
    if sum == 0.0 {
        return D65_WHITE_POINT;
    }

    Xy {
        x: round4(x / sum),
        y: round4(y / sum),
    }
}

/// Convert CIE 1931 xy chromaticity to RGB.
///
/// `brightness` is the relative luminance `Y` in `0.0..=1.0`. Colors outside
/// the sRGB gamut are clipped per channel, so this is not an exact inverse of
/// [`rgb_to_xy`].
pub fn xy_to_rgb(x: f64, y: f64, brightness: f64) -> Rgb {
    let (x, y) = if y > 0.0 && x.is_finite() && y.is_finite() {
        (clamp_unit(x), clamp_unit(y))
    } else {
        (D65_WHITE_POINT.x, D65_WHITE_POINT.y)
    };
    let luminance = clamp_unit(brightness);

    let big_x = luminance / y * x;
    let big_z = luminance / y * (1.0 - x - y);
    let [r, g, b] = mul(&XYZ_TO_SRGB, [big_x, luminance, big_z]);

    Rgb {
        r: to_channel(linear_to_srgb(r)),
        g: to_channel(linear_to_srgb(g)),
        b: to_channel(linear_to_srgb(b)),
    }
}

/// Convert hue/saturation to xy chromaticity.
pub fn hs_to_xy(hue: f64, saturation: f64) -> Xy {
    rgb_to_xy(hs_to_rgb(hue, saturation))
}

/// Convert xy chromaticity to hue/saturation.
pub fn xy_to_hs(x: f64, y: f64) -> Hs {
    rgb_to_hs(xy_to_rgb(x, y, 1.0))
}

/// Convert kelvin to mired (`round(1_000_000 / k)`).
pub fn kelvin_to_mired(kelvin: u32) -> u32 {
    reciprocal_megakelvin(kelvin)
}

/// Convert mired to kelvin (`round(1_000_000 / m)`).
pub fn mired_to_kelvin(mired: u32) -> u32 {
    reciprocal_megakelvin(mired)
}

fn reciprocal_megakelvin(value: u32) -> u32 {
    (1_000_000.0 / f64::from(value.max(1))).round() as u32
}

/// Clamp a mired value into a device range.
///
/// Either bound may be missing; an inverted range is normalized first.
pub fn clamp_mired(mired: u16, min: Option<u16>, max: Option<u16>) -> u16 {
    let (lo, hi) = match (min, max) {
        (Some(a), Some(b)) if a > b => (b, a),
        (lo, hi) => (lo.unwrap_or(u16::MIN), hi.unwrap_or(u16::MAX)),
    };
    mired.clamp(lo, hi)
}

/// Approximate the RGB appearance of a black body at `kelvin`.
///
/// Empirical fit by Tanner Helland, good for roughly 1000K to 40000K.
pub fn kelvin_to_rgb(kelvin: u32) -> Rgb {
    let temp = f64::from(kelvin.max(1)) / 100.0;

    let red = if temp <= 66.0 {
        255.0
    } else {
        329.698_727_446 * (temp - 60.0).powf(-0.133_204_759_2)
    };

    let green = if temp <= 66.0 {
        99.470_802_586_1 * temp.ln() - 161.119_568_166_1
    } else {
        288.122_169_528_3 * (temp - 60.0).powf(-0.075_514_849_2)
    };

    let blue = if temp >= 66.0 {
        255.0
    } else if temp <= 19.0 {
        0.0
    } else {
        138.517_731_223_1 * (temp - 10.0).ln() - 305.044_792_730_7
    };

    Rgb {
        r: clamp_byte(red),
        g: clamp_byte(green),
        b: clamp_byte(blue),
    }
}

/// RGB appearance of a mired color temperature.
pub fn mired_to_rgb(mired: u32) -> Rgb {
    kelvin_to_rgb(mired_to_kelvin(mired))
}

/// Parse a strict `#RRGGBB` string (case-insensitive).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(Rgb {
        r: ((value >> 16) & 0xFF) as u8,
        g: ((value >> 8) & 0xFF) as u8,
        b: (value & 0xFF) as u8,
    })
}

/// Format RGB as lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    let mut out = String::with_capacity(7);
    let _ = write!(out, "#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b);
    out
}

fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Scale a unit value to a channel byte.
#[inline]
fn to_channel(value: f64) -> u8 {
    (clamp_unit(value) * 255.0).round() as u8
}

#[inline]
fn clamp_byte(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.clamp(0.0, 255.0).round() as u8
    }
}
