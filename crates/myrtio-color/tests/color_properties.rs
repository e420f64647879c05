//! Whole-range properties of the color model.

use myrtio_color::space::{self, D65_WHITE_POINT};
use myrtio_color::{AlphaColorModel, Hs, NoopResolver, Rgb};

// -----------------------------------------------------------------------------
// Hue/saturation round trips
// -----------------------------------------------------------------------------

#[test]
fn pure_primaries_are_exact() {
    assert_eq!(space::rgb_to_hs(Rgb { r: 255, g: 0, b: 0 }), Hs::new(0, 100));
    assert_eq!(space::rgb_to_hs(Rgb { r: 0, g: 255, b: 0 }), Hs::new(120, 100));
    assert_eq!(space::rgb_to_hs(Rgb { r: 0, g: 0, b: 255 }), Hs::new(240, 100));

    for primary in [
        Rgb { r: 255, g: 0, b: 0 },
        Rgb { r: 0, g: 255, b: 0 },
        Rgb { r: 0, g: 0, b: 255 },
    ] {
        let hs = space::rgb_to_hs(primary);
        assert_eq!(space::hs_to_rgb(f64::from(hs.h), f64::from(hs.s)), primary);
    }
}

#[test]
fn full_value_colors_survive_hs_roundtrip() {
    // Integer hue and saturation bound the error to a few channel steps.
    for a in 0..=255u8 {
        for b in (0..=255u8).step_by(3) {
            for rgb in [
                Rgb { r: 255, g: a, b },
                Rgb { r: a, g: 255, b },
                Rgb { r: a, g: b, b: 255 },
            ] {
                let hs = space::rgb_to_hs(rgb);
                let back = space::hs_to_rgb(f64::from(hs.h), f64::from(hs.s));
                let diff = [
                    rgb.r.abs_diff(back.r),
                    rgb.g.abs_diff(back.g),
                    rgb.b.abs_diff(back.b),
                ];
                assert!(
                    diff.iter().all(|d| *d <= 3),
                    "{rgb:?} -> {hs:?} -> {back:?}"
                );
            }
        }
    }
}

#[test]
fn hue_and_saturation_stay_in_range() {
    for r in (0..=255u8).step_by(15) {
        for g in (0..=255u8).step_by(15) {
            for b in (0..=255u8).step_by(15) {
                let hs = space::rgb_to_hs(Rgb { r, g, b });
                assert!(hs.h < 360);
                assert!(hs.s <= 100);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Chromaticity
// -----------------------------------------------------------------------------

#[test]
fn black_chromaticity_falls_back_to_d65() {
    let xy = space::rgb_to_xy(Rgb { r: 0, g: 0, b: 0 });
    assert_eq!(xy, D65_WHITE_POINT);
    assert_eq!((xy.x, xy.y), (0.3127, 0.3290));
}

#[test]
fn in_gamut_colors_survive_xy_roundtrip_at_full_brightness() {
    for rgb in [
        Rgb { r: 255, g: 255, b: 255 },
        Rgb { r: 255, g: 0, b: 0 },
        Rgb { r: 0, g: 0, b: 255 },
    ] {
        let xy = space::rgb_to_xy(rgb);
        let luminance = {
            let lin = |c: u8| {
                let c = f64::from(c) / 255.0;
                if c <= 0.04045 {
                    c / 12.92
                } else {
                    ((c + 0.055) / 1.055).powf(2.4)
                }
            };
            0.2126 * lin(rgb.r) + 0.7152 * lin(rgb.g) + 0.0722 * lin(rgb.b)
        };
        let back = space::xy_to_rgb(xy.x, xy.y, luminance);
        let diff = [
            rgb.r.abs_diff(back.r),
            rgb.g.abs_diff(back.g),
            rgb.b.abs_diff(back.b),
        ];
        assert!(diff.iter().all(|d| *d <= 2), "{rgb:?} -> {xy:?} -> {back:?}");
    }
}

#[test]
fn xy_components_are_rounded_to_four_places() {
    let xy = space::rgb_to_xy(Rgb { r: 12, g: 200, b: 99 });
    assert_eq!((xy.x * 10_000.0).round() / 10_000.0, xy.x);
    assert_eq!((xy.y * 10_000.0).round() / 10_000.0, xy.y);
}

// -----------------------------------------------------------------------------
// Hex and alpha
// -----------------------------------------------------------------------------

#[test]
fn hex_roundtrip_is_exact() {
    for value in (0..=0xFF_FF_FFu32).step_by(0x01_03_07) {
        let rgb = myrtio_color::named::rgb_from_u32(value);
        let hex = space::rgb_to_hex(rgb);
        assert_eq!(space::hex_to_rgb(&hex), Some(rgb));
        assert_eq!(space::hex_to_rgb(&hex.to_uppercase()), Some(rgb));
    }
}

#[test]
fn alpha_roundtrip_for_hex_and_rgb_bases() {
    let model = AlphaColorModel::new(NoopResolver);
    for base in ["#000000", "#ffffff", "#12ab9c", "rgb(0, 0, 0)", "rgb(255, 128, 7)"] {
        for alpha in 0..=100u8 {
            let composed = model.apply_alpha(base, alpha);
            assert_eq!(model.extract_alpha(&composed), alpha, "{composed}");
        }
        assert_eq!(model.apply_alpha(base, 100), base);
        assert_eq!(model.apply_alpha(base, 0), "transparent");
    }
}

#[test]
fn documented_alpha_examples() {
    let model = AlphaColorModel::new(NoopResolver);
    assert_eq!(model.extract_alpha("transparent"), 0);
    assert_eq!(model.extract_alpha("#ff0000"), 100);
    assert_eq!(model.extract_alpha("rgba(1,2,3,0.42)"), 42);
}
