//! Named color catalogue
//!
//! A fixed subset of the CSS named colors accepted by the color pickers.

use crate::Rgb;

/// Catalogue sorted by name for binary search.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("aqua", 0x00FFFF),
    ("black", 0x000000),
    ("blue", 0x0000FF),
    ("brown", 0xA52A2A),
    ("coral", 0xFF7F50),
    ("crimson", 0xDC143C),
    ("cyan", 0x00FFFF),
    ("darkblue", 0x00008B),
    ("darkgreen", 0x006400),
    ("darkorange", 0xFF8C00),
    ("darkred", 0x8B0000),
    ("deeppink", 0xFF1493),
    ("deepskyblue", 0x00BFFF),
    ("fuchsia", 0xFF00FF),
    ("gold", 0xFFD700),
    ("gray", 0x808080),
    ("green", 0x008000),
    ("grey", 0x808080),
    ("hotpink", 0xFF69B4),
    ("indigo", 0x4B0082),
    ("ivory", 0xFFFFF0),
    ("khaki", 0xF0E68C),
    ("lavender", 0xE6E6FA),
    ("lightblue", 0xADD8E6),
    ("lightgreen", 0x90EE90),
    ("lime", 0x00FF00),
    ("magenta", 0xFF00FF),
    ("maroon", 0x800000),
    ("navy", 0x000080),
    ("olive", 0x808000),
    ("orange", 0xFFA500),
    ("orchid", 0xDA70D6),
    ("pink", 0xFFC0CB),
    ("purple", 0x800080),
    ("red", 0xFF0000),
    ("salmon", 0xFA8072),
    ("silver", 0xC0C0C0),
    ("skyblue", 0x87CEEB),
    ("tan", 0xD2B48C),
    ("teal", 0x008080),
    ("tomato", 0xFF6347),
    ("turquoise", 0x40E0D0),
    ("violet", 0xEE82EE),
    ("wheat", 0xF5DEB3),
    ("white", 0xFFFFFF),
    ("yellow", 0xFFFF00),
];

/// Look up a named color, case-insensitively.
pub fn lookup(name: &str) -> Option<Rgb> {
    let name = name.to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by(|(candidate, _)| (*candidate).cmp(name.as_str()))
        .ok()
        .map(|index| rgb_from_u32(NAMED_COLORS[index].1))
}

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_is_sorted() {
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("Red"), Some(Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(lookup("DeepSkyBlue"), Some(rgb_from_u32(0x00BFFF)));
        assert_eq!(lookup("notacolor"), None);
    }
}
