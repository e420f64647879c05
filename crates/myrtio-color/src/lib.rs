//! Color model for the light dashboard
//!
//! Layers:
//! - `space` - stateless numeric conversions (RGB, HS, xy, kelvin, mired, hex)
//! - `value` - [`ColorValue`], a single authoritative color representation
//! - `css` - textual color parsing ([`CssColor`])
//! - `alpha` - [`AlphaColorModel`], opacity over any textual color
//! - `resolver` - [`SymbolResolver`] for theme references
//!
//! Nothing in this crate panics or returns errors on malformed input: values
//! are clamped and unparseable strings fall through to `None` or identity.

pub mod alpha;
pub mod css;
pub mod named;
pub mod resolver;
pub mod space;
pub mod value;

use smart_leds::RGB8;

pub type Rgb = RGB8;

pub use alpha::AlphaColorModel;
pub use css::{CssColor, is_valid_color};
pub use resolver::{MapResolver, NoopResolver, SymbolResolver};
pub use value::{ColorValue, Hs, Xy};
