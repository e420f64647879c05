//! Color model and lighting preset engine for the light dashboard
//!
//! - [`color`]: color spaces, CSS color strings with alpha, theme references
//! - [`presets`]: presets, device capabilities and per-device command
//!   compilation
//!
//! ```ignore
//! use myrtio_light_engine::prelude::*;
//!
//! let model = AlphaColorModel::new(NoopResolver);
//! let overlay = model.apply_alpha("#ff0000", 40);
//!
//! let preset = Preset::new("reading", "Reading")
//!     .with_entity("light.desk")
//!     .with_brightness(180)
//!     .with_color(ColorSpec::ColorTemp { mired: 370 });
//! let report = PresetCompiler::default().compile_targets(&preset, &devices)?;
//! ```

pub use myrtio_color as color;
pub use myrtio_light_presets as presets;

/// Types most callers need.
pub mod prelude {
    pub use myrtio_color::{
        AlphaColorModel, ColorValue, CssColor, Hs, MapResolver, NoopResolver, Rgb, SymbolResolver,
        Xy,
    };
    pub use myrtio_light_presets::{
        CapabilitySource, ColorMode, ColorSpec, Command, CompileError, CompileReport,
        CompilerConfig, DeviceCapability, DeviceClass, DeviceRef, EffectResolver, Preset,
        PresetCompiler, PresetDraft,
    };
}
