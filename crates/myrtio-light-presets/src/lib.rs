//! Lighting presets compiled into per-device commands
//!
//! This crate turns a user-defined [`Preset`] into one [`Command`] per target
//! device. It is structured in three layers:
//!
//! - **Domain layer** (`preset`, `device`, `quirks`): presets, device
//!   capability snapshots and the device-class quirk table
//! - **Resolution layer** (`effect`, `compiler`): effect name matching and
//!   command compilation
//! - **Wire layer** (`command`, `wire`): the typed command and its
//!   `light.turn_on` JSON encoding
//!
//! # Example
//!
//! ```ignore
//! use myrtio_light_presets::{ColorSpec, DeviceCapability, Preset, PresetCompiler};
//!
//! let preset = Preset::new("party", "Party")
//!     .with_entity("light.strip")
//!     .with_brightness(200)
//!     .with_color(ColorSpec::Effect("Rainbow".into()));
//! let devices = [DeviceCapability::new("light.strip").with_effects(["colorloop"])];
//!
//! let commands = PresetCompiler::default().compile(&preset, &devices);
//! ```

pub mod command;
pub mod compiler;
pub mod config;
pub mod device;
pub mod effect;
pub mod error;
pub mod preset;
pub mod quirks;
pub mod wire;

pub use command::{ColorParameter, Command, LightParameters};
pub use compiler::{CompileReport, PresetCompiler};
pub use config::CompilerConfig;
pub use device::{CapabilitySource, ColorMode, DeviceCapability, DeviceClass};
pub use effect::{EffectCategory, EffectResolver};
pub use error::{CompileError, ConfigError, WireError};
pub use preset::{ColorSpec, DeviceRef, Preset, PresetDraft};
pub use quirks::{DeviceQuirks, QuirkTable};
