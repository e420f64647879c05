//! Device-class command shaping policy
//!
//! Quirks live in a table keyed by [`DeviceClass`] so a new class only needs
//! a new entry here, not a change to the compiler.

use crate::device::DeviceClass;

/// Command shaping rules for one device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceQuirks {
    /// Whether a transition may accompany an effect
    pub transition_with_effect: bool,
    /// Whether a plain rgb command must also select the baseline solid
    /// effect, for devices that otherwise keep animating the previous one
    pub solid_effect_with_rgb: bool,
}

impl DeviceQuirks {
    /// No special handling.
    pub const NONE: Self = Self {
        transition_with_effect: true,
        solid_effect_with_rgb: false,
    };

    /// Individually addressable LED controllers.
    pub const ADDRESSABLE: Self = Self {
        transition_with_effect: false,
        solid_effect_with_rgb: true,
    };
}

impl Default for DeviceQuirks {
    fn default() -> Self {
        Self::NONE
    }
}

/// Quirks per device class. Classes without an entry get [`DeviceQuirks::NONE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuirkTable {
    entries: Vec<(DeviceClass, DeviceQuirks)>,
}

impl QuirkTable {
    /// Table without any entries.
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the quirks of `class`, replacing an existing entry.
    #[must_use]
    pub fn with(mut self, class: DeviceClass, quirks: DeviceQuirks) -> Self {
        match self.entries.iter_mut().find(|(c, _)| *c == class) {
            Some(entry) => entry.1 = quirks,
            None => self.entries.push((class, quirks)),
        }
        self
    }

    pub fn lookup(&self, class: DeviceClass) -> DeviceQuirks {
        self.entries
            .iter()
            .find(|(c, _)| *c == class)
            .map(|(_, quirks)| *quirks)
            .unwrap_or_default()
    }
}

impl Default for QuirkTable {
    fn default() -> Self {
        Self::empty()
            .with(DeviceClass::Generic, DeviceQuirks::NONE)
            .with(DeviceClass::QuirkyAddressable, DeviceQuirks::ADDRESSABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_shapes_addressable_devices() {
        let table = QuirkTable::default();
        assert_eq!(table.lookup(DeviceClass::Generic), DeviceQuirks::NONE);
        assert_eq!(
            table.lookup(DeviceClass::QuirkyAddressable),
            DeviceQuirks::ADDRESSABLE
        );
    }

    #[test]
    fn entries_can_be_replaced() {
        let table = QuirkTable::default().with(DeviceClass::QuirkyAddressable, DeviceQuirks::NONE);
        assert_eq!(table.lookup(DeviceClass::QuirkyAddressable), DeviceQuirks::NONE);
        assert_eq!(QuirkTable::empty().lookup(DeviceClass::QuirkyAddressable), DeviceQuirks::NONE);
    }
}
