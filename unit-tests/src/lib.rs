//! End-to-end scenarios across the color model and the preset compiler.
