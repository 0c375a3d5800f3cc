//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields.

pub fn font_size() -> u32 {
    12
}

pub fn hinting() -> bool {
    true
}
