//! Display resolution sources.
//!
//! [`DpiSource`] is the platform seam of the atlas builder. A live
//! `winit::window::Window` reports `BASE_DPI * scale_factor`; headless callers
//! (export, tests) pass a [`FixedDpi`].

pub use vistext_fonts::Dpi;

/// Logical DPI that corresponds to a scale factor of 1.0.
pub const BASE_DPI: f64 = 96.0;

/// Platform query for the display resolution the atlas is built for.
pub trait DpiSource {
    fn display_dpi(&self) -> Dpi;
}

/// A resolution fixed up front (config override, headless export).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDpi(pub Dpi);

impl DpiSource for FixedDpi {
    fn display_dpi(&self) -> Dpi {
        self.0
    }
}

impl Default for FixedDpi {
    fn default() -> Self {
        Self(Dpi::uniform(BASE_DPI as u32))
    }
}

/// DPI for a given window scale factor.
pub fn dpi_for_scale_factor(scale_factor: f64) -> Dpi {
    let dpi = (BASE_DPI * scale_factor).round().max(1.0) as u32;
    Dpi::uniform(dpi)
}

impl DpiSource for winit::window::Window {
    fn display_dpi(&self) -> Dpi {
        dpi_for_scale_factor(self.scale_factor())
    }
}
