mod native_surface;
mod placeholder;
mod surface;
mod web_surface;
mod web_template;

pub use native_surface::NativeMapSurface;
pub use placeholder::placeholder;
pub use surface::{MapError, MapSurface};
pub use web_surface::WebMapSurface;

/// Coordinates are shown with this many decimals everywhere.
pub const DISPLAY_PRECISION: usize = 6;
