//! In-memory Typst world used for report rendering

pub mod fonts;
pub mod virtual_world;

pub use fonts::{global_font_cache, FontCache};
pub use virtual_world::VirtualWorld;
