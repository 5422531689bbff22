//! Glyphsheet
//!
//! Bitmap fonts from sprite sheets. The member crates do the work, this crate bundles them and
//! hosts the command line tools.

pub use glyphsheet_config as config;
pub use glyphsheet_interface as interface;
pub use glyphsheet_shared as shared;
pub use glyphsheet_spritesheet as spritesheet;

pub mod prelude;
