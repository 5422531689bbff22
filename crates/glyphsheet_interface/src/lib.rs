//! Interfaces between the glyphsheet crates
//!
//! Fonts are modelled as a narrow capability set (see [`font::Font`]) so sprite-sheet fonts and
//! platform fonts can be handed to the same layout code. Pixel data is reached through
//! [`surface::Surface`] and [`surface::PixelSource`], never through a concrete image type.

pub mod font;
pub mod surface;
