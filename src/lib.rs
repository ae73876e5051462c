//! Small library that fades raster images along a linear or radial gradient.
//!
//! Main features:
//!  - Linear (any angle) and radial alpha fades with a configurable transition zone
//!  - Color channels are preserved, only alpha is scaled
//!  - Decoding of common raster formats and transparent PNG export (`png` feature)
//!  - Gradient parameters (de)serialization (`serde` feature)
//!  - Row parallel compositing (`rayon` feature)
//!
//! ```
//! use alphafade::*;
//!
//! let image: Bitmap = ImageOwned::new_with(Size::new(4, 4), |_, _| RGBA::new(255, 0, 0, 255));
//! let faded = composite(&image, &GradParams::linear(180.0).with_fade(0.0, 100.0))?;
//! assert_eq!(faded.size(), image.size());
//! # Ok::<(), alphafade::Error>(())
//! ```
#![deny(warnings)]

#[cfg(feature = "png")]
pub mod codec;
mod color;
mod compose;
mod error;
mod geometry;
mod grad;
mod image;
mod utils;

pub use color::RGBA;
pub use compose::{alpha_mask, composite, composite_into};
pub use crate::image::{Bitmap, Image, ImageIter, ImageMut, ImageOwned, ImageRef, Shape};
pub use error::Error;
pub use geometry::{Point, Scalar, Size};
pub use grad::{FadeProfile, FadeZone, GradAxis, GradParams, GradShape};
pub use utils::clamp;
