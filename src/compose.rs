//! Gradient alpha mask compositing
use crate::{
    Bitmap, Error, FadeProfile, GradAxis, GradParams, Image, ImageMut, ImageOwned, Point, RGBA,
    Scalar, Size,
};

/// Precomputed per image state required to fade a single pixel
#[derive(Debug, Clone, Copy)]
struct Fader {
    axis: GradAxis,
    profile: FadeProfile,
}

impl Fader {
    fn new(size: Size, params: &GradParams) -> Result<Self, Error> {
        if size.is_empty() {
            return Err(Error::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        let axis = GradAxis::new(size, params);
        tracing::debug!(?axis, zone = ?params.zone(), invert = params.invert, "[fader]");
        Ok(Self {
            axis,
            profile: params.profile(),
        })
    }

    /// Gradient offset of the pixel, sampled at its center
    #[inline]
    fn offset(&self, row: usize, col: usize) -> Scalar {
        let point = Point::new(col as Scalar + 0.5, row as Scalar + 0.5);
        self.axis.offset(point)
    }

    #[inline]
    fn factor(&self, row: usize, col: usize) -> Scalar {
        self.profile.factor(self.offset(row, col))
    }

    #[inline]
    fn pixel(&self, row: usize, col: usize, color: RGBA) -> RGBA {
        color.with_alpha(self.profile.apply(color.alpha(), self.offset(row, col)))
    }

    /// Fade single row of pixels in place
    fn row(&self, row: usize, pixels: &mut [RGBA]) {
        for (col, pixel) in pixels.iter_mut().enumerate() {
            *pixel = self.pixel(row, col, *pixel);
        }
    }

    /// Fade contiguous row-major pixel buffer in place
    #[cfg(not(feature = "rayon"))]
    fn rows(&self, width: usize, data: &mut [RGBA]) {
        for (row, pixels) in data.chunks_mut(width).enumerate() {
            self.row(row, pixels);
        }
    }

    /// Fade contiguous row-major pixel buffer in place, rows are processed in parallel
    #[cfg(feature = "rayon")]
    fn rows(&self, width: usize, data: &mut [RGBA]) {
        use rayon::prelude::*;
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, pixels)| self.row(row, pixels));
    }
}

/// Apply gradient fade to the `source` image
///
/// Returns new image of the same size, color channels are copied as is and alpha
/// channel is scaled by the gradient alpha factor. Any numeric parameters are
/// accepted, only images without pixels are rejected.
pub fn composite<I>(source: I, params: &GradParams) -> Result<Bitmap, Error>
where
    I: Image<Pixel = RGBA>,
{
    let size = source.size();
    let _span = tracing::debug_span!(
        "[composite]",
        width = size.width,
        height = size.height,
        shape = %params.shape
    )
    .entered();
    let fader = Fader::new(size, params)?;
    let mut output = ImageOwned::from_image(source)?;
    fader.rows(size.width, output.data_mut());
    Ok(output)
}

/// Apply gradient fade to the `source` image writing result into the `target`
///
/// Allows reusing the same output buffer across repeated renders. `target` must
/// have the same size as the `source`. If either image misses pixels its shape
/// addresses, `InvalidDimensions` is returned and `target` is left partially written.
pub fn composite_into<S, T>(source: S, params: &GradParams, mut target: T) -> Result<(), Error>
where
    S: Image<Pixel = RGBA>,
    T: ImageMut<Pixel = RGBA>,
{
    let size = source.size();
    if target.size() != size {
        let target_size = target.size();
        return Err(Error::InvalidDimensions {
            width: target_size.width,
            height: target_size.height,
        });
    }
    let _span = tracing::debug_span!(
        "[composite_into]",
        width = size.width,
        height = size.height,
        shape = %params.shape
    )
    .entered();
    let fader = Fader::new(size, params)?;
    let invalid = || Error::InvalidDimensions {
        width: size.width,
        height: size.height,
    };
    for row in 0..size.height {
        for col in 0..size.width {
            let color = *source.get(row, col).ok_or_else(invalid)?;
            let pixel = target.get_mut(row, col).ok_or_else(invalid)?;
            *pixel = fader.pixel(row, col, color);
        }
    }
    Ok(())
}

/// Alpha factor of every pixel of the image with the given size
pub fn alpha_mask(size: Size, params: &GradParams) -> Result<ImageOwned<Scalar>, Error> {
    let fader = Fader::new(size, params)?;
    Ok(ImageOwned::new_with(size, |row, col| fader.factor(row, col)))
}
