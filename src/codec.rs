//! Decoding of the source images and transparent PNG export
use crate::{Bitmap, Error, Image, ImageOwned, RGBA, Shape, Size};
use std::{borrow::Cow, io::Write, path::Path};

/// Suffix appended to the exported file name
pub const EXPORT_SUFFIX: &str = "-faded";

impl From<::image::ImageError> for Error {
    fn from(error: ::image::ImageError) -> Self {
        match error {
            ::image::ImageError::Unsupported(_) => Self::UnsupportedFormat,
            error => Self::CorruptData {
                reason: error.to_string(),
            },
        }
    }
}

impl From<png::EncodingError> for Error {
    fn from(error: png::EncodingError) -> Self {
        Self::EncodeFailure {
            reason: error.to_string(),
        }
    }
}

/// Decode image, format is detected from the content
///
/// Supports PNG, JPEG, GIF (first frame), WebP and BMP. Every color type is
/// converted to 8-bit straight RGBA, opaque formats get alpha of 255.
pub fn decode(bytes: &[u8]) -> Result<Bitmap, Error> {
    let _span = tracing::debug_span!("[decode]", bytes = bytes.len()).entered();
    let format = ::image::guess_format(bytes)?;
    let decoded = ::image::load_from_memory_with_format(bytes, format)?.to_rgba8();
    let size = Size::new(decoded.width() as usize, decoded.height() as usize);
    let data = bytemuck::cast_slice::<u8, RGBA>(decoded.as_raw()).to_vec();
    let image = ImageOwned::from_vec(size, data)?;
    tracing::debug!(?format, width = size.width, height = size.height, "[decoded]");
    Ok(image)
}

/// Encode image as 8-bit RGBA PNG
pub fn encode<I>(image: I) -> Result<Vec<u8>, Error>
where
    I: Image<Pixel = RGBA>,
{
    let mut output = Vec::new();
    write_png(image, &mut output)?;
    Ok(output)
}

/// Write image as 8-bit RGBA PNG into the `writer`
pub fn write_png<I, W>(image: I, writer: W) -> Result<(), Error>
where
    I: Image<Pixel = RGBA>,
    W: Write,
{
    let size = image.size();
    let _span =
        tracing::debug_span!("[encode]", width = size.width, height = size.height).entered();
    let invalid = || Error::InvalidDimensions {
        width: size.width,
        height: size.height,
    };
    if size.is_empty() {
        return Err(invalid());
    }
    let width = u32::try_from(size.width).map_err(|_| invalid())?;
    let height = u32::try_from(size.height).map_err(|_| invalid())?;

    let pixels: Cow<'_, [RGBA]> = match image.data().get(..size.width * size.height) {
        Some(data) if image.shape() == Shape::contiguous(size) => Cow::Borrowed(data),
        _ => Cow::Owned(ImageOwned::from_image(&image)?.to_vec()),
    };

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(bytemuck::cast_slice(&pixels[..]))?;
    writer.finish()?;
    Ok(())
}

/// Name of the exported file derived from the name of the original one
///
/// Last extension is replaced with [`EXPORT_SUFFIX`] followed by `.png`,
/// directories are dropped.
pub fn export_file_name(original: impl AsRef<Path>) -> String {
    let original = original.as_ref();
    let stem = original
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or(Cow::Borrowed("image"));
    format!("{}{}.png", stem, EXPORT_SUFFIX)
}
