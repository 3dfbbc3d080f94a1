use ::image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A decoded grid of pixels, addressable by column and row.
pub trait PixelImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// The pixel at `(col, row)` packed as `0xAARRGGBB`, or `None` when the
    /// coordinate is outside the grid.
    fn packed(&self, col: u32, row: u32) -> Option<u32>;
}

impl PixelImage for DynamicImage {
    fn width(&self) -> u32 {
        GenericImageView::width(self)
    }

    fn height(&self) -> u32 {
        GenericImageView::height(self)
    }

    fn packed(&self, col: u32, row: u32) -> Option<u32> {
        if !self.in_bounds(col, row) {
            return None;
        }
        let [r, g, b, a] = self.get_pixel(col, row).0;
        Some(u32::from_be_bytes([a, r, g, b]))
    }
}

/// Trait representing either an image or some image data
///
pub trait ImageSource {
    /// Extract an image from the enclosed object
    ///
    fn to_image(&self) -> Result<DynamicImage>;
}

impl ImageSource for Path {
    fn to_image(&self) -> Result<DynamicImage> {
        load(self)
    }
}

impl ImageSource for PathBuf {
    fn to_image(&self) -> Result<DynamicImage> {
        load(self)
    }
}

impl ImageSource for str {
    fn to_image(&self) -> Result<DynamicImage> {
        load(self)
    }
}

impl ImageSource for DynamicImage {
    fn to_image(&self) -> Result<DynamicImage> {
        Ok(self.clone())
    }
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn to_image(&self) -> Result<DynamicImage> {
        (**self).to_image()
    }
}

/// Decode the image file at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        GenericImageView::width(&img),
        GenericImageView::height(&img)
    );
    Ok(img)
}
