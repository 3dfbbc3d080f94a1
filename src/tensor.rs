use crate::error::{Error, Result};
use crate::pixels::PixelImage;

/// Colour channels per pixel. Grayscale and alpha are not supported.
pub const CHANNELS: u32 = 3;

/// Element type tag carried alongside a tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Float,
    /// Any other wire tag, kept verbatim.
    Other(i32),
}

impl DataType {
    /// Wire tag of `DT_FLOAT`.
    pub const FLOAT_TAG: i32 = 1;

    pub fn from_tag(tag: i32) -> Self {
        match tag {
            Self::FLOAT_TAG => DataType::Float,
            other => DataType::Other(other),
        }
    }

    pub fn tag(self) -> i32 {
        match self {
            DataType::Float => Self::FLOAT_TAG,
            DataType::Other(tag) => tag,
        }
    }
}

/// A shaped, flat float buffer exchanged with the prediction service.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub dtype: DataType,
    pub shape: Vec<i64>,
    pub values: Vec<f32>,
}

impl Tensor {
    pub fn floats(shape: Vec<i64>, values: Vec<f32>) -> Self {
        Tensor {
            dtype: DataType::Float,
            shape,
            values,
        }
    }
}

/// Encode an image as a `[1, width, height, 3]` float tensor of raw 0-255
/// channel intensities.
pub fn encode<I: PixelImage + ?Sized>(image: &I) -> Result<Tensor> {
    encode_with(image, |value| value)
}

/// Encode an image, passing every channel value through `preprocessing_fn`.
///
/// Width is the outer loop and height the inner one, and each pixel is read
/// at column = height index, row = width index. Within a pixel the channels
/// are emitted low byte first, so a `0xAARRGGBB` pixel yields blue, green,
/// red. That layout is what the served model expects; a non-square image
/// walks off the grid and is rejected with [`Error::PixelOutOfBounds`].
pub fn encode_with<I, F>(image: &I, preprocessing_fn: F) -> Result<Tensor>
where
    I: PixelImage + ?Sized,
    F: Fn(f32) -> f32,
{
    let (width, height) = (image.width(), image.height());
    let mut values = Vec::with_capacity(width as usize * height as usize * CHANNELS as usize);

    for x in 0..width {
        for y in 0..height {
            let pixel = image.packed(y, x).ok_or(Error::PixelOutOfBounds {
                col: y,
                row: x,
                width,
                height,
            })?;
            for c in 0..CHANNELS {
                let intensity = (pixel >> (c * 8)) & 0xFF;
                values.push(preprocessing_fn(intensity as f32));
            }
        }
    }

    let shape = vec![1, i64::from(width), i64::from(height), i64::from(CHANNELS)];
    Ok(Tensor::floats(shape, values))
}
