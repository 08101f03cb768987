//! Grayscale image buffers and views.
//!
//! [`ImageBuffer`] is the owned, immutable frame produced by the capture and
//! load collaborators: one `u8` intensity sample per pixel, row-major,
//! `data.len() == width * height`. [`ImageView`] is the borrowed form all
//! matching code operates on. A view carries an explicit stride (elements
//! between row starts), so padded rows and zero-copy sub-regions are both
//! representable; `roi` slices share the backing slice and keep the stride.

use crate::util::{RukuliError, RukuliResult};

#[cfg(feature = "image-io")]
pub mod io;

/// Borrowed 2D grayscale view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> RukuliResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [u8], width: usize, height: usize, stride: usize) -> RukuliResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(RukuliError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the sample at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x).copied()
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }

    /// Returns a zero-copy sub-region view into the same backing buffer.
    pub fn roi(&self, x: usize, y: usize, width: usize, height: usize) -> RukuliResult<Self> {
        if width == 0 || height == 0 {
            return Err(RukuliError::InvalidDimensions { width, height });
        }
        let oob = || RukuliError::RoiOutOfBounds {
            x,
            y,
            width,
            height,
            img_width: self.width,
            img_height: self.height,
        };
        let end_x = x.checked_add(width).ok_or_else(oob)?;
        let end_y = y.checked_add(height).ok_or_else(oob)?;
        if end_x > self.width || end_y > self.height {
            return Err(oob());
        }
        let start = y * self.stride + x;
        ImageView::new(&self.data[start..], width, height, self.stride)
    }

    /// Copies the viewed pixels into a contiguous owned buffer.
    pub fn to_buffer(&self) -> RukuliResult<ImageBuffer> {
        let mut data = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            let row = self.row(y).ok_or(RukuliError::BufferTooSmall {
                needed: y * self.stride + self.width,
                got: self.data.len(),
            })?;
            data.extend_from_slice(row);
        }
        ImageBuffer::new(data, self.width, self.height)
    }
}

/// Owned contiguous grayscale frame. Immutable once constructed.
#[derive(Clone)]
pub struct ImageBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl ImageBuffer {
    /// Creates a frame from a contiguous row-major buffer.
    ///
    /// The buffer length must equal `width * height` exactly.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> RukuliResult<Self> {
        if width == 0 || height == 0 {
            return Err(RukuliError::InvalidDimensions { width, height });
        }
        let needed = width
            .checked_mul(height)
            .ok_or(RukuliError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(RukuliError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(RukuliError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the raw row-major samples.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Returns a borrowed view of the whole frame.
    pub fn view(&self) -> ImageView<'_> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> RukuliResult<usize> {
    if width == 0 || height == 0 {
        return Err(RukuliError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(RukuliError::InvalidStride { width, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(RukuliError::InvalidDimensions { width, height })
}
