use std::fmt;

use opencv::{core, prelude::*};

use crate::error::Result;

/// One BGR image captured from the camera.
///
/// Owned by the loop iteration that read it and dropped after display.
pub struct Frame {
    mat: Mat,
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Frame {
    pub fn from_mat(mat: Mat) -> Self {
        Self { mat }
    }

    /// Builds a frame from packed BGR bytes, row-major.
    #[cfg(test)]
    pub fn from_bgr(width: i32, height: i32, pixels: &[u8]) -> Result<Self> {
        let mut mat = Mat::new_rows_cols_with_default(
            height,
            width,
            core::CV_8UC3,
            core::Scalar::all(0.0),
        )?;
        for y in 0..height {
            for x in 0..width {
                let offset = ((y * width + x) * 3) as usize;
                *mat.at_2d_mut::<core::Vec3b>(y, x)? = core::VecN([
                    pixels[offset],
                    pixels[offset + 1],
                    pixels[offset + 2],
                ]);
            }
        }
        Ok(Self { mat })
    }

    #[cfg(test)]
    pub fn pixel(&self, x: i32, y: i32) -> Result<[u8; 3]> {
        Ok(self.mat.at_2d::<core::Vec3b>(y, x)?.0)
    }

    pub fn width(&self) -> i32 {
        self.mat.cols()
    }

    pub fn height(&self) -> i32 {
        self.mat.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.mat.empty()
    }

    /// Left-right flip about the vertical axis.
    pub fn mirrored(&self) -> Result<Frame> {
        let mut flipped = Mat::default();
        core::flip(&self.mat, &mut flipped, 1)?;
        Ok(Frame { mat: flipped })
    }

    pub fn as_mat(&self) -> &Mat {
        &self.mat
    }

    pub fn as_mat_mut(&mut self) -> &mut Mat {
        &mut self.mat
    }
}
