//! Template storage and match-plan precomputation.

use crate::image::{ImageBuffer, ImageView};
use crate::util::RukuliResult;

/// Variance below this treats the template as flat (uniform color).
const FLAT_VARIANCE_EPS: f64 = 1e-8;

/// Owned grayscale template image.
///
/// A template is only ever read by the matcher; the caller owns it and may
/// match it against any number of screenshots.
pub struct Template {
    img: ImageBuffer,
}

impl Template {
    /// Creates a template from a contiguous grayscale buffer.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> RukuliResult<Self> {
        let img = ImageBuffer::new(data, width, height)?;
        Ok(Self { img })
    }

    /// Wraps an existing frame as a template.
    pub fn from_buffer(img: ImageBuffer) -> Self {
        Self { img }
    }

    /// Loads a template from disk, converting to grayscale.
    #[cfg(feature = "image-io")]
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> RukuliResult<Self> {
        let img = crate::image::io::load_gray_image(path)?;
        Ok(Self { img })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.img.width()
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.img.height()
    }

    /// Returns a borrowed view of the template data.
    pub fn view(&self) -> ImageView<'_> {
        self.img.view()
    }
}

/// Precomputed statistics for correlating one template against many frames.
///
/// For a textured template this holds the zero-mean buffer `t - mean(t)` and
/// its Euclidean norm, so a window score costs one dot product plus the
/// window's own running sums. A flat (zero-variance) template has no defined
/// correlation; the plan records that state and the scan falls back to a
/// mean-absolute-difference score instead of dividing by zero.
pub struct TemplatePlan {
    width: usize,
    height: usize,
    mean: f32,
    zero_mean: Vec<f32>,
    norm: f32,
    flat: bool,
}

impl TemplatePlan {
    /// Builds a plan from a template view.
    pub fn from_view(tpl: ImageView<'_>) -> RukuliResult<Self> {
        let width = tpl.width();
        let height = tpl.height();
        let count = (width * height) as f64;

        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).expect("template row within bounds");
            for &value in row {
                let v = value as f64;
                sum += v;
                sum_sq += v * v;
            }
        }

        let mean_f64 = sum / count;
        let variance = sum_sq / count - mean_f64 * mean_f64;
        let flat = variance <= FLAT_VARIANCE_EPS;
        let mean = mean_f64 as f32;

        let mut zero_mean = Vec::with_capacity(width * height);
        let mut norm_sq = 0.0f64;
        for y in 0..height {
            let row = tpl.row(y).expect("template row within bounds");
            for &value in row {
                let zm = value as f32 - mean;
                norm_sq += (zm as f64) * (zm as f64);
                zero_mean.push(zm);
            }
        }

        Ok(Self {
            width,
            height,
            mean,
            zero_mean,
            norm: norm_sq.sqrt() as f32,
            flat,
        })
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the mean template intensity.
    pub fn mean(&self) -> f32 {
        self.mean
    }

    /// Returns the zero-mean template buffer in row-major order.
    pub(crate) fn zero_mean(&self) -> &[f32] {
        &self.zero_mean
    }

    /// Returns `sqrt(sum((t - mean)^2))`, zero for flat templates.
    pub(crate) fn norm(&self) -> f32 {
        self.norm
    }

    /// True when the template has no intensity variation.
    pub fn is_flat(&self) -> bool {
        self.flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn plan_detects_flat_template() {
        let data = vec![42u8; 16];
        let view = ImageView::from_slice(&data, 4, 4).unwrap();
        let plan = TemplatePlan::from_view(view).unwrap();
        assert!(plan.is_flat());
        assert!((plan.mean() - 42.0).abs() < 1e-5);
        assert_eq!(plan.norm(), 0.0);
    }

    #[test]
    fn plan_zero_mean_sums_to_zero() {
        let data: Vec<u8> = (0u8..16).collect();
        let view = ImageView::from_slice(&data, 4, 4).unwrap();
        let plan = TemplatePlan::from_view(view).unwrap();
        assert!(!plan.is_flat());
        let total: f32 = plan.zero_mean().iter().sum();
        assert!(total.abs() < 1e-3);
        assert!(plan.norm() > 0.0);
    }
}
