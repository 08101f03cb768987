//! Rayon row-parallel scan (feature-gated).
//!
//! Rows of the correlation surface are independent, so each thread scans a
//! band of rows with the scalar kernel and the per-row winners merge with the
//! same comparator the serial scan uses. The outcome is identical to
//! [`scan_best`](super::scan::scan_best) by construction.

use crate::matcher::scan::{peak_cmp_desc, scan_row, Peak};
use crate::template::TemplatePlan;
use crate::ImageView;
use rayon::prelude::*;

/// Parallel scan over all alignments; same result as the scalar scan.
pub(crate) fn scan_best_par(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    min_window_var: f32,
) -> Option<Peak> {
    debug_assert!(image.width() >= plan.width() && image.height() >= plan.height());
    let max_x = image.width() - plan.width();
    let max_y = image.height() - plan.height();

    (0..=max_y)
        .into_par_iter()
        .filter_map(|y| scan_row(image, plan, y, max_x, min_window_var))
        .min_by(peak_cmp_desc)
}
