//! Scalar scan over the correlation surface.
//!
//! The surface has `(W - w + 1) x (H - h + 1)` cells, one per admissible
//! template alignment. Only the best cell survives; ties resolve to the
//! row-major first occurrence so results are deterministic.

use crate::template::TemplatePlan;
use crate::util::math::clamp_unit;
use crate::ImageView;
use std::cmp::Ordering;

/// Best-alignment candidate in screenshot coordinates (top-left anchor).
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Peak {
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) score: f32,
}

/// Orders peaks by descending score, then ascending `(y, x)`.
///
/// `Ordering::Less` means "ranks ahead of". Using the same comparator in the
/// serial scan and the parallel merge keeps the two paths bit-identical.
pub(crate) fn peak_cmp_desc(a: &Peak, b: &Peak) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Scans every alignment and returns the best peak, if any cell scored.
///
/// The caller has already checked that the template fits inside the image.
pub(crate) fn scan_best(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    min_window_var: f32,
) -> Option<Peak> {
    debug_assert!(image.width() >= plan.width() && image.height() >= plan.height());
    let max_x = image.width() - plan.width();
    let max_y = image.height() - plan.height();

    let mut best: Option<Peak> = None;
    for y in 0..=max_y {
        if let Some(peak) = scan_row(image, plan, y, max_x, min_window_var) {
            match &best {
                Some(current) if peak_cmp_desc(&peak, current) != Ordering::Less => {}
                _ => best = Some(peak),
            }
        }
    }
    best
}

/// Scans all alignments in row `y` and returns the row's best peak.
pub(crate) fn scan_row(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    y: usize,
    max_x: usize,
    min_window_var: f32,
) -> Option<Peak> {
    let mut best: Option<Peak> = None;
    for x in 0..=max_x {
        let score = if plan.is_flat() {
            Some(score_flat_at(image, plan, x, y))
        } else {
            score_zncc_at(image, plan, x, y, min_window_var)
        };
        if let Some(score) = score {
            let peak = Peak { x, y, score };
            match &best {
                Some(current) if peak_cmp_desc(&peak, current) != Ordering::Less => {}
                _ => best = Some(peak),
            }
        }
    }
    best
}

/// Normalized cross-correlation at one alignment, clamped to `[0, 1]`.
///
/// Returns `None` for a zero-variance window: correlation is undefined there
/// and the cell is simply not a candidate.
fn score_zncc_at(
    image: ImageView<'_>,
    plan: &TemplatePlan,
    x: usize,
    y: usize,
    min_window_var: f32,
) -> Option<f32> {
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    let t_prime = plan.zero_mean();
    let n = (tpl_width * tpl_height) as f32;

    let mut dot = 0.0f32;
    let mut sum_i = 0.0f32;
    let mut sum_i2 = 0.0f32;

    for ty in 0..tpl_height {
        let img_row = image.row(y + ty).expect("row within bounds for scan");
        let base = ty * tpl_width;
        for tx in 0..tpl_width {
            let value = img_row[x + tx] as f32;
            dot += t_prime[base + tx] * value;
            sum_i += value;
            sum_i2 += value * value;
        }
    }

    let var_i = sum_i2 - (sum_i * sum_i) / n;
    if var_i <= min_window_var {
        return None;
    }

    let score = dot / (plan.norm() * var_i.sqrt());
    if score.is_finite() {
        Some(clamp_unit(score))
    } else {
        None
    }
}

/// Fallback score for flat templates: `1 - mean(|window - template|) / 255`.
///
/// An exact match scores 1.0 and the score degrades linearly with intensity
/// distance, so the decision stays deterministic where ZNCC is undefined.
fn score_flat_at(image: ImageView<'_>, plan: &TemplatePlan, x: usize, y: usize) -> f32 {
    let tpl_width = plan.width();
    let tpl_height = plan.height();
    let value = plan.mean();
    let n = (tpl_width * tpl_height) as f32;

    let mut abs_diff = 0.0f32;
    for ty in 0..tpl_height {
        let img_row = image.row(y + ty).expect("row within bounds for scan");
        for tx in 0..tpl_width {
            abs_diff += (img_row[x + tx] as f32 - value).abs();
        }
    }

    clamp_unit(1.0 - abs_diff / (n * 255.0))
}
