//! Degenerate-template behavior: a zero-variance (flat) template has no
//! defined normalized correlation, so matching falls back to a deterministic
//! mean-absolute-difference score instead of surfacing a numeric fault.

use rukuli::{match_template, ImageView, MatchOutcome, Template};

/// 100x100 uniform background with a 20x20 block of a distinct value at
/// (40, 40); the template is that same block. The block must be found with a
/// perfect score, reported at the window's center.
#[test]
fn flat_block_in_uniform_background_is_found_exactly() {
    let img_width = 100;
    let img_height = 100;
    let background = 30u8;
    let block_value = 200u8;

    let mut image = vec![background; img_width * img_height];
    for y in 40..60 {
        for x in 40..60 {
            image[y * img_width + x] = block_value;
        }
    }

    let template = Template::new(vec![block_value; 20 * 20], 20, 20).unwrap();
    let view = ImageView::from_slice(&image, img_width, img_height).unwrap();

    let m = match_template(view, &template, 0.9)
        .unwrap()
        .found()
        .expect("block must be found");
    assert_eq!(m.x, 50, "center of the (40, 40) window");
    assert_eq!(m.y, 50);
    assert_eq!(m.score, 1.0);
}

#[test]
fn flat_template_far_from_background_is_not_found() {
    let image = vec![10u8; 64 * 64];
    let template = Template::new(vec![250u8; 8 * 8], 8, 8).unwrap();
    let view = ImageView::from_slice(&image, 64, 64).unwrap();

    let outcome = match_template(view, &template, 0.9).unwrap();
    assert_eq!(outcome, MatchOutcome::NotFound);
}

/// Every alignment of a flat template over an identical flat screenshot ties
/// at score 1.0; the row-major first occurrence wins deterministically.
#[test]
fn all_tied_alignments_resolve_to_first_occurrence() {
    let image = vec![5u8; 32 * 32];
    let template = Template::new(vec![5u8; 6 * 4], 6, 4).unwrap();
    let view = ImageView::from_slice(&image, 32, 32).unwrap();

    let m = match_template(view, &template, 0.9)
        .unwrap()
        .found()
        .expect("identical flat content matches everywhere");
    // Window (0, 0) wins the tie; center is half the template size.
    assert_eq!(m.x, 3);
    assert_eq!(m.y, 2);
    assert_eq!(m.score, 1.0);
}

/// A textured template over a flat screenshot: every window has zero
/// variance, correlation is undefined everywhere, and the outcome is a clean
/// NotFound rather than a NaN-driven decision.
#[test]
fn zero_variance_windows_are_not_candidates() {
    let image = vec![128u8; 40 * 40];
    let mut tpl_data = Vec::with_capacity(10 * 10);
    for i in 0..100usize {
        tpl_data.push(((i * 37) % 256) as u8);
    }
    let template = Template::new(tpl_data, 10, 10).unwrap();
    let view = ImageView::from_slice(&image, 40, 40).unwrap();

    let outcome = match_template(view, &template, 0.5).unwrap();
    assert_eq!(outcome, MatchOutcome::NotFound);
}
