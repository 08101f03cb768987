//! Correlation matcher: decides whether and where a template appears.
//!
//! The matcher is pure. It holds a precomputed [`TemplatePlan`] and a
//! [`MatchConfig`], reads the screenshot it is given, and returns a tagged
//! [`MatchOutcome`]. Identical inputs always produce identical outcomes, and
//! independent callers can match concurrently because nothing is shared
//! mutable.

use crate::template::{Template, TemplatePlan};
use crate::trace::{trace_event, trace_span};
use crate::util::{RukuliError, RukuliResult};
use crate::ImageView;

pub(crate) mod scan;

#[cfg(feature = "rayon")]
pub(crate) mod rayon;

/// Default match threshold; a window must correlate strictly above it.
pub const DEFAULT_THRESHOLD: f32 = 0.90;

/// A located template occurrence.
///
/// `(x, y)` is the **center** of the matched region: the top-left corner of
/// the best-scoring window plus half the template width and height. The
/// center is what a pointer consumer wants to click, and it is the one and
/// only anchor convention this crate reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Center column of the matched region, in screenshot coordinates.
    pub x: u32,
    /// Center row of the matched region, in screenshot coordinates.
    pub y: u32,
    /// Correlation confidence in `[0, 1]`.
    pub score: f32,
}

/// Result of one matching attempt. No partial states.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchOutcome {
    /// The best window scored strictly above the threshold.
    Found(Match),
    /// No window scored above the threshold.
    NotFound,
}

impl MatchOutcome {
    /// Returns the match if one was found.
    pub fn found(&self) -> Option<Match> {
        match self {
            MatchOutcome::Found(m) => Some(*m),
            MatchOutcome::NotFound => None,
        }
    }

    /// True when a match was found.
    pub fn is_found(&self) -> bool {
        matches!(self, MatchOutcome::Found(_))
    }
}

/// Matching knobs.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    /// Score a window must strictly exceed to count as found.
    pub threshold: f32,
    /// Windows with variance at or below this are not candidates.
    pub min_window_var: f32,
    /// Use the rayon row-parallel scan (no-op without the `rayon` feature).
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_window_var: 1e-6,
            parallel: false,
        }
    }
}

/// Reusable matcher for one template.
pub struct Matcher {
    plan: TemplatePlan,
    cfg: MatchConfig,
}

impl Matcher {
    /// Builds a matcher with the default configuration.
    pub fn new(template: &Template) -> RukuliResult<Self> {
        let plan = TemplatePlan::from_view(template.view())?;
        Ok(Self {
            plan,
            cfg: MatchConfig::default(),
        })
    }

    /// Replaces the configuration, validating the threshold range.
    pub fn with_config(mut self, cfg: MatchConfig) -> RukuliResult<Self> {
        validate_threshold(cfg.threshold)?;
        self.cfg = cfg;
        Ok(self)
    }

    /// Replaces just the threshold.
    pub fn with_threshold(self, threshold: f32) -> RukuliResult<Self> {
        let cfg = MatchConfig {
            threshold,
            ..self.cfg
        };
        self.with_config(cfg)
    }

    /// Returns the configured threshold.
    pub fn threshold(&self) -> f32 {
        self.cfg.threshold
    }

    /// Returns the template dimensions this matcher was built for.
    pub fn template_size(&self) -> (usize, usize) {
        (self.plan.width(), self.plan.height())
    }

    /// Runs one matching attempt against a screenshot.
    ///
    /// Fails fast with [`RukuliError::TemplateTooLarge`] when the template
    /// exceeds the screenshot in either dimension; that is a caller bug, not
    /// a `NotFound`.
    pub fn find(&self, image: ImageView<'_>) -> RukuliResult<MatchOutcome> {
        let tpl_width = self.plan.width();
        let tpl_height = self.plan.height();
        let img_width = image.width();
        let img_height = image.height();
        if tpl_width > img_width || tpl_height > img_height {
            return Err(RukuliError::TemplateTooLarge {
                tpl_width,
                tpl_height,
                img_width,
                img_height,
            });
        }

        let _span = trace_span!("match", img_w = img_width, img_h = img_height).entered();

        #[cfg(feature = "rayon")]
        let best = if self.cfg.parallel {
            self::rayon::scan_best_par(image, &self.plan, self.cfg.min_window_var)
        } else {
            scan::scan_best(image, &self.plan, self.cfg.min_window_var)
        };
        #[cfg(not(feature = "rayon"))]
        let best = scan::scan_best(image, &self.plan, self.cfg.min_window_var);

        let outcome = match best {
            Some(peak) if peak.score > self.cfg.threshold => {
                MatchOutcome::Found(Match {
                    x: (peak.x + tpl_width / 2) as u32,
                    y: (peak.y + tpl_height / 2) as u32,
                    score: peak.score,
                })
            }
            _ => MatchOutcome::NotFound,
        };

        trace_event!("match_done", found = outcome.is_found());
        Ok(outcome)
    }
}

/// One-shot convenience: match `template` against `image` at `threshold`.
///
/// Builds a throwaway plan; use [`Matcher`] when matching the same template
/// repeatedly.
pub fn match_template(
    image: ImageView<'_>,
    template: &Template,
    threshold: f32,
) -> RukuliResult<MatchOutcome> {
    validate_threshold(threshold)?;
    let matcher = Matcher::new(template)?.with_threshold(threshold)?;
    matcher.find(image)
}

fn validate_threshold(threshold: f32) -> RukuliResult<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(RukuliError::ThresholdOutOfRange { threshold });
    }
    Ok(())
}
