//! High-level automation session (feature `automation`).
//!
//! A [`Session`] composes the three collaborators — screen capture, template
//! loading, and input injection — around the matching-and-polling core:
//! look for `button.png`, wait up to five seconds, click its center. Template
//! names are resolved against a configurable directory prefix, and the
//! default threshold is 0.90. The session owns its collaborators explicitly;
//! there is no process-wide state and no import-time side effect.

use crate::input::{key_from_name, InputDriver, MouseButton};
use crate::matcher::{MatchConfig, MatchOutcome, Matcher, DEFAULT_THRESHOLD};
use crate::screen::PrimaryScreen;
use crate::template::Template;
use crate::trace::trace_event;
use crate::util::{RukuliError, RukuliResult};
use crate::wait::{wait_for_match, WaitOutcome};
use crate::Match;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Screen-driven automation session over one display and one input handle.
pub struct Session {
    screen: PrimaryScreen,
    input: InputDriver,
    template_dir: PathBuf,
    cfg: MatchConfig,
}

impl Session {
    /// Opens the primary display and the platform input facility.
    ///
    /// Template names resolve against the current directory until
    /// [`with_template_dir`](Self::with_template_dir) changes the prefix.
    pub fn new() -> RukuliResult<Self> {
        Ok(Self {
            screen: PrimaryScreen::open()?,
            input: InputDriver::open()?,
            template_dir: PathBuf::from("."),
            cfg: MatchConfig {
                threshold: DEFAULT_THRESHOLD,
                ..MatchConfig::default()
            },
        })
    }

    /// Sets the directory template names are resolved against.
    pub fn with_template_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.template_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets the match threshold for subsequent operations.
    pub fn with_threshold(mut self, threshold: f32) -> RukuliResult<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RukuliError::ThresholdOutOfRange { threshold });
        }
        self.cfg.threshold = threshold;
        Ok(self)
    }

    /// Checks once whether `name` is currently visible.
    pub fn exists(&mut self, name: &str) -> RukuliResult<MatchOutcome> {
        let matcher = self.matcher_for(name)?;
        crate::wait::exists_now(&mut self.screen, &matcher)
    }

    /// Waits up to `timeout` for `name` to appear.
    pub fn wait(&mut self, name: &str, timeout: Duration) -> RukuliResult<WaitOutcome> {
        let matcher = self.matcher_for(name)?;
        wait_for_match(&mut self.screen, &matcher, timeout)
    }

    /// Waits for `name` and clicks `button` at the match center.
    ///
    /// A timeout surfaces as [`RukuliError::Timeout`] so script callers can
    /// tell "ran out of budget" from "environment broke".
    pub fn click(
        &mut self,
        name: &str,
        timeout: Duration,
        button: MouseButton,
    ) -> RukuliResult<Match> {
        match self.wait(name, timeout)? {
            WaitOutcome::Found(m) => {
                trace_event!("session_click", template = name, x = m.x, y = m.y);
                self.input.click_at(m.x as i32, m.y as i32, button)?;
                Ok(m)
            }
            WaitOutcome::TimedOut { attempts, elapsed } => Err(RukuliError::Timeout {
                attempts,
                elapsed_ms: elapsed.as_millis() as u64,
            }),
        }
    }

    /// Presses a key down by name.
    pub fn press_key(&mut self, name: &str) -> RukuliResult<()> {
        trace_event!("press_key", key = name);
        self.input.press_key(self.resolve_key(name)?)
    }

    /// Releases a key by name.
    pub fn release_key(&mut self, name: &str) -> RukuliResult<()> {
        trace_event!("release_key", key = name);
        self.input.release_key(self.resolve_key(name)?)
    }

    /// Taps (press + release) a key by name.
    pub fn tap_key(&mut self, name: &str) -> RukuliResult<()> {
        trace_event!("tap_key", key = name);
        self.input.tap_key(self.resolve_key(name)?)
    }

    /// Types a string.
    pub fn type_text(&mut self, text: &str) -> RukuliResult<()> {
        self.input.type_text(text)
    }

    fn matcher_for(&self, name: &str) -> RukuliResult<Matcher> {
        let template = Template::from_path(self.template_dir.join(name))?;
        Matcher::new(&template)?.with_config(self.cfg)
    }

    fn resolve_key(&self, name: &str) -> RukuliResult<enigo::Key> {
        key_from_name(name).ok_or_else(|| RukuliError::UnknownKey {
            name: name.to_string(),
        })
    }
}
