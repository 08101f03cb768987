//! Bounded polling: capture, match, retry until found or the deadline passes.
//!
//! [`wait_for_match`] turns the one-shot matcher into an "eventually found or
//! timed out" operation. Each attempt takes a fresh frame; attempts are
//! strictly sequential and the call blocks until one of the two terminal
//! states is reached. There is no persisted poller object: the deadline and
//! attempt counter live on the stack of one invocation.

use crate::image::ImageBuffer;
use crate::matcher::{Match, MatchOutcome, Matcher};
use crate::trace::{trace_event, trace_span};
use crate::util::RukuliResult;
use std::time::{Duration, Instant};

/// Source of screenshot frames.
///
/// Closures implement this, so tests can fake a display with
/// `|| Ok(frame.clone())`. A capture failure is an environment problem, not a
/// "not visible yet" condition; the poller propagates it without retrying.
pub trait ScreenSource {
    /// Captures a fresh frame.
    fn capture(&mut self) -> RukuliResult<ImageBuffer>;
}

impl<F> ScreenSource for F
where
    F: FnMut() -> RukuliResult<ImageBuffer>,
{
    fn capture(&mut self) -> RukuliResult<ImageBuffer> {
        self()
    }
}

/// Terminal state of one bounded wait.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WaitOutcome {
    /// A frame matched before the deadline.
    Found(Match),
    /// The retry budget ran out without a match.
    TimedOut {
        /// Capture-and-match attempts performed.
        attempts: u32,
        /// Wall-clock time spent in the wait.
        elapsed: Duration,
    },
}

impl WaitOutcome {
    /// Returns the match if the wait succeeded.
    pub fn found(&self) -> Option<Match> {
        match self {
            WaitOutcome::Found(m) => Some(*m),
            WaitOutcome::TimedOut { .. } => None,
        }
    }
}

/// Polls `source` until `matcher` finds the template or `timeout` expires.
///
/// A zero timeout performs exactly one capture-and-match attempt. Otherwise
/// the deadline is checked before each retry, never after: an attempt that
/// starts inside the budget has its result honored even if it completes
/// slightly late. On `Found` the function returns immediately; no further
/// frame is captured.
pub fn wait_for_match<S: ScreenSource>(
    source: &mut S,
    matcher: &Matcher,
    timeout: Duration,
) -> RukuliResult<WaitOutcome> {
    let _span = trace_span!("wait_for_match", timeout_ms = timeout.as_millis() as u64).entered();

    let started = Instant::now();
    let deadline = started + timeout;
    let mut attempts = 0u32;

    loop {
        let frame = source.capture()?;
        attempts += 1;
        if let MatchOutcome::Found(m) = matcher.find(frame.view())? {
            trace_event!("wait_found", attempts = attempts, x = m.x, y = m.y);
            return Ok(WaitOutcome::Found(m));
        }

        if timeout.is_zero() || Instant::now() > deadline {
            let elapsed = started.elapsed();
            trace_event!(
                "wait_timed_out",
                attempts = attempts,
                elapsed_ms = elapsed.as_millis() as u64
            );
            return Ok(WaitOutcome::TimedOut { attempts, elapsed });
        }

        std::thread::yield_now();
    }
}

/// Single non-blocking existence check: one capture, one match.
///
/// Equivalent to [`wait_for_match`] with a zero timeout.
pub fn exists_now<S: ScreenSource>(
    source: &mut S,
    matcher: &Matcher,
) -> RukuliResult<MatchOutcome> {
    let frame = source.capture()?;
    matcher.find(frame.view())
}
