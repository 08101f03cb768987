//! Bounded poller contract, exercised against a scripted fake display.

use rukuli::{
    exists_now, wait_for_match, ImageBuffer, Matcher, RukuliError, RukuliResult, ScreenSource,
    Template, WaitOutcome,
};
use std::time::Duration;

fn make_pattern(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push((((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF) as u8);
        }
    }
    data
}

const FRAME_W: usize = 80;
const FRAME_H: usize = 60;
const TPL_W: usize = 16;
const TPL_H: usize = 12;
const TPL_X: usize = 30;
const TPL_Y: usize = 20;

fn template() -> Template {
    Template::new(make_pattern(TPL_W, TPL_H), TPL_W, TPL_H).unwrap()
}

/// A frame of flat background noise the template never matches.
fn blank_frame() -> ImageBuffer {
    let mut data = vec![0u8; FRAME_W * FRAME_H];
    for (i, v) in data.iter_mut().enumerate() {
        *v = ((i * 31) % 200) as u8;
    }
    ImageBuffer::new(data, FRAME_W, FRAME_H).unwrap()
}

/// A blank frame with the template pasted at (TPL_X, TPL_Y).
fn hit_frame() -> ImageBuffer {
    let mut data = blank_frame().as_slice().to_vec();
    let tpl = make_pattern(TPL_W, TPL_H);
    for y in 0..TPL_H {
        for x in 0..TPL_W {
            data[(TPL_Y + y) * FRAME_W + (TPL_X + x)] = tpl[y * TPL_W + x];
        }
    }
    ImageBuffer::new(data, FRAME_W, FRAME_H).unwrap()
}

/// Fake display: misses for `misses` captures, then shows the template.
struct ScriptedScreen {
    captures: usize,
    misses: usize,
    fail_at: Option<usize>,
}

impl ScriptedScreen {
    fn new(misses: usize) -> Self {
        Self {
            captures: 0,
            misses,
            fail_at: None,
        }
    }

    fn failing_at(capture: usize) -> Self {
        Self {
            captures: 0,
            misses: usize::MAX,
            fail_at: Some(capture),
        }
    }
}

impl ScreenSource for ScriptedScreen {
    fn capture(&mut self) -> RukuliResult<ImageBuffer> {
        self.captures += 1;
        if Some(self.captures) == self.fail_at {
            return Err(RukuliError::Capture {
                reason: "display went away".to_string(),
            });
        }
        if self.captures > self.misses {
            Ok(hit_frame())
        } else {
            Ok(blank_frame())
        }
    }
}

fn matcher() -> Matcher {
    Matcher::new(&template()).unwrap()
}

#[test]
fn exists_now_takes_exactly_one_capture() {
    let mut screen = ScriptedScreen::new(0);
    let outcome = exists_now(&mut screen, &matcher()).unwrap();
    let m = outcome.found().expect("template visible on first frame");
    assert_eq!(m.x as usize, TPL_X + TPL_W / 2);
    assert_eq!(m.y as usize, TPL_Y + TPL_H / 2);
    assert_eq!(screen.captures, 1);

    let mut screen = ScriptedScreen::new(usize::MAX);
    let outcome = exists_now(&mut screen, &matcher()).unwrap();
    assert!(outcome.found().is_none());
    assert_eq!(screen.captures, 1);
}

#[test]
fn zero_timeout_is_a_single_attempt() {
    let mut screen = ScriptedScreen::new(usize::MAX);
    let outcome = wait_for_match(&mut screen, &matcher(), Duration::ZERO).unwrap();
    match outcome {
        WaitOutcome::TimedOut { attempts, .. } => assert_eq!(attempts, 1),
        WaitOutcome::Found(_) => panic!("template is never visible"),
    }
    assert_eq!(screen.captures, 1, "timeout 0 must not retry");
}

#[test]
fn wait_retries_until_the_template_appears() {
    let mut screen = ScriptedScreen::new(2);
    let outcome = wait_for_match(&mut screen, &matcher(), Duration::from_secs(5)).unwrap();
    let m = outcome.found().expect("template appears on the third frame");
    assert_eq!(m.x as usize, TPL_X + TPL_W / 2);
    assert_eq!(screen.captures, 3, "no capture after the match");
}

#[test]
fn wait_times_out_no_earlier_than_the_deadline() {
    let timeout = Duration::from_millis(200);
    let mut screen = ScriptedScreen::new(usize::MAX);
    let start = std::time::Instant::now();
    let outcome = wait_for_match(&mut screen, &matcher(), timeout).unwrap();
    let wall = start.elapsed();

    match outcome {
        WaitOutcome::TimedOut { attempts, elapsed } => {
            assert!(attempts >= 1);
            assert!(
                elapsed >= timeout,
                "timed out after {elapsed:?}, budget was {timeout:?}"
            );
        }
        WaitOutcome::Found(_) => panic!("template is never visible"),
    }
    assert!(wall >= timeout);
}

#[test]
fn capture_failure_propagates_without_retry() {
    let mut screen = ScriptedScreen::failing_at(2);
    let err = wait_for_match(&mut screen, &matcher(), Duration::from_secs(5))
        .err()
        .expect("capture failure must abort the wait");
    assert!(matches!(err, RukuliError::Capture { .. }));
    assert_eq!(screen.captures, 2, "loop must stop at the failed capture");
}

#[test]
fn closures_are_screen_sources() {
    let frame = hit_frame();
    let mut source = || -> RukuliResult<ImageBuffer> { Ok(frame.clone()) };
    let outcome = exists_now(&mut source, &matcher()).unwrap();
    assert!(outcome.is_found());
}
