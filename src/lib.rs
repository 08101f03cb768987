//! Rukuli locates a reference image on screen and acts on the match.
//!
//! The core is a single-scale ZNCC template matcher plus a deadline-bounded
//! polling loop (capture, match, retry). Screen capture (`xcap`), template
//! loading (`image`), and pointer/keyboard injection (`enigo`) are optional
//! collaborators behind narrow interfaces, so the matching core stays pure
//! and testable without a display.

pub mod image;
pub mod matcher;
pub mod template;
mod trace;
pub mod util;
pub mod wait;

#[cfg(feature = "capture")]
pub mod screen;
#[cfg(feature = "input")]
pub mod input;
#[cfg(feature = "automation")]
pub mod session;

pub use crate::image::{ImageBuffer, ImageView};
pub use matcher::{
    match_template, Match, MatchConfig, MatchOutcome, Matcher, DEFAULT_THRESHOLD,
};
pub use template::{Template, TemplatePlan};
pub use util::{RukuliError, RukuliResult};
pub use wait::{exists_now, wait_for_match, ScreenSource, WaitOutcome};

#[cfg(feature = "capture")]
pub use screen::PrimaryScreen;
#[cfg(feature = "input")]
pub use input::{key_from_name, InputDriver, MouseButton};
#[cfg(feature = "automation")]
pub use session::Session;
