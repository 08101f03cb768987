//! Screen capture collaborator backed by `xcap` (feature `capture`).

use crate::image::ImageBuffer;
use crate::trace::trace_event;
use crate::util::{RukuliError, RukuliResult};
use crate::wait::ScreenSource;
use xcap::Monitor;

/// A physical display that can be captured repeatedly.
///
/// Frames come back as grayscale [`ImageBuffer`]s in the monitor's physical
/// pixel resolution. Concurrency discipline for the underlying display is
/// xcap's concern; this type just owns one monitor handle.
pub struct PrimaryScreen {
    monitor: Monitor,
}

impl PrimaryScreen {
    /// Opens the first monitor reported by the system.
    pub fn open() -> RukuliResult<Self> {
        Self::open_monitor(0)
    }

    /// Opens the monitor at `index` in the system's monitor list.
    pub fn open_monitor(index: usize) -> RukuliResult<Self> {
        let monitors = Monitor::all().map_err(|err| RukuliError::Capture {
            reason: err.to_string(),
        })?;
        let count = monitors.len();
        let monitor = monitors
            .into_iter()
            .nth(index)
            .ok_or_else(|| RukuliError::Capture {
                reason: format!("monitor {index} not found, {count} available"),
            })?;
        Ok(Self { monitor })
    }
}

impl ScreenSource for PrimaryScreen {
    fn capture(&mut self) -> RukuliResult<ImageBuffer> {
        let rgba = self
            .monitor
            .capture_image()
            .map_err(|err| RukuliError::Capture {
                reason: err.to_string(),
            })?;
        let gray = image::imageops::grayscale(&rgba);
        let width = gray.width() as usize;
        let height = gray.height() as usize;
        trace_event!("screen_capture", width = width, height = height);
        ImageBuffer::new(gray.into_raw(), width, height)
    }
}
