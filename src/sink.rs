use crate::RenderSink;
use crate::color::Rgb;

/// In-memory sink standing in for hardware.
///
/// Keeps the most recent frame and counts presented frames.
#[derive(Debug, Clone, Default)]
pub struct EmulatedSink {
    frame: Vec<Rgb>,
    frames: u64,
}

impl EmulatedSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last presented frame
    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    /// Number of frames presented so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for EmulatedSink {
    fn present(&mut self, colors: &[Rgb]) {
        self.frame.clear();
        self.frame.extend_from_slice(colors);
        self.frames += 1;
    }
}
