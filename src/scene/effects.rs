/// Sparkle shown where the target was clicked; fades out linearly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    pub x: f64,
    pub y: f64,
    pub start_ms: f64,
}

impl Sparkle {
    pub const DURATION_MS: f64 = 1000.0;
    pub const SCALE: f64 = 1.5;

    pub fn new(x: f64, y: f64, start_ms: f64) -> Self {
        Self { x, y, start_ms }
    }

    pub fn alpha(&self, now: f64) -> f64 {
        (1.0 - (now - self.start_ms) / Self::DURATION_MS).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, now: f64) -> bool {
        now - self.start_ms >= Self::DURATION_MS
    }
}
