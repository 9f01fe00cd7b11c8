/// Whole-second stopwatch driven by an external 1 s tick.
#[derive(Clone, Debug, Default)]
pub struct SessionClock {
    elapsed: u32,
    running: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Ignored once stopped.
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed += 1;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.elapsed = 0;
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
