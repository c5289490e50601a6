//! Audio collaborator seam. The simulation only pauses and resumes it.

/// Spatial audio engine owned by the embedding.
pub trait AudioEngine: Send {
    fn pause(&mut self);
    fn resume(&mut self);
}

/// No-op audio engine that remembers whether it is paused.
#[derive(Debug, Default)]
pub struct SilentAudio {
    paused: bool,
}

impl SilentAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl AudioEngine for SilentAudio {
    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }
}
