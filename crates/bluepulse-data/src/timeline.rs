//! Shared time-step cursor for the data layers.

/// Selected time step within a dataset, with optional looping playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeline {
    len: usize,
    index: usize,
    playing: bool,
}

impl Timeline {
    /// A paused timeline over `len` steps, at step 0. `len` of zero is
    /// treated as one.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            index: 0,
            playing: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Jump to `index`, clamped to the last step.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.len - 1);
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Advance one step while playing, wrapping to the start.
    /// Returns the current index.
    pub fn step(&mut self) -> usize {
        if self.playing {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_clamps() {
        let mut timeline = Timeline::new(12);
        timeline.seek(5);
        assert_eq!(timeline.index(), 5);
        timeline.seek(40);
        assert_eq!(timeline.index(), 11);
    }

    #[test]
    fn test_step_only_while_playing() {
        let mut timeline = Timeline::new(3);
        assert_eq!(timeline.step(), 0);
        timeline.play();
        assert_eq!(timeline.step(), 1);
        assert_eq!(timeline.step(), 2);
        assert_eq!(timeline.step(), 0);
        timeline.toggle();
        assert!(!timeline.is_playing());
        assert_eq!(timeline.step(), 0);
    }

    #[test]
    fn test_empty_timeline_has_one_step() {
        let mut timeline = Timeline::new(0);
        assert_eq!(timeline.len(), 1);
        timeline.play();
        assert_eq!(timeline.step(), 0);
    }
}
