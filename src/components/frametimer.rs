// Counts ticks up to a target and then reports completion once.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Running,
    Paused,
    /// Target reached on this tick. The timer is now reset and paused.
    JustCompleted,
}

/// One-shot frame counter.
///
/// After completing, the timer stays paused until [`FrameTimer::resume`] is
/// called, so a recurring timer is one whose owner resumes it on
/// [`TimerStatus::JustCompleted`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTimer {
    pub current_frame: u32,
    pub target_frame: u32,
    pub paused: bool,
}

impl FrameTimer {
    /// Running timer firing after `target_frame` advances. A target of zero fires on the first one.
    pub fn new(target_frame: u32) -> Self {
        FrameTimer {
            current_frame: 0,
            target_frame: target_frame.max(1),
            paused: false,
        }
    }

    pub fn advance(&mut self) -> TimerStatus {
        if self.paused {
            return TimerStatus::Paused;
        }
        self.current_frame += 1;
        if self.current_frame >= self.target_frame {
            self.current_frame = 0;
            self.paused = true;
            return TimerStatus::JustCompleted;
        }
        TimerStatus::Running
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
