/// Run state definitions for tracking crawl progress
///
/// A run walks a fixed page range; its state only ever moves forward.
use std::fmt;

/// Represents the current state of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Run has been configured but no page has been requested yet
    Pending,

    /// Run is working on the given 1-based page index
    Running(u32),

    /// All requested pages were processed successfully
    Completed,

    /// The listing fetch for the given page failed; the run aborted there.
    /// A failed run has no resume: the caller restarts from page 1.
    Failed(u32),
}

impl RunState {
    /// Returns true if this is a terminal state (no further pages will be
    /// requested)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }

    /// Returns true if the run is still progressing
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if the run finished its whole page range
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// The page a failed run stopped on, if it failed
    pub fn failed_page(&self) -> Option<u32> {
        match self {
            Self::Failed(page) => Some(*page),
            _ => None,
        }
    }

    /// Whether `next` is a legal successor of this state
    ///
    /// Legal transitions: Pending -> Running(1),
    /// Running(i) -> Running(i+1) | Completed | Failed(i).
    pub fn can_transition_to(&self, next: RunState) -> bool {
        match (self, next) {
            (Self::Pending, Self::Running(1)) => true,
            (Self::Running(i), Self::Running(j)) => j == i + 1,
            (Self::Running(_), Self::Completed) => true,
            (Self::Running(i), Self::Failed(j)) => *i == j,
            _ => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running(page) => write!(f, "running(page {})", page),
            Self::Completed => write!(f, "completed"),
            Self::Failed(page) => write!(f, "failed(page {})", page),
        }
    }
}
