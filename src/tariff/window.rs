use std::fmt::{Debug, Display, Formatter};

use chrono::NaiveTime;

/// Daily peak window, may cross midnight.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct PeakWindow {
    /// Inclusive.
    pub start: NaiveTime,

    /// Exclusive.
    pub end: NaiveTime,
}

impl Debug for PeakWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Display for PeakWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}–{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl PeakWindow {
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn crosses_midnight(self) -> bool {
        self.start > self.end
    }

    /// Check whether the time of day falls into the window.
    ///
    /// Returns [`None`] for an empty window, which cannot be classified.
    #[must_use]
    pub fn contains(self, time: NaiveTime) -> Option<bool> {
        if self.start < self.end {
            Some((self.start <= time) && (time < self.end))
        } else if self.start > self.end {
            Some((time >= self.start) || (time < self.end))
        } else {
            None
        }
    }
}
