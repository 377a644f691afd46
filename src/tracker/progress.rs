//! Completion counts derived from task views.

use serde::Serialize;

use super::UserTaskView;

/// Completed and total task counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Views with the completion flag set.
    pub completed: usize,
    /// All views counted.
    pub total: usize,
}

impl Progress {
    /// Counts the given views.
    pub fn of<'a, I>(views: I) -> Self
    where
        I: IntoIterator<Item = &'a UserTaskView>,
    {
        views.into_iter().fold(Self::default(), |acc, view| Self {
            completed: acc.completed + usize::from(view.is_completed),
            total: acc.total + 1,
        })
    }

    /// Percentage of completed views; 0 when there are none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.completed as f64 / self.total as f64
    }
}
