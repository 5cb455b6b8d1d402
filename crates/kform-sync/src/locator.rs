//! Interval location.
//!
//! Finds the formation active at a playback time together with the one that
//! follows it. Before the first authored time the earliest formation is shown;
//! after the last one the final formation holds.

use kform_models::Formation;

use crate::progress::sorted_by_time;

/// The active formation interval for a playback time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormationWindow<'a> {
    /// Formation being shown
    pub current: Option<&'a Formation>,
    /// Formation the members are moving towards
    pub next: Option<&'a Formation>,
}

impl<'a> FormationWindow<'a> {
    /// True when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    /// Whether the current formation is the last one.
    pub fn is_final(&self) -> bool {
        self.current.is_some() && self.next.is_none()
    }
}

/// Locate the `(current, next)` formations for `current_time`.
///
/// `formations` may be unsorted and may contain duplicate times; it is never
/// modified. Duplicate times resolve in input order. Never panics, including
/// for NaN or negative times.
pub fn locate(formations: &[Formation], current_time: f64) -> FormationWindow<'_> {
    if formations.is_empty() {
        return FormationWindow::default();
    }

    let sorted = sorted_by_time(formations);
    let index = sorted
        .iter()
        .rposition(|f| f.time <= current_time)
        .unwrap_or(0);

    FormationWindow {
        current: sorted.get(index).copied(),
        next: sorted.get(index + 1).copied(),
    }
}
