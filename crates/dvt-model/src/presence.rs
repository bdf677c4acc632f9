//! Presence classification of a reconciled key.

use serde::{Deserialize, Serialize};

use crate::options::SideLabels;

/// Presence cell text for keys found on both sides.
pub const PRESENT_IN_BOTH: &str = "Present in Both";

/// Where a unified key was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Presence {
    Both,
    LeftOnly,
    RightOnly,
}

impl Presence {
    /// Classify from membership on each side.
    ///
    /// Returns `None` when the key is on neither side, which cannot happen
    /// for keys drawn from the union of both sides.
    pub fn from_membership(in_left: bool, in_right: bool) -> Option<Self> {
        match (in_left, in_right) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::LeftOnly),
            (false, true) => Some(Self::RightOnly),
            (false, false) => None,
        }
    }

    /// Render as the report cell text, e.g. `Present in Both`, `Present in excel`.
    pub fn label(self, labels: &SideLabels) -> String {
        match self {
            Self::Both => PRESENT_IN_BOTH.to_string(),
            Self::LeftOnly => format!("Present in {}", labels.left),
            Self::RightOnly => format!("Present in {}", labels.right),
        }
    }
}

/// Number of reconciled keys per presence class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceCounts {
    pub both: usize,
    pub left_only: usize,
    pub right_only: usize,
}

impl PresenceCounts {
    pub fn record(&mut self, presence: Presence) {
        match presence {
            Presence::Both => self.both += 1,
            Presence::LeftOnly => self.left_only += 1,
            Presence::RightOnly => self.right_only += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.both + self.left_only + self.right_only
    }

    /// Formatted breakdown used in the summary row's presence cell.
    pub fn describe(&self, labels: &SideLabels) -> String {
        format!(
            "Both: {} | {} only: {} | {} only: {}",
            self.both, labels.left, self.left_only, labels.right, self.right_only
        )
    }
}

impl FromIterator<Presence> for PresenceCounts {
    fn from_iter<I: IntoIterator<Item = Presence>>(iter: I) -> Self {
        let mut counts = Self::default();
        for presence in iter {
            counts.record(presence);
        }
        counts
    }
}
