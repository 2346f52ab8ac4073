//! State of the metrics detail screen

use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use crate::client::models::{Instance, MetricSample, ScalingDecision};

/// Everything one fetch cycle brings back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// The subject instance, if it is still registered
    pub instance: Option<Instance>,
    pub metrics: Vec<MetricSample>,
    pub decisions: Vec<ScalingDecision>,
}

/// Who asked for a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Screen activation or manual refresh: shows loading, surfaces errors
    Foreground,
    /// Timer tick: silent, failures are swallowed
    Background,
}

/// What the detail screen displays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailView {
    /// Instance the view is about
    pub subject: Option<String>,
    pub snapshot: Option<Snapshot>,
    pub error: Option<String>,
    pub loading: bool,
    /// When `snapshot` was last replaced
    pub updated_at: Option<DateTime<Utc>>,
    /// Id of the most recent cycle whose outcome was applied
    pub applied_cycle: u64,
    /// Id of the foreground cycle the loading indicator belongs to
    loading_cycle: u64,
}

impl DetailView {
    /// Fresh view for `subject`. Cycles up to `floor` belong to a previous
    /// subject and will be discarded.
    pub fn for_subject(subject: &str, floor: u64) -> Self {
        Self {
            subject: Some(subject.to_string()),
            applied_cycle: floor,
            loading_cycle: floor,
            ..Self::default()
        }
    }

    /// Mark the start of a fetch cycle. Returns whether the view changed.
    pub fn begin(&mut self, cycle: u64, mode: FetchMode) -> bool {
        if mode == FetchMode::Background {
            return false;
        }
        self.loading = true;
        self.loading_cycle = cycle;
        true
    }

    /// Apply the outcome of cycle `cycle` fetched for `subject`.
    ///
    /// Outcomes for another subject or from a cycle not newer than the last
    /// applied one are dropped. Returns whether the view changed.
    pub fn apply(
        &mut self,
        cycle: u64,
        subject: &str,
        mode: FetchMode,
        outcome: Result<Snapshot, String>,
    ) -> bool {
        let mut changed = false;
        if self.loading && mode == FetchMode::Foreground && cycle == self.loading_cycle {
            self.loading = false;
            changed = true;
        }

        if self.subject.as_deref() != Some(subject) || cycle <= self.applied_cycle {
            debug!(
                "Discarding cycle {} for {} (applied {})",
                cycle, subject, self.applied_cycle
            );
            return changed;
        }

        match (mode, outcome) {
            (_, Ok(snapshot)) => {
                self.snapshot = Some(snapshot);
                self.error = None;
                self.updated_at = Some(Utc::now());
                self.applied_cycle = cycle;
                if cycle >= self.loading_cycle {
                    self.loading = false;
                }
                true
            }
            (FetchMode::Foreground, Err(message)) => {
                self.error = Some(message);
                self.applied_cycle = cycle;
                true
            }
            (FetchMode::Background, Err(message)) => {
                debug!("Background refresh for {} failed: {}", subject, message);
                changed
            }
        }
    }
}
