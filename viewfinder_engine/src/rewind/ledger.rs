/// RewindLedger: bounded history of owner snapshots.
///
/// Snapshots are appended at a fixed interval. A snapshot can be tagged
/// with the action taken during its interval (a capture or a placement);
/// rewinding pops snapshots newest first and undoes tagged actions.

use std::collections::VecDeque;
use glam::Quat;
use crate::math::Transform;
use crate::photo::{PhotoInfo, PlacementRecord};

/// Action taken during a snapshot interval
#[derive(Debug, Clone, Default)]
pub enum RewindAction {
    #[default]
    None,
    /// A photo was taken; identifies the photo by its render target
    Captured(PhotoInfo),
    /// A photo was placed; owns the undo handles
    Placed(Box<PlacementRecord>),
}

impl RewindAction {
    pub fn is_none(&self) -> bool {
        matches!(self, RewindAction::None)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RewindAction::None => "None",
            RewindAction::Captured(_) => "Captured",
            RewindAction::Placed(_) => "Placed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RewindRecord {
    /// Owner actor transform
    pub transform: Transform,
    /// View-control rotation
    pub control_rotation: Quat,
    pub action: RewindAction,
}

impl RewindRecord {
    pub fn snapshot(transform: Transform, control_rotation: Quat) -> Self {
        Self { transform, control_rotation, action: RewindAction::None }
    }
}

/// Number of snapshots kept for a history duration and a record interval
pub fn ledger_capacity(max_duration: f32, record_interval: f32) -> usize {
    if record_interval <= 0.0 || max_duration <= 0.0 {
        return 1;
    }
    // Interval values like 1/30 are not exact in f32
    let ratio = (max_duration / record_interval) as f64;
    ((ratio + 1e-4).floor() as usize).max(1)
}

#[derive(Debug, Clone)]
pub struct RewindLedger {
    records: VecDeque<RewindRecord>,
    capacity: usize,
}

impl RewindLedger {
    pub fn new(max_duration: f32, record_interval: f32) -> Self {
        Self::with_capacity(ledger_capacity(max_duration, record_interval))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Append an untagged snapshot, evicting the oldest beyond capacity
    pub fn record(&mut self, transform: Transform, control_rotation: Quat) {
        self.push(RewindRecord::snapshot(transform, control_rotation));
    }

    /// Tag the newest snapshot with `action`.
    ///
    /// A fresh snapshot is pushed first when the ledger is empty or when
    /// the newest snapshot already carries an action.
    pub fn tag_latest(&mut self, action: RewindAction, transform: Transform, control_rotation: Quat) {
        let needs_snapshot = self.records.back().map_or(true, |r| !r.action.is_none());
        if needs_snapshot {
            self.record(transform, control_rotation);
        }
        if let Some(latest) = self.records.back_mut() {
            latest.action = action;
        }
    }

    /// True when at least one snapshot carries an action
    pub fn has_tagged(&self) -> bool {
        self.records.iter().any(|r| !r.action.is_none())
    }

    pub fn latest(&self) -> Option<&RewindRecord> {
        self.records.back()
    }

    pub fn pop_latest(&mut self) -> Option<RewindRecord> {
        self.records.pop_back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &RewindRecord> {
        self.records.iter()
    }

    fn push(&mut self, record: RewindRecord) {
        self.records.push_back(record);
        while self.records.len() > self.capacity {
            self.records.pop_front();
        }
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
