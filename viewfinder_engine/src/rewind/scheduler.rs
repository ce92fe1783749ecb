/// TickScheduler: two named periodic tasks, only one active at a time.
///
/// `Record` runs at the record interval; `RewindStep` runs `rate` times
/// faster. Switching tasks discards the time accumulated for the previous
/// one, so a switch never fires a burst of stale ticks.

/// Periodic task driven by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickTask {
    Record,
    RewindStep,
}

#[derive(Debug, Clone)]
pub struct TickScheduler {
    record_period: f32,
    rewind_period: f32,
    active: TickTask,
    accumulated: f32,
}

impl TickScheduler {
    /// Scheduler starting with `Record` active
    pub fn new(record_interval: f32, rewind_rate: f32) -> Self {
        let record_period = record_interval.max(f32::EPSILON);
        let rewind_period = if rewind_rate > 0.0 {
            record_period / rewind_rate
        } else {
            record_period
        };
        Self {
            record_period,
            rewind_period,
            active: TickTask::Record,
            accumulated: 0.0,
        }
    }

    pub fn active(&self) -> TickTask {
        self.active
    }

    pub fn period(&self, task: TickTask) -> f32 {
        match task {
            TickTask::Record => self.record_period,
            TickTask::RewindStep => self.rewind_period,
        }
    }

    /// Make `task` the only active task
    pub fn switch_to(&mut self, task: TickTask) {
        self.active = task;
        self.accumulated = 0.0;
    }

    /// Accumulate elapsed time for the active task
    pub fn advance(&mut self, delta_seconds: f32) {
        if delta_seconds > 0.0 {
            self.accumulated += delta_seconds;
        }
    }

    /// Consume one period of accumulated time, returning the task that is due
    pub fn pop_due(&mut self) -> Option<TickTask> {
        let task = self.active;
        let period = self.period(task);
        if self.accumulated + f32::EPSILON < period {
            return None;
        }
        self.accumulated = (self.accumulated - period).max(0.0);
        Some(task)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
