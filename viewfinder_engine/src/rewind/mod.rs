//! Rewind: the bounded history of player snapshots and tagged actions,
//! and the scheduler that drives recording and playback ticks.

mod ledger;
mod scheduler;

pub use ledger::{ledger_capacity, RewindAction, RewindLedger, RewindRecord};
pub use scheduler::{TickScheduler, TickTask};
