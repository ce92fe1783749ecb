use super::*;

fn drain(scheduler: &mut TickScheduler) -> usize {
    let mut count = 0;
    while scheduler.pop_due().is_some() {
        count += 1;
    }
    count
}

// ============================================================================
// PERIODS
// ============================================================================

#[test]
fn test_periods() {
    let scheduler = TickScheduler::new(0.5, 5.0);
    assert_eq!(scheduler.period(TickTask::Record), 0.5);
    assert!((scheduler.period(TickTask::RewindStep) - 0.1).abs() < 1e-6);
    assert_eq!(scheduler.active(), TickTask::Record);
}

#[test]
fn test_non_positive_rate_falls_back_to_record_period() {
    let scheduler = TickScheduler::new(0.5, 0.0);
    assert_eq!(scheduler.period(TickTask::RewindStep), 0.5);
}

// ============================================================================
// TICKING
// ============================================================================

#[test]
fn test_due_ticks_follow_elapsed_time() {
    let mut scheduler = TickScheduler::new(0.5, 5.0);

    scheduler.advance(0.25);
    assert_eq!(drain(&mut scheduler), 0);

    scheduler.advance(0.25);
    assert_eq!(scheduler.pop_due(), Some(TickTask::Record));
    assert_eq!(scheduler.pop_due(), None);

    scheduler.advance(1.6);
    assert_eq!(drain(&mut scheduler), 3);
}

#[test]
fn test_switch_discards_accumulated_time() {
    let mut scheduler = TickScheduler::new(0.5, 5.0);
    scheduler.advance(0.45);

    scheduler.switch_to(TickTask::RewindStep);
    assert_eq!(scheduler.pop_due(), None);

    scheduler.advance(0.25);
    assert_eq!(scheduler.pop_due(), Some(TickTask::RewindStep));
    assert_eq!(scheduler.pop_due(), Some(TickTask::RewindStep));
    assert_eq!(scheduler.pop_due(), None);
}

#[test]
fn test_negative_delta_is_ignored() {
    let mut scheduler = TickScheduler::new(0.5, 5.0);
    scheduler.advance(-3.0);
    scheduler.advance(0.5);
    assert_eq!(drain(&mut scheduler), 1);
}
