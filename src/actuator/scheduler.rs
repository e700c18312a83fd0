//! Fixed-period tick scheduling.

use embedded_hal::delay::DelayNs;

/// Work that runs once per fixed period.
pub trait PeriodicTask {
    /// Period in microseconds.
    fn period_us(&self) -> u32;

    /// Run one iteration. Must not block for longer than the period.
    fn run(&mut self);
}

/// Drives a [`PeriodicTask`] from a free-running microsecond clock.
///
/// Runs are strictly sequential. When the task falls behind, missed
/// periods are skipped rather than replayed and counted as overruns.
#[derive(Debug)]
pub struct TickScheduler<T> {
    task: T,
    next_deadline_us: Option<u64>,
    runs: u64,
    overruns: u32,
}

impl<T: PeriodicTask> TickScheduler<T> {
    /// Create a scheduler. The first poll runs the task immediately.
    pub fn new(task: T) -> Self {
        Self {
            task,
            next_deadline_us: None,
            runs: 0,
            overruns: 0,
        }
    }

    /// Run the task if its deadline has passed. Returns whether it ran.
    pub fn poll(&mut self, now_us: u64) -> bool {
        let period = self.task.period_us().max(1) as u64;
        let deadline = *self.next_deadline_us.get_or_insert(now_us);
        if now_us < deadline {
            return false;
        }

        self.task.run();
        self.runs += 1;

        let mut next = deadline + period;
        if now_us >= next {
            let missed = (now_us - deadline) / period;
            self.overruns = self.overruns.saturating_add(missed as u32);
            next = deadline + (missed + 1) * period;
            warn!("tick overrun: {} periods skipped", missed);
        }
        self.next_deadline_us = Some(next);
        true
    }

    /// Run the task `ticks` times, sleeping one period between runs.
    ///
    /// The sleep does not account for the task's own run time.
    pub fn run_blocking<D: DelayNs>(&mut self, delay: &mut D, ticks: u32) {
        for _ in 0..ticks {
            self.task.run();
            self.runs += 1;
            delay.delay_us(self.task.period_us());
        }
    }

    /// Number of completed runs.
    #[inline]
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Number of periods skipped because the task fell behind.
    #[inline]
    pub fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Access the task.
    #[inline]
    pub fn task(&self) -> &T {
        &self.task
    }

    /// Mutably access the task.
    #[inline]
    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    /// Take the task back.
    pub fn into_inner(self) -> T {
        self.task
    }
}
