//! Per-file progress and throughput reporting
//!
//! Shared by the decoding workers, so all counters are atomics and the
//! tracker is used through `&Tracker`.

use land_sales_decoder::{FileFailure, FileSummary, Progress};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

const MIB: f64 = 1024.0 * 1024.0;

pub struct Tracker {
    operation: &'static str,
    total: usize,
    done: AtomicUsize,
    failed: AtomicUsize,
    bytes: AtomicU64,
    started: Instant,
}

impl Tracker {
    pub fn new(operation: &'static str, total: usize) -> Self {
        Self {
            operation,
            total,
            done: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            bytes: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn bytes(&self) -> u64 {
        self.bytes.load(Ordering::Relaxed)
    }

    fn report(&self, done: usize) {
        let elapsed = self.started.elapsed().as_secs_f64().max(f64::EPSILON);
        let mib = self.bytes() as f64 / MIB;
        log::info!("{}", progress_line(self.operation, done, self.total, mib, mib / elapsed));
    }
}

impl Progress for &Tracker {
    fn on_file(&mut self, summary: &FileSummary) {
        self.bytes.fetch_add(summary.bytes, Ordering::Relaxed);
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        self.report(done);
    }

    fn on_failure(&mut self, _failure: &FileFailure) {
        self.failed.fetch_add(1, Ordering::Relaxed);
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        self.report(done);
    }
}

/// `Parsing: 3/10 files (30.00%) - 1.25 MiB/s - 4.2MiB`
fn progress_line(operation: &str, done: usize, total: usize, mib: f64, mib_per_sec: f64) -> String {
    let percentage = if total > 0 {
        format!(" ({:.2}%)", done as f64 / total as f64 * 100.0)
    } else {
        String::new()
    };
    let size = if mib > 1024.0 {
        format!("{:.2}GiB", mib / 1024.0)
    } else {
        format!("{:.1}MiB", mib)
    };
    format!(
        "{}: {}/{} files{} - {:.2} MiB/s - {}",
        operation, done, total, percentage, mib_per_sec, size
    )
}
