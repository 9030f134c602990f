//! Process-wide worker pool for analysis tasks.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, OnceLock};
use std::thread;

use tracing::debug;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Fixed pool of worker threads consuming boxed analysis jobs from a
/// shared queue. Jobs run to completion and may enqueue further jobs;
/// the only blocking wait lives in [`WaitGroup::wait`], outside the
/// workers.
pub struct WorkerPool {
    queue: mpsc::Sender<Job>,
}

static POOL: OnceLock<WorkerPool> = OnceLock::new();

impl WorkerPool {
    /// The process-wide pool, spawned on first use with one worker per
    /// hardware thread.
    pub fn global() -> &'static WorkerPool {
        POOL.get_or_init(|| {
            let workers = thread::available_parallelism().map_or(1, |n| n.get());
            debug!(workers, "starting analysis worker pool");
            WorkerPool::with_workers(workers)
        })
    }

    /// Spawn a pool with an explicit worker count (minimum 1).
    pub fn with_workers(workers: usize) -> WorkerPool {
        let (queue, jobs) = mpsc::channel::<Job>();
        let jobs = Arc::new(Mutex::new(jobs));
        for _ in 0..workers.max(1) {
            let jobs = Arc::clone(&jobs);
            thread::spawn(move || {
                loop {
                    let job = {
                        let jobs = jobs.lock().expect("worker queue mutex poisoned");
                        jobs.recv()
                    };
                    match job {
                        Ok(job) => job(),
                        Err(_) => break,
                    }
                }
            });
        }
        WorkerPool { queue }
    }

    /// Enqueue a job for the next free worker.
    pub fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let _ = self.queue.send(Box::new(job));
    }
}

/// Counter a driver blocks on until every outstanding task (and every
/// task those tasks spawned) has finished. Clones share the counter.
#[derive(Clone, Default)]
pub struct WaitGroup {
    inner: Arc<WaitGroupState>,
}

#[derive(Default)]
struct WaitGroupState {
    count: Mutex<usize>,
    drained: Condvar,
}

impl WaitGroup {
    /// A fresh group with no outstanding tasks.
    pub fn new() -> WaitGroup {
        WaitGroup::default()
    }

    /// Register `n` more outstanding tasks. Call before submitting.
    pub fn add(&self, n: usize) {
        let mut count = self.inner.count.lock().expect("wait group mutex poisoned");
        *count += n;
    }

    /// Mark one task finished.
    pub fn done(&self) {
        let mut count = self.inner.count.lock().expect("wait group mutex poisoned");
        *count -= 1;
        if *count == 0 {
            self.inner.drained.notify_all();
        }
    }

    /// Block until the count drains to zero.
    pub fn wait(&self) {
        let mut count = self.inner.count.lock().expect("wait group mutex poisoned");
        while *count > 0 {
            count = self
                .inner
                .drained
                .wait(count)
                .expect("wait group mutex poisoned");
        }
    }
}
