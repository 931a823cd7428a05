//! Print-shop dispatcher
//!
//! A small end-to-end tour of the toolkit:
//! - an active object serializes job intake on its own thread
//! - a round-robin pool renders jobs in parallel
//! - a delayed job models the press warming up, gated by a flag
//! - `poll` watches for completion from the main thread

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use pact_native::sync::{Arc, Mutex};
use pact_native::{poll, Active, DelayedJob, Flag, PoolConfig, Queue, Thread, ThreadConfig};

#[derive(Debug, Clone, Copy)]
struct PrintJob {
    id: u32,
    pages: u32,
}

fn main() {
    println!("== print shop ==");

    let press_ready = Arc::new(Flag::new());
    let finished = Arc::new(Mutex::new(Vec::new()));
    let rendered = Arc::new(AtomicUsize::new(0));

    // The press needs a moment before the first job may run.
    let mut warm_up = {
        let press_ready = press_ready.clone();
        DelayedJob::start(Duration::from_millis(50), move || {
            println!("press is warm");
            press_ready.set();
        })
        .expect("spawn warm-up timer")
    };

    let pool = PoolConfig::new(3, 8)
        .with_name_prefix("press")
        .build()
        .expect("spawn render pool");

    // Intake runs on one thread; rendering fans out across the pool.
    let front_desk = {
        let press_ready = press_ready.clone();
        let finished = finished.clone();
        let rendered = rendered.clone();
        Active::start(
            move |job: PrintJob| {
                println!("queued job {} ({} pages)", job.id, job.pages);
                let press_ready = press_ready.clone();
                let finished = finished.clone();
                let rendered = rendered.clone();
                pool.execute(move || {
                    press_ready.wait();
                    thread::sleep(Duration::from_millis(u64::from(job.pages) * 10));
                    let worker = thread::current().name().unwrap_or("?").to_owned();
                    println!("rendered job {} on {}", job.id, worker);
                    finished.lock().push(job.id);
                    rendered.fetch_add(1, Ordering::Relaxed);
                })
                .expect("pool queue sized for the demo");
            },
            Queue::new(16),
            Thread::new(ThreadConfig::new("front-desk")),
        )
        .expect("spawn front desk")
    };

    let jobs = [
        PrintJob { id: 1, pages: 4 },
        PrintJob { id: 2, pages: 1 },
        PrintJob { id: 3, pages: 6 },
        PrintJob { id: 4, pages: 2 },
        PrintJob { id: 5, pages: 3 },
        PrintJob { id: 6, pages: 1 },
    ];
    for job in jobs {
        front_desk.send(job).expect("intake queue sized for the demo");
    }

    let all_done = poll(
        Duration::from_millis(20),
        Duration::from_secs(5),
        || rendered.load(Ordering::Relaxed) == jobs.len(),
    );
    drop(front_desk);
    warm_up.join().expect("warm-up timer joins");

    assert!(all_done, "render pool fell behind");
    println!("completion order: {:?}", finished.lock());
}
