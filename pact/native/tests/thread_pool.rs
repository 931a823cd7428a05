//! Thread pool integration tests: parallelism, ordering and backpressure.

use std::thread;
use std::time::{Duration, Instant};

use pact_native::sync::{Arc, Mutex};
use pact_native::{pool, Flag, PoolConfig};

mod common;

#[test]
fn four_sleepers_finish_in_parallel_time() {
    common::init_logging();

    let pool = pool(4, 2).unwrap();
    let done: Vec<Arc<Flag>> = (0..4).map(|_| Arc::new(Flag::new())).collect();

    let begun = Instant::now();
    for flag in &done {
        let flag = flag.clone();
        pool.execute(move || {
            thread::sleep(Duration::from_millis(100));
            flag.set();
        })
        .unwrap();
    }
    for flag in &done {
        assert!(flag.wait_timeout(Duration::from_secs(2)));
    }

    // Serially the four sleeps would take 400ms.
    assert!(begun.elapsed() < Duration::from_millis(300));
}

#[test]
fn one_worker_runs_tasks_in_submission_order() {
    common::init_logging();

    let pool = pool(1, 8).unwrap();
    let journal = Arc::new(Mutex::new(Vec::new()));
    for index in 0..5 {
        let sink = journal.clone();
        pool.execute(move || sink.lock().push(index)).unwrap();
    }
    drop(pool);

    assert_eq!(*journal.lock(), [0, 1, 2, 3, 4]);
}

#[test]
fn submissions_alternate_between_the_two_workers() {
    common::init_logging();

    let pool = PoolConfig::new(2, 4).with_name_prefix("rr").build().unwrap();
    let journal = Arc::new(Mutex::new(Vec::new()));
    for index in 0..4 {
        let sink = journal.clone();
        pool.execute(move || {
            let worker = thread::current().name().unwrap_or_default().to_owned();
            sink.lock().push((index, worker));
        })
        .unwrap();
    }
    drop(pool);

    // Completion order is racy across workers; the assignment is not.
    let mut placements = journal.lock().clone();
    placements.sort();
    let expected = [
        (0, String::from("rr-0")),
        (1, String::from("rr-1")),
        (2, String::from("rr-0")),
        (3, String::from("rr-1")),
    ];
    assert_eq!(placements, expected);
}

#[test]
fn a_refused_task_comes_back_runnable() {
    common::init_logging();

    let pool = pool(1, 1).unwrap();
    let taken = Arc::new(Flag::new());
    let gate = Arc::new(Flag::new());

    // Park the only worker so nothing drains the queue.
    {
        let taken = taken.clone();
        let gate = gate.clone();
        pool.execute(move || {
            taken.set();
            gate.wait();
        })
        .unwrap();
    }
    assert!(taken.wait_timeout(Duration::from_secs(1)));

    // One task fits in the queue; the next bounces.
    pool.execute(|| {}).unwrap();
    let ran_here = Arc::new(Flag::new());
    let flag = ran_here.clone();
    let refused = pool.execute(move || flag.set()).unwrap_err();

    // The caller still owns the work and may run it elsewhere.
    (refused.into_inner())();
    assert!(ran_here.is_set());

    gate.set();
}
