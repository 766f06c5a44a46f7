use std::{
    collections::VecDeque,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};
use transit::sync::{Monitor, WaitResult};

const COND: usize = 0;

fn wait_for_waiters<S>(monitor: &Monitor<S>, cond: usize, count: usize) {
    while monitor.enter().waiters(cond) != count {
        thread::sleep(Duration::from_millis(1));
    }
}

pub fn notify_one_fifo() {
    const WAITERS: usize = 4;
    let monitor = Arc::new(Monitor::new(Vec::new(), 1));

    let handles = (0..WAITERS)
        .map(|i| {
            let shared = monitor.clone();
            let handle = thread::spawn(move || {
                let mut woken = shared.enter();
                woken.wait(COND);
                woken.push(i);
            });
            // Queue the waiters in a known order.
            wait_for_waiters(&monitor, COND, i + 1);
            handle
        })
        .collect::<Vec<_>>();

    for i in 0..WAITERS {
        assert!(monitor.enter().notify_one(COND));
        while monitor.enter().len() != i + 1 {
            thread::sleep(Duration::from_millis(1));
        }
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let monitor = Arc::into_inner(monitor).unwrap();
    assert_eq!(monitor.into_inner(), (0..WAITERS).collect::<Vec<_>>());
}

pub fn notify_all() {
    const WAITERS: usize = 8;
    let monitor = Arc::new(Monitor::new(false, 2));

    let handles = (0..WAITERS)
        .map(|_| {
            let monitor = monitor.clone();
            thread::spawn(move || {
                let mut open = monitor.enter();
                while !*open {
                    open.wait(1);
                }
            })
        })
        .collect::<Vec<_>>();
    wait_for_waiters(&monitor, 1, WAITERS);

    let mut open = monitor.enter();
    *open = true;
    assert_eq!(open.notify_all(0), 0, "condition 0 has no waiters");
    assert_eq!(open.notify_all(1), WAITERS);
    assert_eq!(open.waiters(1), 0);
    drop(open);

    for handle in handles {
        handle.join().unwrap();
    }
}

pub fn notify_without_waiters() {
    let monitor = Monitor::new((), 1);
    let mut guard = monitor.enter();
    assert!(!guard.notify_one(COND));
    assert_eq!(guard.notify_all(COND), 0);

    // Notifications are not buffered.
    let deadline = Instant::now() + Duration::from_millis(20);
    assert_eq!(guard.wait_until(COND, deadline), WaitResult::TimedOut);
}

pub fn wait_until_timeout() {
    let monitor = Monitor::new(0, 1);
    let timeout = Duration::from_millis(50);

    let mut guard = monitor.enter();
    let begin = Instant::now();
    let result = guard.wait_until(COND, begin + timeout);
    assert!(result.timed_out());
    assert!(begin.elapsed() >= timeout);
    assert_eq!(guard.waiters(COND), 0, "timed out waiter must leave the queue");

    // A deadline in the past times out at once.
    assert_eq!(
        guard.wait_until(COND, Instant::now() - Duration::from_millis(1)),
        WaitResult::TimedOut
    );
}

pub fn wait_until_notified() {
    let monitor = Arc::new(Monitor::new(false, 1));

    let waiter = {
        let monitor = monitor.clone();
        thread::spawn(move || {
            let begin = Instant::now();
            let mut flag = monitor.enter();
            let result = flag.wait_until(COND, begin + Duration::from_secs(10));
            assert!(*flag, "state changed before notification must be visible");
            (result, begin.elapsed())
        })
    };
    wait_for_waiters(&monitor, COND, 1);

    let mut flag = monitor.enter();
    *flag = true;
    assert!(flag.notify_one(COND));
    drop(flag);

    let (result, elapsed) = waiter.join().unwrap();
    assert_eq!(result, WaitResult::Notified);
    assert!(elapsed < Duration::from_secs(5));
}

pub fn unlocked() {
    let monitor = Monitor::new(0, 1);

    let mut guard = monitor.enter();
    *guard = 1;
    guard.unlocked(|| {
        thread::scope(|s| {
            s.spawn(|| *monitor.enter() += 1);
        })
    });
    assert_eq!(*guard, 2);
}

pub fn bounded_buffer() {
    const NOT_FULL: usize = 0;
    const NOT_EMPTY: usize = 1;
    const CAPACITY: usize = 4;
    const WORKERS: usize = 4;
    const ITEMS: usize = 250;

    let buffer = Arc::new(Monitor::new(VecDeque::with_capacity(CAPACITY), 2));

    let producers = (0..WORKERS)
        .map(|worker| {
            let buffer = buffer.clone();
            thread::spawn(move || {
                for i in 0..ITEMS {
                    let mut queue = buffer.enter();
                    while queue.len() == CAPACITY {
                        queue.wait(NOT_FULL);
                    }
                    queue.push_back(worker * ITEMS + i);
                    assert!(queue.len() <= CAPACITY);
                    queue.notify_one(NOT_EMPTY);
                }
            })
        })
        .collect::<Vec<_>>();
    let consumers = (0..WORKERS)
        .map(|_| {
            let buffer = buffer.clone();
            thread::spawn(move || {
                (0..ITEMS)
                    .map(|_| {
                        let mut queue = buffer.enter();
                        while queue.is_empty() {
                            queue.wait(NOT_EMPTY);
                        }
                        let item = queue.pop_front().unwrap();
                        queue.notify_one(NOT_FULL);
                        item
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    for producer in producers {
        producer.join().unwrap();
    }
    let mut items = consumers
        .into_iter()
        .flat_map(|consumer| consumer.join().unwrap())
        .collect::<Vec<_>>();
    items.sort();
    assert_eq!(items, (0..WORKERS * ITEMS).collect::<Vec<_>>());
}
