use crate::{Arrival, arrive, crossings};
use std::time::{Duration, Instant};
use transit::{Ferry, RecordingSink};

fn ferry(travel_ms: u64, maximum_wait_ms: u64, capacity: usize) -> Ferry {
    Ferry::new(
        0,
        Duration::from_millis(travel_ms),
        Duration::from_millis(maximum_wait_ms),
        capacity,
    )
}

pub fn full_boat_sails() {
    let ferry = ferry(50, 1000, 2);
    let sink = RecordingSink::new();

    arrive(
        &[Arrival::new(0, 0, 0), Arrival::new(1, 0, 5)],
        |car, from| ferry.pass(car, from, &sink),
    );

    let crossings = crossings(&sink.take(), ferry.id());
    assert_eq!(crossings.len(), 2);
    for crossing in &crossings {
        assert!(
            crossing.finish < Duration::from_millis(500),
            "a full boat must not wait for the timeout"
        );
        assert!(crossing.finish >= crossings[0].start + Duration::from_millis(50));
    }
    assert_eq!(ferry.sailings(0), 1);
    assert_eq!(ferry.sailings(1), 0);
    assert_eq!(ferry.boarded(0), 0);
}

pub fn capacity_one() {
    let ferry = ferry(20, 1000, 1);
    let sink = RecordingSink::new();

    let begin = Instant::now();
    ferry.pass(0, 1, &sink);
    ferry.pass(1, 1, &sink);
    assert!(begin.elapsed() < Duration::from_millis(500));
    assert_eq!(ferry.sailings(1), 2);
    assert_eq!(crossings(&sink.take(), ferry.id()).len(), 2);
}

pub fn timeout_sails_partial_boat() {
    let ferry = ferry(50, 150, 3);
    let sink = RecordingSink::new();

    ferry.pass(0, 0, &sink);

    let crossing = crossings(&sink.take(), ferry.id())[0];
    assert!(
        crossing.start >= Duration::from_millis(150),
        "sailed after {:?}, before the maximum wait time",
        crossing.start
    );
    assert!(crossing.start < Duration::from_millis(450));
    assert!(crossing.finish - crossing.start >= Duration::from_millis(50));
    assert_eq!(ferry.sailings(0), 1);
    assert_eq!(ferry.boarded(0), 0);
}

pub fn passengers_land_together() {
    let ferry = ferry(100, 1000, 3);
    let sink = RecordingSink::new();

    arrive(
        &[
            Arrival::new(0, 1, 0),
            Arrival::new(1, 1, 5),
            Arrival::new(2, 1, 10),
        ],
        |car, from| ferry.pass(car, from, &sink),
    );

    let crossings = crossings(&sink.take(), ferry.id());
    assert_eq!(crossings.len(), 3);
    let sailed = crossings.iter().map(|c| c.start).min().unwrap();
    let first_ashore = crossings.iter().map(|c| c.finish).min().unwrap();
    let last_ashore = crossings.iter().map(|c| c.finish).max().unwrap();
    assert!(first_ashore >= sailed + Duration::from_millis(100));
    assert!(last_ashore - first_ashore < Duration::from_millis(50));
    assert_eq!(ferry.sailings(1), 1);
}

pub fn batches() {
    const CARS: u32 = 7;
    let ferry = ferry(30, 500, 3);
    let sink = RecordingSink::new();

    let arrivals = (0..CARS)
        .map(|car| Arrival::new(car, 0, 0))
        .collect::<Vec<_>>();
    arrive(&arrivals, |car, from| ferry.pass(car, from, &sink));

    let crossings = crossings(&sink.take(), ferry.id());
    assert_eq!(crossings.len(), CARS as usize);
    // Two full boats leave at once; the last car sails alone on timeout.
    assert_eq!(ferry.sailings(0), 3);
    assert_eq!(
        crossings
            .iter()
            .filter(|c| c.start >= Duration::from_millis(400))
            .count(),
        1
    );
    assert_eq!(ferry.boarded(0), 0);
}

pub fn sides_are_independent() {
    let ferry = ferry(20, 200, 2);
    let sink = RecordingSink::new();

    arrive(
        &[Arrival::new(0, 0, 0), Arrival::new(1, 1, 0)],
        |car, from| ferry.pass(car, from, &sink),
    );

    for crossing in crossings(&sink.take(), ferry.id()) {
        assert!(
            crossing.start >= Duration::from_millis(200),
            "car {} sailed with a car from the other side",
            crossing.car
        );
    }
    assert_eq!(ferry.sailings(0), 1);
    assert_eq!(ferry.sailings(1), 1);
}

pub fn landings_in_order() {
    const CARS: u32 = 6;
    // Every car sails its own boat, all of them at about the same time.
    let ferry = ferry(50, 1000, 1);
    let sink = RecordingSink::new();

    let arrivals = (0..CARS)
        .map(|car| Arrival::new(car, 0, 0))
        .collect::<Vec<_>>();
    arrive(&arrivals, |car, from| ferry.pass(car, from, &sink));

    let crossings = crossings(&sink.take(), ferry.id());
    assert_eq!(crossings.len(), CARS as usize);
    for pair in crossings.windows(2) {
        assert!(
            pair[1].finish >= pair[0].finish,
            "car {} landed before car {}, which sailed earlier",
            pair[1].car,
            pair[0].car
        );
    }
    for crossing in &crossings {
        assert!(crossing.finish - crossing.start >= Duration::from_millis(50));
    }
    assert_eq!(ferry.sailings(0), u64::from(CARS));
}
