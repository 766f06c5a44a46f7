use crate::{Arrival, actions, arrive, crossings, first};
use std::time::Duration;
use transit::{Action, Crossroad, RecordingSink, TransitConfig};

fn crossroad(travel_ms: u64, maximum_wait_ms: u64) -> Crossroad {
    Crossroad::new(
        0,
        Duration::from_millis(travel_ms),
        Duration::from_millis(maximum_wait_ms),
        &TransitConfig::default(),
    )
}

fn assert_exclusive(crossings: &[crate::Crossing], approach: impl Fn(u32) -> usize) {
    for (i, a) in crossings.iter().enumerate() {
        for b in &crossings[i + 1..] {
            if approach(a.car) != approach(b.car) {
                assert!(
                    !a.overlaps(b),
                    "cars {} and {} were on the crossroad from different approaches",
                    a.car,
                    b.car
                );
            }
        }
    }
}

pub fn simultaneous_approaches() {
    let crossroad = crossroad(30, 1000);
    let sink = RecordingSink::new();

    let arrivals = (0..4)
        .map(|car: u32| Arrival::new(car, car as usize, 0))
        .collect::<Vec<_>>();
    arrive(&arrivals, |car, from| crossroad.pass(car, from, &sink));

    let records = sink.take();
    let crossings = crossings(&records, crossroad.id());
    assert_eq!(crossings.len(), 4);
    assert_exclusive(&crossings, |car| car as usize);
    // Approach 0 owns the crossroad initially; the others switch to theirs.
    for car in 1..4 {
        assert_eq!(actions(&records, car, crossroad.id())[0], Action::SwitchingLane);
    }
    assert_eq!(crossroad.occupancy(), 0);
}

pub fn round_robin() {
    let crossroad = crossroad(50, 2000);
    let sink = RecordingSink::new();

    // Approach 2 takes the crossroad, then 0, 1 and 3 queue up in that order.
    arrive(
        &[
            Arrival::new(0, 2, 0),
            Arrival::new(1, 0, 10),
            Arrival::new(2, 1, 15),
            Arrival::new(3, 3, 20),
        ],
        |car, from| crossroad.pass(car, from, &sink),
    );

    let crossings = crossings(&sink.take(), crossroad.id());
    assert_eq!(
        crossings.iter().map(|c| c.car).collect::<Vec<_>>(),
        [0, 3, 1, 2],
        "the crossroad must be handed over as 2, 3, 0, 1"
    );
    for pair in crossings.windows(2) {
        assert!(pair[1].start >= pair[0].finish);
    }
    assert_eq!(crossroad.direction(), 1);
}

pub fn mutual_exclusion() {
    let crossroad = crossroad(15, 50);
    let sink = RecordingSink::new();

    let arrivals = (0..32)
        .map(|car: u32| Arrival::new(car, (car as usize * 5 / 2) % 4, u64::from(car % 6) * 11))
        .collect::<Vec<_>>();
    arrive(&arrivals, |car, from| crossroad.pass(car, from, &sink));

    let crossings = crossings(&sink.take(), crossroad.id());
    assert_eq!(crossings.len(), arrivals.len());
    assert_exclusive(&crossings, |car| arrivals[car as usize].from);
}

pub fn timeout_claim() {
    // Waiting is much shorter than a crossing.
    let crossroad = crossroad(225, 50);
    let sink = RecordingSink::new();

    arrive(
        &[
            Arrival::new(0, 0, 0),
            Arrival::new(1, 2, 10),
            Arrival::new(2, 1, 20),
        ],
        |car, from| crossroad.pass(car, from, &sink),
    );

    let records = sink.take();
    let crossings = crossings(&records, crossroad.id());
    assert_eq!(
        crossings.iter().map(|c| c.car).collect::<Vec<_>>(),
        [0, 1, 2],
        "approach 2 claimed the crossroad first"
    );
    assert_eq!(
        actions(&records, 1, crossroad.id()),
        [
            Action::SwitchingLaneTimeout,
            Action::StartPassing,
            Action::FinishPassing
        ]
    );
    let claimed = first(&records, 1, crossroad.id(), Action::SwitchingLaneTimeout);
    assert!(claimed >= Duration::from_millis(60));

    // Approach 1 is next in rotation after 0, yet the claimant is woken as
    // soon as the crossroad empties instead of at its next deadline.
    assert!(
        crossings[1].start < crossings[0].finish + Duration::from_millis(25),
        "claimant entered {:?} after the crossroad emptied",
        crossings[1].start - crossings[0].finish
    );
    assert!(
        records
            .iter()
            .filter(|r| r.event.car == 2 && r.at < crossings[1].start)
            .all(|r| r.event.action != Action::SwitchingLaneTimeout),
        "approach 1 overrode a pending claim"
    );
    assert_exclusive(&crossings, |car| [0, 2, 1][car as usize]);
}
