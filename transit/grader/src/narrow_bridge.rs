use crate::{Arrival, actions, arrive, crossings, first};
use std::time::Duration;
use transit::{Action, NarrowBridge, RecordingSink, TransitConfig};

fn bridge(travel_ms: u64, maximum_wait_ms: u64) -> NarrowBridge {
    let config = TransitConfig::builder()
        .follow_delay(Duration::from_millis(10))
        .build();
    NarrowBridge::new(
        0,
        Duration::from_millis(travel_ms),
        Duration::from_millis(maximum_wait_ms),
        &config,
    )
}

pub fn single_car() {
    let bridge = bridge(30, 100);
    let sink = RecordingSink::new();

    bridge.pass(0, 0, &sink);
    let records = sink.take();
    assert_eq!(
        actions(&records, 0, bridge.id()),
        [Action::StartPassing, Action::FinishPassing]
    );
    let crossing = crossings(&records, bridge.id())[0];
    assert!(crossing.finish - crossing.start >= Duration::from_millis(30));
    assert_eq!(bridge.occupancy(), 0);
}

pub fn switch_direction() {
    let bridge = bridge(10, 100);
    let sink = RecordingSink::new();
    assert_eq!(bridge.direction(), 0);

    bridge.pass(0, 1, &sink);
    assert_eq!(bridge.direction(), 1);
    bridge.pass(1, 1, &sink);
    bridge.pass(2, 0, &sink);
    assert_eq!(bridge.direction(), 0);

    let records = sink.take();
    assert_eq!(
        actions(&records, 0, bridge.id()),
        [
            Action::SwitchingLane,
            Action::StartPassing,
            Action::FinishPassing
        ]
    );
    assert_eq!(
        actions(&records, 1, bridge.id()),
        [Action::StartPassing, Action::FinishPassing]
    );
    assert_eq!(actions(&records, 2, bridge.id())[0], Action::SwitchingLane);
}

pub fn fifo() {
    const CARS: u32 = 5;
    let bridge = bridge(200, 1000);
    let sink = RecordingSink::new();

    let arrivals = (0..CARS)
        .map(|car| Arrival::new(car, 0, u64::from(car) * 20))
        .collect::<Vec<_>>();
    arrive(&arrivals, |car, from| bridge.pass(car, from, &sink));

    let crossings = crossings(&sink.take(), bridge.id());
    assert_eq!(
        crossings.iter().map(|c| c.car).collect::<Vec<_>>(),
        (0..CARS).collect::<Vec<_>>(),
        "cars of one direction must cross in arrival order"
    );
    // Followers do not wait for the car in front to leave the bridge.
    assert!(crossings[CARS as usize - 1].start < crossings[0].finish);
    for (crossing, arrival) in crossings.iter().zip(&arrivals).skip(1) {
        assert!(crossing.start >= arrival.after + Duration::from_millis(10));
    }
}

pub fn opposite_waits_for_drain() {
    let bridge = bridge(100, 200);
    let sink = RecordingSink::new();

    arrive(
        &[
            Arrival::new(0, 0, 0),
            Arrival::new(1, 0, 5),
            Arrival::new(2, 0, 10),
            Arrival::new(3, 1, 20),
        ],
        |car, from| bridge.pass(car, from, &sink),
    );

    let records = sink.take();
    let crossings = crossings(&records, bridge.id());
    assert_eq!(
        crossings.iter().map(|c| c.car).collect::<Vec<_>>(),
        [0, 1, 2, 3]
    );
    let last_of_side_0 = crossings[..3].iter().map(|c| c.finish).max().unwrap();
    assert!(crossings[3].start >= last_of_side_0);
    // The bridge drained before the wait time ran out.
    assert_eq!(
        actions(&records, 3, bridge.id()),
        [
            Action::SwitchingLane,
            Action::StartPassing,
            Action::FinishPassing
        ]
    );
}

pub fn timeout_bounds_starvation() {
    const STREAM: u32 = 30;
    const LATE: u32 = STREAM;
    let bridge = bridge(50, 100);
    let sink = RecordingSink::new();

    // Side 0 never leaves the bridge empty on its own.
    let mut arrivals = (0..STREAM)
        .map(|car| Arrival::new(car, 0, u64::from(car) * 20))
        .collect::<Vec<_>>();
    arrivals.push(Arrival::new(LATE, 1, 30));
    arrive(&arrivals, |car, from| bridge.pass(car, from, &sink));

    let records = sink.take();
    assert_eq!(
        actions(&records, LATE, bridge.id())[0],
        Action::SwitchingLaneTimeout
    );
    let claimed = first(&records, LATE, bridge.id(), Action::SwitchingLaneTimeout);
    assert!(claimed >= Duration::from_millis(130));

    let crossings = crossings(&records, bridge.id());
    assert_eq!(crossings.len(), arrivals.len());
    let late = crossings.iter().find(|c| c.car == LATE).unwrap();
    assert!(
        late.start < Duration::from_millis(450),
        "side 1 was starved until {:?}",
        late.start
    );
    for other in crossings.iter().filter(|c| c.car != LATE) {
        assert!(!other.overlaps(late), "car {} shared the bridge", other.car);
    }
}

pub fn mutual_exclusion() {
    let bridge = bridge(15, 40);
    let sink = RecordingSink::new();

    let arrivals = (0..24)
        .map(|car: u32| Arrival::new(car, (car as usize * 7 / 3) % 2, u64::from(car % 8) * 9))
        .collect::<Vec<_>>();
    arrive(&arrivals, |car, from| bridge.pass(car, from, &sink));

    let side = |car: u32| arrivals[car as usize].from;
    let crossings = crossings(&sink.take(), bridge.id());
    assert_eq!(crossings.len(), arrivals.len());
    for (i, a) in crossings.iter().enumerate() {
        for b in &crossings[i + 1..] {
            if side(a.car) != side(b.car) {
                assert!(
                    !a.overlaps(b),
                    "cars {} and {} crossed in opposite directions at once",
                    a.car,
                    b.car
                );
            }
        }
    }
    assert_eq!(bridge.occupancy(), 0);
}

pub fn queued_side_keeps_order() {
    let bridge = bridge(200, 2000);
    let sink = RecordingSink::new();

    // Side 1 queues up behind a car holding the bridge from side 0.
    arrive(
        &[
            Arrival::new(0, 0, 0),
            Arrival::new(1, 1, 20),
            Arrival::new(2, 1, 40),
            Arrival::new(3, 1, 60),
        ],
        |car, from| bridge.pass(car, from, &sink),
    );

    let records = sink.take();
    let crossings = crossings(&records, bridge.id());
    assert_eq!(
        crossings.iter().map(|c| c.car).collect::<Vec<_>>(),
        [0, 1, 2, 3],
        "queued cars must cross in the order they arrived"
    );
    for crossing in &crossings[1..] {
        assert!(crossing.start >= crossings[0].finish);
    }
    // Once the direction changed, the queue follows without draining.
    assert!(crossings[3].start < crossings[1].finish);
    // Whichever queued car wakes first turns the bridge around, once.
    let switches = (1..4)
        .flat_map(|car| actions(&records, car, bridge.id()))
        .filter(|action| *action != Action::StartPassing && *action != Action::FinishPassing)
        .collect::<Vec<_>>();
    assert_eq!(switches, [Action::SwitchingLane]);
}

pub fn claim_holds_until_entry() {
    const STREAM: u32 = 30;
    const LATE: u32 = STREAM;
    // The wait time is shorter than a single crossing.
    let bridge = bridge(100, 30);
    let sink = RecordingSink::new();

    let mut arrivals = (0..STREAM)
        .map(|car| Arrival::new(car, 0, u64::from(car) * 20))
        .collect::<Vec<_>>();
    arrivals.push(Arrival::new(LATE, 1, 30));
    arrive(&arrivals, |car, from| bridge.pass(car, from, &sink));

    let records = sink.take();
    assert_eq!(
        actions(&records, LATE, bridge.id()),
        [
            Action::SwitchingLaneTimeout,
            Action::StartPassing,
            Action::FinishPassing
        ],
        "the claim must hold until side 1 is on the bridge"
    );
    let claimed = first(&records, LATE, bridge.id(), Action::SwitchingLaneTimeout);
    let entered = first(&records, LATE, bridge.id(), Action::StartPassing);
    assert!(
        entered < Duration::from_millis(350),
        "side 1 was starved until {entered:?}"
    );
    // Nobody takes the bridge back while the claim is pending.
    assert!(
        records
            .iter()
            .filter(|r| r.at > claimed && r.at < entered)
            .all(|r| r.event.action != Action::SwitchingLaneTimeout)
    );

    let crossings = crossings(&records, bridge.id());
    assert_eq!(crossings.len(), arrivals.len());
    let late = crossings.iter().find(|c| c.car == LATE).unwrap();
    for other in crossings.iter().filter(|c| c.car != LATE) {
        assert!(!other.overlaps(late), "car {} shared the bridge", other.car);
    }
}
