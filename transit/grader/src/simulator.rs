use crate::crossings;
use rand::{Rng, seq::SliceRandom};
use std::{collections::HashMap, fmt::Write};
use transit::{
    Action, ConnectorId, ConnectorKind, Record, RecordingSink, Scenario, Simulator, TransitConfig,
    WriterSink,
};

fn simulator(input: &str) -> Simulator {
    let scenario: Scenario = input.parse().unwrap();
    Simulator::new(scenario, &TransitConfig::default())
}

/// Checks that every car went through TRAVEL, ARRIVE, START_PASSING and
/// FINISH_PASSING for each step of its path, in order.
fn assert_complete(simulator: &Simulator, records: &[Record]) {
    for car in simulator.cars() {
        let mut events = records
            .iter()
            .map(|record| record.event)
            .filter(|event| event.car == car.id)
            .filter(|event| {
                !matches!(
                    event.action,
                    Action::SwitchingLane | Action::SwitchingLaneTimeout
                )
            });
        for step in &car.path {
            for action in [
                Action::Travel,
                Action::Arrive,
                Action::StartPassing,
                Action::FinishPassing,
            ] {
                let event = events
                    .next()
                    .unwrap_or_else(|| panic!("car {} stopped before {action}", car.id));
                assert_eq!(
                    (event.connector, event.action),
                    (step.connector, action),
                    "car {} out of order",
                    car.id
                );
            }
        }
        assert_eq!(events.next(), None, "car {} did more than its path", car.id);
    }
}

pub fn event_order() {
    let simulator = simulator(
        "
        1
        20 100
        1
        20 100 2
        1
        20 100
        3
        5 3 N0 0 1 F0 0 1 C0 2 0
        5 2 F0 0 1 C0 1 3
        5 2 C0 3 1 N0 1 0
        ",
    );
    assert!(
        simulator
            .connector(ConnectorId::new(ConnectorKind::Ferry, 1))
            .is_none()
    );
    let ferry = ConnectorId::new(ConnectorKind::Ferry, 0);
    assert_eq!(simulator.connector(ferry).map(|c| c.id()), Some(ferry));

    let sink = RecordingSink::new();
    simulator.run(&sink).unwrap();

    let records = sink.take();
    assert_complete(&simulator, &records);
    assert_eq!(
        records
            .iter()
            .filter(|r| r.event.action == Action::FinishPassing)
            .count(),
        7
    );
}

pub fn writer_sink() {
    let simulator = simulator("1 10 100 0 0 2 5 1 N0 0 1 10 1 N0 0 1");
    let sink = WriterSink::new(Vec::new());
    simulator.run(&sink).unwrap();

    let output = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    let lines = output.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 8);
    for line in lines {
        let fields = line.split('\t').collect::<Vec<_>>();
        assert_eq!(fields.len(), 4, "malformed line {line:?}");
        fields[0].parse::<u64>().unwrap();
        assert!(["0", "1"].contains(&fields[1]));
        assert_eq!(fields[2], "N0");
        assert!(
            ["TRAVEL", "ARRIVE", "START_PASSING", "FINISH_PASSING"].contains(&fields[3]),
            "unexpected action in {line:?}"
        );
    }
}

pub fn random_traffic() {
    const CARS: usize = 16;
    let mut rng = rand::thread_rng();
    let connectors = ["N0", "N1", "F0", "C0", "C1"];

    fn lane(rng: &mut impl Rng, input: &mut String) {
        let _ = write!(
            input,
            "{} {} ",
            rng.gen_range(5..=15),
            rng.gen_range(20..=60)
        );
    }

    let mut input = String::new();
    input.push_str("2 ");
    lane(&mut rng, &mut input);
    lane(&mut rng, &mut input);
    input.push_str("1 ");
    lane(&mut rng, &mut input);
    let _ = write!(input, "{} ", rng.gen_range(1..=4));
    input.push_str("2 ");
    lane(&mut rng, &mut input);
    lane(&mut rng, &mut input);

    let mut approaches = HashMap::new();
    let _ = write!(input, "{CARS} ");
    for car in 0..CARS as u32 {
        let length = rng.gen_range(1..=3);
        let _ = write!(input, "{} {length} ", rng.gen_range(0..=20));
        for &connector in connectors.choose_multiple(&mut rng, length) {
            let id: ConnectorId = connector.parse().unwrap();
            let from = rng.gen_range(0..id.kind.approaches());
            let to = rng.gen_range(0..id.kind.approaches());
            approaches.insert((car, id), from);
            let _ = write!(input, "{connector} {from} {to} ");
        }
    }

    let simulator = simulator(&input);
    let sink = RecordingSink::new();
    simulator.run(&sink).unwrap();
    let records = sink.take();
    assert_complete(&simulator, &records);

    for connector in ["N0", "N1", "C0", "C1"] {
        let id: ConnectorId = connector.parse().unwrap();
        let crossings = crossings(&records, id);
        for (i, a) in crossings.iter().enumerate() {
            for b in &crossings[i + 1..] {
                if approaches[&(a.car, id)] != approaches[&(b.car, id)] {
                    assert!(
                        !a.overlaps(b),
                        "{connector}: cars {} and {} crossed at once ({input})",
                        a.car,
                        b.car
                    );
                }
            }
        }
    }
}
