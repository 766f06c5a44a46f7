use std::time::Duration;
use transit::{
    ConnectorId, ConnectorKind, Error, Scenario, ScenarioError, Step,
    scenario::{FerrySpec, LaneSpec},
};

const SAMPLE: &str = "
2
100 200
50 75
1
300 400 5
1
20 60
3
10 2 N0 0 1 F0 1 0
5 1 C0 3 1
0 0
";

fn load(input: &str) -> Result<Scenario, ScenarioError> {
    input.parse()
}

pub fn parse() {
    let scenario = load(SAMPLE).unwrap();

    assert_eq!(
        scenario.narrow_bridges,
        [
            LaneSpec {
                travel_time: Duration::from_millis(100),
                maximum_wait_time: Duration::from_millis(200),
            },
            LaneSpec {
                travel_time: Duration::from_millis(50),
                maximum_wait_time: Duration::from_millis(75),
            },
        ]
    );
    assert_eq!(
        scenario.ferries,
        [FerrySpec {
            travel_time: Duration::from_millis(300),
            maximum_wait_time: Duration::from_millis(400),
            capacity: 5,
        }]
    );
    assert_eq!(scenario.crossroads.len(), 1);
    assert_eq!(scenario.connectors(ConnectorKind::NarrowBridge), 2);

    let cars = &scenario.cars;
    assert_eq!(cars.len(), 3);
    assert_eq!(
        cars.iter().map(|car| car.id).collect::<Vec<_>>(),
        [0, 1, 2]
    );
    assert_eq!(cars[0].travel_time, Duration::from_millis(10));
    assert_eq!(
        cars[0].path,
        [
            Step {
                connector: ConnectorId::new(ConnectorKind::NarrowBridge, 0),
                from: 0,
                to: 1,
            },
            Step {
                connector: ConnectorId::new(ConnectorKind::Ferry, 0),
                from: 1,
                to: 0,
            },
        ]
    );
    assert_eq!(cars[1].path[0].connector.to_string(), "C0");
    assert_eq!(cars[1].path[0].from, 3);
    assert!(cars[2].path.is_empty());

    // Line breaks carry no meaning.
    let flat = SAMPLE.split_whitespace().collect::<Vec<_>>().join(" ");
    assert_eq!(load(&flat).unwrap(), scenario);

    let read = Scenario::read(SAMPLE.as_bytes()).unwrap();
    assert_eq!(read, scenario);
}

pub fn connector_ids() {
    for (token, kind, index) in [
        ("N0", ConnectorKind::NarrowBridge, 0),
        ("F3", ConnectorKind::Ferry, 3),
        ("C12", ConnectorKind::Crossroad, 12),
    ] {
        let id: ConnectorId = token.parse().unwrap();
        assert_eq!(id, ConnectorId::new(kind, index));
        assert_eq!(id.to_string(), token);
    }
    for token in ["X0", "N", "n0", "N-1", "N+1", "F1a", "0"] {
        assert_eq!(
            token.parse::<ConnectorId>(),
            Err(ScenarioError::UnknownConnector {
                token: token.to_owned()
            }),
            "{token} must be rejected"
        );
    }
    assert_eq!(ConnectorKind::Crossroad.approaches(), 4);
    assert_eq!(ConnectorKind::Ferry.approaches(), 2);
}

pub fn unknown_connector() {
    let input = "0 0 0 1 10 1 B0 0 1";
    assert_eq!(
        load(input),
        Err(ScenarioError::UnknownConnector {
            token: "B0".to_owned()
        })
    );
}

pub fn no_such_connector() {
    let input = "1 10 10 0 0 1 10 1 N1 0 1";
    assert_eq!(
        load(input),
        Err(ScenarioError::NoSuchConnector {
            connector: ConnectorId::new(ConnectorKind::NarrowBridge, 1)
        })
    );
    let input = "1 10 10 0 0 1 10 1 F0 0 1";
    assert!(matches!(
        load(input),
        Err(ScenarioError::NoSuchConnector { .. })
    ));
}

pub fn invalid_approach() {
    let bridge = "1 10 10 0 0 1 10 1 N0 2 0";
    assert_eq!(
        load(bridge),
        Err(ScenarioError::InvalidApproach {
            connector: ConnectorId::new(ConnectorKind::NarrowBridge, 0),
            approach: 2,
        })
    );
    let crossroad = "0 0 1 10 10 1 10 1 C0 1 4";
    assert_eq!(
        load(crossroad),
        Err(ScenarioError::InvalidApproach {
            connector: ConnectorId::new(ConnectorKind::Crossroad, 0),
            approach: 4,
        })
    );
    // Every approach of a crossroad is valid.
    assert!(load("0 0 1 10 10 1 10 1 C0 3 2").is_ok());
}

pub fn zero_capacity() {
    let input = "0 2 10 10 1 10 10 0 0 0";
    assert_eq!(
        load(input),
        Err(ScenarioError::ZeroCapacity { index: 1 })
    );
}

pub fn truncated() {
    assert!(matches!(
        load(""),
        Err(ScenarioError::UnexpectedEof { .. })
    ));
    assert!(matches!(
        load("1 100"),
        Err(ScenarioError::UnexpectedEof { .. })
    ));
    assert!(matches!(
        load("1 10 10 0 0 1 10 2 N0 0 1"),
        Err(ScenarioError::UnexpectedEof { .. })
    ));
    match Scenario::read("0 0 0 2".as_bytes()) {
        Err(Error::Scenario(ScenarioError::UnexpectedEof { .. })) => {}
        other => panic!("unexpected result: {other:?}"),
    }
}

pub fn invalid_number() {
    assert_eq!(
        load("x"),
        Err(ScenarioError::InvalidNumber {
            token: "x".to_owned(),
            expected: "number of narrow bridges",
        })
    );
    assert!(matches!(
        load("1 -5 10 0 0 0"),
        Err(ScenarioError::InvalidNumber { .. })
    ));
    assert!(matches!(
        load("0 0 0 1 1.5 0"),
        Err(ScenarioError::InvalidNumber { .. })
    ));
}
