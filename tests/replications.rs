use queuesim::output_analysis::QueueTheory;
use queuesim::simulator::{Replications, SimulationConfig};
use queuesim::utils::errors::SimulationError;

#[test]
fn replications_are_independent_and_reproducible() {
    let config = SimulationConfig::mm1(2.0, 1.5, 200).unwrap().with_seed(100);
    let first = Replications::run(&config, 6).unwrap();
    let second = Replications::run(&config, 6).unwrap();

    assert_eq![6, first.runs().len()];
    assert_eq![first.runs(), second.runs()];
    first.runs().windows(2).for_each(|pair| {
        assert!(pair[0].avg_delay != pair[1].avg_delay);
    });
}

#[test]
fn replication_confidence_intervals_bracket_the_point_estimate() {
    let config = SimulationConfig::mm1(2.0, 1.0, 2_000).unwrap().with_seed(31);
    let replications = Replications::run(&config, 20).unwrap();
    let theory = QueueTheory::for_config(&config).unwrap();

    let utilization = replications.server_utilization();
    let interval = utilization.confidence_interval_mean(0.025).unwrap();
    assert!(interval.contains(utilization.point_estimate_mean()));
    assert!(interval.half_width() > 0.0);
    assert!((utilization.point_estimate_mean() - theory.traffic_intensity).abs() < 0.05);

    let delay = replications.avg_delay();
    let interval = delay.confidence_interval_mean(0.025).unwrap();
    assert!(interval.lower() <= delay.point_estimate_mean());
    assert!(delay.point_estimate_mean() <= interval.upper());
    assert_eq![20, replications.avg_queue_length().points().len()];
    assert_eq![20, replications.time_average_queue_length().points().len()];
}

#[test]
fn zero_replications_are_rejected() {
    let config = SimulationConfig::mm1(2.0, 1.0, 10).unwrap();
    assert!(matches!(
        Replications::run(&config, 0),
        Err(SimulationError::InvalidParameter(_))
    ));
}
