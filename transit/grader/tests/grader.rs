use std::process;
use transit_grader::*;

fn main() {
    let passed = TestDriver::start([
        // Monitor.
        &sync::notify_one_fifo,
        &sync::notify_all,
        &sync::notify_without_waiters,
        &sync::wait_until_timeout,
        &sync::wait_until_notified,
        &sync::unlocked,
        &sync::bounded_buffer,
        // Narrow bridge.
        &narrow_bridge::single_car,
        &narrow_bridge::switch_direction,
        &narrow_bridge::fifo,
        &narrow_bridge::opposite_waits_for_drain,
        &narrow_bridge::timeout_bounds_starvation,
        &narrow_bridge::mutual_exclusion,
        &narrow_bridge::queued_side_keeps_order,
        &narrow_bridge::claim_holds_until_entry,
        // Ferry.
        &ferry::full_boat_sails,
        &ferry::capacity_one,
        &ferry::timeout_sails_partial_boat,
        &ferry::passengers_land_together,
        &ferry::batches,
        &ferry::sides_are_independent,
        &ferry::landings_in_order,
        // Crossroad.
        &crossroad::simultaneous_approaches,
        &crossroad::round_robin,
        &crossroad::mutual_exclusion,
        &crossroad::timeout_claim,
        // Scenario.
        &scenario::parse,
        &scenario::connector_ids,
        &scenario::unknown_connector,
        &scenario::no_such_connector,
        &scenario::invalid_approach,
        &scenario::zero_capacity,
        &scenario::truncated,
        &scenario::invalid_number,
        // Simulator.
        &simulator::event_order,
        &simulator::writer_sink,
        &simulator::random_traffic,
    ]);
    if !passed {
        process::exit(1);
    }
}
