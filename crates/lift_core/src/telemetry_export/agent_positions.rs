use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, UInt64Array, UInt8Array};
use arrow::datatypes::Schema;

use crate::telemetry::SimSnapshots;

use super::utils::{
    direction_code, person_state_code, u64_field, u8_field, write_record_batch, AGENT_ELEVATOR,
    AGENT_PERSON,
};

/// One row per person and elevator per snapshot. For persons `state` is the
/// person state code; for elevators it is the travel direction code.
pub fn write_agent_positions_parquet<P: AsRef<Path>>(
    path: P,
    snapshots: &SimSnapshots,
) -> Result<(), Box<dyn Error>> {
    let mut timestamp_ms = Vec::new();
    let mut entity = Vec::new();
    let mut agent_type = Vec::new();
    let mut state = Vec::new();
    let mut floor = Vec::new();

    for snapshot in &snapshots.snapshots {
        for person in &snapshot.persons {
            timestamp_ms.push(snapshot.timestamp_ms);
            entity.push(person.entity.to_bits());
            agent_type.push(AGENT_PERSON);
            state.push(person_state_code(person.state));
            floor.push(person.floor.level() as u64);
        }
        for elevator in &snapshot.elevators {
            timestamp_ms.push(snapshot.timestamp_ms);
            entity.push(elevator.entity.to_bits());
            agent_type.push(AGENT_ELEVATOR);
            state.push(direction_code(elevator.direction));
            floor.push(elevator.floor.level() as u64);
        }
    }

    let schema = Schema::new(vec![
        u64_field("timestamp_ms"),
        u64_field("entity"),
        u8_field("agent_type"),
        u8_field("state"),
        u64_field("floor"),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(timestamp_ms)),
        Arc::new(UInt64Array::from(entity)),
        Arc::new(UInt8Array::from(agent_type)),
        Arc::new(UInt8Array::from(state)),
        Arc::new(UInt64Array::from(floor)),
    ];

    write_record_batch(path, schema, arrays)
}
