use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, UInt64Array};
use arrow::datatypes::Schema;

use crate::telemetry::SimSnapshots;

use super::utils::{u64_field, write_record_batch};

pub fn write_snapshot_counts_parquet<P: AsRef<Path>>(
    path: P,
    snapshots: &SimSnapshots,
) -> Result<(), Box<dyn Error>> {
    let mut timestamp_ms = Vec::with_capacity(snapshots.snapshots.len());
    let mut persons_resting = Vec::with_capacity(snapshots.snapshots.len());
    let mut persons_waiting = Vec::with_capacity(snapshots.snapshots.len());
    let mut persons_riding = Vec::with_capacity(snapshots.snapshots.len());
    let mut persons_done = Vec::with_capacity(snapshots.snapshots.len());
    let mut elevators_idle = Vec::with_capacity(snapshots.snapshots.len());
    let mut elevators_moving_up = Vec::with_capacity(snapshots.snapshots.len());
    let mut elevators_moving_down = Vec::with_capacity(snapshots.snapshots.len());
    let mut elevators_doors_open = Vec::with_capacity(snapshots.snapshots.len());

    for snapshot in &snapshots.snapshots {
        timestamp_ms.push(snapshot.timestamp_ms);
        persons_resting.push(snapshot.counts.persons_resting as u64);
        persons_waiting.push(snapshot.counts.persons_waiting as u64);
        persons_riding.push(snapshot.counts.persons_riding as u64);
        persons_done.push(snapshot.counts.persons_done as u64);
        elevators_idle.push(snapshot.counts.elevators_idle as u64);
        elevators_moving_up.push(snapshot.counts.elevators_moving_up as u64);
        elevators_moving_down.push(snapshot.counts.elevators_moving_down as u64);
        elevators_doors_open.push(snapshot.counts.elevators_doors_open as u64);
    }

    let schema = Schema::new(vec![
        u64_field("timestamp_ms"),
        u64_field("persons_resting"),
        u64_field("persons_waiting"),
        u64_field("persons_riding"),
        u64_field("persons_done"),
        u64_field("elevators_idle"),
        u64_field("elevators_moving_up"),
        u64_field("elevators_moving_down"),
        u64_field("elevators_doors_open"),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(timestamp_ms)),
        Arc::new(UInt64Array::from(persons_resting)),
        Arc::new(UInt64Array::from(persons_waiting)),
        Arc::new(UInt64Array::from(persons_riding)),
        Arc::new(UInt64Array::from(persons_done)),
        Arc::new(UInt64Array::from(elevators_idle)),
        Arc::new(UInt64Array::from(elevators_moving_up)),
        Arc::new(UInt64Array::from(elevators_moving_down)),
        Arc::new(UInt64Array::from(elevators_doors_open)),
    ];

    write_record_batch(path, schema, arrays)
}
