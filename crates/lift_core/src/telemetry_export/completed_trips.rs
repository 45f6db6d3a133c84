use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, UInt64Array, UInt8Array};
use arrow::datatypes::Schema;

use crate::telemetry::SimTelemetry;

use super::utils::{direction_code, u64_field, u8_field, write_record_batch};

pub fn write_completed_trips_parquet<P: AsRef<Path>>(
    path: P,
    telemetry: &SimTelemetry,
) -> Result<(), Box<dyn Error>> {
    let mut person_entities = Vec::with_capacity(telemetry.completed_trips.len());
    let mut elevator_entities = Vec::with_capacity(telemetry.completed_trips.len());
    let mut start_floor = Vec::with_capacity(telemetry.completed_trips.len());
    let mut end_floor = Vec::with_capacity(telemetry.completed_trips.len());
    let mut direction = Vec::with_capacity(telemetry.completed_trips.len());
    let mut distance = Vec::with_capacity(telemetry.completed_trips.len());
    let mut called_at = Vec::with_capacity(telemetry.completed_trips.len());
    let mut boarded_at = Vec::with_capacity(telemetry.completed_trips.len());
    let mut completed_at = Vec::with_capacity(telemetry.completed_trips.len());

    for record in &telemetry.completed_trips {
        person_entities.push(record.person_entity.to_bits());
        elevator_entities.push(record.elevator_entity.to_bits());
        start_floor.push(record.start_floor as u64);
        end_floor.push(record.end_floor as u64);
        direction.push(direction_code(record.direction));
        distance.push(record.distance as u64);
        called_at.push(record.called_at);
        boarded_at.push(record.boarded_at);
        completed_at.push(record.completed_at);
    }

    let schema = Schema::new(vec![
        u64_field("person_entity"),
        u64_field("elevator_entity"),
        u64_field("start_floor"),
        u64_field("end_floor"),
        u8_field("direction"),
        u64_field("distance"),
        u64_field("called_at"),
        u64_field("boarded_at"),
        u64_field("completed_at"),
    ]);

    let arrays: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(person_entities)),
        Arc::new(UInt64Array::from(elevator_entities)),
        Arc::new(UInt64Array::from(start_floor)),
        Arc::new(UInt64Array::from(end_floor)),
        Arc::new(UInt8Array::from(direction)),
        Arc::new(UInt64Array::from(distance)),
        Arc::new(UInt64Array::from(called_at)),
        Arc::new(UInt64Array::from(boarded_at)),
        Arc::new(UInt64Array::from(completed_at)),
    ];

    write_record_batch(path, schema, arrays)
}
