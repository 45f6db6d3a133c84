use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::building::Direction;
use crate::ecs::PersonState;

pub(super) const AGENT_PERSON: u8 = 0;
pub(super) const AGENT_ELEVATOR: u8 = 1;

pub(super) fn u64_field(name: &'static str) -> Field {
    Field::new(name, DataType::UInt64, false)
}

pub(super) fn u8_field(name: &'static str) -> Field {
    Field::new(name, DataType::UInt8, false)
}

pub(super) fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), Box<dyn Error>> {
    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

pub(super) fn person_state_code(state: PersonState) -> u8 {
    match state {
        PersonState::Resting => 0,
        PersonState::Waiting => 1,
        PersonState::Riding => 2,
        PersonState::Done => 3,
    }
}

pub(super) fn direction_code(direction: Direction) -> u8 {
    match direction {
        Direction::Idle => 0,
        Direction::Up => 1,
        Direction::Down => 2,
    }
}
