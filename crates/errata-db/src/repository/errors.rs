//! Error table

use crate::models::{ErrorPatch, ErrorRecord, NewError};
use crate::repository::entity::{Entity, Repository, Value};

/// The `errors` table
pub struct Errors;

pub type ErrorRepository = Repository<Errors>;

impl Entity for Errors {
    type Record = ErrorRecord;
    type New = NewError;
    type Patch = ErrorPatch;

    const TABLE: &'static str = "errors";
    const COLUMNS: &'static [&'static str] =
        &["description", "workshop", "error_code", "error_message"];

    fn insert_values(new: NewError) -> Vec<Value> {
        vec![
            Value::Text(new.description),
            Value::Text(new.workshop),
            Value::Text(new.error_code),
            Value::Text(new.error_message),
        ]
    }

    fn patch_values(patch: ErrorPatch) -> Vec<(&'static str, Value)> {
        [
            ("description", patch.description),
            ("workshop", patch.workshop),
            ("error_code", patch.error_code),
            ("error_message", patch.error_message),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.map(|v| (column, Value::Text(v))))
        .collect()
    }
}
