use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::record::Record;

/// Emit the JSON Schema of a single dataset record.
pub fn record_json_schema() -> RootSchema {
    schema_for!(Record)
}
