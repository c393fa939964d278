//! Built-in payload contracts

use crate::schema::{FieldSchema, Schema, SchemaLoader, SchemaResult};

/// Registry name of the fuel entry contract
pub const FUEL_ENTRY: &str = "fuel_entry";

/// Contract for the `/fuel/entry` request body.
///
/// ```text
/// gallons:   number
/// totalCost: number
/// location:  object { lat: number, lng: number }
/// date:      string
/// ```
pub fn fuel_entry() -> Schema {
    let location = Schema::from_checked_fields(vec![
        FieldSchema::number("lat"),
        FieldSchema::number("lng"),
    ]);
    Schema::from_checked_fields(vec![
        FieldSchema::number("gallons"),
        FieldSchema::number("totalCost"),
        FieldSchema::object("location", location),
        FieldSchema::string("date"),
    ])
}

/// Registers every built-in contract.
pub fn register_builtin(loader: &mut SchemaLoader) -> SchemaResult<()> {
    loader.register(FUEL_ENTRY, fuel_entry())
}
