mod m0001_initial;

use cetane::prelude::MigrationRegistry;

/// Name of the migration that creates the four application tables.
pub const INITIAL_SCHEMA: &str = "0001_initial_schema";

/// Tables created by the migrations, in creation order.
pub const TABLES: [&str; 4] = ["users", "events", "external_events", "api_data"];

pub fn registry() -> MigrationRegistry {
    let mut reg = MigrationRegistry::new();
    reg.register(m0001_initial::migration());
    reg
}
