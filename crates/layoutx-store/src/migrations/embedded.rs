//! Migrations compiled into the binary with include_str!

pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

/// All migrations in application order
pub fn get_migrations() -> &'static [Migration] {
    &[Migration {
        id: "001_initial_schema",
        sql: include_str!("../../migrations/001_initial_schema.sql"),
    }]
}
