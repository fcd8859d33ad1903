use sqlx::PgPool;

/// Runs backend commands against the Postgres database.
///
/// Each command is a plain struct; the query lives in its
/// `Processor<Command>` impl next to the entity it touches.
#[derive(Debug, Clone)]
pub struct DatabaseProcessor {
    pub pool: PgPool,
}

impl DatabaseProcessor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
