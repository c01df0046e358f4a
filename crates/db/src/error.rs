//! Translation of sqlx failures into domain errors.

use inka_core::error::CoreError;

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Classify a sqlx error into a [`CoreError`].
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to `Conflict`.
/// - Foreign key violations map to `NotFound` for `entity`.
/// - Everything else maps to `Internal`.
pub fn classify(err: sqlx::Error, entity: &'static str, id: impl ToString) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) => {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return CoreError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ));
                }
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return CoreError::NotFound {
                    entity,
                    id: id.to_string(),
                };
            }
            _ => {}
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(format!("database error: {err}"))
}
