use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::error::{AppError, AppResult};
use crate::orm::Document;

use super::dto::{DailyAssignment, COLLECTION};

/// One multi-row insert for a whole week of assignments.
pub async fn insert_many(
    pool: &PgPool,
    assignments: &[DailyAssignment],
) -> AppResult<Vec<Document>> {
    if assignments.is_empty() {
        return Ok(Vec::new());
    }
    let docs = assignments
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::internal)?;

    let mut qb = QueryBuilder::<Postgres>::new(format!("INSERT INTO {COLLECTION} (doc) "));
    qb.push_values(docs, |mut row, doc| {
        row.push_bind(doc);
    });
    qb.push(" RETURNING id, doc, created_at, updated_at");

    let created = qb.build_query_as::<Document>().fetch_all(pool).await?;
    Ok(created)
}
