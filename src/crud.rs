use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::orm::{self, Document, Filter, Sort};

/// Input schema contract for the generic CRUD helpers. Implementations
/// check their own fields and report the first failure.
pub trait Validate {
    fn validate(&self) -> AppResult<()>;
}

pub(crate) fn parse_id(id: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId)
}

fn to_doc<T: Serialize>(input: &T) -> AppResult<Value> {
    let value = serde_json::to_value(input).map_err(AppError::internal)?;
    match value {
        Value::Object(_) => Ok(value),
        _ => Err(AppError::internal(anyhow::anyhow!("document body must be a JSON object"))),
    }
}

fn table(collection: &str) -> AppResult<&str> {
    orm::ensure_ident(collection)?;
    Ok(collection)
}

/// Validate, stamp and insert. The created document comes back with its
/// database-resolved id and creation timestamp.
#[instrument(skip(pool, input))]
pub async fn create_document<T: Serialize + Validate>(
    pool: &PgPool,
    collection: &str,
    input: &T,
) -> AppResult<Document> {
    input.validate()?;
    let doc = to_doc(input)?;
    let sql = format!("INSERT INTO {} (doc) VALUES ($1) RETURNING id, doc, created_at, updated_at", table(collection)?);
    let created = sqlx::query_as::<_, Document>(&sql).bind(doc).fetch_one(pool).await?;
    Ok(created)
}

/// Id-based lookup; rejects malformed ids before touching storage.
#[instrument(skip(pool))]
pub async fn get_document(
    pool: &PgPool,
    collection: &str,
    id: &str,
    resource: &'static str,
) -> AppResult<Document> {
    let id = parse_id(id)?;
    let sql = format!("SELECT id, doc, created_at, updated_at FROM {} WHERE id = $1", table(collection)?);
    let found = sqlx::query_as::<_, Document>(&sql).bind(id).fetch_optional(pool).await?;
    found.ok_or(AppError::NotFound(resource))
}

/// Partial update: only the fields present in the patch are touched
/// (JSONB concatenation), and the update timestamp is stamped.
#[instrument(skip(pool, patch))]
pub async fn update_document<T: Serialize + Validate>(
    pool: &PgPool,
    collection: &str,
    id: &str,
    patch: &T,
    resource: &'static str,
) -> AppResult<Document> {
    patch.validate()?;
    let id = parse_id(id)?;
    let patch = to_doc(patch)?;
    let sql = format!(
        "UPDATE {} SET doc = doc || $2, updated_at = now() WHERE id = $1 RETURNING id, doc, created_at, updated_at",
        table(collection)?
    );
    let updated =
        sqlx::query_as::<_, Document>(&sql).bind(id).bind(patch).fetch_optional(pool).await?;
    updated.ok_or(AppError::NotFound(resource))
}

#[instrument(skip(pool))]
pub async fn delete_document(
    pool: &PgPool,
    collection: &str,
    id: &str,
    resource: &'static str,
) -> AppResult<()> {
    let id = parse_id(id)?;
    let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id", table(collection)?);
    let deleted = sqlx::query_as::<_, (Uuid,)>(&sql).bind(id).fetch_optional(pool).await?;
    deleted.map(|_| ()).ok_or(AppError::NotFound(resource))
}

/// Full normalized sequence for simple listing callers; paginated
/// callers go through `orm::find_page` directly.
pub async fn list_documents(
    pool: &PgPool,
    collection: &str,
    filter: &Filter,
    sort: &Sort,
) -> AppResult<Vec<Value>> {
    let docs = orm::find_all(pool, collection, filter, sort).await?;
    Ok(docs.into_iter().map(Document::into_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Demo {
        name: String,
    }

    impl Validate for Demo {
        fn validate(&self) -> AppResult<()> {
            if self.name.trim().is_empty() {
                return Err(AppError::Validation("name", "Name is required".to_string()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn create_validates_before_any_storage_call() {
        // The fake state's pool connects lazily; reaching the database
        // would error differently than a validation failure.
        let state = AppState::fake();
        let input = Demo { name: "  ".to_string() };
        let err = create_document(&state.db, "meals", &input).await.unwrap_err();
        assert!(matches!(err, AppError::Validation("name", _)));
    }

    #[tokio::test]
    async fn malformed_ids_fail_fast() {
        let state = AppState::fake();
        let err = get_document(&state.db, "meals", "not-a-uuid", "Meal").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidId));
        let err = delete_document(&state.db, "meals", "12345", "Meal").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidId));
    }
}
