use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{is_unique_violation, AppError, AppResult};
use crate::orm::{self, Document, Filter, Page, Sort};
use crate::roles::Role;

use super::dto::{PublicUser, UserDoc, UserRecord, COLLECTION};

pub async fn find_by_email(pool: &PgPool, email: &str) -> AppResult<Option<UserRecord>> {
    let row = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, doc, created_at, updated_at
        FROM users
        WHERE doc->>'email' = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    row.map(UserRecord::from_document).transpose()
}

pub async fn get_by_id(pool: &PgPool, id: Uuid) -> AppResult<UserRecord> {
    let row = sqlx::query_as::<_, Document>(
        r#"
        SELECT id, doc, created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(UserRecord::from_document).transpose()?.ok_or(AppError::NotFound("User"))
}

/// Insert relying on the unique email index; a concurrent duplicate
/// surfaces as `UserExists` instead of a raw storage error.
pub async fn insert_user(pool: &PgPool, doc: &UserDoc) -> AppResult<UserRecord> {
    let value = serde_json::to_value(doc).map_err(AppError::internal)?;
    let inserted = sqlx::query_as::<_, Document>(
        r#"
        INSERT INTO users (doc)
        VALUES ($1)
        RETURNING id, doc, created_at, updated_at
        "#,
    )
    .bind(value)
    .fetch_one(pool)
    .await;
    match inserted {
        Ok(document) => UserRecord::from_document(document),
        Err(e) if is_unique_violation(&e) => Err(AppError::UserExists),
        Err(e) => Err(e.into()),
    }
}

/// Bumps the update timestamp without touching the document (OAuth
/// re-login).
pub async fn touch_updated(pool: &PgPool, id: Uuid) -> AppResult<()> {
    sqlx::query("UPDATE users SET updated_at = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Paginated user listing, newest first, optionally narrowed to one
/// role.
pub async fn find_users_page(
    pool: &PgPool,
    role: Option<Role>,
    page: Option<i64>,
    page_size: Option<i64>,
) -> AppResult<Page<PublicUser>> {
    let mut filter = Filter::new();
    if let Some(role) = role {
        filter = filter.eq("roleId", role.id());
    }
    let sort = Sort::new().desc("createdAt");
    let page = orm::find_page(pool, COLLECTION, &filter, &sort, page, page_size).await?;
    page.try_map(|document| UserRecord::from_document(document)?.into_public())
}
