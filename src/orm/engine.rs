use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::filter::{ensure_ident, Constraint, Direction, Filter, FilterValue, QueryError, Sort};
use super::page::{normalize_window, Page};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// One row of a collection table: an opaque JSONB document plus the
/// columns the engine owns (id and timestamps).
#[derive(Debug, Clone, FromRow)]
pub struct Document {
    pub id: uuid::Uuid,
    pub doc: Value,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

impl Document {
    /// Flattens the document for the API: doc fields at the top level,
    /// id stringified, timestamps in RFC 3339.
    pub fn into_json(self) -> Value {
        let mut obj = match self.doc {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        obj.insert("id".to_string(), Value::String(self.id.to_string()));
        obj.insert("createdAt".to_string(), Value::String(rfc3339(self.created_at)));
        if let Some(updated) = self.updated_at {
            obj.insert("updatedAt".to_string(), Value::String(rfc3339(updated)));
        }
        Value::Object(obj)
    }

    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.doc.clone())
    }
}

pub fn rfc3339(t: OffsetDateTime) -> String {
    t.format(&Rfc3339).unwrap_or_default()
}

// createdAt/updatedAt live as real columns; everything else is a JSONB
// field addressed through the doc column.
fn column_for(field: &str) -> Option<&'static str> {
    match field {
        "createdAt" => Some("created_at"),
        "updatedAt" => Some("updated_at"),
        _ => None,
    }
}

fn push_comparison(
    qb: &mut QueryBuilder<'_, Postgres>,
    field: &str,
    op: &str,
    value: &FilterValue,
) -> Result<(), QueryError> {
    ensure_ident(field)?;
    match (column_for(field), value) {
        (Some(col), FilterValue::Str(s)) => {
            qb.push(col).push(op).push_bind(s.clone()).push("::timestamptz");
        }
        // Timestamp columns only take RFC 3339 string bounds.
        (Some(_), _) => return Err(QueryError::InvalidField(field.to_string())),
        (None, FilterValue::Str(s)) => {
            qb.push(format!("doc->>'{field}'")).push(op).push_bind(s.clone());
        }
        (None, FilterValue::Num(n)) => {
            qb.push(format!("(doc->>'{field}')::numeric")).push(op).push_bind(*n);
        }
        (None, FilterValue::Bool(b)) => {
            qb.push(format!("(doc->>'{field}')::boolean")).push(op).push_bind(*b);
        }
    }
    Ok(())
}

pub(crate) fn push_where(
    qb: &mut QueryBuilder<'_, Postgres>,
    filter: &Filter,
) -> Result<(), QueryError> {
    if filter.is_empty() {
        return Ok(());
    }
    qb.push(" WHERE ");
    for (i, (field, constraint)) in filter.clauses().iter().enumerate() {
        if i > 0 {
            qb.push(" AND ");
        }
        match constraint {
            Constraint::Eq(v) => push_comparison(qb, field, " = ", v)?,
            Constraint::Ne(v) => push_comparison(qb, field, " IS DISTINCT FROM ", v)?,
            Constraint::Gte(v) => push_comparison(qb, field, " >= ", v)?,
            Constraint::Lte(v) => push_comparison(qb, field, " <= ", v)?,
            Constraint::In(values) => {
                ensure_ident(field)?;
                qb.push(format!("doc->>'{field}' = ANY(")).push_bind(values.clone()).push(")");
            }
            Constraint::Contains(value) => {
                ensure_ident(field)?;
                qb.push(format!("doc->'{field}' ? ")).push_bind(value.clone());
            }
        }
    }
    Ok(())
}

pub(crate) fn push_order(
    qb: &mut QueryBuilder<'_, Postgres>,
    sort: &Sort,
) -> Result<(), QueryError> {
    if sort.is_empty() {
        return Ok(());
    }
    qb.push(" ORDER BY ");
    for (i, (field, direction)) in sort.keys().iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        ensure_ident(field)?;
        match column_for(field) {
            Some(col) => qb.push(col),
            None => qb.push(format!("doc->>'{field}'")),
        };
        qb.push(direction.sql());
    }
    Ok(())
}

/// Full match count for a filter, independent of any page window.
pub async fn count(pool: &PgPool, collection: &str, filter: &Filter) -> Result<i64, QueryError> {
    ensure_ident(collection)?;
    let mut qb = QueryBuilder::new(format!("SELECT count(*) FROM {collection}"));
    push_where(&mut qb, filter)?;
    let total = qb.build_query_scalar::<i64>().fetch_one(pool).await?;
    Ok(total)
}

/// Windowed read plus the full match count, so callers can derive the
/// page count without a second query of their own.
pub async fn find_page(
    pool: &PgPool,
    collection: &str,
    filter: &Filter,
    sort: &Sort,
    page: Option<i64>,
    page_size: Option<i64>,
) -> Result<Page<Document>, QueryError> {
    ensure_ident(collection)?;
    let (page, page_size) = normalize_window(page, page_size);
    let total = count(pool, collection, filter).await?;

    let mut qb =
        QueryBuilder::new(format!("SELECT id, doc, created_at, updated_at FROM {collection}"));
    push_where(&mut qb, filter)?;
    push_order(&mut qb, sort)?;
    qb.push(" LIMIT ").push_bind(page_size).push(" OFFSET ").push_bind((page - 1) * page_size);

    let items = qb.build_query_as::<Document>().fetch_all(pool).await?;
    Ok(Page { items, page, page_size, total })
}

/// Unpaginated read for simple listing callers.
pub async fn find_all(
    pool: &PgPool,
    collection: &str,
    filter: &Filter,
    sort: &Sort,
) -> Result<Vec<Document>, QueryError> {
    ensure_ident(collection)?;
    let mut qb =
        QueryBuilder::new(format!("SELECT id, doc, created_at, updated_at FROM {collection}"));
    push_where(&mut qb, filter)?;
    push_order(&mut qb, sort)?;
    let items = qb.build_query_as::<Document>().fetch_all(pool).await?;
    Ok(items)
}
