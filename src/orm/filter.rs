use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid field name: {0}")]
    InvalidField(String),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Storage(e) => AppError::Storage(e),
            e @ QueryError::InvalidField(_) => AppError::internal(e),
        }
    }
}

/// Scalar operand of a filter constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Num(v)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Num(v as f64)
    }
}

impl From<i16> for FilterValue {
    fn from(v: i16) -> Self {
        Self::Num(f64::from(v))
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

#[derive(Debug, Clone)]
pub enum Constraint {
    Eq(FilterValue),
    Ne(FilterValue),
    Gte(FilterValue),
    Lte(FilterValue),
    /// Field equals any of the given strings.
    In(Vec<String>),
    /// JSON array field contains the given string element.
    Contains(String),
}

/// Collection-agnostic conjunction of field constraints. Field names
/// are interpolated into SQL and therefore restricted to identifier
/// characters; all operand values are bound.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Constraint)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.clauses.push((field.to_string(), Constraint::Eq(value.into())));
        self
    }

    pub fn ne(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.clauses.push((field.to_string(), Constraint::Ne(value.into())));
        self
    }

    pub fn gte(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.clauses.push((field.to_string(), Constraint::Gte(value.into())));
        self
    }

    pub fn lte(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
        self.clauses.push((field.to_string(), Constraint::Lte(value.into())));
        self
    }

    pub fn any_of(mut self, field: &str, values: Vec<String>) -> Self {
        self.clauses.push((field.to_string(), Constraint::In(values)));
        self
    }

    pub fn contains(mut self, field: &str, value: &str) -> Self {
        self.clauses.push((field.to_string(), Constraint::Contains(value.to_string())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub(crate) fn clauses(&self) -> &[(String, Constraint)] {
        &self.clauses
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub(crate) fn sql(self) -> &'static str {
        match self {
            Direction::Asc => " ASC",
            Direction::Desc => " DESC",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sort {
    keys: Vec<(String, Direction)>,
}

impl Sort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asc(mut self, field: &str) -> Self {
        self.keys.push((field.to_string(), Direction::Asc));
        self
    }

    pub fn desc(mut self, field: &str) -> Self {
        self.keys.push((field.to_string(), Direction::Desc));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub(crate) fn keys(&self) -> &[(String, Direction)] {
        &self.keys
    }
}

pub(crate) fn ensure_ident(name: &str) -> Result<(), QueryError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(QueryError::InvalidField(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_letters_digits_underscores() {
        assert!(ensure_ident("mealType").is_ok());
        assert!(ensure_ident("created_at").is_ok());
        assert!(ensure_ident("_hidden").is_ok());
        assert!(ensure_ident("").is_err());
        assert!(ensure_ident("2fast").is_err());
        assert!(ensure_ident("name'; drop table users; --").is_err());
        assert!(ensure_ident("doc->>x").is_err());
    }

    #[test]
    fn builder_accumulates_clauses_in_order() {
        let filter = Filter::new().eq("status", "active").gte("calories", 100.0).eq("flag", true);
        let clauses = filter.clauses();
        assert_eq!(clauses.len(), 3);
        assert_eq!(clauses[0].0, "status");
        assert!(matches!(clauses[1].1, Constraint::Gte(FilterValue::Num(n)) if n == 100.0));
        assert!(matches!(clauses[2].1, Constraint::Eq(FilterValue::Bool(true))));
    }

    #[test]
    fn integer_operands_coerce_to_numbers() {
        let filter = Filter::new().eq("roleId", 2i16);
        assert!(matches!(filter.clauses()[0].1, Constraint::Eq(FilterValue::Num(n)) if n == 2.0));
    }
}
