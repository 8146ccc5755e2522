mod engine;
mod filter;
mod page;

pub use engine::{count, find_all, find_page, rfc3339, Document, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
pub use filter::{Constraint, Direction, Filter, FilterValue, QueryError, Sort};
pub(crate) use filter::ensure_ident;
pub use page::Page;
