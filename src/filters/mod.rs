pub mod ast;
pub mod parser;

pub use ast::{FieldFilter, FilterExpr, FilterField};
pub use parser::{parse_filter, parse_filter_args};
