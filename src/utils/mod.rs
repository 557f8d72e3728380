pub mod dates;
pub mod terminal;

pub use dates::{DatePattern, NO_DATE, format_date, format_optional_date};
pub use terminal::{single_line, strip_ansi_codes};
