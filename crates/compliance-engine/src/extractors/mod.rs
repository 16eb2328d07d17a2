pub mod dates;
pub mod fields;
pub mod numeric;

pub use dates::{find_date, has_date_or_time, parse_date};
pub use fields::{extract_fields, find_field, labels_for, probable_cause};
pub use numeric::{extract_dollar_amounts, has_dollar_amount, theft_grade};
