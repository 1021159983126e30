pub mod conversion;
pub mod coordinate;
pub mod query;
pub mod timezone;

pub use conversion::ConversionRecord;
pub use coordinate::Dms;
pub use query::HttpQuery;
pub use timezone::{SystemTimeRule, TimeZoneRecord};
