pub mod coerce;
pub mod collections;
pub mod constants;
pub mod coordinates;
pub mod dates;
pub mod progress;
pub mod timer;

pub use coerce::{coerce, Scalar};
pub use collections::{chunks, make_rows, map_values, replace_all, reverse_columns};
pub use constants::*;
pub use coordinates::{match_dms, DmsFields, Hemisphere};
pub use dates::{gregorian_date, nearest_year_for_day, nearest_year_for_day_now};
pub use progress::ProgressReporter;
pub use timer::QuickTimer;
