pub mod coordinate_reader;
pub mod timezone_reader;

pub use coordinate_reader::{CoordinateLine, CoordinateReader};
pub use timezone_reader::{JsonTimeZoneRegistry, TimeZoneEntry, TimeZoneRegistry};
