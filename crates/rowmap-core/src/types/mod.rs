//! Scalar types with a calendar meaning that cursors can carry.

mod date;
mod timestamp;

pub use date::Date;
pub use timestamp::Timestamp;
