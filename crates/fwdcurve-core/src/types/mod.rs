//! Domain types.

mod date;

pub use date::Date;
