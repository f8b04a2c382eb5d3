//! File adapters: readers yield untyped [`RawRecord`](crate::model::RawRecord)s,
//! writers export linked close approaches.

pub mod csv_read;
pub mod csv_write;
pub mod json_read;
pub mod json_write;
