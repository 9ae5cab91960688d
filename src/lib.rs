pub mod db;

pub mod deliveries;
pub mod expenses;
pub mod linkage;
pub mod shifts;

pub mod constants;
pub mod errors;
pub mod realtime;
pub mod schema;
pub mod statistics;

pub use errors::{Error, Result};
