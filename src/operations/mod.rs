pub mod boundary;
pub mod query;
pub mod transform;
