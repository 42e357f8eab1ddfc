//! Models module
//!
//! Descriptors produced by the schema walker and consumed by the exporters.

pub mod column;
pub mod table;

pub use column::ColumnDescriptor;
pub use table::TableDescriptor;
