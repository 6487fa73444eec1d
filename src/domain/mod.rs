// Domain layer - Plain data types with no I/O
pub mod aggregate;
pub mod call_record;
pub mod error;
pub mod selection;
pub mod view;
