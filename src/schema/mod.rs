pub mod sql;
pub mod tables;
pub mod types;

pub use sql::*;
pub use tables::*;
pub use types::*;
