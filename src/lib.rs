pub mod cli;
pub mod dashboard;
pub mod error;
pub mod geo;
pub mod logging;
pub mod map;
pub mod report;
pub mod schema;
pub mod store;
pub mod ui;

pub use cli::{Cli, Commands};
pub use error::{Error, Result};
pub use report::{Report, Table, Value};
pub use store::{with_store, WineStore};
