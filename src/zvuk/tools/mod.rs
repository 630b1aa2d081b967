pub mod canonical;
pub mod error;
pub mod export;
pub mod io;
pub mod model;
pub mod sync;

pub use error::{Result, ToolError};
