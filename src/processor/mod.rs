//! Pipeline orchestration and report assembly

pub mod core;
pub mod report;

pub use self::core::*;
pub use self::report::*;
