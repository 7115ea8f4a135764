#![forbid(unsafe_code)]

pub mod attempt;
pub mod error;
pub mod history;
pub mod model;
pub mod time;

pub use error::Error;
pub use time::Clock;
