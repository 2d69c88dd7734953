pub mod config;
pub mod error;
pub mod manifest;
pub mod model;
pub mod profile;
pub mod secrets;

pub use error::*;
pub use model::*;
pub use profile::*;
