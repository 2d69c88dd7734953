pub mod compose;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod state;
pub mod waiter;

pub use compose::*;
pub use engine::*;
pub use error::*;
pub use lifecycle::*;
pub use state::*;
pub use waiter::*;
