pub mod bootstrap;
pub mod query_bridge;
pub mod readiness;
pub mod warmup;

pub use bootstrap::{Application, ApplicationHandle};
