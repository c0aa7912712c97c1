pub mod config;

pub mod setup;
pub use setup::setup;

pub mod env;

pub use tracing::{error, info, warn};
pub use tracing_attributes::instrument;
