mod health;
mod process;

pub use health::{health_handler, index_handler};
pub use process::{ErrorResponse, ProcessResponse, process_handler};
