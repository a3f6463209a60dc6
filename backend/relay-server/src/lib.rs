pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use crate::error::{Result as ServerErrorResult, ServerError};
pub use crate::routes::{build_page_router, build_producer_router, build_subscriber_router};
