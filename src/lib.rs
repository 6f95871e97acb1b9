//! Todo API - multi-user to-do lists with bearer token authentication.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core entities (users, todos, password digests)
//! - **services**: Token issuance, identity resolution, auth and todo use cases
//! - **infra**: Database, migrations, repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server (SECRET_KEY must be set)
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Password, Todo, User};
pub use errors::{AppError, AppResult, AuthError};
