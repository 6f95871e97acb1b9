//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod identity;
mod todo_service;
mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, TokenResponse};
pub use identity::{extract_bearer, BearerIdentity, IdentityResolver};
pub use todo_service::{TodoManager, TodoService};
pub use token_service::{Claims, TokenService};
