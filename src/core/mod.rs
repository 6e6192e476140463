//! Core types for the token lifecycle

mod credentials;
mod error;
mod secret;
mod token;

pub use credentials::Credentials;
pub use error::{ConfigError, IssuerError, StoreError};
pub use secret::SecretString;
pub use token::{ObtainedToken, keys};
