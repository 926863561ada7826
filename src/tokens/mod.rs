//! Player tokens and the registry that tracks them.
//!
//! Tokens are created from the roster at reset, placed during deployment,
//! moved every turn, and never removed while a game is running.

mod token;
mod registry;

pub use token::{Shape, Token, TokenId, TokenSpec};
pub use registry::{RegistryError, TokenRegistry};
