pub mod db;
pub mod error;
pub mod expect;
pub mod fixtures;
pub mod introspect;
pub mod validator;

// Re-export them for easier access from the binary and tests.
pub use db::*;
pub use error::*;
pub use expect::*;
pub use fixtures::*;
pub use introspect::*;
pub use validator::*;
