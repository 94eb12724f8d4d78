pub mod claims;
pub mod context;
pub mod middleware;
pub mod token;

pub use claims::{Claims, Role};
pub use context::AuthContext;
pub use middleware::{OptionalAuth, RequireAdmin, RequireAuth};
pub use token::TokenSigner;
