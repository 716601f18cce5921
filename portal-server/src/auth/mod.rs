//! Authentication and authorization
//!
//! The portal has no user accounts: a session is a signed JWT carrying a
//! [`Role`](shared::Role) plus the club or partner it is bound to.
//!
//! - [`JwtService`] - token issue / validation
//! - [`CurrentUser`] - session context handed to handlers
//! - [`require_auth`] - authentication middleware
//! - [`require_permission`] - permission middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use extractor::OptionalUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_permission};
