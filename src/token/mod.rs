//! Signed session token support.
//!
//! The session token is this application's own credential, independent
//! of the provider's assertion: a compact HS256 token carrying the
//! user's name, email, and an absolute expiry timestamp.
//!
//! # Example
//!
//! ```ignore
//! use gatehouse::token::{TokenCodec, TokenConfig};
//!
//! let config = TokenConfig::new(secret, chrono::Duration::hours(2))?;
//! let codec = TokenCodec::new(config);
//!
//! let issued = codec.issue(&identity)?;
//! let claims = codec.verify(&issued.token)?;
//! ```

mod claims;
mod codec;
mod config;

pub use claims::SessionClaims;
pub use codec::{IssuedToken, TokenCodec};
pub use config::{TokenConfig, MIN_SECRET_LENGTH};
