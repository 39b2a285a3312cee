//! Authentication actions.
//!
//! Each action owns the collaborators it needs and exposes a single
//! `execute` entry point, so it can be driven directly from tests with
//! fabricated stores and configs.

mod exchange;
mod issue;
mod logout;

pub use exchange::ExchangeAssertionAction;
pub use issue::IssueSessionAction;
pub use logout::LogoutAction;
