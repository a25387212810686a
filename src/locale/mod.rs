//! Request-scoped locale, timezone and currency resolution.
//!
//! ## Module Structure
//!
//! - `context`: `RequestContext` resolution chains and `ResolvedContext`
//! - `accept`: `Accept-Language` parsing and negotiation
//! - `data`: display names and currency metadata
//! - `format`: currency display template
//! - `session`: session storage interface
//! - `user`: user profile interface and attribute-name adapter
//! - `url`: locale argument propagation in URLs

pub mod accept;
pub mod context;
pub mod data;
pub mod format;
pub mod session;
pub mod url;
pub mod user;

pub use accept::AcceptLanguage;
pub use context::{
    CurrencyOption, LocaleOption, Request, RequestContext, ResolvedContext, Source,
    available_locales,
};
pub use data::{BuiltinLocaleData, LocaleData};
pub use session::{MemorySession, Session};
pub use user::{AttributeProfile, AttributeStore, UserAttributes, UserProfile};
