//! Wire layer for the remote asset store
//!
//! Everything that knows about the proxy's URL shape, the listing response
//! envelope, and the token refresh collaborator lives here; the crawler
//! above it only sees elements and pages.

mod envelope;
mod proxy;
mod tokens;

pub use envelope::{Element, Envelope, PageResult};
pub use proxy::ProxyUrls;
pub use tokens::TokenRefresher;
