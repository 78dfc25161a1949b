//! Waitline HTTP layer: role-scoped request authorization
//!
//! [`RequestAuthorizer`] picks the bearer credential for each outgoing call
//! from its URL; [`ResponseAuthorizer`] purges that credential when the
//! backend answers 401. [`AuthorizedClient`] runs both around `reqwest`.

pub mod client;
pub mod interceptor;

pub use client::error::ClientError;
pub use client::{ApiRequest, AuthorizedClient, AuthorizedClientBuilder};
pub use interceptor::{Rejection, RequestAuthorizer, ResponseAuthorizer};
