//! Request and response authorization applied around every API call

pub mod request;
pub mod response;

pub use request::RequestAuthorizer;
pub use response::{Rejection, ResponseAuthorizer};
