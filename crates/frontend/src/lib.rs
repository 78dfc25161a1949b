//! Browser bindings for the Waitline operator client

pub mod logging;
pub mod navigation;
pub mod router;
pub mod session;
pub mod storage;

pub use navigation::HashNavigator;
pub use router::{GuardedRouter, RouteView};
pub use session::{Session, SessionError, SessionHandle, use_session};
pub use storage::BrowserStorage;
