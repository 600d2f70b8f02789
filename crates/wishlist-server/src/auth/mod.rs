mod middleware;
mod session;

pub use middleware::require_session;
pub use session::{AuthError, SESSION_COOKIE, SessionContext, SessionGate, session_token};
