mod cookie_policy;
mod session_gate;

pub use cookie_policy::{is_https_request, CookiePolicy};
pub use session_gate::SessionGate;
