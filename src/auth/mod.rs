//! Gatekeeping for the pages behind the log-in.

mod log_in;
mod log_out;
mod middleware;
mod redirect;

pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{session_guard, session_guard_hx};

#[cfg(test)]
pub use middleware::GuardState;
