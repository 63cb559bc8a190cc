//! Domain layer: core entities and business rules.

pub mod activation;
pub mod compose_state;
pub mod connection;
pub mod events;
pub mod message;
pub mod message_buffer;
pub mod session;
pub mod shell_state;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
