pub mod expiry_task;
pub mod insights;
pub mod notifications;
pub mod payloads;
pub mod profile;
pub mod rest;
pub mod state;

#[cfg(test)]
mod test_support;

// Re-export the handlers the binary wires into the router.
pub use insights::{get_screen_handler, navigate_handler, stats_handler};
pub use notifications::{
    create_notification_handler, dismiss_notification_handler, list_notifications_handler,
};
pub use profile::{get_profile_handler, update_profile_handler};
pub use rest::{create_dream_handler, get_dream_handler, list_dreams_handler, toggle_bookmark_handler};
