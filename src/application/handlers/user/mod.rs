//! Profile handlers.

mod get_profile;
mod update_profile;

pub use get_profile::GetProfileHandler;
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};
