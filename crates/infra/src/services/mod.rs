pub mod delivery;
pub mod player;
pub mod reminder_backend;
