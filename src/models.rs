pub mod cards;
pub mod empty;
pub mod profile;
pub mod repository_entry;
