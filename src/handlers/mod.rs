pub mod auth;
pub mod contacts;
pub mod donations;
pub mod events;
pub mod news;
pub mod projects;
pub mod subscribers;
pub mod volunteers;
