pub mod contact;
pub mod donation;
pub mod event;
pub mod news;
pub mod project;
pub mod subscriber;
pub mod volunteer;
