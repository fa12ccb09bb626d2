pub mod admin;
pub mod applications;
pub mod auth;
pub mod clubs;
pub mod events;
pub mod notices;
pub mod root;
pub mod submissions;
pub mod users;
