pub mod club;
pub mod event;
pub mod notice;
pub mod application;
pub mod submission;
pub mod user;

pub use club::*;
pub use event::*;
pub use notice::*;
pub use application::*;
pub use submission::*;
pub use user::*;
