mod message;
mod user;
mod workspace;

pub use message::*;
pub use user::*;
pub use workspace::*;
