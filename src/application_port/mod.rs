mod friendship_service;
mod member_error;

pub use friendship_service::*;
pub use member_error::*;
