mod event;
mod friend;
mod friendship;
mod member;
mod page;

pub use event::*;
pub use friend::*;
pub use friendship::*;
pub use member::*;
pub use page::*;
