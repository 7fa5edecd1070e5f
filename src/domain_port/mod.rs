mod event_publisher;
mod friendship_repo;
mod member_directory;

mod repo_tx;

pub use event_publisher::*;
pub use friendship_repo::*;
pub use member_directory::*;

pub use repo_tx::*;
