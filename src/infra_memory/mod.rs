mod event_publisher_memory;
mod friendship_repo_memory;
mod member_directory_memory;

pub use event_publisher_memory::*;
pub use friendship_repo_memory::*;
pub use member_directory_memory::*;

mod repo_tx_memory;

pub use repo_tx_memory::*;
