mod friendship_repo_mysql;
mod member_directory_mysql;
mod outbox_publisher_mysql;

pub use friendship_repo_mysql::*;
pub use member_directory_mysql::*;
pub use outbox_publisher_mysql::*;

mod repo_tx_mysql;

pub use repo_tx_mysql::*;

mod schema;

pub use schema::ensure_schema;

mod util;
