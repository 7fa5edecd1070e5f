mod event_publisher_impl;
mod server;

pub use event_publisher_impl::*;
pub use server::*;
