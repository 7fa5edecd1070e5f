mod friend_requestor_impl;
mod friend_responder_impl;
mod friendship_reader_impl;
mod friendship_terminator_impl;

pub use friend_requestor_impl::*;
pub use friend_responder_impl::*;
pub use friendship_reader_impl::*;
pub use friendship_terminator_impl::*;
