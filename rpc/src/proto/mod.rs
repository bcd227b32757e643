//! Messages of the `library` protobuf package and their binary wire format.
//!
//! Every message implements [`prost::Message`], so encoding is
//! [`encode_to_vec`](prost::Message::encode_to_vec) and decoding is [`decode`](prost::Message::decode).
//!
//! The field numbers are shared with the server and must never change:
//!
//! | Message | Field |
//! |---|---|
//! | `Publisher` | 1 `name` |
//! | `Book` | 1 `isbn`, 2 `title`, 3 `author`, 4 `book_type`, 5 `self_published` \| 6 `publisher`, 7 `publication_date` |
//! | `GetBookRequest` | 1 `isbn` |
//! | `QueryBooksRequest` | 1 `author_prefix` |
//!
//! `isbn` is an `int64` and travels as a plain varint.
use prost::DecodeError;

mod book;
mod book_type;
mod requests;

pub use book::{Book, Publisher, PublishingMethod};
pub use book_type::BookType;
pub use prost_types::Timestamp;
pub use requests::{GetBookRequest, QueryBooksRequest};

/// Attach the message and field being decoded to a [`DecodeError`]
fn in_field(
    message: &'static str,
    field: &'static str,
) -> impl FnOnce(DecodeError) -> DecodeError {
    move |mut error| {
        error.push(message, field);
        error
    }
}
