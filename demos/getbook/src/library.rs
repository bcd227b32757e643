//! In-process stand-in for the library server.
//!
//! It answers `GetBook` and `QueryBooks` from a hardcoded shelf, decoding and encoding every message like the
//! real server would, so the client runs against the wire format.
use std::{sync::Arc, time::Duration};

use library_rpc::{
    generator::Generator,
    proto::{Book, BookType, GetBookRequest, Publisher, QueryBooksRequest, Timestamp},
    service_definition::{ServiceDefinition, StreamItem},
    Status,
};
use log::debug;
use prost::Message;
use tokio::time::sleep;

// An in-memory database for the demo
pub fn create_db() -> Vec<Book> {
    let mut book_1 = Book {
        isbn: 140008381,
        title: "The Hobbit".to_string(),
        author: "J.R.R. Tolkien".to_string(),
        // 1937-09-21
        publication_date: Some(Timestamp {
            seconds: -1_018_656_000,
            nanos: 0,
        }),
        ..Default::default()
    };
    book_1.set_book_type(BookType::Paperback);
    book_1.set_publisher(Publisher::new("George Allen & Unwin"));

    let mut book_2 = Book {
        isbn: 261102737,
        title: "The Silmarillion".to_string(),
        author: "J.R.R. Tolkien".to_string(),
        ..Default::default()
    };
    book_2.set_book_type(BookType::Hardcover);
    book_2.set_publisher(Publisher::new("George Allen & Unwin"));

    let mut book_3 = Book {
        isbn: 375826696,
        title: "Eragon".to_string(),
        author: "Christopher Paolini".to_string(),
        ..Default::default()
    };
    book_3.set_book_type(BookType::Audiobook);
    book_3.set_self_published(true);

    let book_4 = Book {
        isbn: 1000,
        title: "Rust: crash course".to_string(),
        author: "mr steve".to_string(),
        ..Default::default()
    };

    vec![book_1, book_2, book_3, book_4]
}

/// Register the `BookService` procedures. Every answer is delayed by `latency`.
pub fn book_service(service_name: &str, books: Vec<Book>, latency: Duration) -> ServiceDefinition {
    let books = Arc::new(books);
    let mut service = ServiceDefinition::new(service_name);

    let db = books.clone();
    service.add_unary("GetBook", move |payload| {
        let db = db.clone();
        Box::pin(async move {
            let request = GetBookRequest::decode(payload.as_slice())
                .map_err(|err| Status::invalid_argument(err.to_string()))?;
            debug!("> BookService > GetBook {}", request.isbn);
            sleep(latency).await;

            db.iter()
                .find(|book| book.isbn == request.isbn)
                .map(Message::encode_to_vec)
                .ok_or_else(|| Status::not_found("Book could not be found"))
        })
    });

    let db = books;
    service.add_server_streams("QueryBooks", move |payload| {
        let db = db.clone();
        Box::pin(async move {
            let request = QueryBooksRequest::decode(payload.as_slice())
                .map_err(|err| Status::invalid_argument(err.to_string()))?;
            debug!("> BookService > QueryBooks {:?}", request.author_prefix);

            let (generator, generator_yielder) = Generator::<StreamItem>::create();
            // Spawn for a quick response
            tokio::spawn(async move {
                for book in db.iter() {
                    if !book.author.starts_with(&request.author_prefix) {
                        continue;
                    }
                    sleep(latency).await;
                    if generator_yielder
                        .r#yield(Ok(book.encode_to_vec()))
                        .await
                        .is_err()
                    {
                        debug!("> BookService > QueryBooks > client went away");
                        return;
                    }
                }
            });

            Ok::<_, Status>(generator)
        })
    });

    service
}
