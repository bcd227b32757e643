#![allow(dead_code)]

use std::sync::Arc;

use library_rpc::{
    generator::Generator,
    proto::{Book, BookType, GetBookRequest, Publisher, QueryBooksRequest, Timestamp},
    service_definition::{ServiceDefinition, StreamItem},
    transports::memory::MemoryTransport,
    BookServiceClient, Status,
};
use prost::Message;

pub fn create_db() -> Vec<Book> {
    let mut the_hobbit = Book {
        isbn: 140008381,
        title: "The Hobbit".to_string(),
        author: "J.R.R. Tolkien".to_string(),
        publication_date: Some(Timestamp {
            seconds: -1_029_283_200,
            nanos: 0,
        }),
        ..Default::default()
    };
    the_hobbit.set_book_type(BookType::Paperback);
    the_hobbit.set_publisher(Publisher::new("George Allen & Unwin"));

    let mut the_silmarillion = Book {
        isbn: 261102737,
        title: "The Silmarillion".to_string(),
        author: "J.R.R. Tolkien".to_string(),
        ..Default::default()
    };
    the_silmarillion.set_publisher(Publisher::new("George Allen & Unwin"));

    let mut eragon = Book {
        isbn: 375826696,
        title: "Eragon".to_string(),
        author: "Christopher Paolini".to_string(),
        ..Default::default()
    };
    eragon.set_book_type(BookType::Audiobook);
    eragon.set_self_published(true);

    vec![the_hobbit, the_silmarillion, eragon]
}

pub fn library_service(books: Vec<Book>) -> ServiceDefinition {
    let books = Arc::new(books);
    let mut service = ServiceDefinition::new("library.BookService");

    let db = books.clone();
    service.add_unary("GetBook", move |payload| {
        let db = db.clone();
        Box::pin(async move {
            let request = GetBookRequest::decode(payload.as_slice())
                .map_err(|err| Status::invalid_argument(err.to_string()))?;
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
            let (generator, generator_yielder) = Generator::<StreamItem>::create();
            tokio::spawn(async move {
                for book in db.iter() {
                    if book.author.starts_with(&request.author_prefix)
                        && generator_yielder
                            .r#yield(Ok(book.encode_to_vec()))
                            .await
                            .is_err()
                    {
                        return;
                    }
                }
            });
            Ok::<_, Status>(generator)
        })
    });

    service
}

pub fn library_client() -> BookServiceClient<MemoryTransport> {
    let transport = MemoryTransport::new(library_service(create_db()));
    BookServiceClient::new(Arc::new(transport))
}
