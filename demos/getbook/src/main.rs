//! Looks a book up by ISBN through the `BookServiceClient`, against an in-process library.
//!
//! Errors are printed with the message the server sent, as is.
mod cli;
mod library;

use std::{process, sync::Arc, time::Duration};

use clap::Parser;
use cli::Cli;
use futures_util::StreamExt;
use library_rpc::{
    proto::{Book, PublishingMethod},
    transports::memory::MemoryTransport,
    BookServiceClient, CallContext, ClientConfig,
};

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    let isbn = match args.isbn.trim().parse::<i64>() {
        Ok(isbn) => isbn,
        Err(_) => {
            eprintln!("Error: ISBN must not be empty");
            process::exit(1);
        }
    };

    let timeout = Duration::from_millis(args.timeout_ms);
    let latency = Duration::from_millis(args.latency_ms);

    // The server side always registers the default name, so a different --service shows how an unknown service fails
    let service = library::book_service(
        library_rpc::config::DEFAULT_SERVICE_NAME,
        library::create_db(),
        latency,
    );
    let transport = Arc::new(MemoryTransport::new(service));
    let client = BookServiceClient::with_config(transport, ClientConfig::new(args.service));

    let ctx = CallContext::with_timeout(timeout);
    let mut failed = false;
    match client.get_book(&ctx, isbn).await {
        Ok(book) => render_book(&book),
        Err(err) => {
            eprintln!("Error: {}", err.message());
            failed = true;
        }
    }

    if let Some(author_prefix) = args.author_prefix {
        println!("---");
        println!("Books by authors starting with {author_prefix:?}:");
        let ctx = CallContext::with_timeout(timeout);
        match client.query_books(&ctx, &author_prefix).await {
            Ok(books) => {
                let mut books = Box::pin(books.into_stream());
                while let Some(result) = books.next().await {
                    match result {
                        Ok(book) => {
                            println!("- {} ({}) by {}", book.title, book.isbn, book.author)
                        }
                        Err(err) => {
                            eprintln!("Error: {}", err.message());
                            failed = true;
                        }
                    }
                }
            }
            Err(err) => {
                eprintln!("Error: {}", err.message());
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}

fn render_book(book: &Book) {
    println!("ISBN: {}", book.isbn);
    println!("Title: {}", book.title);
    println!("Author: {}", book.author);
    println!("Book type: {}", book.book_type());
    match &book.publishing_method {
        Some(PublishingMethod::SelfPublished(true)) => println!("Self published"),
        Some(PublishingMethod::Publisher(publisher)) => println!("Publisher: {}", publisher.name),
        _ => {}
    }
    if let Some(date) = &book.publication_date {
        println!("Publication date (unix seconds): {}", date.seconds);
    }
}
