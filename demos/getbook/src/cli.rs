use clap::Parser;
use library_rpc::config::DEFAULT_SERVICE_NAME;

#[derive(Parser)]
#[command(
    name = "getbook",
    version,
    about = "Search the library for a book by ISBN (for example, 140008381)"
)]
pub struct Cli {
    /// ISBN of the book
    pub isbn: String,

    /// Also list every book whose author starts with this prefix
    #[arg(long)]
    pub author_prefix: Option<String>,

    /// Time given to each call before giving up
    #[arg(long, default_value_t = 1000)]
    pub timeout_ms: u64,

    /// Simulated server latency for every answer
    #[arg(long, default_value_t = 0)]
    pub latency_ms: u64,

    /// Fully qualified name of the service to call
    #[arg(long, default_value = DEFAULT_SERVICE_NAME)]
    pub service: String,
}
