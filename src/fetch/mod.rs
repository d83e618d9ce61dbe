pub mod client;
pub mod parser;

pub use client::PageFetcher;
pub use parser::parse_page;
