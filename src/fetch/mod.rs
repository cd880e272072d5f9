pub mod client;

pub use client::{fetch_document, FetchOptions};
