mod client;
mod instrument;

pub use client::{ApiClient, REQUEST_ID_HEADER};
