// Nexus REST client: asset search and file downloads

pub mod client;
pub mod download;
pub mod search;

pub use client::NexusClient;
pub use download::DownloadOutcome;
pub use search::SearchQuery;
