/// Network adapters for external HTTP calls
mod npm_website_client;

pub use npm_website_client::{extract_dependents_count, NpmWebsiteClient};
