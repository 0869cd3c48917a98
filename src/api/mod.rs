// Journal API module.
// Provides the authenticated client, its transport, and response types.

pub mod client;
pub mod endpoints;
pub mod transport;
pub mod types;

pub use client::AuthClient;
pub use endpoints::routes;
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, RequestBody, RequestOptions, Transport,
};
pub use types::*;
