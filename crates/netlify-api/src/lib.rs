// netlify-api: Async Rust client for the Netlify REST API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, NetlifyClient};
pub use error::Error;
pub use models::{Account, Build, BuildStatus, Deploy, Form, Site, Submission};
pub use transport::{TlsMode, TransportConfig};
