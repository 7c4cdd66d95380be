//! trifold-client: frame fetching for trifold
//!
//! Async HTTP client over the frame server: URL construction, response
//! caching, and total-frame-count discovery. The engine never sees HTTP;
//! it consumes the decoded strings this crate produces.

mod client;
mod error;

pub use client::{FrameClient, FrameClientBuilder, DEFAULT_BASE_URL};
pub use error::{ClientError, Result};
