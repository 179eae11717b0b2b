//! Venue adapters for the uniex unified exchange layer.
//!
//! Each venue module owns its REST surface end to end: endpoint routing,
//! request signing, parameter vocabulary, error-code tables, and the
//! normalizers that turn venue JSON into the unified types from
//! [`uniex_core`]. The shared machinery (transport, catalog, pagination,
//! precision) lives in `uniex-core`; nothing venue-specific leaks out of the
//! adapter modules.
//!
//! # Example
//!
//! ```no_run
//! use uniex_exchanges::bitget::Bitget;
//! use uniex_exchanges::uniex_core::exchange::Exchange;
//!
//! # async fn run() -> uniex_core::Result<()> {
//! let bitget = Bitget::builder()
//!     .api_key("key")
//!     .secret("secret")
//!     .passphrase("passphrase")
//!     .build()?;
//!
//! bitget.load_markets(false).await?;
//! let ticker = bitget.fetch_ticker("BTC/USDT").await?;
//! println!("last: {:?}", ticker.last);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub use uniex_core;

pub mod bitget;

/// Commonly used types for working with venue adapters.
pub mod prelude {
    pub use crate::bitget::{Bitget, BitgetBuilder};
    pub use uniex_core::prelude::*;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
