//! # uniex
//!
//! A unified cryptocurrency exchange client layer: one fixed-schema data
//! model and one [`Exchange`](uniex_core::exchange::Exchange) trait over
//! venue-specific REST APIs.
//!
//! This facade crate re-exports [`uniex_core`] (unified types, transport,
//! catalog, pagination, precision) and [`uniex_exchanges`] (the venue
//! adapters). Depend on it for applications; libraries that only need the
//! data model can depend on `uniex-core` alone.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use uniex::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let bitget = Bitget::builder()
//!         .api_key("key")
//!         .secret("secret")
//!         .passphrase("passphrase")
//!         .build()?;
//!
//!     bitget.load_markets(false).await?;
//!     let ticker = bitget.fetch_ticker("BTC/USDT").await?;
//!     println!("last: {:?}", ticker.last);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub use uniex_core;
pub use uniex_exchanges;

pub use uniex_core::{
    error::{Error, Result},
    exchange::{ArcExchange, BoxedExchange, Exchange},
    types::*,
};
pub use uniex_exchanges::bitget::{Bitget, BitgetBuilder};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use uniex_core::prelude::*;
    pub use uniex_exchanges::prelude::*;
}
