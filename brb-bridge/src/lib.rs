//! URL-activation bridge for brb.
//!
//! The native app framework calls a C ABI (`extern "C"`) entry point whenever the
//! OS hands the app a URL. The call may come before the application core is up,
//! from any thread, with a buffer that dies when the call returns. This crate
//! copies the URL, sequences it, and either delivers it to the registered
//! [`UrlHandler`] or buffers it until one registers.
//!
//! Internally there is one process-wide [`RelayHost`] (see [`host::global`]).

pub mod bridge;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod host;
pub mod logging;
pub mod payload;
pub mod relay;

pub use config::{EncodingPolicy, RelayConfig};
pub use error::{FfiResult, HandlerError, RelayError};
pub use event::UrlEvent;
pub use handler::{ChannelHandler, UrlHandler};
pub use host::RelayHost;
pub use payload::Payload;
pub use relay::{DrainReport, Phase, Receipt, Relay, RelayStats};
