//! Host capabilities the apps are handed instead of a global engine object.
//!
//! `AudioPort` is the audio subsystem, `EventBus` carries the named transport
//! events and `AssetSource` is the JSON asset cache. A `Host` bundles the
//! mutable ports for the duration of one app call.

mod bus;
mod ports;

pub use bus::*;
pub use ports::*;

#[cfg(test)]
pub(crate) mod testing;
