//! # Nebula Pool
//!
//! Capacity-bounded object pooling with lifecycle callbacks and a shared
//! registry. Pools fill lazily, reuse objects LIFO, and grow their soft
//! capacity toward a hard ceiling under release pressure; the registry maps
//! caller-chosen keys to pools so independent subsystems can share them.
//!
//! ## Example
//!
//! ```
//! use nebula_pool::{Lifecycle, Pool, PoolConfig, Result};
//!
//! struct Buffers;
//!
//! impl Lifecycle for Buffers {
//!     type Object = Vec<u8>;
//!
//!     fn id(&self) -> &str {
//!         "buffers"
//!     }
//!
//!     fn create(&self) -> Result<Vec<u8>> {
//!         Ok(Vec::with_capacity(4096))
//!     }
//!
//!     fn on_release(&self, obj: &mut Vec<u8>) {
//!         obj.clear();
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let pool = Pool::new(Buffers, PoolConfig::default())?;
//!     let mut buf = pool.take()?;
//!     buf.extend_from_slice(b"payload");
//!     pool.release(buf);
//!     assert_eq!(pool.live_size(), 1);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod pool;
pub mod registry;

pub use config::PoolConfig;
pub use error::{Error, Result};
pub use guard::Guard;
pub use lifecycle::Lifecycle;
pub use pool::{Pool, PoolStats, ReleaseOutcome};
pub use registry::Registry;
