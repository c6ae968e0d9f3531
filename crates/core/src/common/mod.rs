//! Common types used throughout the cache simulator.
//!
//! This module provides the building blocks shared by the cache, the trace
//! parser, and the runner. It includes:
//! 1. **Address Decomposition:** Splitting an address into tag, set index, and block offset.
//! 2. **Geometry:** The validated, immutable shape of a cache.
//! 3. **Constants:** Address width and bit-mask helpers.
//! 4. **Error Handling:** Typed errors for geometry, trace, and configuration failures.

/// Address decomposition into tag, set index, and offset.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for construction, trace parsing, and configuration.
pub mod error;

/// Validated cache geometry.
pub mod geometry;

pub use addr::{AddressParts, decode};
pub use constants::ADDRESS_BITS;
pub use error::{ConfigError, GeometryError, SimError, TraceError};
pub use geometry::Geometry;
