//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: test implementations for desktop development
//! - `system`: wall-clock [`Clock`] over `std::time::Instant` (requires `std`)
//! - `embedded`: adapters over `embedded-hal` digital pins (requires the
//!   `embedded-hal` feature)
//!
//! [`Clock`]: crate::traits::Clock

pub mod mock;

#[cfg(feature = "std")]
pub mod system;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

pub use mock::*;

#[cfg(feature = "std")]
pub use system::*;

#[cfg(feature = "embedded-hal")]
pub use embedded::*;
