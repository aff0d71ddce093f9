//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Parameter types for the domain's write operations
//! - `client.rs`: Sub-client with reads and direct / delegated / signed writes

pub mod delegate;
pub mod hint;
pub mod list;
pub mod metadata;
