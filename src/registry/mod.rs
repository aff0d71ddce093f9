//! Registry protocol core: ABI table, typed-data schemas, authorization and
//! transaction assembly.

pub mod assembler;
pub mod authorize;
pub mod constants;
pub mod reads;
pub mod schema;
pub mod typed_data;

pub use assembler::{Principal, WriteRequest};
pub use authorize::authorize;
pub use constants::{RegistryFunction, DOMAIN_NAME, REGISTRY_ABI};
pub use schema::{schema_for, Field, OperationKind, Schema};
pub use typed_data::{RegistryDomain, TypedDataRequest};
