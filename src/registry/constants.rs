//! Constants for the Trusted Hint Registry contract.
//!
//! This module contains the EIP-712 domain name and the function table
//! matching the deployed registry ABI exactly. Overloaded functions (with and
//! without metadata) are told apart by arity.

use alloy_primitives::{keccak256, Selector};

// ============================================================================
// EIP-712
// ============================================================================

/// EIP-712 domain name the registry verifies against.
pub const DOMAIN_NAME: &str = "TrustedHintRegistry";

// ============================================================================
// Function Names
// ============================================================================

/// Registry function names.
pub mod function {
    pub const GET_HINT: &str = "getHint";
    pub const GET_METADATA: &str = "getMetadata";
    pub const IDENTITY_IS_OWNER: &str = "identityIsOwner";
    pub const IDENTITY_IS_DELEGATE: &str = "identityIsDelegate";
    pub const REVOKED_LISTS: &str = "revokedLists";
    pub const NONCES: &str = "nonces";
    pub const VERSION: &str = "version";

    pub const SET_HINT: &str = "setHint";
    pub const SET_HINT_SIGNED: &str = "setHintSigned";
    pub const SET_HINT_DELEGATED: &str = "setHintDelegated";
    pub const SET_HINT_DELEGATED_SIGNED: &str = "setHintDelegatedSigned";
    pub const SET_HINTS: &str = "setHints";
    pub const SET_HINTS_SIGNED: &str = "setHintsSigned";
    pub const SET_HINTS_DELEGATED: &str = "setHintsDelegated";
    pub const SET_HINTS_DELEGATED_SIGNED: &str = "setHintsDelegatedSigned";
    pub const ADD_LIST_DELEGATE: &str = "addListDelegate";
    pub const ADD_LIST_DELEGATE_SIGNED: &str = "addListDelegateSigned";
    pub const REMOVE_LIST_DELEGATE: &str = "removeListDelegate";
    pub const REMOVE_LIST_DELEGATE_SIGNED: &str = "removeListDelegateSigned";
    pub const SET_LIST_STATUS: &str = "setListStatus";
    pub const SET_LIST_STATUS_SIGNED: &str = "setListStatusSigned";
    pub const SET_LIST_OWNER: &str = "setListOwner";
    pub const SET_LIST_OWNER_SIGNED: &str = "setListOwnerSigned";
    pub const SET_METADATA: &str = "setMetadata";
    pub const SET_METADATA_SIGNED: &str = "setMetadataSigned";
    pub const SET_METADATA_DELEGATED: &str = "setMetadataDelegated";
    pub const SET_METADATA_DELEGATED_SIGNED: &str = "setMetadataDelegatedSigned";
}

// ============================================================================
// ABI Table
// ============================================================================

/// One registry function: name, ordered input wire types, optional single output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryFunction {
    pub name: &'static str,
    pub inputs: &'static [&'static str],
    pub output: Option<&'static str>,
}

impl RegistryFunction {
    /// Canonical signature, e.g. `getHint(address,bytes32,bytes32)`.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.inputs.join(","))
    }

    /// First four bytes of `keccak256(signature)`.
    pub fn selector(&self) -> Selector {
        let hash = keccak256(self.signature().as_bytes());
        Selector::from_slice(&hash[..4])
    }

    /// Find the overload of `name` taking `arity` arguments.
    pub fn resolve(name: &str, arity: usize) -> Option<&'static RegistryFunction> {
        REGISTRY_ABI
            .iter()
            .find(|f| f.name == name && f.inputs.len() == arity)
    }
}

const fn read(
    name: &'static str,
    inputs: &'static [&'static str],
    output: &'static str,
) -> RegistryFunction {
    RegistryFunction {
        name,
        inputs,
        output: Some(output),
    }
}

const fn write(name: &'static str, inputs: &'static [&'static str]) -> RegistryFunction {
    RegistryFunction {
        name,
        inputs,
        output: None,
    }
}

use function::*;

const HINT: &[&str] = &["address", "bytes32", "bytes32", "bytes32"];
const HINT_METADATA: &[&str] = &["address", "bytes32", "bytes32", "bytes32", "bytes"];
const HINT_SIGNED: &[&str] = &["address", "bytes32", "bytes32", "bytes32", "address", "bytes"];
const HINT_METADATA_SIGNED: &[&str] = &[
    "address", "bytes32", "bytes32", "bytes32", "bytes", "address", "bytes",
];
const HINTS: &[&str] = &["address", "bytes32", "bytes32[]", "bytes32[]"];
const HINTS_METADATA: &[&str] = &["address", "bytes32", "bytes32[]", "bytes32[]", "bytes[]"];
const HINTS_SIGNED: &[&str] = &[
    "address", "bytes32", "bytes32[]", "bytes32[]", "address", "bytes",
];
const HINTS_METADATA_SIGNED: &[&str] = &[
    "address", "bytes32", "bytes32[]", "bytes32[]", "bytes[]", "address", "bytes",
];

/// The registry's callable surface.
pub static REGISTRY_ABI: &[RegistryFunction] = &[
    // Reads
    read(GET_HINT, &["address", "bytes32", "bytes32"], "bytes32"),
    read(GET_METADATA, &["address", "bytes32", "bytes32", "bytes32"], "bytes"),
    read(IDENTITY_IS_OWNER, &["address", "bytes32", "address"], "bool"),
    read(IDENTITY_IS_DELEGATE, &["address", "bytes32", "address"], "bool"),
    read(REVOKED_LISTS, &["address", "bytes32"], "bool"),
    read(NONCES, &["address"], "uint256"),
    read(VERSION, &[], "string"),
    // Hints
    write(SET_HINT, HINT),
    write(SET_HINT, HINT_METADATA),
    write(SET_HINT_SIGNED, HINT_SIGNED),
    write(SET_HINT_SIGNED, HINT_METADATA_SIGNED),
    write(SET_HINT_DELEGATED, HINT),
    write(SET_HINT_DELEGATED, HINT_METADATA),
    write(SET_HINT_DELEGATED_SIGNED, HINT_SIGNED),
    write(SET_HINT_DELEGATED_SIGNED, HINT_METADATA_SIGNED),
    write(SET_HINTS, HINTS),
    write(SET_HINTS, HINTS_METADATA),
    write(SET_HINTS_SIGNED, HINTS_SIGNED),
    write(SET_HINTS_SIGNED, HINTS_METADATA_SIGNED),
    write(SET_HINTS_DELEGATED, HINTS),
    write(SET_HINTS_DELEGATED, HINTS_METADATA),
    write(SET_HINTS_DELEGATED_SIGNED, HINTS_SIGNED),
    write(SET_HINTS_DELEGATED_SIGNED, HINTS_METADATA_SIGNED),
    // Delegates
    write(ADD_LIST_DELEGATE, &["address", "bytes32", "address", "uint256"]),
    write(
        ADD_LIST_DELEGATE_SIGNED,
        &["address", "bytes32", "address", "uint256", "address", "bytes"],
    ),
    write(REMOVE_LIST_DELEGATE, &["address", "bytes32", "address"]),
    write(
        REMOVE_LIST_DELEGATE_SIGNED,
        &["address", "bytes32", "address", "address", "bytes"],
    ),
    // Lists
    write(SET_LIST_STATUS, &["address", "bytes32", "bool"]),
    write(
        SET_LIST_STATUS_SIGNED,
        &["address", "bytes32", "bool", "address", "bytes"],
    ),
    write(SET_LIST_OWNER, &["address", "bytes32", "address"]),
    write(
        SET_LIST_OWNER_SIGNED,
        &["address", "bytes32", "address", "address", "bytes"],
    ),
    // Metadata
    write(SET_METADATA, HINT_METADATA),
    write(SET_METADATA_SIGNED, HINT_METADATA_SIGNED),
    write(SET_METADATA_DELEGATED, HINT_METADATA),
    write(SET_METADATA_DELEGATED_SIGNED, HINT_METADATA_SIGNED),
];
