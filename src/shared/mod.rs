//! Shared value types used across all registry operations.
//!
//! Every input the registry takes is a fixed-width EVM quantity: namespaces are
//! 20-byte addresses, lists/keys/values are 32-byte words and metadata is an
//! arbitrary byte string. The alloy primitives carry those directly; this module
//! adds the coordinate and role types plus hex parsing for callers holding strings.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SdkError;

// ─── HintCoordinate ──────────────────────────────────────────────────────────

/// Identifies a hint slot: `(namespace, list, key)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HintCoordinate {
    pub namespace: Address,
    pub list: B256,
    pub key: B256,
}

impl HintCoordinate {
    pub fn new(namespace: Address, list: B256, key: B256) -> Self {
        Self {
            namespace,
            list,
            key,
        }
    }

    /// Parse a coordinate from hex strings.
    pub fn parse(namespace: &str, list: &str, key: &str) -> Result<Self, SdkError> {
        Ok(Self {
            namespace: parse_address(namespace)?,
            list: parse_b256(list)?,
            key: parse_b256(key)?,
        })
    }
}

impl std::fmt::Display for HintCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.namespace, self.list, self.key)
    }
}

// ─── Role ────────────────────────────────────────────────────────────────────

/// Authorization role held per `(namespace, list)`.
///
/// The owner is exclusive and replaceable. Delegates are a set with a
/// per-delegate expiry enforced by the registry, so a positive delegate check
/// only holds for the moment it was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Owner,
    Delegate,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Delegate => "Delegate",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── DelegateExpiry ──────────────────────────────────────────────────────────

/// Unix timestamp (seconds) until which a delegate stays valid.
///
/// Accepts native integers or `U256`; always submitted as `uint256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DelegateExpiry(U256);

impl DelegateExpiry {
    pub fn new(timestamp: impl Into<U256>) -> Self {
        Self(timestamp.into())
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Expiry `seconds` from now.
    pub fn in_seconds(seconds: u64) -> Self {
        let now = Utc::now().timestamp().max(0) as u64;
        Self(U256::from(now.saturating_add(seconds)))
    }
}

impl From<u32> for DelegateExpiry {
    fn from(ts: u32) -> Self {
        Self(U256::from(ts))
    }
}

impl From<u64> for DelegateExpiry {
    fn from(ts: u64) -> Self {
        Self(U256::from(ts))
    }
}

impl From<u128> for DelegateExpiry {
    fn from(ts: u128) -> Self {
        Self(U256::from(ts))
    }
}

impl From<U256> for DelegateExpiry {
    fn from(ts: U256) -> Self {
        Self(ts)
    }
}

impl TryFrom<DateTime<Utc>> for DelegateExpiry {
    type Error = SdkError;

    fn try_from(at: DateTime<Utc>) -> Result<Self, Self::Error> {
        let ts = at.timestamp();
        if ts < 0 {
            return Err(SdkError::Validation(format!(
                "Delegate expiry before the Unix epoch: {}",
                at
            )));
        }
        Ok(Self(U256::from(ts as u64)))
    }
}

impl std::fmt::Display for DelegateExpiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Derive a 32-byte identifier from a human-readable name (`keccak256(name)`).
pub fn keccak_id(name: &str) -> B256 {
    keccak256(name.as_bytes())
}

/// Parse a `0x`-prefixed 20-byte address.
pub fn parse_address(s: &str) -> Result<Address, SdkError> {
    Address::from_str(s).map_err(|e| SdkError::Validation(format!("Invalid address {}: {}", s, e)))
}

/// Parse a `0x`-prefixed 32-byte word.
pub fn parse_b256(s: &str) -> Result<B256, SdkError> {
    B256::from_str(s).map_err(|e| SdkError::Validation(format!("Invalid bytes32 {}: {}", s, e)))
}

/// Parse a hex-encoded byte string of any length.
pub fn parse_bytes(s: &str) -> Result<Bytes, SdkError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped)
        .map(Bytes::from)
        .map_err(|e| SdkError::Validation(format!("Invalid hex bytes {}: {}", s, e)))
}
