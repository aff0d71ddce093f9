//! # Trusted Hint Registry SDK
//!
//! A Rust client for registries implementing the trusted hint standard:
//! `(namespace, list, key) -> value` records with list ownership, time-bounded
//! delegation, revocation and per-value metadata.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Value types, the registry ABI table, EIP-712 schemas, errors (always available)
//! 2. **Protocol**: Authorization gate and transaction assembler for direct, delegated and
//!    meta-transaction writes
//! 3. **Chain**: Collaborator traits plus a JSON-RPC client (`http`) and a local key
//!    signer (`local-signer`)
//! 4. **High-Level Client**: `HintRegistryClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trusted_hint_sdk::prelude::*;
//!
//! let wallet = Arc::new(RpcWallet::connect(RpcConfig::new("http://127.0.0.1:8545"), relayer).await?);
//! let signer = Arc::new(LocalSigner::from_str(key)?.with_chain_id(31337));
//!
//! let client = HintRegistryClient::builder()
//!     .wallet(wallet)
//!     .meta_signer(signer)
//!     .env(RegistryEnv::Development)
//!     .build()?;
//!
//! let coordinate = HintCoordinate::new(namespace, keccak_id("issuers"), keccak_id("acme"));
//! client.hints().set_signed(&SetHintParams::new(coordinate, value)).await?;
//! let current = client.hints().get(&coordinate).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared value types used across all domains.
pub mod shared;

/// Unified SDK error types.
pub mod error;

/// Network constants and deployment resolution.
pub mod network;

// ── Layer 2: Protocol ────────────────────────────────────────────────────────

/// Registry ABI, typed-data schemas, authorization and transaction assembly.
pub mod registry;

// ── Layer 3: Chain ───────────────────────────────────────────────────────────

/// Chain collaborator traits and built-in implementations.
pub mod chain;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// Domain modules (vertical slices): parameter types and sub-clients.
pub mod domain;

/// `HintRegistryClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared value types
    pub use crate::shared::{
        keccak_id, parse_address, parse_b256, parse_bytes, DelegateExpiry, HintCoordinate, Role,
    };

    // Domain parameter types
    pub use crate::domain::delegate::{AddDelegateParams, RemoveDelegateParams};
    pub use crate::domain::hint::{SetHintParams, SetHintsParams};
    pub use crate::domain::list::{SetListOwnerParams, SetListStatusParams};
    pub use crate::domain::metadata::SetMetadataParams;

    // Protocol
    pub use crate::registry::{
        schema_for, OperationKind, Principal, RegistryDomain, Schema, TypedDataRequest,
    };

    // Errors
    pub use crate::error::{ChainError, ClientRole, Misconfiguration, Operation, SdkError};

    // Network
    pub use crate::network::{
        DeploymentResolver, KnownDeployments, RegistryEnv, DEFAULT_RPC_URL, DEVELOPMENT_CHAIN_ID,
    };

    // Chain collaborators
    pub use crate::chain::{
        ChainReader, ContractCall, RetryConfig, RetryPolicy, TxHandle, TypedDataSigner, Wallet,
        WriteOptions,
    };
    #[cfg(feature = "local-signer")]
    pub use crate::chain::LocalSigner;
    #[cfg(feature = "http")]
    pub use crate::chain::{RpcClient, RpcConfig, RpcWallet};

    // Client + sub-clients
    pub use crate::client::{
        ClientConfig, DelegatesClient, HintRegistryClient, HintRegistryClientBuilder, HintsClient,
        ListsClient, MetadataClient,
    };

    // Alloy primitives used throughout the API
    pub use alloy_primitives::{Address, Bytes, B256, U256};
    pub use std::sync::Arc;
}
