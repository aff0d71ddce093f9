//! Unified SDK error types.

use alloy_primitives::Address;
use thiserror::Error;

use crate::network::RegistryEnv;
use crate::shared::Role;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    /// A required client (relaying wallet or meta-transaction signer) was not supplied.
    #[error("{0} not set")]
    ClientNotSet(ClientRole),

    #[error("Client misconfigured: {0}")]
    ClientMisconfigured(Misconfiguration),

    /// The acting principal does not hold the role the operation requires.
    #[error("{principal} is not authorized: {role} role required")]
    NotAuthorized { principal: Address, role: Role },

    /// Wraps any failure raised while executing a write operation.
    #[error("Failed to {operation}: {source}")]
    OperationFailed {
        operation: Operation,
        #[source]
        source: Box<SdkError>,
    },

    #[error("Invalid operation kind: {0}")]
    InvalidOperationKind(String),

    #[error("No registry deployment for chain {chain_id} ({env})")]
    DeploymentNotFound { chain_id: u64, env: RegistryEnv },

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl SdkError {
    /// Wrap this error as the cause of a failed write operation.
    pub fn during(self, operation: Operation) -> Self {
        SdkError::OperationFailed {
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, unwrapping any `OperationFailed` layers.
    pub fn cause(&self) -> &SdkError {
        match self {
            SdkError::OperationFailed { source, .. } => source.cause(),
            other => other,
        }
    }

    /// The role whose check failed, if this error was caused by an authorization refusal.
    pub fn unauthorized_role(&self) -> Option<Role> {
        match self.cause() {
            SdkError::NotAuthorized { role, .. } => Some(*role),
            _ => None,
        }
    }
}

/// Which configured client an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientRole {
    Wallet,
    /// The chain reader of a read-only client.
    Reader,
    MetaSigner,
}

impl std::fmt::Display for ClientRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientRole::Wallet => write!(f, "Wallet client"),
            ClientRole::Reader => write!(f, "Read-only client"),
            ClientRole::MetaSigner => write!(f, "Meta-transaction signer"),
        }
    }
}

/// Reasons a supplied client cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Misconfiguration {
    #[error("{0} has no chain")]
    MissingChain(ClientRole),

    #[error("{0} has no account")]
    MissingAccount(ClientRole),

    #[error("wallet is on chain {wallet} but meta-transaction signer is on chain {signer}")]
    ChainMismatch { wallet: u64, signer: u64 },

    #[error("both a wallet and a read-only client were supplied")]
    ConflictingClients,

    #[error("meta-transaction signer requires a wallet client")]
    SignerWithoutWallet,
}

/// The write operation an `OperationFailed` error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SetHint,
    SetHints,
    AddListDelegate,
    RemoveListDelegate,
    SetListStatus,
    SetListOwner,
    SetMetadata,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SetHint => "set hint",
            Operation::SetHints => "set hints",
            Operation::AddListDelegate => "add list delegate",
            Operation::RemoveListDelegate => "remove list delegate",
            Operation::SetListStatus => "set list status",
            Operation::SetListOwner => "set list owner",
            Operation::SetMetadata => "set metadata",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised by chain collaborators (RPC transport, contract calls, signers).
#[derive(Error, Debug)]
pub enum ChainError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Execution reverted: {0}")]
    Revert(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Signer error: {0}")]
    Signer(String),

    #[error("Unknown registry function {name} with {arity} arguments")]
    UnknownFunction { name: String, arity: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}
