//! High-level client: `HintRegistryClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the validated client configuration and the
//! accessor methods.

use crate::chain::{ChainReader, TypedDataSigner, Wallet};
use crate::domain::delegate::client::Delegates;
use crate::domain::hint::client::Hints;
use crate::domain::list::client::Lists;
use crate::domain::metadata::client::Metadata;
use crate::error::{ClientRole, Misconfiguration, SdkError};
use crate::network::{DeploymentResolver, KnownDeployments, RegistryEnv};
use crate::registry::reads;

use alloy_primitives::{Address, U256};
use std::sync::Arc;

// Re-export sub-client types for convenience.
pub use crate::domain::delegate::client::Delegates as DelegatesClient;
pub use crate::domain::hint::client::Hints as HintsClient;
pub use crate::domain::list::client::Lists as ListsClient;
pub use crate::domain::metadata::client::Metadata as MetadataClient;

/// The chain collaborators a client was built with.
///
/// A read-only configuration can never reach the write pipeline; a writable
/// one always carries a wallet and may carry a meta-transaction signer.
#[derive(Clone)]
pub enum ClientConfig {
    ReadOnly {
        reader: Arc<dyn ChainReader>,
    },
    Writable {
        reader: Arc<dyn ChainReader>,
        wallet: Arc<dyn Wallet>,
        meta_signer: Option<Arc<dyn TypedDataSigner>>,
    },
}

impl ClientConfig {
    /// The client reads go through. For writable configs this is the wallet.
    pub fn reader(&self) -> &dyn ChainReader {
        match self {
            ClientConfig::ReadOnly { reader } | ClientConfig::Writable { reader, .. } => {
                reader.as_ref()
            }
        }
    }

    pub fn wallet(&self) -> Option<&Arc<dyn Wallet>> {
        match self {
            ClientConfig::ReadOnly { .. } => None,
            ClientConfig::Writable { wallet, .. } => Some(wallet),
        }
    }

    pub fn meta_signer(&self) -> Option<&Arc<dyn TypedDataSigner>> {
        match self {
            ClientConfig::ReadOnly { .. } => None,
            ClientConfig::Writable { meta_signer, .. } => meta_signer.as_ref(),
        }
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, ClientConfig::Writable { .. })
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientConfig::ReadOnly { reader } => f
                .debug_struct("ReadOnly")
                .field("chain_id", &reader.chain_id())
                .finish(),
            ClientConfig::Writable {
                wallet,
                meta_signer,
                ..
            } => f
                .debug_struct("Writable")
                .field("chain_id", &wallet.chain_id())
                .field("account", &wallet.account())
                .field("meta_signer", &meta_signer.as_ref().map(|s| s.account()))
                .finish(),
        }
    }
}

/// The primary entry point for the Trusted Hint Registry SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.hints()`, `client.delegates()`, `client.lists()`, `client.metadata()`.
#[derive(Debug, Clone)]
pub struct HintRegistryClient {
    pub(crate) config: ClientConfig,
    pub(crate) contract: Address,
}

impl HintRegistryClient {
    pub fn builder() -> HintRegistryClientBuilder {
        HintRegistryClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn hints(&self) -> Hints<'_> {
        Hints { client: self }
    }

    pub fn delegates(&self) -> Delegates<'_> {
        Delegates { client: self }
    }

    pub fn lists(&self) -> Lists<'_> {
        Lists { client: self }
    }

    pub fn metadata(&self) -> Metadata<'_> {
        Metadata { client: self }
    }

    // ── Registry-wide reads ──────────────────────────────────────────────

    /// Registry contract this client targets.
    pub fn contract_address(&self) -> Address {
        self.contract
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The registry's `version()`, also the EIP-712 domain version.
    pub async fn version(&self) -> Result<String, SdkError> {
        reads::version(self.config.reader(), self.contract).await
    }

    /// Current meta-transaction nonce of `account`.
    pub async fn nonce(&self, account: Address) -> Result<U256, SdkError> {
        reads::nonce(self.config.reader(), self.contract, account).await
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct HintRegistryClientBuilder {
    reader: Option<Arc<dyn ChainReader>>,
    wallet: Option<(Arc<dyn ChainReader>, Arc<dyn Wallet>)>,
    meta_signer: Option<Arc<dyn TypedDataSigner>>,
    contract_address: Option<Address>,
    resolver: Arc<dyn DeploymentResolver>,
    env: RegistryEnv,
}

impl Default for HintRegistryClientBuilder {
    fn default() -> Self {
        Self {
            reader: None,
            wallet: None,
            meta_signer: None,
            contract_address: None,
            resolver: Arc::new(KnownDeployments::embedded()),
            env: RegistryEnv::default(),
        }
    }
}

impl HintRegistryClientBuilder {
    /// Relaying wallet. Reads also go through it.
    pub fn wallet<W: Wallet + 'static>(mut self, wallet: Arc<W>) -> Self {
        let reader: Arc<dyn ChainReader> = wallet.clone();
        let wallet: Arc<dyn Wallet> = wallet;
        self.wallet = Some((reader, wallet));
        self
    }

    /// Read-only client. Mutually exclusive with [`wallet`](Self::wallet).
    pub fn read_only<R: ChainReader + 'static>(mut self, reader: Arc<R>) -> Self {
        let reader: Arc<dyn ChainReader> = reader;
        self.reader = Some(reader);
        self
    }

    /// Meta-transaction signer used by the `*_signed` operations.
    pub fn meta_signer<S: TypedDataSigner + 'static>(mut self, signer: Arc<S>) -> Self {
        let signer: Arc<dyn TypedDataSigner> = signer;
        self.meta_signer = Some(signer);
        self
    }

    /// Target this registry instead of resolving a deployment.
    pub fn contract_address(mut self, address: Address) -> Self {
        self.contract_address = Some(address);
        self
    }

    /// Resolver consulted when no contract address is set.
    pub fn deployments<D: DeploymentResolver + 'static>(mut self, resolver: D) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn env(mut self, env: RegistryEnv) -> Self {
        self.env = env;
        self
    }

    pub fn build(self) -> Result<HintRegistryClient, SdkError> {
        let config = match (self.wallet, self.reader) {
            (Some(_), Some(_)) => {
                return Err(SdkError::ClientMisconfigured(
                    Misconfiguration::ConflictingClients,
                ))
            }
            (None, None) => return Err(SdkError::ClientNotSet(ClientRole::Wallet)),
            (None, Some(reader)) => {
                if self.meta_signer.is_some() {
                    return Err(SdkError::ClientMisconfigured(
                        Misconfiguration::SignerWithoutWallet,
                    ));
                }
                ClientConfig::ReadOnly { reader }
            }
            (Some((reader, wallet)), None) => ClientConfig::Writable {
                reader,
                wallet,
                meta_signer: self.meta_signer,
            },
        };

        let contract = match self.contract_address {
            Some(address) => address,
            None => {
                let role = if config.is_writable() {
                    ClientRole::Wallet
                } else {
                    ClientRole::Reader
                };
                let chain_id = config.reader().chain_id().ok_or(SdkError::ClientMisconfigured(
                    Misconfiguration::MissingChain(role),
                ))?;
                self.resolver
                    .resolve(chain_id, self.env)
                    .ok_or(SdkError::DeploymentNotFound {
                        chain_id,
                        env: self.env,
                    })?
            }
        };

        tracing::debug!(%contract, writable = config.is_writable(), "Built registry client");
        Ok(HintRegistryClient { config, contract })
    }
}
