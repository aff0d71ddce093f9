//! In-process meta-transaction signer backed by a secp256k1 private key.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, B256};
use alloy_signer::{Signer, SignerSync};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;

use crate::chain::TypedDataSigner;
use crate::error::ChainError;
use crate::registry::typed_data::TypedDataRequest;

/// Signs EIP-712 digests locally.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    inner: PrivateKeySigner,
}

impl LocalSigner {
    pub fn new(inner: PrivateKeySigner) -> Self {
        Self { inner }
    }

    /// A fresh random key with no chain.
    pub fn random() -> Self {
        Self::new(PrivateKeySigner::random())
    }

    pub fn from_bytes(key: &B256) -> Result<Self, ChainError> {
        PrivateKeySigner::from_bytes(key)
            .map(Self::new)
            .map_err(|e| ChainError::Signer(e.to_string()))
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.inner.set_chain_id(Some(chain_id));
        self
    }

    pub fn address(&self) -> Address {
        self.inner.address()
    }

    /// 65-byte `r || s || v` signature over a digest, `v` in {27, 28}.
    pub fn sign_digest(&self, digest: &B256) -> Result<Bytes, ChainError> {
        let signature = self
            .inner
            .sign_hash_sync(digest)
            .map_err(|e| ChainError::Signer(e.to_string()))?;
        Ok(Bytes::from(signature.as_bytes().to_vec()))
    }
}

impl FromStr for LocalSigner {
    type Err = ChainError;

    /// Parse a hex-encoded private key, with or without `0x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivateKeySigner::from_str(s)
            .map(Self::new)
            .map_err(|e| ChainError::Signer(e.to_string()))
    }
}

#[async_trait]
impl TypedDataSigner for LocalSigner {
    fn chain_id(&self) -> Option<u64> {
        Signer::chain_id(&self.inner)
    }

    fn account(&self) -> Option<Address> {
        Some(self.inner.address())
    }

    async fn sign_typed_data(&self, request: &TypedDataRequest) -> Result<Bytes, ChainError> {
        let digest = request
            .signing_hash()
            .map_err(|e| ChainError::InvalidArgument(e.to_string()))?;
        self.sign_digest(&digest)
    }
}
