//! Metadata sub-client.

use alloy_primitives::{Bytes, B256};

use crate::chain::TxHandle;
use crate::client::HintRegistryClient;
use crate::domain::metadata::SetMetadataParams;
use crate::error::SdkError;
use crate::registry::{assembler, reads, OperationKind, WriteRequest};
use crate::shared::HintCoordinate;

/// Sub-client for hint metadata.
pub struct Metadata<'a> {
    pub(crate) client: &'a HintRegistryClient,
}

impl<'a> Metadata<'a> {
    /// Metadata stored for `coordinate -> value` (empty when unset).
    pub async fn get(&self, coordinate: &HintCoordinate, value: B256) -> Result<Bytes, SdkError> {
        reads::metadata(
            self.client.config.reader(),
            self.client.contract,
            coordinate.namespace,
            coordinate.list,
            coordinate.key,
            value,
        )
        .await
    }

    pub async fn set(&self, params: &SetMetadataParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetMetadata, false))
            .await
    }

    pub async fn set_signed(&self, params: &SetMetadataParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetMetadata, true))
            .await
    }

    pub async fn set_delegated(&self, params: &SetMetadataParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetMetadataDelegated, false))
            .await
    }

    pub async fn set_delegated_signed(
        &self,
        params: &SetMetadataParams,
    ) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetMetadataDelegated, true))
            .await
    }

    async fn submit(&self, request: WriteRequest) -> Result<TxHandle, SdkError> {
        assembler::submit(&self.client.config, self.client.contract, request).await
    }
}
