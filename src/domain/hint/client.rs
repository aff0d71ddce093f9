//! Hints sub-client: read and write hint values.

use alloy_primitives::B256;

use crate::chain::TxHandle;
use crate::client::HintRegistryClient;
use crate::domain::hint::{SetHintParams, SetHintsParams};
use crate::error::SdkError;
use crate::registry::{assembler, reads, OperationKind, WriteRequest};
use crate::shared::HintCoordinate;

/// Sub-client for hint operations.
///
/// Direct writes are authorized against the wallet account, `*_signed` writes
/// against the meta-transaction signer. `*_delegated` writes require the
/// acting account to be a delegate of the list instead of its owner.
pub struct Hints<'a> {
    pub(crate) client: &'a HintRegistryClient,
}

impl<'a> Hints<'a> {
    /// Current value at `coordinate` (zero when unset).
    pub async fn get(&self, coordinate: &HintCoordinate) -> Result<B256, SdkError> {
        reads::hint(
            self.client.config.reader(),
            self.client.contract,
            coordinate.namespace,
            coordinate.list,
            coordinate.key,
        )
        .await
    }

    // ── Single ───────────────────────────────────────────────────────────

    pub async fn set(&self, params: &SetHintParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetHint, false)).await
    }

    pub async fn set_signed(&self, params: &SetHintParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetHint, true)).await
    }

    pub async fn set_delegated(&self, params: &SetHintParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetHintDelegated, false))
            .await
    }

    pub async fn set_delegated_signed(&self, params: &SetHintParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetHintDelegated, true))
            .await
    }

    // ── Batch ────────────────────────────────────────────────────────────

    pub async fn set_batch(&self, params: &SetHintsParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetHints, false)).await
    }

    pub async fn set_batch_signed(&self, params: &SetHintsParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetHints, true)).await
    }

    pub async fn set_batch_delegated(&self, params: &SetHintsParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetHintsDelegated, false))
            .await
    }

    pub async fn set_batch_delegated_signed(
        &self,
        params: &SetHintsParams,
    ) -> Result<TxHandle, SdkError> {
        self.submit(params.request(OperationKind::SetHintsDelegated, true))
            .await
    }

    async fn submit(&self, request: WriteRequest) -> Result<TxHandle, SdkError> {
        assembler::submit(&self.client.config, self.client.contract, request).await
    }
}
