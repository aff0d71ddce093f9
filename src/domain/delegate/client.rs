//! Delegates sub-client.

use alloy_primitives::{Address, B256};

use crate::chain::TxHandle;
use crate::client::HintRegistryClient;
use crate::domain::delegate::{AddDelegateParams, RemoveDelegateParams};
use crate::error::SdkError;
use crate::registry::{assembler, authorize, WriteRequest};
use crate::shared::Role;

/// Sub-client for delegate management. All writes require the list owner.
pub struct Delegates<'a> {
    pub(crate) client: &'a HintRegistryClient,
}

impl<'a> Delegates<'a> {
    pub async fn add(&self, params: &AddDelegateParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(false)).await
    }

    pub async fn add_signed(&self, params: &AddDelegateParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(true)).await
    }

    pub async fn remove(&self, params: &RemoveDelegateParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(false)).await
    }

    pub async fn remove_signed(&self, params: &RemoveDelegateParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(true)).await
    }

    /// Whether `delegate` currently holds an unexpired delegation.
    pub async fn is_delegate(
        &self,
        namespace: Address,
        list: B256,
        delegate: Address,
    ) -> Result<bool, SdkError> {
        authorize::has_role(
            self.client.config.reader(),
            self.client.contract,
            namespace,
            list,
            delegate,
            Role::Delegate,
        )
        .await
    }

    async fn submit(&self, request: WriteRequest) -> Result<TxHandle, SdkError> {
        assembler::submit(&self.client.config, self.client.contract, request).await
    }
}
