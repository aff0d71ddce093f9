//! Lists sub-client: ownership and revocation status.

use alloy_primitives::{Address, B256};

use crate::chain::TxHandle;
use crate::client::HintRegistryClient;
use crate::domain::list::{SetListOwnerParams, SetListStatusParams};
use crate::error::SdkError;
use crate::registry::{assembler, authorize, reads, WriteRequest};
use crate::shared::Role;

/// Sub-client for list operations. All writes require the list owner.
pub struct Lists<'a> {
    pub(crate) client: &'a HintRegistryClient,
}

impl<'a> Lists<'a> {
    pub async fn set_status(&self, params: &SetListStatusParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(false)).await
    }

    pub async fn set_status_signed(
        &self,
        params: &SetListStatusParams,
    ) -> Result<TxHandle, SdkError> {
        self.submit(params.request(true)).await
    }

    pub async fn set_owner(&self, params: &SetListOwnerParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(false)).await
    }

    pub async fn set_owner_signed(&self, params: &SetListOwnerParams) -> Result<TxHandle, SdkError> {
        self.submit(params.request(true)).await
    }

    pub async fn is_owner(
        &self,
        namespace: Address,
        list: B256,
        account: Address,
    ) -> Result<bool, SdkError> {
        authorize::has_role(
            self.client.config.reader(),
            self.client.contract,
            namespace,
            list,
            account,
            Role::Owner,
        )
        .await
    }

    pub async fn is_revoked(&self, namespace: Address, list: B256) -> Result<bool, SdkError> {
        reads::is_revoked(self.client.config.reader(), self.client.contract, namespace, list).await
    }

    async fn submit(&self, request: WriteRequest) -> Result<TxHandle, SdkError> {
        assembler::submit(&self.client.config, self.client.contract, request).await
    }
}
