//! Delegate domain: time-bounded write access to a list.

pub mod client;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::Operation;
use crate::registry::{OperationKind, WriteRequest};
use crate::shared::DelegateExpiry;

/// Grant `delegate` write access to `(namespace, list)` until `until`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddDelegateParams {
    pub namespace: Address,
    pub list: B256,
    pub delegate: Address,
    pub until: DelegateExpiry,
}

impl AddDelegateParams {
    pub fn new(
        namespace: Address,
        list: B256,
        delegate: Address,
        until: impl Into<DelegateExpiry>,
    ) -> Self {
        Self {
            namespace,
            list,
            delegate,
            until: until.into(),
        }
    }

    pub(crate) fn request(&self, signed: bool) -> WriteRequest {
        WriteRequest::new(
            Operation::AddListDelegate,
            OperationKind::AddListDelegate,
            signed,
            self.namespace,
            self.list,
        )
        .field("delegate", DynSolValue::Address(self.delegate))
        .field("untilTimestamp", DynSolValue::Uint(self.until.as_u256(), 256))
    }
}

/// Revoke `delegate` on `(namespace, list)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveDelegateParams {
    pub namespace: Address,
    pub list: B256,
    pub delegate: Address,
}

impl RemoveDelegateParams {
    pub fn new(namespace: Address, list: B256, delegate: Address) -> Self {
        Self {
            namespace,
            list,
            delegate,
        }
    }

    pub(crate) fn request(&self, signed: bool) -> WriteRequest {
        WriteRequest::new(
            Operation::RemoveListDelegate,
            OperationKind::RemoveListDelegate,
            signed,
            self.namespace,
            self.list,
        )
        .field("delegate", DynSolValue::Address(self.delegate))
    }
}
