//! List domain: ownership transfer and revocation.

pub mod client;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::error::Operation;
use crate::registry::{OperationKind, WriteRequest};

/// Mark a list revoked (or restore it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetListStatusParams {
    pub namespace: Address,
    pub list: B256,
    pub revoked: bool,
}

impl SetListStatusParams {
    pub fn new(namespace: Address, list: B256, revoked: bool) -> Self {
        Self {
            namespace,
            list,
            revoked,
        }
    }

    pub(crate) fn request(&self, signed: bool) -> WriteRequest {
        WriteRequest::new(
            Operation::SetListStatus,
            OperationKind::SetListStatus,
            signed,
            self.namespace,
            self.list,
        )
        .field("revoked", DynSolValue::Bool(self.revoked))
    }
}

/// Hand a list over to `new_owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetListOwnerParams {
    pub namespace: Address,
    pub list: B256,
    pub new_owner: Address,
}

impl SetListOwnerParams {
    pub fn new(namespace: Address, list: B256, new_owner: Address) -> Self {
        Self {
            namespace,
            list,
            new_owner,
        }
    }

    pub(crate) fn request(&self, signed: bool) -> WriteRequest {
        WriteRequest::new(
            Operation::SetListOwner,
            OperationKind::SetListOwner,
            signed,
            self.namespace,
            self.list,
        )
        .field("newOwner", DynSolValue::Address(self.new_owner))
    }
}
