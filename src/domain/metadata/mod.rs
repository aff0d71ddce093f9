//! Metadata domain: bytes attached to a `(namespace, list, key, value)` record.

pub mod client;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::error::Operation;
use crate::registry::{OperationKind, WriteRequest};
use crate::shared::HintCoordinate;

/// Replace the metadata of the record `coordinate -> value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMetadataParams {
    pub coordinate: HintCoordinate,
    pub value: B256,
    pub metadata: Bytes,
}

impl SetMetadataParams {
    pub fn new(coordinate: HintCoordinate, value: B256, metadata: impl Into<Bytes>) -> Self {
        Self {
            coordinate,
            value,
            metadata: metadata.into(),
        }
    }

    pub(crate) fn request(&self, kind: OperationKind, signed: bool) -> WriteRequest {
        let HintCoordinate {
            namespace,
            list,
            key,
        } = self.coordinate;
        WriteRequest::new(Operation::SetMetadata, kind, signed, namespace, list)
            .field("key", DynSolValue::FixedBytes(key, 32))
            .field("value", DynSolValue::FixedBytes(self.value, 32))
            .metadata(Some(DynSolValue::Bytes(self.metadata.to_vec())))
    }
}
