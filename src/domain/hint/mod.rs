//! Hint domain: single and batch hint writes.

pub mod client;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::error::Operation;
use crate::registry::{OperationKind, WriteRequest};
use crate::shared::HintCoordinate;

// ─── SetHintParams ───────────────────────────────────────────────────────────

/// One hint write, optionally with metadata attached to the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetHintParams {
    pub coordinate: HintCoordinate,
    pub value: B256,
    pub metadata: Option<Bytes>,
}

impl SetHintParams {
    pub fn new(coordinate: HintCoordinate, value: B256) -> Self {
        Self {
            coordinate,
            value,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: impl Into<Bytes>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub(crate) fn request(&self, kind: OperationKind, signed: bool) -> WriteRequest {
        let HintCoordinate {
            namespace,
            list,
            key,
        } = self.coordinate;
        WriteRequest::new(Operation::SetHint, kind, signed, namespace, list)
            .field("key", DynSolValue::FixedBytes(key, 32))
            .field("value", DynSolValue::FixedBytes(self.value, 32))
            .metadata(self.metadata.as_ref().map(|m| DynSolValue::Bytes(m.to_vec())))
    }
}

// ─── SetHintsParams ──────────────────────────────────────────────────────────

/// A batch of hint writes on one list.
///
/// `keys`, `values` and (when present) `metadata` are parallel arrays. Their
/// lengths are not checked client-side; the registry reverts on a mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetHintsParams {
    pub namespace: Address,
    pub list: B256,
    pub keys: Vec<B256>,
    pub values: Vec<B256>,
    pub metadata: Option<Vec<Bytes>>,
}

impl SetHintsParams {
    pub fn new(namespace: Address, list: B256) -> Self {
        Self {
            namespace,
            list,
            ..Self::default()
        }
    }

    /// Append one `(key, value)` pair.
    pub fn hint(mut self, key: B256, value: B256) -> Self {
        self.keys.push(key);
        self.values.push(value);
        self
    }

    pub fn with_metadata(mut self, metadata: Vec<Bytes>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub(crate) fn request(&self, kind: OperationKind, signed: bool) -> WriteRequest {
        WriteRequest::new(Operation::SetHints, kind, signed, self.namespace, self.list)
            .field("keys", words(&self.keys))
            .field("values", words(&self.values))
            .metadata(self.metadata.as_ref().map(|items| {
                DynSolValue::Array(items.iter().map(|m| DynSolValue::Bytes(m.to_vec())).collect())
            }))
    }
}

fn words(items: &[B256]) -> DynSolValue {
    DynSolValue::Array(items.iter().map(|w| DynSolValue::FixedBytes(*w, 32)).collect())
}
