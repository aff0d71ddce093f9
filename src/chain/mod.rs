//! # Chain collaborators
//!
//! The registry client never talks to a node directly. It consumes three
//! capabilities, each a trait so any transport can back them:
//!
//! - [`ChainReader`]: read-only contract calls against a chain
//! - [`Wallet`]: a reader that can also submit transactions from an account
//! - [`TypedDataSigner`]: an account that signs EIP-712 payloads (meta-transactions)
//!
//! Built-in implementations: [`rpc::RpcClient`] / [`rpc::RpcWallet`] (JSON-RPC
//! over HTTP, feature `http`) and [`local::LocalSigner`] (in-process key,
//! feature `local-signer`).

#[cfg(feature = "local-signer")]
pub mod local;
pub mod retry;
#[cfg(feature = "http")]
pub mod rpc;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ChainError;
use crate::registry::constants::RegistryFunction;
use crate::registry::typed_data::TypedDataRequest;

#[cfg(feature = "local-signer")]
pub use local::LocalSigner;
pub use retry::{RetryConfig, RetryPolicy};
#[cfg(feature = "http")]
pub use rpc::{RpcClient, RpcConfig, RpcWallet};

// ============================================================================
// Core Types
// ============================================================================

/// A resolved registry function plus its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractCall {
    pub function: &'static RegistryFunction,
    pub args: Vec<DynSolValue>,
}

impl ContractCall {
    /// Resolve `name` by argument count and type-check the arguments.
    pub fn new(name: &str, args: Vec<DynSolValue>) -> Result<Self, ChainError> {
        let function = RegistryFunction::resolve(name, args.len()).ok_or_else(|| {
            ChainError::UnknownFunction {
                name: name.to_string(),
                arity: args.len(),
            }
        })?;

        for (index, (kind, arg)) in function.inputs.iter().zip(&args).enumerate() {
            let ty = parse_type(kind)?;
            if !ty.matches(arg) {
                return Err(ChainError::InvalidArgument(format!(
                    "{} argument {} is not {}",
                    function.signature(),
                    index,
                    kind
                )));
            }
        }

        Ok(Self { function, args })
    }

    pub fn name(&self) -> &'static str {
        self.function.name
    }

    /// Selector followed by the ABI-encoded arguments.
    pub fn calldata(&self) -> Bytes {
        let mut data = self.function.selector().to_vec();
        data.extend(DynSolValue::Tuple(self.args.clone()).abi_encode_params());
        Bytes::from(data)
    }

    /// Decode raw return data into the function's single output.
    pub fn decode_output(&self, data: &[u8]) -> Result<DynSolValue, ChainError> {
        let output = self.function.output.ok_or_else(|| {
            ChainError::Decode(format!("{} has no return value", self.function.signature()))
        })?;
        parse_type(output)?
            .abi_decode(data)
            .map_err(|e| ChainError::Decode(format!("{}: {}", self.function.signature(), e)))
    }
}

fn parse_type(kind: &str) -> Result<DynSolType, ChainError> {
    DynSolType::parse(kind).map_err(|e| ChainError::Decode(format!("{}: {}", kind, e)))
}

/// The account and chain a write is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    pub chain_id: u64,
    pub account: Address,
}

/// Handle for a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxHandle {
    pub hash: B256,
}

impl std::fmt::Display for TxHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hash)
    }
}

// ============================================================================
// Collaborator Traits
// ============================================================================

/// Read-only access to a chain.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Chain this client is bound to, if any.
    fn chain_id(&self) -> Option<u64>;

    /// Execute a read-only contract call and decode its output.
    async fn read(&self, contract: Address, call: &ContractCall)
        -> Result<DynSolValue, ChainError>;
}

/// A chain client able to submit transactions from an account.
#[async_trait]
pub trait Wallet: ChainReader {
    /// Account transactions are sent from, if any.
    fn account(&self) -> Option<Address>;

    /// Submit a state-changing contract call.
    async fn write(
        &self,
        contract: Address,
        call: &ContractCall,
        options: WriteOptions,
    ) -> Result<TxHandle, ChainError>;
}

/// An account able to produce EIP-712 signatures.
#[async_trait]
pub trait TypedDataSigner: Send + Sync {
    fn chain_id(&self) -> Option<u64>;

    fn account(&self) -> Option<Address>;

    /// Sign the typed-data payload, returning the 65-byte `r || s || v` signature.
    async fn sign_typed_data(&self, request: &TypedDataRequest) -> Result<Bytes, ChainError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use crate::registry::constants::function;

    #[test]
    fn test_contract_call_resolves_metadata_overload() {
        let base = vec![
            DynSolValue::Address(Address::ZERO),
            DynSolValue::FixedBytes(B256::ZERO, 32),
            DynSolValue::FixedBytes(B256::ZERO, 32),
            DynSolValue::FixedBytes(B256::ZERO, 32),
        ];
        let plain = ContractCall::new(function::SET_HINT, base.clone()).unwrap();
        assert_eq!(plain.function.inputs.len(), 4);

        let mut with_metadata = base;
        with_metadata.push(DynSolValue::Bytes(vec![1, 2, 3]));
        let call = ContractCall::new(function::SET_HINT, with_metadata).unwrap();
        assert_eq!(call.function.inputs.last(), Some(&"bytes"));
    }

    #[test]
    fn test_contract_call_rejects_mistyped_argument() {
        let err = ContractCall::new(
            function::NONCES,
            vec![DynSolValue::Uint(U256::from(1), 256)],
        )
        .unwrap_err();
        assert!(matches!(err, ChainError::InvalidArgument(_)));
    }

    #[test]
    fn test_contract_call_rejects_unknown_arity() {
        let err = ContractCall::new(function::GET_HINT, vec![]).unwrap_err();
        assert!(matches!(err, ChainError::UnknownFunction { arity: 0, .. }));
    }

    #[test]
    fn test_calldata_layout() {
        let account = Address::repeat_byte(0x11);
        let call = ContractCall::new(function::NONCES, vec![DynSolValue::Address(account)]).unwrap();
        let data = call.calldata();

        assert_eq!(data.len(), 4 + 32);
        assert_eq!(&data[..4], call.function.selector().as_slice());
        assert_eq!(&data[16..36], account.as_slice());
    }

    #[test]
    fn test_decode_output() {
        let call = ContractCall::new(
            function::IDENTITY_IS_OWNER,
            vec![
                DynSolValue::Address(Address::ZERO),
                DynSolValue::FixedBytes(B256::ZERO, 32),
                DynSolValue::Address(Address::ZERO),
            ],
        )
        .unwrap();

        let mut word = [0u8; 32];
        word[31] = 1;
        assert_eq!(call.decode_output(&word).unwrap(), DynSolValue::Bool(true));
    }
}
