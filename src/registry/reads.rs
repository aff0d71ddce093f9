//! Typed wrappers around the registry's view functions.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, B256, U256};

use crate::chain::{ChainReader, ContractCall};
use crate::error::{ChainError, SdkError};
use crate::registry::constants::function;

async fn call(
    reader: &dyn ChainReader,
    contract: Address,
    name: &'static str,
    args: Vec<DynSolValue>,
) -> Result<DynSolValue, SdkError> {
    let call = ContractCall::new(name, args)?;
    Ok(reader.read(contract, &call).await?)
}

fn unexpected(name: &str, value: DynSolValue) -> SdkError {
    ChainError::Decode(format!("{} returned {:?}", name, value)).into()
}

pub async fn hint(
    reader: &dyn ChainReader,
    contract: Address,
    namespace: Address,
    list: B256,
    key: B256,
) -> Result<B256, SdkError> {
    let args = vec![
        DynSolValue::Address(namespace),
        DynSolValue::FixedBytes(list, 32),
        DynSolValue::FixedBytes(key, 32),
    ];
    match call(reader, contract, function::GET_HINT, args).await? {
        DynSolValue::FixedBytes(word, 32) => Ok(word),
        other => Err(unexpected(function::GET_HINT, other)),
    }
}

pub async fn metadata(
    reader: &dyn ChainReader,
    contract: Address,
    namespace: Address,
    list: B256,
    key: B256,
    value: B256,
) -> Result<Bytes, SdkError> {
    let args = vec![
        DynSolValue::Address(namespace),
        DynSolValue::FixedBytes(list, 32),
        DynSolValue::FixedBytes(key, 32),
        DynSolValue::FixedBytes(value, 32),
    ];
    match call(reader, contract, function::GET_METADATA, args).await? {
        DynSolValue::Bytes(bytes) => Ok(Bytes::from(bytes)),
        other => Err(unexpected(function::GET_METADATA, other)),
    }
}

pub async fn is_revoked(
    reader: &dyn ChainReader,
    contract: Address,
    namespace: Address,
    list: B256,
) -> Result<bool, SdkError> {
    let args = vec![
        DynSolValue::Address(namespace),
        DynSolValue::FixedBytes(list, 32),
    ];
    match call(reader, contract, function::REVOKED_LISTS, args).await? {
        DynSolValue::Bool(revoked) => Ok(revoked),
        other => Err(unexpected(function::REVOKED_LISTS, other)),
    }
}

/// Current meta-transaction nonce of `account`.
pub async fn nonce(
    reader: &dyn ChainReader,
    contract: Address,
    account: Address,
) -> Result<U256, SdkError> {
    match call(reader, contract, function::NONCES, vec![DynSolValue::Address(account)]).await? {
        DynSolValue::Uint(n, _) => Ok(n),
        other => Err(unexpected(function::NONCES, other)),
    }
}

/// Registry version, used as the EIP-712 domain version.
pub async fn version(reader: &dyn ChainReader, contract: Address) -> Result<String, SdkError> {
    match call(reader, contract, function::VERSION, vec![]).await? {
        DynSolValue::String(v) => Ok(v),
        other => Err(unexpected(function::VERSION, other)),
    }
}
