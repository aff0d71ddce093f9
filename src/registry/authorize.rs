//! Authorization gate.
//!
//! Asks the registry whether a principal holds a role on `(namespace, list)`
//! before anything is signed or submitted. The check is advisory: the registry
//! enforces the same rule on-chain, so a refusal here only saves a doomed
//! signature request and transaction.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256};

use crate::chain::{ChainReader, ContractCall};
use crate::error::{ChainError, SdkError};
use crate::registry::constants::function;
use crate::shared::Role;

/// Check that `principal` holds `role` on `(namespace, list)`.
pub async fn authorize(
    reader: &dyn ChainReader,
    contract: Address,
    namespace: Address,
    list: B256,
    principal: Address,
    role: Role,
) -> Result<(), SdkError> {
    if has_role(reader, contract, namespace, list, principal, role).await? {
        tracing::debug!(%principal, %namespace, %list, %role, "Authorized");
        return Ok(());
    }

    tracing::warn!(%principal, %namespace, %list, %role, "Authorization refused");
    Err(SdkError::NotAuthorized { principal, role })
}

/// Read `identityIsOwner` / `identityIsDelegate` for `principal`.
pub async fn has_role(
    reader: &dyn ChainReader,
    contract: Address,
    namespace: Address,
    list: B256,
    principal: Address,
    role: Role,
) -> Result<bool, SdkError> {
    let name = match role {
        Role::Owner => function::IDENTITY_IS_OWNER,
        Role::Delegate => function::IDENTITY_IS_DELEGATE,
    };
    let call = ContractCall::new(
        name,
        vec![
            DynSolValue::Address(namespace),
            DynSolValue::FixedBytes(list, 32),
            DynSolValue::Address(principal),
        ],
    )?;

    match reader.read(contract, &call).await? {
        DynSolValue::Bool(held) => Ok(held),
        other => Err(ChainError::Decode(format!("{} returned {:?}", name, other)).into()),
    }
}
