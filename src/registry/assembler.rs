//! Transaction assembler.
//!
//! Every public write runs the same linear pipeline:
//!
//! 1. resolve the relaying wallet (chain id + account)
//! 2. signed variants: resolve the meta-transaction signer and require it to
//!    sit on the wallet's chain
//! 3. authorization gate against the acting principal
//! 4. signed variants: live version, domain, nonce, schema, signature
//! 5. positional arguments, overload resolved by arity
//! 6. submit through the wallet
//!
//! Steps 1 and 2 run before any chain read, so a misconfigured client never
//! fetches a nonce or requests a signature. Any failure is wrapped in
//! [`SdkError::OperationFailed`] naming the attempted operation.

use std::sync::Arc;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

use crate::chain::{ContractCall, TxHandle, TypedDataSigner, WriteOptions};
use crate::client::ClientConfig;
use crate::error::{ClientRole, Misconfiguration, Operation, SdkError};
use crate::registry::authorize::authorize;
use crate::registry::reads;
use crate::registry::schema::{schema_for, OperationKind};
use crate::registry::typed_data::{RegistryDomain, TypedDataRequest};

/// An account on a chain, as taken from a configured client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub address: Address,
    pub chain_id: u64,
}

impl Principal {
    fn resolve(
        role: ClientRole,
        chain_id: Option<u64>,
        account: Option<Address>,
    ) -> Result<Self, SdkError> {
        let chain_id = chain_id
            .ok_or(SdkError::ClientMisconfigured(Misconfiguration::MissingChain(role)))?;
        let address = account
            .ok_or(SdkError::ClientMisconfigured(Misconfiguration::MissingAccount(role)))?;
        Ok(Self { address, chain_id })
    }
}

/// A write operation before authorization, signing and encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequest {
    pub operation: Operation,
    pub kind: OperationKind,
    pub signed: bool,
    pub namespace: Address,
    pub list: B256,
    /// Arguments following `(namespace, list)`, in ABI order, named as in the typed-data schema.
    pub fields: Vec<(&'static str, DynSolValue)>,
    pub metadata: Option<DynSolValue>,
}

impl WriteRequest {
    pub fn new(
        operation: Operation,
        kind: OperationKind,
        signed: bool,
        namespace: Address,
        list: B256,
    ) -> Self {
        Self {
            operation,
            kind,
            signed,
            namespace,
            list,
            fields: Vec::new(),
            metadata: None,
        }
    }

    pub fn field(mut self, name: &'static str, value: DynSolValue) -> Self {
        self.fields.push((name, value));
        self
    }

    pub fn metadata(mut self, metadata: Option<DynSolValue>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Contract function this request calls.
    pub fn function_name(&self) -> &'static str {
        self.kind.function_name(self.signed)
    }

    fn base_args(&self) -> Vec<DynSolValue> {
        let mut args = Vec::with_capacity(self.fields.len() + 5);
        args.push(DynSolValue::Address(self.namespace));
        args.push(DynSolValue::FixedBytes(self.list, 32));
        args.extend(self.fields.iter().map(|(_, v)| v.clone()));
        args.extend(self.metadata.clone());
        args
    }
}

/// Run a write through the pipeline and submit it.
pub async fn submit(
    config: &ClientConfig,
    contract: Address,
    request: WriteRequest,
) -> Result<TxHandle, SdkError> {
    let operation = request.operation;
    execute(config, contract, request)
        .await
        .map_err(|e| e.during(operation))
}

async fn execute(
    config: &ClientConfig,
    contract: Address,
    request: WriteRequest,
) -> Result<TxHandle, SdkError> {
    let wallet = config
        .wallet()
        .ok_or(SdkError::ClientNotSet(ClientRole::Wallet))?;
    let relayer = Principal::resolve(ClientRole::Wallet, wallet.chain_id(), wallet.account())?;

    let signer = if request.signed {
        Some(resolve_signer(config, &relayer)?)
    } else {
        None
    };

    let acting = signer.as_ref().map_or(relayer.address, |(_, p)| p.address);
    let role = request.kind.required_role();
    tracing::debug!(
        operation = %request.operation,
        principal = %acting,
        %role,
        "Checking authorization"
    );
    authorize(
        config.reader(),
        contract,
        request.namespace,
        request.list,
        acting,
        role,
    )
    .await?;

    let mut args = request.base_args();
    if let Some((meta_signer, principal)) = &signer {
        let signature = sign(
            config,
            meta_signer.as_ref(),
            contract,
            &relayer,
            principal,
            &request,
        )
        .await?;
        args.push(DynSolValue::Address(principal.address));
        args.push(DynSolValue::Bytes(signature));
    }

    let call = ContractCall::new(request.function_name(), args)?;
    let tx = wallet
        .write(
            contract,
            &call,
            WriteOptions {
                chain_id: relayer.chain_id,
                account: relayer.address,
            },
        )
        .await?;

    tracing::info!(
        function = %call.function.signature(),
        relayer = %relayer.address,
        tx = %tx,
        "Submitted registry transaction"
    );
    Ok(tx)
}

fn resolve_signer(
    config: &ClientConfig,
    relayer: &Principal,
) -> Result<(Arc<dyn TypedDataSigner>, Principal), SdkError> {
    let meta_signer = config
        .meta_signer()
        .ok_or(SdkError::ClientNotSet(ClientRole::MetaSigner))?;
    let principal = Principal::resolve(
        ClientRole::MetaSigner,
        meta_signer.chain_id(),
        meta_signer.account(),
    )?;

    if principal.chain_id != relayer.chain_id {
        return Err(SdkError::ClientMisconfigured(Misconfiguration::ChainMismatch {
            wallet: relayer.chain_id,
            signer: principal.chain_id,
        }));
    }

    Ok((meta_signer.clone(), principal))
}

async fn sign(
    config: &ClientConfig,
    meta_signer: &dyn TypedDataSigner,
    contract: Address,
    relayer: &Principal,
    signer: &Principal,
    request: &WriteRequest,
) -> Result<Vec<u8>, SdkError> {
    let reader = config.reader();
    let version = reads::version(reader, contract).await?;
    let domain = RegistryDomain::new(version, relayer.chain_id, contract);
    let nonce = reads::nonce(reader, contract, signer.address).await?;
    tracing::debug!(signer = %signer.address, %nonce, version = %domain.version, "Fetched nonce");

    let schema = schema_for(request.kind, request.metadata.is_some())?;

    let mut fields: Vec<(&str, DynSolValue)> = Vec::with_capacity(schema.fields.len());
    fields.push(("namespace", DynSolValue::Address(request.namespace)));
    fields.push(("list", DynSolValue::FixedBytes(request.list, 32)));
    fields.extend(request.fields.iter().cloned());
    if let Some(metadata) = &request.metadata {
        fields.push(("metadata", metadata.clone()));
    }
    fields.push(("signer", DynSolValue::Address(signer.address)));
    fields.push(("nonce", DynSolValue::Uint(nonce, 256)));

    let typed = TypedDataRequest::new(domain, schema, fields)?;
    let signature = meta_signer.sign_typed_data(&typed).await?;
    tracing::debug!(
        primary_type = typed.primary_type(),
        signer = %signer.address,
        "Signed meta-transaction"
    );
    Ok(signature.to_vec())
}
