//! In-memory Trusted Hint Registry used by the integration tests.
//!
//! Every wallet handed out by a [`MockRegistry`] shares one state, the way
//! accounts share a chain. The emulator enforces owner / delegate rules,
//! revocation and nonces, and recovers meta-transaction signers from the
//! EIP-712 digest it computes itself from hard-coded typehash strings.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{keccak256, Address, Bytes, Signature, B256, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use trusted_hint_sdk::chain::{
    ChainReader, ContractCall, LocalSigner, TxHandle, TypedDataSigner, Wallet, WriteOptions,
};
use trusted_hint_sdk::error::ChainError;
use trusted_hint_sdk::registry::TypedDataRequest;

pub const CHAIN_ID: u64 = 31337;
pub const START_TIME: u64 = 1_700_000_000;

const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

// ─── State ───────────────────────────────────────────────────────────────────

/// A write as the registry received it.
#[derive(Debug, Clone)]
pub struct RecordedWrite {
    pub signature: String,
    pub from: Address,
    pub args: Vec<DynSolValue>,
}

#[derive(Debug, Default)]
struct State {
    version: String,
    now: U256,
    hints: HashMap<(Address, B256, B256), B256>,
    metadata: HashMap<(Address, B256, B256, B256), Vec<u8>>,
    owners: HashMap<(Address, B256), Address>,
    delegates: HashMap<(Address, B256, Address), U256>,
    revoked: HashMap<(Address, B256), bool>,
    nonces: HashMap<Address, U256>,
    reads: Vec<&'static str>,
    writes: Vec<RecordedWrite>,
}

impl State {
    fn owner(&self, namespace: Address, list: B256) -> Address {
        self.owners
            .get(&(namespace, list))
            .copied()
            .unwrap_or(namespace)
    }

    fn is_delegate(&self, namespace: Address, list: B256, who: Address) -> bool {
        self.delegates
            .get(&(namespace, list, who))
            .is_some_and(|until| *until > self.now)
    }

    fn nonce(&self, who: Address) -> U256 {
        self.nonces.get(&who).copied().unwrap_or_default()
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockRegistry {
    pub address: Address,
    pub chain_id: u64,
    state: Arc<Mutex<State>>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::on_chain(CHAIN_ID)
    }

    pub fn on_chain(chain_id: u64) -> Self {
        let state = State {
            version: "1.0.0".to_string(),
            now: U256::from(START_TIME),
            ..State::default()
        };
        Self {
            address: Address::repeat_byte(0x42),
            chain_id,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// A wallet for `account` on the registry's chain.
    pub fn wallet(&self, account: Address) -> Arc<MockWallet> {
        Arc::new(MockWallet {
            registry: self.clone(),
            account: Some(account),
            chain_id: Some(self.chain_id),
        })
    }

    /// A reader without an account.
    pub fn reader(&self) -> Arc<MockWallet> {
        Arc::new(MockWallet {
            registry: self.clone(),
            account: None,
            chain_id: Some(self.chain_id),
        })
    }

    pub fn set_version(&self, version: &str) {
        self.state.lock().version = version.to_string();
    }

    pub fn advance_time(&self, seconds: u64) {
        let mut state = self.state.lock();
        state.now += U256::from(seconds);
    }

    pub fn now(&self) -> U256 {
        self.state.lock().now
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.state.lock().writes.clone()
    }

    pub fn last_write(&self) -> Option<RecordedWrite> {
        self.state.lock().writes.last().cloned()
    }

    pub fn reads_of(&self, name: &str) -> usize {
        self.state.lock().reads.iter().filter(|r| **r == name).count()
    }

    pub fn clear_log(&self) {
        let mut state = self.state.lock();
        state.reads.clear();
        state.writes.clear();
    }

    // ── Read dispatch ────────────────────────────────────────────────────

    fn read(&self, contract: Address, call: &ContractCall) -> Result<DynSolValue, ChainError> {
        if contract != self.address {
            return Err(ChainError::Revert("no contract at address".into()));
        }
        let mut state = self.state.lock();
        state.reads.push(call.name());
        let a = &call.args;

        let value = match call.name() {
            "getHint" => {
                let key = (addr(&a[0]), word(&a[1]), word(&a[2]));
                DynSolValue::FixedBytes(state.hints.get(&key).copied().unwrap_or_default(), 32)
            }
            "getMetadata" => {
                let key = (addr(&a[0]), word(&a[1]), word(&a[2]), word(&a[3]));
                DynSolValue::Bytes(state.metadata.get(&key).cloned().unwrap_or_default())
            }
            "identityIsOwner" => {
                DynSolValue::Bool(state.owner(addr(&a[0]), word(&a[1])) == addr(&a[2]))
            }
            "identityIsDelegate" => {
                DynSolValue::Bool(state.is_delegate(addr(&a[0]), word(&a[1]), addr(&a[2])))
            }
            "revokedLists" => DynSolValue::Bool(
                state
                    .revoked
                    .get(&(addr(&a[0]), word(&a[1])))
                    .copied()
                    .unwrap_or(false),
            ),
            "nonces" => DynSolValue::Uint(state.nonce(addr(&a[0])), 256),
            "version" => DynSolValue::String(state.version.clone()),
            other => return Err(ChainError::Revert(format!("{} is not a view", other))),
        };
        Ok(value)
    }

    // ── Write dispatch ───────────────────────────────────────────────────

    fn write(
        &self,
        contract: Address,
        call: &ContractCall,
        from: Address,
    ) -> Result<TxHandle, ChainError> {
        if contract != self.address {
            return Err(ChainError::Revert("no contract at address".into()));
        }
        let mut state = self.state.lock();
        state.writes.push(RecordedWrite {
            signature: call.function.signature(),
            from,
            args: call.args.clone(),
        });

        let name = call.name();
        let (base, args, sender) = match name.strip_suffix("Signed") {
            Some(base) => {
                let signer = verify_signature(&state, self, name, &call.args)?;
                let next = state.nonce(signer) + U256::from(1);
                state.nonces.insert(signer, next);
                (base, &call.args[..call.args.len() - 2], signer)
            }
            None => (name, &call.args[..], from),
        };

        let namespace = addr(&args[0]);
        let list = word(&args[1]);
        let authorized = if base.contains("Delegated") {
            state.is_delegate(namespace, list, sender)
        } else {
            state.owner(namespace, list) == sender
        };
        if !authorized {
            return Err(ChainError::Revert(format!("{}: unauthorized", base)));
        }

        let writes_hints = base.starts_with("setHint") || base.starts_with("setMetadata");
        if writes_hints && state.revoked.get(&(namespace, list)).copied().unwrap_or(false) {
            return Err(ChainError::Revert("list revoked".into()));
        }

        match base {
            "setHint" | "setHintDelegated" => {
                let (key, value) = (word(&args[2]), word(&args[3]));
                state.hints.insert((namespace, list, key), value);
                if let Some(metadata) = args.get(4) {
                    state
                        .metadata
                        .insert((namespace, list, key, value), bytes(metadata));
                }
            }
            "setHints" | "setHintsDelegated" => {
                let keys = words(&args[2]);
                let values = words(&args[3]);
                let metadata = args.get(4).map(bytes_list);
                if keys.len() != values.len()
                    || metadata.as_ref().is_some_and(|m| m.len() != keys.len())
                {
                    return Err(ChainError::Revert("array length mismatch".into()));
                }
                for (i, (key, value)) in keys.into_iter().zip(values).enumerate() {
                    state.hints.insert((namespace, list, key), value);
                    if let Some(metadata) = &metadata {
                        state
                            .metadata
                            .insert((namespace, list, key, value), metadata[i].clone());
                    }
                }
            }
            "setMetadata" | "setMetadataDelegated" => {
                let key = (namespace, list, word(&args[2]), word(&args[3]));
                state.metadata.insert(key, bytes(&args[4]));
            }
            "addListDelegate" => {
                state
                    .delegates
                    .insert((namespace, list, addr(&args[2])), uint(&args[3]));
            }
            "removeListDelegate" => {
                state.delegates.remove(&(namespace, list, addr(&args[2])));
            }
            "setListStatus" => {
                state.revoked.insert((namespace, list), boolean(&args[2]));
            }
            "setListOwner" => {
                state.owners.insert((namespace, list), addr(&args[2]));
            }
            other => return Err(ChainError::Revert(format!("unknown function {}", other))),
        }

        let n = state.writes.len() as u64;
        Ok(TxHandle {
            hash: keccak256(n.to_be_bytes()),
        })
    }
}

// ─── Signature verification ──────────────────────────────────────────────────

fn type_string(name: &str, arity: usize) -> Option<&'static str> {
    Some(match (name, arity) {
        ("setHintSigned", 6) => "SetHintSigned(address namespace,bytes32 list,bytes32 key,bytes32 value,address signer,uint256 nonce)",
        ("setHintSigned", 7) => "SetHintSignedMetadata(address namespace,bytes32 list,bytes32 key,bytes32 value,bytes metadata,address signer,uint256 nonce)",
        ("setHintDelegatedSigned", 6) => "SetHintDelegatedSigned(address namespace,bytes32 list,bytes32 key,bytes32 value,address signer,uint256 nonce)",
        ("setHintDelegatedSigned", 7) => "SetHintDelegatedSignedMetadata(address namespace,bytes32 list,bytes32 key,bytes32 value,bytes metadata,address signer,uint256 nonce)",
        ("setHintsSigned", 6) => "SetHintsSigned(address namespace,bytes32 list,bytes32[] keys,bytes32[] values,address signer,uint256 nonce)",
        ("setHintsSigned", 7) => "SetHintsSignedMetadata(address namespace,bytes32 list,bytes32[] keys,bytes32[] values,bytes[] metadata,address signer,uint256 nonce)",
        ("setHintsDelegatedSigned", 6) => "SetHintsDelegatedSigned(address namespace,bytes32 list,bytes32[] keys,bytes32[] values,address signer,uint256 nonce)",
        ("setHintsDelegatedSigned", 7) => "SetHintsDelegatedSignedMetadata(address namespace,bytes32 list,bytes32[] keys,bytes32[] values,bytes[] metadata,address signer,uint256 nonce)",
        ("addListDelegateSigned", 6) => "AddListDelegateSigned(address namespace,bytes32 list,address delegate,uint256 untilTimestamp,address signer,uint256 nonce)",
        ("removeListDelegateSigned", 5) => "RemoveListDelegateSigned(address namespace,bytes32 list,address delegate,address signer,uint256 nonce)",
        ("setListStatusSigned", 5) => "SetListStatusSigned(address namespace,bytes32 list,bool revoked,address signer,uint256 nonce)",
        ("setListOwnerSigned", 5) => "SetListOwnerSigned(address namespace,bytes32 list,address newOwner,address signer,uint256 nonce)",
        ("setMetadataSigned", 7) => "SetMetadataSigned(address namespace,bytes32 list,bytes32 key,bytes32 value,bytes metadata,address signer,uint256 nonce)",
        ("setMetadataDelegatedSigned", 7) => "SetMetadataDelegatedSigned(address namespace,bytes32 list,bytes32 key,bytes32 value,bytes metadata,address signer,uint256 nonce)",
        _ => return None,
    })
}

fn member_types(type_string: &str) -> Vec<&str> {
    let start = type_string.find('(').map_or(0, |i| i + 1);
    type_string[start..type_string.len() - 1]
        .split(',')
        .filter_map(|member| member.split_whitespace().next())
        .collect()
}

fn encode_member(kind: &str, value: &DynSolValue) -> B256 {
    match kind {
        "address" => addr(value).into_word(),
        "bytes32" => word(value),
        "uint256" => B256::from(uint(value).to_be_bytes::<32>()),
        "bool" => B256::with_last_byte(boolean(value) as u8),
        "bytes" => keccak256(bytes(value)),
        "bytes32[]" => {
            let concat: Vec<u8> = words(value).iter().flat_map(|w| w.0).collect();
            keccak256(concat)
        }
        "bytes[]" => {
            let concat: Vec<u8> = bytes_list(value)
                .iter()
                .flat_map(|b| keccak256(b).0)
                .collect();
            keccak256(concat)
        }
        other => panic!("unsupported member type {other}"),
    }
}

fn domain_separator(version: &str, chain_id: u64, contract: Address) -> B256 {
    let mut buf = Vec::with_capacity(32 * 5);
    buf.extend_from_slice(keccak256(DOMAIN_TYPE).as_slice());
    buf.extend_from_slice(keccak256("TrustedHintRegistry").as_slice());
    buf.extend_from_slice(keccak256(version).as_slice());
    buf.extend_from_slice(&U256::from(chain_id).to_be_bytes::<32>());
    buf.extend_from_slice(contract.into_word().as_slice());
    keccak256(buf)
}

/// Recover the signer of a `*Signed` call and check it matches the `signer` argument.
fn verify_signature(
    state: &State,
    registry: &MockRegistry,
    name: &str,
    args: &[DynSolValue],
) -> Result<Address, ChainError> {
    let type_string = type_string(name, args.len())
        .ok_or_else(|| ChainError::Revert(format!("{} has no typehash", name)))?;
    let claimed = addr(&args[args.len() - 2]);
    let raw = bytes(&args[args.len() - 1]);

    let mut message: Vec<DynSolValue> = args[..args.len() - 1].to_vec();
    message.push(DynSolValue::Uint(state.nonce(claimed), 256));

    let mut struct_buf = keccak256(type_string).to_vec();
    for (kind, value) in member_types(type_string).into_iter().zip(&message) {
        struct_buf.extend_from_slice(encode_member(kind, value).as_slice());
    }
    let struct_hash = keccak256(struct_buf);

    let mut digest_buf = b"\x19\x01".to_vec();
    digest_buf.extend_from_slice(
        domain_separator(&state.version, registry.chain_id, registry.address).as_slice(),
    );
    digest_buf.extend_from_slice(struct_hash.as_slice());
    let digest = keccak256(digest_buf);

    let signature = Signature::try_from(raw.as_slice())
        .map_err(|e| ChainError::Revert(format!("malformed signature: {}", e)))?;
    let recovered = signature
        .recover_address_from_prehash(&digest)
        .map_err(|e| ChainError::Revert(format!("unrecoverable signature: {}", e)))?;

    if recovered != claimed {
        return Err(ChainError::Revert(format!(
            "{}: signature by {} does not match signer {}",
            name, recovered, claimed
        )));
    }
    Ok(claimed)
}

// ─── Argument helpers ────────────────────────────────────────────────────────

fn addr(value: &DynSolValue) -> Address {
    match value {
        DynSolValue::Address(a) => *a,
        other => panic!("expected address, got {other:?}"),
    }
}

fn word(value: &DynSolValue) -> B256 {
    match value {
        DynSolValue::FixedBytes(w, 32) => *w,
        other => panic!("expected bytes32, got {other:?}"),
    }
}

fn words(value: &DynSolValue) -> Vec<B256> {
    match value {
        DynSolValue::Array(items) => items.iter().map(word).collect(),
        other => panic!("expected bytes32[], got {other:?}"),
    }
}

fn bytes(value: &DynSolValue) -> Vec<u8> {
    match value {
        DynSolValue::Bytes(b) => b.clone(),
        other => panic!("expected bytes, got {other:?}"),
    }
}

fn bytes_list(value: &DynSolValue) -> Vec<Vec<u8>> {
    match value {
        DynSolValue::Array(items) => items.iter().map(bytes).collect(),
        other => panic!("expected bytes[], got {other:?}"),
    }
}

fn uint(value: &DynSolValue) -> U256 {
    match value {
        DynSolValue::Uint(n, _) => *n,
        other => panic!("expected uint256, got {other:?}"),
    }
}

fn boolean(value: &DynSolValue) -> bool {
    match value {
        DynSolValue::Bool(b) => *b,
        other => panic!("expected bool, got {other:?}"),
    }
}

// ─── Collaborators ───────────────────────────────────────────────────────────

/// A wallet (or bare reader, when `account` is `None`) on the mock chain.
pub struct MockWallet {
    registry: MockRegistry,
    account: Option<Address>,
    chain_id: Option<u64>,
}

impl MockWallet {
    /// A wallet that reports no chain.
    pub fn without_chain(registry: &MockRegistry, account: Address) -> Arc<Self> {
        Arc::new(Self {
            registry: registry.clone(),
            account: Some(account),
            chain_id: None,
        })
    }
}

#[async_trait]
impl ChainReader for MockWallet {
    fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    async fn read(&self, contract: Address, call: &ContractCall) -> Result<DynSolValue, ChainError> {
        self.registry.read(contract, call)
    }
}

#[async_trait]
impl Wallet for MockWallet {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn write(
        &self,
        contract: Address,
        call: &ContractCall,
        options: WriteOptions,
    ) -> Result<TxHandle, ChainError> {
        assert_eq!(Some(options.account), self.account, "write from foreign account");
        assert_eq!(Some(options.chain_id), self.chain_id, "write on foreign chain");
        self.registry.write(contract, call, options.account)
    }
}

/// Wraps a [`LocalSigner`] and records what it was asked to sign.
pub struct RecordingSigner {
    inner: LocalSigner,
    calls: AtomicUsize,
    last: Mutex<Option<TypedDataRequest>>,
}

impl RecordingSigner {
    pub fn new(inner: LocalSigner) -> Arc<Self> {
        Arc::new(Self {
            inner,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn address(&self) -> Address {
        self.inner.address()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<TypedDataRequest> {
        self.last.lock().clone()
    }
}

#[async_trait]
impl TypedDataSigner for RecordingSigner {
    fn chain_id(&self) -> Option<u64> {
        TypedDataSigner::chain_id(&self.inner)
    }

    fn account(&self) -> Option<Address> {
        TypedDataSigner::account(&self.inner)
    }

    async fn sign_typed_data(&self, request: &TypedDataRequest) -> Result<Bytes, ChainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock() = Some(request.clone());
        self.inner.sign_typed_data(request).await
    }
}

/// A fresh key bound to `chain_id`.
pub fn signer_on(chain_id: u64) -> Arc<RecordingSigner> {
    RecordingSigner::new(LocalSigner::random().with_chain_id(chain_id))
}
