//! EIP-712 schema table for signed registry operations.
//!
//! Each signed operation variant maps to exactly one typed-data struct. Field
//! order and wire types mirror the registry's typehash strings; any deviation
//! yields a digest the contract recovers to a different signer and the call
//! reverts. Variants that accept optional metadata have two entries, selected
//! only by whether a metadata argument was supplied.

use std::str::FromStr;

use crate::error::SdkError;
use crate::registry::constants::function;
use crate::shared::Role;

// ─── OperationKind ───────────────────────────────────────────────────────────

/// Signable registry operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    SetHint,
    SetHints,
    SetHintDelegated,
    SetHintsDelegated,
    AddListDelegate,
    RemoveListDelegate,
    SetListStatus,
    SetListOwner,
    SetMetadata,
    SetMetadataDelegated,
}

impl OperationKind {
    pub const ALL: [OperationKind; 10] = [
        OperationKind::SetHint,
        OperationKind::SetHints,
        OperationKind::SetHintDelegated,
        OperationKind::SetHintsDelegated,
        OperationKind::AddListDelegate,
        OperationKind::RemoveListDelegate,
        OperationKind::SetListStatus,
        OperationKind::SetListOwner,
        OperationKind::SetMetadata,
        OperationKind::SetMetadataDelegated,
    ];

    /// Contract function name for the direct or signed variant.
    pub fn function_name(&self, signed: bool) -> &'static str {
        use function::*;
        match (self, signed) {
            (OperationKind::SetHint, false) => SET_HINT,
            (OperationKind::SetHint, true) => SET_HINT_SIGNED,
            (OperationKind::SetHints, false) => SET_HINTS,
            (OperationKind::SetHints, true) => SET_HINTS_SIGNED,
            (OperationKind::SetHintDelegated, false) => SET_HINT_DELEGATED,
            (OperationKind::SetHintDelegated, true) => SET_HINT_DELEGATED_SIGNED,
            (OperationKind::SetHintsDelegated, false) => SET_HINTS_DELEGATED,
            (OperationKind::SetHintsDelegated, true) => SET_HINTS_DELEGATED_SIGNED,
            (OperationKind::AddListDelegate, false) => ADD_LIST_DELEGATE,
            (OperationKind::AddListDelegate, true) => ADD_LIST_DELEGATE_SIGNED,
            (OperationKind::RemoveListDelegate, false) => REMOVE_LIST_DELEGATE,
            (OperationKind::RemoveListDelegate, true) => REMOVE_LIST_DELEGATE_SIGNED,
            (OperationKind::SetListStatus, false) => SET_LIST_STATUS,
            (OperationKind::SetListStatus, true) => SET_LIST_STATUS_SIGNED,
            (OperationKind::SetListOwner, false) => SET_LIST_OWNER,
            (OperationKind::SetListOwner, true) => SET_LIST_OWNER_SIGNED,
            (OperationKind::SetMetadata, false) => SET_METADATA,
            (OperationKind::SetMetadata, true) => SET_METADATA_SIGNED,
            (OperationKind::SetMetadataDelegated, false) => SET_METADATA_DELEGATED,
            (OperationKind::SetMetadataDelegated, true) => SET_METADATA_DELEGATED_SIGNED,
        }
    }

    /// Role the acting principal must hold on `(namespace, list)`.
    pub fn required_role(&self) -> Role {
        match self {
            OperationKind::SetHintDelegated
            | OperationKind::SetHintsDelegated
            | OperationKind::SetMetadataDelegated => Role::Delegate,
            _ => Role::Owner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.function_name(false)
    }

    /// Capitalized name, e.g. `SetHintsDelegated`.
    pub fn type_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = SdkError;

    /// Accepts the contract function name (`setHint`) or the type name (`SetHint`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .iter()
            .copied()
            .find(|kind| s == kind.as_str() || s == kind.type_name())
            .ok_or_else(|| SdkError::InvalidOperationKind(s.to_string()))
    }
}

// ─── Schema ──────────────────────────────────────────────────────────────────

/// A typed-data field: name and Solidity wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: &'static str,
}

const fn field(name: &'static str, kind: &'static str) -> Field {
    Field { name, kind }
}

/// An EIP-712 struct definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub primary_type: &'static str,
    pub fields: &'static [Field],
}

impl Schema {
    /// `Name(type1 name1,type2 name2,...)` as hashed into the typehash.
    pub fn encode_type(&self) -> String {
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("{} {}", f.kind, f.name))
            .collect();
        format!("{}({})", self.primary_type, fields.join(","))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }
}

// ─── Field lists ─────────────────────────────────────────────────────────────

const NAMESPACE: Field = field("namespace", "address");
const LIST: Field = field("list", "bytes32");
const KEY: Field = field("key", "bytes32");
const VALUE: Field = field("value", "bytes32");
const KEYS: Field = field("keys", "bytes32[]");
const VALUES: Field = field("values", "bytes32[]");
const METADATA: Field = field("metadata", "bytes");
const METADATA_BATCH: Field = field("metadata", "bytes[]");
const SIGNER: Field = field("signer", "address");
const NONCE: Field = field("nonce", "uint256");

const HINT_FIELDS: &[Field] = &[NAMESPACE, LIST, KEY, VALUE, SIGNER, NONCE];
const HINT_METADATA_FIELDS: &[Field] = &[NAMESPACE, LIST, KEY, VALUE, METADATA, SIGNER, NONCE];
const HINTS_FIELDS: &[Field] = &[NAMESPACE, LIST, KEYS, VALUES, SIGNER, NONCE];
const HINTS_METADATA_FIELDS: &[Field] = &[
    NAMESPACE,
    LIST,
    KEYS,
    VALUES,
    METADATA_BATCH,
    SIGNER,
    NONCE,
];

// ─── Table ───────────────────────────────────────────────────────────────────

struct Entry {
    kind: OperationKind,
    has_metadata: bool,
    schema: Schema,
}

const fn entry(
    kind: OperationKind,
    has_metadata: bool,
    primary_type: &'static str,
    fields: &'static [Field],
) -> Entry {
    Entry {
        kind,
        has_metadata,
        schema: Schema {
            primary_type,
            fields,
        },
    }
}

static SCHEMAS: &[Entry] = &[
    entry(OperationKind::SetHint, false, "SetHintSigned", HINT_FIELDS),
    entry(OperationKind::SetHint, true, "SetHintSignedMetadata", HINT_METADATA_FIELDS),
    entry(OperationKind::SetHints, false, "SetHintsSigned", HINTS_FIELDS),
    entry(OperationKind::SetHints, true, "SetHintsSignedMetadata", HINTS_METADATA_FIELDS),
    entry(OperationKind::SetHintDelegated, false, "SetHintDelegatedSigned", HINT_FIELDS),
    entry(
        OperationKind::SetHintDelegated,
        true,
        "SetHintDelegatedSignedMetadata",
        HINT_METADATA_FIELDS,
    ),
    entry(OperationKind::SetHintsDelegated, false, "SetHintsDelegatedSigned", HINTS_FIELDS),
    entry(
        OperationKind::SetHintsDelegated,
        true,
        "SetHintsDelegatedSignedMetadata",
        HINTS_METADATA_FIELDS,
    ),
    entry(
        OperationKind::AddListDelegate,
        false,
        "AddListDelegateSigned",
        &[
            NAMESPACE,
            LIST,
            field("delegate", "address"),
            field("untilTimestamp", "uint256"),
            SIGNER,
            NONCE,
        ],
    ),
    entry(
        OperationKind::RemoveListDelegate,
        false,
        "RemoveListDelegateSigned",
        &[NAMESPACE, LIST, field("delegate", "address"), SIGNER, NONCE],
    ),
    entry(
        OperationKind::SetListStatus,
        false,
        "SetListStatusSigned",
        &[NAMESPACE, LIST, field("revoked", "bool"), SIGNER, NONCE],
    ),
    entry(
        OperationKind::SetListOwner,
        false,
        "SetListOwnerSigned",
        &[NAMESPACE, LIST, field("newOwner", "address"), SIGNER, NONCE],
    ),
    entry(OperationKind::SetMetadata, true, "SetMetadataSigned", HINT_METADATA_FIELDS),
    entry(
        OperationKind::SetMetadataDelegated,
        true,
        "SetMetadataDelegatedSigned",
        HINT_METADATA_FIELDS,
    ),
];

/// Select the typed-data schema for a signed operation.
///
/// Fails with `InvalidOperationKind` for combinations the registry does not
/// define (e.g. list ownership with metadata, metadata updates without it).
pub fn schema_for(kind: OperationKind, has_metadata: bool) -> Result<&'static Schema, SdkError> {
    SCHEMAS
        .iter()
        .find(|e| e.kind == kind && e.has_metadata == has_metadata)
        .map(|e| &e.schema)
        .ok_or_else(|| {
            SdkError::InvalidOperationKind(format!(
                "{} {} metadata",
                kind,
                if has_metadata { "with" } else { "without" }
            ))
        })
}

/// Every schema in the table.
pub fn all_schemas() -> impl Iterator<Item = &'static Schema> {
    SCHEMAS.iter().map(|e| &e.schema)
}
