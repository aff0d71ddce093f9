//! EIP-712 payload construction for registry meta-transactions.
//!
//! A [`TypedDataRequest`] is built fresh for every signed call from the live
//! registry version, the relaying wallet's chain id and the signer's current
//! nonce. It can be rendered as an `eth_signTypedData_v4` payload for remote
//! signers, or hashed locally.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::Eip712Domain;
use serde_json::{json, Map, Value};

use crate::error::SdkError;
use crate::registry::constants::DOMAIN_NAME;
use crate::registry::schema::Schema;

// ─── Domain ──────────────────────────────────────────────────────────────────

/// The registry's EIP-712 domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryDomain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl RegistryDomain {
    pub fn new(version: impl Into<String>, chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: DOMAIN_NAME.to_string(),
            version: version.into(),
            chain_id,
            verifying_contract,
        }
    }

    pub fn to_eip712(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(self.name.clone().into()),
            Some(self.version.clone().into()),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }

    pub fn separator(&self) -> B256 {
        self.to_eip712().separator()
    }

    fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "version": self.version,
            "chainId": self.chain_id,
            "verifyingContract": self.verifying_contract.to_checksum(None),
        })
    }
}

const DOMAIN_FIELDS: [(&str, &str); 4] = [
    ("name", "string"),
    ("version", "string"),
    ("chainId", "uint256"),
    ("verifyingContract", "address"),
];

// ─── Request ─────────────────────────────────────────────────────────────────

/// A typed-data payload ready to be signed.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDataRequest {
    pub domain: RegistryDomain,
    pub schema: &'static Schema,
    values: Vec<DynSolValue>,
}

impl TypedDataRequest {
    /// Lay out `fields` in schema order.
    ///
    /// Every schema field must be supplied exactly once with a value of the
    /// field's wire type; unknown names are rejected.
    pub fn new(
        domain: RegistryDomain,
        schema: &'static Schema,
        fields: Vec<(&str, DynSolValue)>,
    ) -> Result<Self, SdkError> {
        if let Some((name, _)) = fields.iter().find(|(name, _)| !schema.has_field(name)) {
            return Err(SdkError::Validation(format!(
                "{} has no field {}",
                schema.primary_type, name
            )));
        }

        let mut values = Vec::with_capacity(schema.fields.len());
        for field in schema.fields {
            let mut matching = fields.iter().filter(|(name, _)| *name == field.name);
            let value = match (matching.next(), matching.next()) {
                (Some((_, value)), None) => value,
                (None, _) => {
                    return Err(SdkError::Validation(format!(
                        "{} is missing field {}",
                        schema.primary_type, field.name
                    )))
                }
                (Some(_), Some(_)) => {
                    return Err(SdkError::Validation(format!(
                        "{} field {} supplied twice",
                        schema.primary_type, field.name
                    )))
                }
            };

            let ty = DynSolType::parse(field.kind)
                .map_err(|e| SdkError::Validation(format!("{}: {}", field.kind, e)))?;
            if !ty.matches(value) {
                return Err(SdkError::Validation(format!(
                    "{} field {} is not {}",
                    schema.primary_type, field.name, field.kind
                )));
            }
            values.push(value.clone());
        }

        Ok(Self {
            domain,
            schema,
            values,
        })
    }

    pub fn primary_type(&self) -> &'static str {
        self.schema.primary_type
    }

    /// The value of a message field.
    pub fn value(&self, name: &str) -> Option<&DynSolValue> {
        self.schema
            .fields
            .iter()
            .position(|f| f.name == name)
            .and_then(|i| self.values.get(i))
    }

    /// The message as JSON, values encoded the way wallets expect them.
    pub fn message(&self) -> Map<String, Value> {
        self.schema
            .fields
            .iter()
            .zip(&self.values)
            .map(|(field, value)| (field.name.to_string(), value_to_json(value)))
            .collect()
    }

    /// Full `eth_signTypedData_v4` payload.
    pub fn to_json(&self) -> Value {
        let mut types = Map::new();
        types.insert(
            "EIP712Domain".to_string(),
            field_list(DOMAIN_FIELDS.iter().copied()),
        );
        types.insert(
            self.schema.primary_type.to_string(),
            field_list(self.schema.fields.iter().map(|f| (f.name, f.kind))),
        );

        json!({
            "types": types,
            "primaryType": self.schema.primary_type,
            "domain": self.domain.to_json(),
            "message": self.message(),
        })
    }

    /// `keccak256(typeHash || encodeData(field)...)`.
    pub fn struct_hash(&self) -> Result<B256, SdkError> {
        let mut buf = Vec::with_capacity(32 * (self.values.len() + 1));
        buf.extend_from_slice(keccak256(self.schema.encode_type().as_bytes()).as_slice());
        for value in &self.values {
            buf.extend_from_slice(encode_data(value)?.as_slice());
        }
        Ok(keccak256(buf))
    }

    /// `keccak256("\x19\x01" || domainSeparator || structHash)`, the digest the registry recovers from.
    pub fn signing_hash(&self) -> Result<B256, SdkError> {
        let mut buf = Vec::with_capacity(2 + 32 + 32);
        buf.extend_from_slice(b"\x19\x01");
        buf.extend_from_slice(self.domain.separator().as_slice());
        buf.extend_from_slice(self.struct_hash()?.as_slice());
        Ok(keccak256(buf))
    }
}

// ─── Encoding ────────────────────────────────────────────────────────────────

fn field_list<'a>(fields: impl Iterator<Item = (&'a str, &'a str)>) -> Value {
    Value::Array(
        fields
            .map(|(name, kind)| json!({ "name": name, "type": kind }))
            .collect(),
    )
}

/// EIP-712 `encodeData` for one member.
fn encode_data(value: &DynSolValue) -> Result<B256, SdkError> {
    match value {
        DynSolValue::Bytes(bytes) => Ok(keccak256(bytes)),
        DynSolValue::String(s) => Ok(keccak256(s.as_bytes())),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            let mut buf = Vec::with_capacity(32 * items.len());
            for item in items {
                buf.extend_from_slice(encode_data(item)?.as_slice());
            }
            Ok(keccak256(buf))
        }
        other => other.as_word().ok_or_else(|| {
            SdkError::Validation(format!(
                "Unsupported typed-data member {:?}",
                other.as_type()
            ))
        }),
    }
}

fn value_to_json(value: &DynSolValue) -> Value {
    match value {
        DynSolValue::Address(a) => Value::String(a.to_checksum(None)),
        DynSolValue::Bool(b) => Value::Bool(*b),
        DynSolValue::Uint(n, _) => Value::String(n.to_string()),
        DynSolValue::Int(n, _) => Value::String(n.to_string()),
        DynSolValue::FixedBytes(word, size) => {
            Value::String(format!("0x{}", hex::encode(&word[..*size])))
        }
        DynSolValue::Bytes(bytes) => Value::String(format!("0x{}", hex::encode(bytes))),
        DynSolValue::String(s) => Value::String(s.clone()),
        DynSolValue::Array(items) | DynSolValue::FixedArray(items) => {
            Value::Array(items.iter().map(value_to_json).collect())
        }
        other => Value::String(format!("0x{}", hex::encode(other.abi_encode()))),
    }
}
