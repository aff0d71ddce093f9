//! Network constants and registry deployment resolution.
//!
//! A client only consults a [`DeploymentResolver`] when no explicit registry
//! address was configured.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Default JSON-RPC endpoint (local development node).
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Chain id of the local development node.
pub const DEVELOPMENT_CHAIN_ID: u64 = 31337;

/// Which registry deployment to resolve on a given chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryEnv {
    #[default]
    Production,
    Development,
}

impl RegistryEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryEnv::Production => "production",
            RegistryEnv::Development => "development",
        }
    }
}

impl std::fmt::Display for RegistryEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolves the registry address for `(chain_id, env)`.
pub trait DeploymentResolver: Send + Sync {
    fn resolve(&self, chain_id: u64, env: RegistryEnv) -> Option<Address>;
}

impl<F> DeploymentResolver for F
where
    F: Fn(u64, RegistryEnv) -> Option<Address> + Send + Sync,
{
    fn resolve(&self, chain_id: u64, env: RegistryEnv) -> Option<Address> {
        self(chain_id, env)
    }
}

/// One entry of the deployment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub chain_id: u64,
    pub env: RegistryEnv,
    pub registry: Address,
}

/// Static deployment table.
#[derive(Debug, Clone, Default)]
pub struct KnownDeployments {
    deployments: Vec<Deployment>,
}

const EMBEDDED_JSON: &str = include_str!("deployments.json");

lazy_static::lazy_static! {
    static ref EMBEDDED: Vec<Deployment> = match serde_json::from_str(EMBEDDED_JSON) {
        Ok(deployments) => deployments,
        Err(e) => {
            tracing::error!(error = %e, "Embedded deployment table is malformed");
            Vec::new()
        }
    };
}

impl KnownDeployments {
    /// The deployments shipped with the SDK.
    pub fn embedded() -> Self {
        Self {
            deployments: EMBEDDED.clone(),
        }
    }

    /// Parse a deployment table in the embedded JSON format.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self {
            deployments: serde_json::from_str(json)?,
        })
    }

    /// Add (or replace) an entry.
    pub fn with(mut self, chain_id: u64, env: RegistryEnv, registry: Address) -> Self {
        self.deployments
            .retain(|d| !(d.chain_id == chain_id && d.env == env));
        self.deployments.push(Deployment {
            chain_id,
            env,
            registry,
        });
        self
    }

    pub fn deployments(&self) -> &[Deployment] {
        &self.deployments
    }
}

impl DeploymentResolver for KnownDeployments {
    fn resolve(&self, chain_id: u64, env: RegistryEnv) -> Option<Address> {
        self.deployments
            .iter()
            .find(|d| d.chain_id == chain_id && d.env == env)
            .map(|d| d.registry)
    }
}
