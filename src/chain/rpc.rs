//! JSON-RPC chain client over HTTP.
//!
//! [`RpcClient`] implements [`ChainReader`] with `eth_call`. [`RpcWallet`] adds
//! a node-managed account: transactions go out through `eth_sendTransaction`
//! and meta-transactions are signed with `eth_signTypedData_v4`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::chain::retry::{RetryConfig, RetryPolicy};
use crate::chain::{ChainReader, ContractCall, TxHandle, TypedDataSigner, Wallet, WriteOptions};
use crate::error::{ChainError, HttpError};
use crate::network::DEFAULT_RPC_URL;
use crate::registry::typed_data::TypedDataRequest;

/// JSON-RPC error code for execution reverts (EIP-1474).
const EXECUTION_REVERTED: i64 = 3;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Connection settings for an RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    pub url: String,
    pub timeout: Duration,
    /// Policy for reads. Writes and signing requests are never retried.
    pub retry: RetryPolicy,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::Idempotent,
        }
    }
}

impl RpcConfig {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: &'a Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl RpcResponse {
    fn into_result(self) -> Result<Value, ChainError> {
        if let Some(err) = self.error {
            return Err(err.into_chain_error());
        }
        self.result
            .ok_or_else(|| ChainError::Decode("response has neither result nor error".to_string()))
    }
}

impl RpcErrorObject {
    fn into_chain_error(self) -> ChainError {
        if self.code == EXECUTION_REVERTED || self.message.to_lowercase().contains("revert") {
            return match self.data {
                Some(Value::String(data)) => ChainError::Revert(format!("{} ({})", self.message, data)),
                _ => ChainError::Revert(self.message),
            };
        }
        ChainError::Rpc {
            code: self.code,
            message: self.message,
        }
    }
}

fn parse_quantity(hex: &str) -> Result<u64, ChainError> {
    let digits = hex.strip_prefix("0x").unwrap_or(hex);
    u64::from_str_radix(digits, 16)
        .map_err(|e| ChainError::Decode(format!("invalid quantity {}: {}", hex, e)))
}

/// `Retry-After` in delta-seconds, as milliseconds. HTTP dates are ignored.
fn parse_retry_after(value: &str) -> Option<u64> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}

fn transport_error(err: reqwest::Error) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(err)
    }
}

fn is_transient(config: &RetryConfig, err: &HttpError) -> bool {
    match err {
        HttpError::ServerError { status, .. } => config.retries_status(*status),
        HttpError::RateLimited { .. } => config.retries_status(429),
        HttpError::Timeout => true,
        HttpError::Reqwest(e) => e.is_connect(),
        _ => false,
    }
}

// ─── RpcClient ───────────────────────────────────────────────────────────────

/// Read-only JSON-RPC client bound to one chain.
#[derive(Debug, Clone)]
pub struct RpcClient {
    url: String,
    client: Client,
    chain_id: u64,
    retry: RetryPolicy,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    /// Connect and fetch the endpoint's chain id.
    pub async fn connect(config: RpcConfig) -> Result<Self, ChainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(HttpError::from)?;

        let mut rpc = Self {
            url: config.url,
            client,
            chain_id: 0,
            retry: config.retry,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        let chain_id: String = rpc
            .request("eth_chainId", json!([]), rpc.retry.clone())
            .await?;
        rpc.chain_id = parse_quantity(&chain_id)?;

        tracing::debug!(url = %rpc.url, chain_id = rpc.chain_id, "Connected to RPC endpoint");
        Ok(rpc)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one JSON-RPC request and decode its result.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        retry: RetryPolicy,
    ) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params: &params,
        };
        let result = self.request_with_retry(&body, retry).await?.into_result()?;
        serde_json::from_value(result)
            .map_err(|e| ChainError::Decode(format!("{} result: {}", method, e)))
    }

    async fn request_with_retry(
        &self,
        body: &RpcRequest<'_>,
        retry: RetryPolicy,
    ) -> Result<RpcResponse, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_request(body).await;
        };

        let mut attempt = 0;
        loop {
            let outcome = self.do_request(body).await;
            let reason = match &outcome {
                Ok(resp) => match &resp.error {
                    Some(err) if config.retries_rpc_code(err.code) => {
                        Some(format!("rpc error {}: {}", err.code, err.message))
                    }
                    _ => None,
                },
                Err(e) if is_transient(&config, e) => Some(e.to_string()),
                Err(_) => None,
            };

            let Some(reason) = reason else {
                return outcome;
            };
            if attempt >= config.max_retries {
                return Err(HttpError::MaxRetriesExceeded {
                    attempts: attempt + 1,
                    last_error: reason,
                });
            }

            let retry_after = match &outcome {
                Err(HttpError::RateLimited {
                    retry_after_ms: Some(ms),
                }) => Some(Duration::from_millis(*ms)),
                _ => None,
            };
            let delay = config.wait(attempt, retry_after);
            tracing::debug!(
                method = body.method,
                url = %self.url,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                %reason,
                "Retrying RPC request"
            );
            futures_timer::Delay::new(delay).await;
            attempt += 1;
        }
    }

    async fn do_request(&self, body: &RpcRequest<'_>) -> Result<RpcResponse, HttpError> {
        let resp = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        let status = resp.status();

        if status.is_success() {
            return resp.json::<RpcResponse>().await.map_err(transport_error);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_retry_after);
        let body_text = resp.text().await.unwrap_or_default();

        // Some nodes answer JSON-RPC errors with a 4xx status.
        if let Ok(parsed) = serde_json::from_str::<RpcResponse>(&body_text) {
            if parsed.error.is_some() {
                return Ok(parsed);
            }
        }

        match status_code {
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

#[async_trait]
impl ChainReader for RpcClient {
    fn chain_id(&self) -> Option<u64> {
        Some(self.chain_id)
    }

    async fn read(&self, contract: Address, call: &ContractCall) -> Result<DynSolValue, ChainError> {
        let params = json!([{ "to": contract, "data": call.calldata() }, "latest"]);
        let data: Bytes = self.request("eth_call", params, self.retry.clone()).await?;
        call.decode_output(&data)
    }
}

// ─── RpcWallet ───────────────────────────────────────────────────────────────

/// An [`RpcClient`] acting for an account unlocked on the node.
#[derive(Debug, Clone)]
pub struct RpcWallet {
    rpc: RpcClient,
    account: Address,
}

impl RpcWallet {
    pub async fn connect(config: RpcConfig, account: Address) -> Result<Self, ChainError> {
        Ok(Self::new(RpcClient::connect(config).await?, account))
    }

    pub fn new(rpc: RpcClient, account: Address) -> Self {
        Self { rpc, account }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }
}

#[async_trait]
impl ChainReader for RpcWallet {
    fn chain_id(&self) -> Option<u64> {
        self.rpc.chain_id()
    }

    async fn read(&self, contract: Address, call: &ContractCall) -> Result<DynSolValue, ChainError> {
        self.rpc.read(contract, call).await
    }
}

#[async_trait]
impl Wallet for RpcWallet {
    fn account(&self) -> Option<Address> {
        Some(self.account)
    }

    async fn write(
        &self,
        contract: Address,
        call: &ContractCall,
        options: WriteOptions,
    ) -> Result<TxHandle, ChainError> {
        let params = json!([{
            "from": options.account,
            "to": contract,
            "data": call.calldata(),
            "chainId": format!("{:#x}", options.chain_id),
        }]);
        let hash: B256 = self
            .rpc
            .request("eth_sendTransaction", params, RetryPolicy::None)
            .await?;
        Ok(TxHandle { hash })
    }
}

#[async_trait]
impl TypedDataSigner for RpcWallet {
    fn chain_id(&self) -> Option<u64> {
        self.rpc.chain_id()
    }

    fn account(&self) -> Option<Address> {
        Some(self.account)
    }

    async fn sign_typed_data(&self, request: &TypedDataRequest) -> Result<Bytes, ChainError> {
        let params = json!([self.account, request.to_json().to_string()]);
        self.rpc
            .request("eth_signTypedData_v4", params, RetryPolicy::None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope() {
        let params = json!([{ "to": Address::ZERO }, "latest"]);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "eth_call",
            params: &params,
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded["jsonrpc"], "2.0");
        assert_eq!(encoded["id"], 7);
        assert_eq!(encoded["method"], "eth_call");
        assert_eq!(
            encoded["params"][0]["to"],
            "0x0000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_retry_after_header() {
        assert_eq!(parse_retry_after("3"), Some(3000));
        assert_eq!(parse_retry_after(" 0 "), Some(0));
        assert_eq!(parse_retry_after("18446744073709552"), Some(u64::MAX));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn test_transient_failures() {
        let config = RetryConfig::for_reads();
        let bad_gateway = HttpError::ServerError {
            status: 502,
            body: String::new(),
        };
        let internal = HttpError::ServerError {
            status: 500,
            body: String::new(),
        };
        assert!(is_transient(&config, &bad_gateway));
        assert!(!is_transient(&config, &internal));
        assert!(is_transient(&config, &HttpError::RateLimited { retry_after_ms: None }));
        assert!(is_transient(&config, &HttpError::Timeout));
        assert!(!is_transient(&config, &HttpError::BadRequest("nope".into())));
        assert!(!is_transient(&RetryConfig::default(), &HttpError::RateLimited { retry_after_ms: None }));
    }

    #[test]
    fn test_result_is_extracted() {
        let resp: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":"0x7a69"}"#).unwrap();
        let value = resp.into_result().unwrap();
        assert_eq!(parse_quantity(value.as_str().unwrap()).unwrap(), 31337);
    }

    #[test]
    fn test_revert_code_maps_to_revert() {
        let resp: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted","data":"0x08c379a0"}}"#,
        )
        .unwrap();
        match resp.into_result() {
            Err(ChainError::Revert(msg)) => assert!(msg.contains("0x08c379a0")),
            other => panic!("expected revert, got {:?}", other),
        }
    }

    #[test]
    fn test_revert_message_maps_to_revert() {
        let resp: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"VM Exception: revert"}}"#,
        )
        .unwrap();
        assert!(matches!(resp.into_result(), Err(ChainError::Revert(_))));
    }

    #[test]
    fn test_other_errors_keep_code() {
        let resp: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"method not found"}}"#,
        )
        .unwrap();
        assert!(matches!(
            resp.into_result(),
            Err(ChainError::Rpc { code: -32601, .. })
        ));
    }

    #[test]
    fn test_parse_quantity_rejects_garbage() {
        assert_eq!(parse_quantity("0x1").unwrap(), 1);
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = RpcConfig::new("http://localhost:8545/")
            .timeout(Duration::from_secs(5))
            .retry(RetryPolicy::None);
        assert_eq!(config.url, "http://localhost:8545");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(matches!(config.retry, RetryPolicy::None));
        assert!(matches!(RpcConfig::default().retry, RetryPolicy::Idempotent));
    }

    #[tokio::test]
    async fn test_stalled_endpoint_times_out() {
        // Accepted by the kernel backlog, never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let client = RpcClient {
            url,
            client: Client::builder()
                .timeout(Duration::from_millis(100))
                .build()
                .unwrap(),
            chain_id: 1,
            retry: RetryPolicy::None,
            next_id: Arc::new(AtomicU64::new(1)),
        };
        let params = json!([]);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_chainId",
            params: &params,
        };

        let err = client.do_request(&body).await.unwrap_err();
        assert!(matches!(err, HttpError::Timeout), "{err:?}");
        drop(listener);
    }
}
