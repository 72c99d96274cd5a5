//! JSON-RPC client with primary → fallback failover and a circuit breaker.

use near_crypto::PublicKey;
use near_jsonrpc_client::errors::JsonRpcError;
use near_jsonrpc_client::{methods, JsonRpcClient};
use near_jsonrpc_primitives::types::query::QueryResponseKind;
use near_primitives::hash::CryptoHash;
use near_primitives::transaction::SignedTransaction;
use near_primitives::types::{AccountId, BlockReference, Finality, FunctionArgs};
use near_primitives::views::{AccessKeyView, FinalExecutionOutcomeView, QueryRequest};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Cached block hash TTL.
const BLOCK_HASH_TTL_SECS: u64 = 30;

const CIRCUIT_BREAKER_THRESHOLD: u64 = 3;
const CIRCUIT_BREAKER_WINDOW_MS: u64 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Primary,
    Fallback,
}

struct CircuitState {
    failures: u64,
    last_failure_ms: u64,
    open: bool,
}

pub struct RpcClient {
    primary: JsonRpcClient,
    fallback: JsonRpcClient,
    primary_url: String,
    fallback_url: String,
    circuit: Mutex<CircuitState>,
    cached_block_hash: RwLock<Option<(CryptoHash, Instant)>>,
    block_hash_stale: AtomicBool,
}

impl RpcClient {
    pub fn new(primary_url: &str, fallback_url: &str) -> Self {
        debug!(primary = primary_url, fallback = fallback_url, "RPC client initialized");
        Self {
            primary: JsonRpcClient::connect(primary_url),
            fallback: JsonRpcClient::connect(fallback_url),
            primary_url: primary_url.to_string(),
            fallback_url: fallback_url.to_string(),
            circuit: Mutex::new(CircuitState {
                failures: 0,
                last_failure_ms: 0,
                open: false,
            }),
            cached_block_hash: RwLock::new(None),
            block_hash_stale: AtomicBool::new(false),
        }
    }

    /// Sends `make()` to the active endpoint, retrying once on the other one.
    /// Only outcomes from the primary move the circuit breaker.
    async fn call<M>(&self, label: &str, make: impl Fn() -> M) -> Result<M::Response, crate::Error>
    where
        M: methods::RpcMethod,
        JsonRpcError<M::Error>: std::fmt::Display,
    {
        let order = if self.is_circuit_open() {
            [Endpoint::Fallback, Endpoint::Primary]
        } else {
            [Endpoint::Primary, Endpoint::Fallback]
        };
        let first_err = match self.endpoint(order[0]).call(make()).await {
            Ok(resp) => {
                self.record(order[0], true);
                return Ok(resp);
            }
            Err(e) => {
                self.record(order[0], false);
                warn!(error = %e, method = label, endpoint = ?order[0], "RPC call failed, trying other endpoint");
                e.to_string()
            }
        };
        match self.endpoint(order[1]).call(make()).await {
            Ok(resp) => {
                self.record(order[1], true);
                Ok(resp)
            }
            Err(e) => {
                self.record(order[1], false);
                Err(crate::Error::Rpc(format!(
                    "{label} failed: first={first_err}, second={e}"
                )))
            }
        }
    }

    fn endpoint(&self, endpoint: Endpoint) -> &JsonRpcClient {
        match endpoint {
            Endpoint::Primary => &self.primary,
            Endpoint::Fallback => &self.fallback,
        }
    }

    fn record(&self, endpoint: Endpoint, ok: bool) {
        match (endpoint, ok) {
            (Endpoint::Primary, true) => self.record_success(),
            (Endpoint::Primary, false) => self.record_failure(),
            (Endpoint::Fallback, _) => {}
        }
    }

    // --- TX construction & submission ---

    /// Recent final block hash, cached for 30s.
    pub async fn latest_block_hash(&self) -> Result<CryptoHash, crate::Error> {
        if !self.block_hash_stale.load(Ordering::Relaxed) {
            let cache = self.cached_block_hash.read().await;
            if let Some((hash, when)) = *cache {
                if when.elapsed().as_secs() < BLOCK_HASH_TTL_SECS {
                    return Ok(hash);
                }
            }
        }
        let block = self
            .call("block", || methods::block::RpcBlockRequest {
                block_reference: BlockReference::Finality(Finality::Final),
            })
            .await?;
        let hash = block.header.hash;
        *self.cached_block_hash.write().await = Some((hash, Instant::now()));
        self.block_hash_stale.store(false, Ordering::Relaxed);
        Ok(hash)
    }

    pub async fn query_access_key(
        &self,
        account_id: &AccountId,
        public_key: &PublicKey,
    ) -> Result<AccessKeyView, crate::Error> {
        let resp = self
            .call("view_access_key", || methods::query::RpcQueryRequest {
                block_reference: BlockReference::Finality(Finality::Final),
                request: QueryRequest::ViewAccessKey {
                    account_id: account_id.clone(),
                    public_key: public_key.clone(),
                },
            })
            .await?;
        match resp.kind {
            QueryResponseKind::AccessKey(ak) => Ok(ak),
            other => Err(crate::Error::Rpc(format!(
                "unexpected query response: {other:?}"
            ))),
        }
    }

    /// Runs a view method and returns its raw JSON result bytes.
    pub async fn view_function(
        &self,
        contract_id: &AccountId,
        method_name: &str,
        args: &serde_json::Value,
    ) -> Result<Vec<u8>, crate::Error> {
        let args = serde_json::to_vec(args)
            .map_err(|e| crate::Error::InvalidArgument(format!("view args: {e}")))?;
        let resp = self
            .call("call_function", || methods::query::RpcQueryRequest {
                block_reference: BlockReference::Finality(Finality::Final),
                request: QueryRequest::CallFunction {
                    account_id: contract_id.clone(),
                    method_name: method_name.to_string(),
                    args: FunctionArgs::from(args.clone()),
                },
            })
            .await?;
        match resp.kind {
            QueryResponseKind::CallResult(result) => Ok(result.result),
            other => Err(crate::Error::Rpc(format!(
                "unexpected query response: {other:?}"
            ))),
        }
    }

    /// Sends a signed transaction and waits for its final outcome.
    pub async fn send_signed_tx(
        &self,
        signed_tx: SignedTransaction,
    ) -> Result<FinalExecutionOutcomeView, crate::Error> {
        self.call("broadcast_tx_commit", || {
            methods::broadcast_tx_commit::RpcBroadcastTxCommitRequest {
                signed_transaction: signed_tx.clone(),
            }
        })
        .await
    }

    /// Fire-and-forget: returns the hash as soon as the node accepts the transaction.
    pub async fn send_tx_async(
        &self,
        signed_tx: SignedTransaction,
    ) -> Result<CryptoHash, crate::Error> {
        self.call("broadcast_tx_async", || {
            methods::broadcast_tx_async::RpcBroadcastTxAsyncRequest {
                signed_transaction: signed_tx.clone(),
            }
        })
        .await
    }

    // --- Failover / circuit breaker ---

    fn record_success(&self) {
        let mut circuit = self.circuit.lock().unwrap_or_else(|e| e.into_inner());
        if circuit.failures > 0 {
            info!(primary = %self.primary_url, "Primary RPC recovered");
            circuit.failures = 0;
            circuit.open = false;
        }
    }

    fn record_failure(&self) {
        let mut circuit = self.circuit.lock().unwrap_or_else(|e| e.into_inner());
        circuit.failures += 1;
        circuit.last_failure_ms = now_ms();
        if circuit.failures >= CIRCUIT_BREAKER_THRESHOLD && !circuit.open {
            circuit.open = true;
            // Fallback may be on a different chain head.
            self.block_hash_stale.store(true, Ordering::Relaxed);
            warn!(
                failures = circuit.failures,
                fallback = %self.fallback_url,
                "Circuit breaker opened, routing to fallback"
            );
        }
    }

    pub fn is_circuit_open(&self) -> bool {
        let mut circuit = self.circuit.lock().unwrap_or_else(|e| e.into_inner());
        if !circuit.open {
            return false;
        }
        if now_ms().saturating_sub(circuit.last_failure_ms) > CIRCUIT_BREAKER_WINDOW_MS {
            circuit.open = false;
            circuit.failures = 0;
            info!(primary = %self.primary_url, "Circuit breaker half-open, retrying primary");
            return false;
        }
        true
    }

    /// Currently active RPC URL.
    pub fn active_url(&self) -> &str {
        if self.is_circuit_open() {
            &self.fallback_url
        } else {
            &self.primary_url
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
