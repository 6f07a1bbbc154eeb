//! Relay service: authenticates webhook requests and submits the
//! matching bridge call
//!
//! Checks run in order: presence, freshness, tag, contract, replay. A tag
//! is consumed before the transaction is broadcast, so a failed broadcast
//! needs a freshly signed request to be retried.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::RequestError;
use crate::executor::BridgeExecutor;
use crate::metrics::Metrics;
use crate::replay_cache::ReplayCache;
use crate::request::RelayRequest;

pub struct RelayService {
    secret: String,
    freshness_secs: u64,
    bridge_address: String,
    replay: Mutex<ReplayCache>,
    executor: Arc<dyn BridgeExecutor>,
    metrics: Arc<Metrics>,
}

impl RelayService {
    pub fn new(
        secret: String,
        freshness_secs: u64,
        bridge_address: String,
        replay: ReplayCache,
        executor: Arc<dyn BridgeExecutor>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            secret,
            freshness_secs,
            bridge_address,
            replay: Mutex::new(replay),
            executor,
            metrics,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn signer(&self) -> String {
        self.executor.signer()
    }

    pub async fn replay_cache_len(&self) -> usize {
        self.replay.lock().await.len()
    }

    /// Handles one request received at unix time `now`; returns the tx hash
    pub async fn relay(&self, request: RelayRequest, now: u64) -> Result<String, RequestError> {
        let result = self.try_relay(request, now).await;
        match &result {
            Ok(_) => self.metrics.record_outcome("relayed"),
            Err(err) => {
                warn!(error = %err, "Relay request rejected");
                self.metrics.record_outcome(err.outcome());
            }
        }
        result
    }

    async fn try_relay(&self, request: RelayRequest, now: u64) -> Result<String, RequestError> {
        let request = request.require_fields()?;
        request.check_freshness(now, self.freshness_secs)?;
        let tag = request.verify_tag(&self.secret)?;

        if request.data.contract_address != self.bridge_address {
            return Err(RequestError::UnknownContract(
                request.data.contract_address.clone(),
            ));
        }
        let msg = request.data.to_execute_msg()?;

        {
            let mut replay = self.replay.lock().await;
            if !replay.consume(tag) {
                return Err(RequestError::Replay);
            }
            self.metrics.replay_cache_size.set(replay.len() as i64);
        }

        let kind = if request.data.is_mint() {
            "mint_token"
        } else {
            "unwrap_token"
        };
        let tx = self
            .executor
            .execute(&self.bridge_address, &msg)
            .await
            .map_err(|e| RequestError::Dispatch(format!("{:#}", e)))?;

        self.metrics.dispatched_total.with_label_values(&[kind]).inc();
        info!(
            tx_hash = %tx,
            kind,
            transfer_id = %request.data.transfer_id,
            to = %request.data.to,
            amount = %request.data.amount,
            "Transfer relayed"
        );
        Ok(tx)
    }
}
