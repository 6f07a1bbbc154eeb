//! Submission of bridge calls to the chain

use async_trait::async_trait;
use bridge::msg::ExecuteMsg;

/// Signs and broadcasts a bridge execute message, returning the tx hash
#[async_trait]
pub trait BridgeExecutor: Send + Sync {
    async fn execute(&self, contract: &str, msg: &ExecuteMsg) -> eyre::Result<String>;

    /// Account the executor signs with
    fn signer(&self) -> String;
}
