use alloy_primitives::{Address, BlockHash, TxHash};
use serde::{Deserialize, Serialize};

/// Outcome of a mined state-changing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// Hash of the submitted transaction.
    pub transaction_hash: TxHash,
    /// Hash of the block the transaction was mined in.
    pub block_hash: Option<BlockHash>,
    /// Number of the block the transaction was mined in.
    pub block_number: Option<u64>,
    /// Gas consumed by the transaction.
    pub gas_used: u64,
    /// Price paid per unit of gas, in wei.
    pub effective_gas_price: u128,
    /// Address that signed the transaction.
    pub from: Address,
    /// Called contract, if any.
    pub to: Option<Address>,
    /// True when the transaction executed successfully.
    pub status: bool,
}

impl TransactionReceipt {
    pub fn is_success(&self) -> bool {
        self.status
    }
}
