//! Refetch notifications
//!
//! A confirmed transaction invalidates cached account data (balances,
//! deposits, loans). Operations publish a [`TxRefetchKey`]; data layers
//! subscribe and reload the queries that key names.

use std::fmt;
use tokio::sync::broadcast;
use tracing::debug;

/// Topic published after a transaction of the given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxRefetchKey {
    EarnDeposit,
    EarnWithdraw,
    BorrowBorrow,
    BorrowRepay,
    BorrowProvideCollateral,
    BorrowRedeemCollateral,
    BondMint,
    BondBurn,
    BondClaim,
    RewardsClaim,
}

impl TxRefetchKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxRefetchKey::EarnDeposit => "EARN_DEPOSIT",
            TxRefetchKey::EarnWithdraw => "EARN_WITHDRAW",
            TxRefetchKey::BorrowBorrow => "BORROW_BORROW",
            TxRefetchKey::BorrowRepay => "BORROW_REPAY",
            TxRefetchKey::BorrowProvideCollateral => "BORROW_PROVIDE_COLLATERAL",
            TxRefetchKey::BorrowRedeemCollateral => "BORROW_REDEEM_COLLATERAL",
            TxRefetchKey::BondMint => "BOND_MINT",
            TxRefetchKey::BondBurn => "BOND_BURN",
            TxRefetchKey::BondClaim => "BOND_CLAIM",
            TxRefetchKey::RewardsClaim => "REWARDS_CLAIM",
        }
    }

    /// Queries to reload after this kind of transaction
    pub fn queries(&self) -> &'static [&'static str] {
        match self {
            TxRefetchKey::EarnDeposit | TxRefetchKey::EarnWithdraw => {
                &["bank", "earn_epoch_states", "earn_total_deposit", "earn_transaction_history"]
            }
            TxRefetchKey::BorrowBorrow | TxRefetchKey::BorrowRepay => {
                &["bank", "borrow_market", "borrow_borrower", "borrow_apy"]
            }
            TxRefetchKey::BorrowProvideCollateral | TxRefetchKey::BorrowRedeemCollateral => {
                &["bank", "borrow_market", "borrow_borrower"]
            }
            TxRefetchKey::BondMint | TxRefetchKey::BondBurn => {
                &["bank", "bond_exchange_rate", "bond_withdrawable_amount"]
            }
            TxRefetchKey::BondClaim => {
                &["bank", "bond_claimable_rewards", "bond_withdrawable_amount"]
            }
            TxRefetchKey::RewardsClaim => &["bank", "rewards_anc_ust_lp", "rewards_ust_borrow"],
        }
    }
}

impl fmt::Display for TxRefetchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sink for refetch notifications. Fire-and-forget.
pub trait RefetchQueries: Send + Sync {
    fn refetch(&self, key: TxRefetchKey);
}

/// [`RefetchQueries`] over a tokio broadcast channel
#[derive(Debug, Clone)]
pub struct BroadcastRefetcher {
    sender: broadcast::Sender<TxRefetchKey>,
}

impl BroadcastRefetcher {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TxRefetchKey> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastRefetcher {
    fn default() -> Self {
        Self::new(16)
    }
}

impl RefetchQueries for BroadcastRefetcher {
    fn refetch(&self, key: TxRefetchKey) {
        // no subscribers is fine
        match self.sender.send(key) {
            Ok(receivers) => debug!(%key, receivers, "refetch published"),
            Err(_) => debug!(%key, "refetch published without subscribers"),
        }
    }
}
