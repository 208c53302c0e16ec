//! UST deposit into the money market

use super::{render_exchange, AmountAttribute};
use crate::error::{TxError, TxResult};
use crate::helper::TxHelper;
use crate::phase::TxResultRendering;
use crate::refetch::{RefetchQueries, TxRefetchKey};
use crate::signer::{Coin, CreateTxOptions, MsgExecuteContract, PostResult, TxHashSender, TxSigner};
use crate::stream::TxOperation;
use anchor_config::{AnchorConfig, TxFeeConfig};
use anchor_core::notation::micro_amount_string;
use anchor_core::{Decimal, Token, TxInfo};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

const DEPOSIT_AMOUNT: AmountAttribute = AmountAttribute {
    label: "Deposit Amount",
    key: "deposit_amount",
    fallback_index: 4,
    token: Token::Ust,
};

const RECEIVED_AMOUNT: AmountAttribute = AmountAttribute {
    label: "Received Amount",
    key: "mint_amount",
    fallback_index: 3,
    token: Token::AUst,
};

/// Amount of UST to deposit, in display units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositUstTxParams {
    pub deposit_amount: Decimal,
}

/// Deposits UST into the market contract in exchange for aUST
pub struct DepositUstTx {
    signer: Arc<dyn TxSigner>,
    refetch: Arc<dyn RefetchQueries>,
    wallet_address: String,
    market_contract: String,
    fee: TxFeeConfig,
}

impl DepositUstTx {
    pub fn new(
        signer: Arc<dyn TxSigner>,
        refetch: Arc<dyn RefetchQueries>,
        config: &AnchorConfig,
        wallet_address: impl Into<String>,
    ) -> Self {
        Self {
            signer,
            refetch,
            wallet_address: wallet_address.into(),
            market_contract: config.contracts.mm_market.clone(),
            fee: config.fee.clone(),
        }
    }

    /// Transaction options for depositing `params.deposit_amount`
    pub fn create_tx_options(&self, params: &DepositUstTxParams) -> TxResult<CreateTxOptions> {
        if params.deposit_amount.is_negative() || params.deposit_amount.is_zero() {
            return Err(TxError::InvalidParams(format!(
                "deposit amount must be positive, got {}",
                params.deposit_amount
            )));
        }

        let msg = MsgExecuteContract {
            sender: self.wallet_address.clone(),
            contract: self.market_contract.clone(),
            execute_msg: json!({ "deposit_stable": {} }),
            coins: vec![Coin::new("uusd", micro_amount_string(&params.deposit_amount))],
        };
        Ok(CreateTxOptions::new(vec![msg], &self.fee))
    }
}

#[async_trait]
impl TxOperation for DepositUstTx {
    type Params = DepositUstTxParams;

    fn name(&self) -> &'static str {
        "deposit_ust"
    }

    async fn send_tx(
        &self,
        params: &DepositUstTxParams,
        on_tx_hash: TxHashSender,
    ) -> TxResult<PostResult> {
        let options = self.create_tx_options(params)?;
        debug!(
            market = %self.market_contract,
            amount = %params.deposit_amount,
            "posting deposit_stable"
        );

        let posted = self.signer.post(options, on_tx_hash).await?;
        self.refetch.refetch(TxRefetchKey::EarnDeposit);
        Ok(posted)
    }

    fn render_results(&self, tx_info: &TxInfo, helper: &TxHelper) -> TxResultRendering {
        render_deposit_ust(tx_info, helper)
    }
}

/// Renders a confirmed `deposit_stable` transaction
pub fn render_deposit_ust(tx_info: &TxInfo, helper: &TxHelper) -> TxResultRendering {
    render_exchange(tx_info, helper, &DEPOSIT_AMOUNT, &RECEIVED_AMOUNT)
}
