//! bLuna mint: bonds Luna with a validator through the bAsset hub

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

const BONDED_AMOUNT: AmountAttribute = AmountAttribute {
    label: "Bonded Amount",
    key: "bonded",
    fallback_index: 3,
    token: Token::Luna,
};

const MINTED_AMOUNT: AmountAttribute = AmountAttribute {
    label: "Minted Amount",
    key: "minted",
    fallback_index: 4,
    token: Token::BLuna,
};

/// Luna to bond and the validator to bond it with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintBAssetTxParams {
    pub asset_amount: Decimal,
    pub validator: String,
}

/// Mints bLuna by bonding Luna to the hub contract
pub struct MintBAssetTx {
    signer: Arc<dyn TxSigner>,
    refetch: Arc<dyn RefetchQueries>,
    wallet_address: String,
    hub_contract: String,
    fee: TxFeeConfig,
}

impl MintBAssetTx {
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
            hub_contract: config.contracts.b_luna_hub.clone(),
            fee: config.fee.clone(),
        }
    }

    pub fn create_tx_options(&self, params: &MintBAssetTxParams) -> TxResult<CreateTxOptions> {
        if params.asset_amount.is_negative() || params.asset_amount.is_zero() {
            return Err(TxError::InvalidParams(format!(
                "asset amount must be positive, got {}",
                params.asset_amount
            )));
        }
        if params.validator.trim().is_empty() {
            return Err(TxError::InvalidParams("validator is required".to_string()));
        }

        let msg = MsgExecuteContract {
            sender: self.wallet_address.clone(),
            contract: self.hub_contract.clone(),
            execute_msg: json!({ "bond": { "validator": params.validator } }),
            coins: vec![Coin::new("uluna", micro_amount_string(&params.asset_amount))],
        };
        Ok(CreateTxOptions::new(vec![msg], &self.fee))
    }
}

#[async_trait]
impl TxOperation for MintBAssetTx {
    type Params = MintBAssetTxParams;

    fn name(&self) -> &'static str {
        "mint_basset"
    }

    async fn send_tx(
        &self,
        params: &MintBAssetTxParams,
        on_tx_hash: TxHashSender,
    ) -> TxResult<PostResult> {
        let options = self.create_tx_options(params)?;
        debug!(
            hub = %self.hub_contract,
            validator = %params.validator,
            amount = %params.asset_amount,
            "posting bond"
        );

        let posted = self.signer.post(options, on_tx_hash).await?;
        self.refetch.refetch(TxRefetchKey::BondMint);
        Ok(posted)
    }

    fn render_results(&self, tx_info: &TxInfo, helper: &TxHelper) -> TxResultRendering {
        render_mint_basset(tx_info, helper)
    }
}

/// Renders a confirmed `bond` transaction
pub fn render_mint_basset(tx_info: &TxInfo, helper: &TxHelper) -> TxResultRendering {
    render_exchange(tx_info, helper, &BONDED_AMOUNT, &MINTED_AMOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::TxStreamPhase;
    use crate::refetch::BroadcastRefetcher;
    use crate::signer::SignerError;
    use anchor_core::{EventAttribute, RawLog, TxEvent};

    struct HashOnlySigner;

    #[async_trait]
    impl TxSigner for HashOnlySigner {
        async fn post(
            &self,
            _options: CreateTxOptions,
            on_tx_hash: TxHashSender,
        ) -> Result<PostResult, SignerError> {
            on_tx_hash.send("MINT");
            Ok(PostResult {
                tx_hash: "MINT".into(),
                raw_log: String::new(),
            })
        }
    }

    fn mint_tx(refetch: Arc<BroadcastRefetcher>) -> MintBAssetTx {
        MintBAssetTx::new(
            Arc::new(HashOnlySigner),
            refetch,
            &AnchorConfig::default(),
            "terra1user",
        )
    }

    fn params(amount: &str, validator: &str) -> MintBAssetTxParams {
        MintBAssetTxParams {
            asset_amount: amount.parse().unwrap(),
            validator: validator.into(),
        }
    }

    #[test]
    fn test_create_tx_options() {
        let tx = mint_tx(Arc::new(BroadcastRefetcher::default()));
        let options = tx
            .create_tx_options(&params("2.5", "terravaloper1abc"))
            .unwrap();
        let msg = &options.msgs[0];
        assert_eq!(msg.contract, AnchorConfig::default().contracts.b_luna_hub);
        assert_eq!(
            msg.execute_msg,
            json!({ "bond": { "validator": "terravaloper1abc" } })
        );
        assert_eq!(msg.coins, vec![Coin::new("uluna", "2500000")]);

        assert!(tx.create_tx_options(&params("2.5", " ")).is_err());
        assert!(tx.create_tx_options(&params("-1", "terravaloper1abc")).is_err());
    }

    #[tokio::test]
    async fn test_send_tx_publishes_bond_mint() {
        let refetch = Arc::new(BroadcastRefetcher::default());
        let mut keys = refetch.subscribe();
        let tx = mint_tx(refetch);

        let (sender, receiver) = TxHashSender::channel();
        let posted = tx
            .send_tx(&params("1", "terravaloper1abc"), sender)
            .await
            .unwrap();
        assert_eq!(posted.tx_hash, "MINT");
        assert_eq!(receiver.await.unwrap(), "MINT");
        assert_eq!(keys.recv().await.unwrap(), TxRefetchKey::BondMint);
    }

    #[test]
    fn test_render_bonded_and_minted() {
        let info = TxInfo {
            txhash: "MINT".into(),
            logs: vec![RawLog {
                msg_index: 0,
                log: String::new(),
                events: vec![TxEvent {
                    event_type: "from_contract".into(),
                    attributes: vec![
                        EventAttribute::new("contract_address", "terra1hub"),
                        EventAttribute::new("action", "mint"),
                        EventAttribute::new("from", "terra1user"),
                        EventAttribute::new("bonded", "1000000000"),
                        EventAttribute::new("minted", "999000000"),
                    ],
                }],
            }],
            ..TxInfo::default()
        };

        let tx = mint_tx(Arc::new(BroadcastRefetcher::default()));
        let rendering = tx.render_results(&info, &TxHelper::new(3_500_000));
        assert_eq!(rendering.phase, TxStreamPhase::Succeed);
        assert_eq!(rendering.receipt("Bonded Amount"), Some("1,000.000000 Luna"));
        assert_eq!(rendering.receipt("Minted Amount"), Some("999.000000 bLuna"));
        assert_eq!(rendering.receipt("Exchange Rate"), Some("1.001001"));
        assert!(rendering.receipt("Tx Hash").is_none());
    }
}
