//! Vocabularies used to classify history events.
//!
//! All enums here are closed: parsing or deserializing a value outside of the
//! declared set fails with [`rotki_utils::UnknownEnumVariant`].

use serde::{Deserialize, Serialize};

rotki_utils::define_string_enum!(
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub enum HistoryEventType {
        Trade => "trade",
        Staking => "staking",
        Deposit => "deposit",
        Withdrawal => "withdrawal",
        Transfer => "transfer",
        Spend => "spend",
        Receive => "receive",
        Adjustment => "adjustment",
        Unknown => "unknown",
        Informational => "informational",
        Migrate => "migrate",
        Renew => "renew",
    }
);

rotki_utils::define_string_enum!(
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub enum HistoryEventSubType {
        Reward => "reward",
        DepositAsset => "deposit asset",
        RemoveAsset => "remove asset",
        Fee => "fee",
        Spend => "spend",
        Receive => "receive",
        Approve => "approve",
        Deploy => "deploy",
        Airdrop => "airdrop",
        Bridge => "bridge",
        GovernancePropose => "governance propose",
        GenerateDebt => "generate debt",
        PaybackDebt => "payback debt",
        ReceiveWrapped => "receive wrapped",
        ReturnWrapped => "return wrapped",
        Donate => "donate",
        Nft => "nft",
        PlaceOrder => "place order",
    }
);

rotki_utils::define_string_enum!(
    /// Presentation category of a transaction event
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub enum TransactionEventType {
        Gas => "gas",
        Send => "send",
        Receive => "receive",
        Approval => "approval",
        Deposit => "deposit",
        Withdraw => "withdraw",
        Airdrop => "airdrop",
        Borrow => "borrow",
        Repay => "repay",
        Deploy => "deploy",
        Bridge => "bridge",
        GovernancePropose => "governance_propose",
        Donate => "donate",
        Nft => "nft",
    }
);

rotki_utils::define_string_enum!(
    /// Counterparty a transaction event was decoded for
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub enum TransactionEventProtocol {
        Compound => "compound",
        Gas => "gas",
        Gitcoin => "gitcoin",
        Makerdao => "makerdao",
        Uniswap => "uniswap",
        Aave => "aave",
        Xdai => "xdai",
        Zksync => "zksync",
        OneInch => "1inch",
        Votium => "votium",
    }
);

/// Classification attached to a decoded transaction event
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionEventTags {
    #[serde(default)]
    pub event_type: Option<HistoryEventType>,
    #[serde(default)]
    pub event_subtype: Option<HistoryEventSubType>,
    #[serde(default)]
    pub counterparty: Option<TransactionEventProtocol>,
}
