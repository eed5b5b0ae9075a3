use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use rotki_utils::*;

rotki_utils::define_string_enum!(
    /// Named category of fetchable data, tracked independently for loading status
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
    pub enum Section {
        AssetMovement => "asset_movement",
        Trades => "trades",
        Tx => "tx",
        LedgerActions => "ledger_actions",
        NonFungibleBalances => "non_fungible_balances",
        DefiCompoundBalances => "defi_compound_balances",
        DefiCompoundHistory => "defi_compound_history",
        DefiYearnVaultsBalances => "defi_yearn_vaults_balances",
        DefiYearnVaultsHistory => "defi_yearn_vaults_history",
        DefiYearnVaultsV2Balances => "defi_yearn_vaults_v2_balances",
        DefiYearnVaultsV2History => "defi_yearn_vaults_v2_history",
        DefiAaveBalances => "defi_aave_balances",
        DefiAaveHistory => "defi_aave_history",
        DefiBalances => "defi_balances",
        DefiDsrBalances => "defi_dsr_balances",
        DefiDsrHistory => "defi_dsr_history",
        DefiMakerdaoVaults => "defi_makerdao_vaults",
        DefiMakerdaoVaultDetails => "defi_makerdao_vault_details",
        DefiOverview => "defi_overview",
        DefiAirdrops => "defi_airdrops",
        DefiBalancerBalances => "defi_balancer_balances",
        DefiBalancerEvents => "defi_balancer_events",
        DefiUniswapV2Balances => "defi_uniswap_v2_balances",
        DefiUniswapV3Balances => "defi_uniswap_v3_balances",
        DefiUniswapEvents => "defi_uniswap_events",
        DefiSushiswapBalances => "defi_sushiswap_balances",
        DefiSushiswapEvents => "defi_sushiswap_events",
        DefiLiquityBalances => "defi_liquity_balances",
        DefiLiquityEvents => "defi_liquity_events",
        DefiPickleBalances => "defi_pickle_balances",
        StakingEth2 => "staking_eth2",
        StakingEth2Deposits => "staking_eth2_deposits",
        StakingAdex => "staking_adex",
        StakingKraken => "staking_kraken",
        BlockchainEth => "blockchain_balances_eth",
        BlockchainBtc => "blockchain_balances_btc",
        BlockchainKsm => "blockchain_balances_ksm",
        BlockchainDot => "blockchain_balances_dot",
        BlockchainAvax => "blockchain_balances_avax",
        Exchanges => "exchanges",
        ManualBalances => "manual_balances",
        L2LoopringBalances => "l2_loopring_balances",
        Prices => "prices",
    }
);

impl Section {
    /// Sections cleared by [`crate::core::main_store::MainStore::reset_defi_status`]
    pub const DEFI: &'static [Section] = &[
        Section::DefiCompoundBalances,
        Section::DefiCompoundHistory,
        Section::DefiYearnVaultsBalances,
        Section::DefiYearnVaultsHistory,
        Section::DefiYearnVaultsV2Balances,
        Section::DefiYearnVaultsV2History,
        Section::DefiAaveBalances,
        Section::DefiAaveHistory,
        Section::DefiBalances,
        Section::DefiDsrBalances,
        Section::DefiDsrHistory,
        Section::DefiMakerdaoVaults,
        Section::DefiMakerdaoVaultDetails,
        Section::DefiOverview,
        Section::DefiAirdrops,
        Section::DefiBalancerBalances,
        Section::DefiBalancerEvents,
        Section::DefiUniswapV2Balances,
        Section::DefiUniswapV3Balances,
        Section::DefiUniswapEvents,
        Section::DefiSushiswapBalances,
        Section::DefiSushiswapEvents,
        Section::DefiLiquityBalances,
        Section::DefiLiquityEvents,
        Section::DefiPickleBalances,
    ];

    /// Sections whose loading state drives the balance details spinner
    pub const DETAILS: &'static [Section] = &[
        Section::BlockchainEth,
        Section::BlockchainBtc,
        Section::BlockchainKsm,
        Section::BlockchainAvax,
        Section::Exchanges,
        Section::ManualBalances,
    ];

    pub fn is_defi(&self) -> bool {
        Self::DEFI.contains(self)
    }
}

rotki_utils::define_string_enum!(
    /// Lifecycle of a section's data fetch
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
    pub enum Status {
        #[default]
        None => "none",
        Loading => "loading",
        Refreshing => "refreshing",
        Loaded => "loaded",
        PartiallyLoaded => "partially_loaded",
    }
);

impl Status {
    /// Whether a fetch for the section is still in flight
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::Loading | Self::Refreshing | Self::PartiallyLoaded
        )
    }
}

/// Sparse mapping of sections to their status; missing sections are [`Status::None`]
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusMap(BTreeMap<Section, Status>);

impl StatusMap {
    pub fn get(&self, section: Section) -> Status {
        self.0.get(&section).copied().unwrap_or_default()
    }

    /// Returns `true` if the stored value changed
    pub fn set(&mut self, section: Section, status: Status) -> bool {
        self.0.insert(section, status) != Some(status)
    }

    pub fn any_loading(&self, sections: &[Section]) -> bool {
        sections.iter().any(|section| self.get(*section).is_loading())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Section, Status)> + '_ {
        self.0.iter().map(|(section, status)| (*section, *status))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Section, Status)> for StatusMap {
    fn from_iter<T: IntoIterator<Item = (Section, Status)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ephemeral UI notification
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub title: String,
    pub description: String,
    pub success: bool,
}

impl Message {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub version: String,
    pub latest_version: String,
    pub download_url: String,
}

impl Version {
    /// Development builds never ask for an update
    pub fn update_needed(&self) -> bool {
        !self.version.contains("dev") && !self.download_url.is_empty()
    }

    /// Application version with the development build suffix cut after `dev`
    pub fn app_version(&self) -> &str {
        match self.version.find("dev") {
            Some(index) if index > 0 => &self.version[..index + 3],
            _ => &self.version,
        }
    }
}

rotki_utils::define_string_enum!(
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
    pub enum LogLevel {
        Critical => "critical",
        Error => "error",
        Warning => "warning",
        Info => "info",
        Debug => "debug",
        Trace => "trace",
    }
);

impl Default for LogLevel {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Critical
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            // `log` has no level above error
            LogLevel::Critical | LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Backend reachability and runtime metadata
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionState {
    pub connected: bool,
    pub connection_failure: bool,
    pub new_user: bool,
    pub data_directory: String,
    pub log_level: LogLevel,
    pub version: Version,
}

/// Full snapshot of the main store
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MainStoreState {
    pub connection: ConnectionState,
    pub message: Message,
    pub status: StatusMap,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConnectionPhase {
    /// No connection attempt was made yet
    Idle,
    /// Periodically pinging the backend
    Polling,
    Connected,
    /// All attempts are exhausted
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Delay between connection attempts. Default: `2000`
    #[serde(with = "serde_duration_ms")]
    pub poll_interval: Duration,
    /// Amount of attempts before the connection is considered failed. Default: `20`
    pub max_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_attempts: 20,
        }
    }
}
