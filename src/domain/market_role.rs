//! MarketRole - Energy Market Roles

use serde::{Deserialize, Serialize};

/// Role an actor plays in the energy market
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MarketRole {
    GridAccessProvider,
    BalanceResponsibleParty,
    EnergySupplier,
    MeteredDataResponsible,
    MeteredDataAdministrator,
    SystemOperator,
    DanishEnergyAgency,
    DataHubAdministrator,
    IndependentAggregator,
    SerialEnergyTrader,
    /// Any role this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl MarketRole {
    /// Wire name, as used in JSON bodies and query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketRole::GridAccessProvider => "GridAccessProvider",
            MarketRole::BalanceResponsibleParty => "BalanceResponsibleParty",
            MarketRole::EnergySupplier => "EnergySupplier",
            MarketRole::MeteredDataResponsible => "MeteredDataResponsible",
            MarketRole::MeteredDataAdministrator => "MeteredDataAdministrator",
            MarketRole::SystemOperator => "SystemOperator",
            MarketRole::DanishEnergyAgency => "DanishEnergyAgency",
            MarketRole::DataHubAdministrator => "DataHubAdministrator",
            MarketRole::IndependentAggregator => "IndependentAggregator",
            MarketRole::SerialEnergyTrader => "SerialEnergyTrader",
            MarketRole::Unknown => "Unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketRole::GridAccessProvider => "Grid access provider",
            MarketRole::BalanceResponsibleParty => "Balance responsible party",
            MarketRole::EnergySupplier => "Energy supplier",
            MarketRole::MeteredDataResponsible => "Metered data responsible",
            MarketRole::MeteredDataAdministrator => "Metered data administrator",
            MarketRole::SystemOperator => "System operator",
            MarketRole::DanishEnergyAgency => "Danish Energy Agency",
            MarketRole::DataHubAdministrator => "DataHub administrator",
            MarketRole::IndependentAggregator => "Independent aggregator",
            MarketRole::SerialEnergyTrader => "Serial energy trader",
            MarketRole::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for MarketRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
