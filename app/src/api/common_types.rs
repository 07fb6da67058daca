use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Network {
    Ethereum,
    EthereumClassic,
    Ropsten,
}

/// A connected hardware wallet instance. Owned by the connection-management
/// service; this application only ever reads it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    /// Protocol state handle. Accounts and discovery records are keyed on it.
    pub state: Option<String>,
    pub connected: bool,
    pub available: bool,
    /// Set while another session holds the device.
    pub used_elsewhere: bool,
    pub instance: Option<u32>,
    pub instance_label: String,
}

/// A derived address/balance record under a (device state, network) pair.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Account {
    pub index: usize,
    pub network: Network,
    pub device_state: String,
    pub address: String,
    /// Raw balance as a decimal string, empty until loaded.
    pub balance: String,
    pub nonce: u64,
}

impl Account {
    pub fn is_loaded(&self) -> bool {
        !self.balance.is_empty()
    }
}

/// A submitted but unconfirmed transaction affecting spendable balance.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct PendingTransaction {
    pub network: Network,
    pub address: String,
    /// Asset symbol the amount is denominated in.
    pub currency: String,
    pub amount: String,
    pub rejected: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct FiatRate {
    pub network: Network,
    pub value: Decimal,
}

/// Progress of account scanning for a (device state, network) pair.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Discovery {
    pub device_state: String,
    pub network: Network,
    pub completed: bool,
}
