use crate::{
    api::{
        common_types::{Account, Device, Discovery, FiatRate, PendingTransaction},
        connect::ConnectEvent,
    },
    config::CoinConfig,
};

use super::router::Location;

/// Single immutable snapshot of everything the UI renders from. All entities
/// are owned by external services; the only mutation path is
/// [`Store::dispatch`].
#[derive(Clone, Default, Debug)]
pub struct AppState {
    /// Device is being acquired by this session.
    pub acquiring: bool,
    pub selected_device: Option<Device>,
    /// Discovery order, preserved by the reducer.
    pub accounts: Vec<Account>,
    pub pending: Vec<PendingTransaction>,
    pub fiat: Vec<FiatRate>,
    pub discovery: Vec<Discovery>,
    pub coins: Vec<CoinConfig>,
    pub location: Option<Location>,
}

#[derive(Clone, Debug)]
pub enum Action {
    AcquireStarted,
    AcquireFinished { device: Device },
    DeviceChanged { device: Device },
    AccountDiscovered { account: Account },
    AccountUpdated { account: Account },
    DiscoveryChanged { discovery: Discovery },
    PendingChanged { pending: Vec<PendingTransaction> },
    FiatRatesUpdated { rates: Vec<FiatRate> },
    Navigate { location: Location },
}

impl From<ConnectEvent> for Action {
    fn from(event: ConnectEvent) -> Self {
        match event {
            ConnectEvent::AcquireStarted => Action::AcquireStarted,
            ConnectEvent::AcquireFinished { device } => Action::AcquireFinished { device },
            ConnectEvent::DeviceChanged { device } => Action::DeviceChanged { device },
            ConnectEvent::AccountDiscovered { account } => Action::AccountDiscovered { account },
            ConnectEvent::AccountUpdated { account } => Action::AccountUpdated { account },
            ConnectEvent::DiscoveryChanged { discovery } => Action::DiscoveryChanged { discovery },
            ConnectEvent::PendingChanged { pending } => Action::PendingChanged { pending },
        }
    }
}

pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        log::debug!("Dispatching action: {:?}", action);

        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }
}

fn same_slot(a: &Account, b: &Account) -> bool {
    a.device_state == b.device_state && a.network == b.network && a.index == b.index
}

/// Pure state-transition function.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::AcquireStarted => {
            state.acquiring = true;
        }
        Action::AcquireFinished { device } => {
            state.acquiring = false;
            state.selected_device = Some(device);
        }
        Action::DeviceChanged { device } => {
            // First device seen seeds the route at its base URL.
            if state.location.is_none() {
                if let Some(coin) = state.coins.first() {
                    state.location = Some(Location::for_device(&device, coin.network));
                }
            }

            state.selected_device = Some(device);
        }
        Action::AccountDiscovered { account } | Action::AccountUpdated { account } => {
            match state.accounts.iter_mut().find(|a| same_slot(a, &account)) {
                Some(existing) => *existing = account,
                None => state.accounts.push(account),
            }
        }
        Action::DiscoveryChanged { discovery } => {
            let existing = state
                .discovery
                .iter_mut()
                .find(|d| d.device_state == discovery.device_state && d.network == discovery.network);

            match existing {
                Some(record) => *record = discovery,
                None => state.discovery.push(discovery),
            }
        }
        Action::PendingChanged { pending } => {
            state.pending = pending;
        }
        Action::FiatRatesUpdated { rates } => {
            for rate in rates {
                match state.fiat.iter_mut().find(|f| f.network == rate.network) {
                    Some(existing) => *existing = rate,
                    None => state.fiat.push(rate),
                }
            }
        }
        Action::Navigate { location } => {
            state.location = Some(location);
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use crate::api::common_types::Network;

    use super::*;

    fn account(index: usize, balance: &str) -> Account {
        Account {
            index,
            network: Network::Ethereum,
            device_state: "state-0".to_string(),
            address: format!("0x{:040}", index),
            balance: balance.to_string(),
            nonce: 0,
        }
    }

    #[test]
    fn test_accounts_keep_discovery_order() {
        let mut store = Store::new(AppState::default());

        store.dispatch(Action::AccountDiscovered {
            account: account(0, ""),
        });
        store.dispatch(Action::AccountDiscovered {
            account: account(1, ""),
        });
        store.dispatch(Action::AccountUpdated {
            account: account(0, "100"),
        });

        let indices: Vec<_> = store.state().accounts.iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(store.state().accounts[0].balance, "100");
    }

    #[test]
    fn test_acquire_flag_transitions() {
        let mut store = Store::new(AppState::default());
        assert!(!store.state().acquiring);

        store.dispatch(Action::AcquireStarted);
        assert!(store.state().acquiring);

        let device = Device {
            id: "abc".to_string(),
            state: Some("state-0".to_string()),
            connected: true,
            available: true,
            used_elsewhere: false,
            instance: None,
            instance_label: "My Wallet".to_string(),
        };
        store.dispatch(Action::AcquireFinished {
            device: device.clone(),
        });

        assert!(!store.state().acquiring);
        assert_eq!(store.state().selected_device, Some(device));
    }

    #[test]
    fn test_first_device_seeds_location() {
        let state = AppState {
            coins: vec![CoinConfig {
                network: Network::Ethereum,
                symbol: "ETH".to_string(),
                name: "Ethereum".to_string(),
            }],
            ..Default::default()
        };
        let mut store = Store::new(state);

        let device = Device {
            id: "abc".to_string(),
            state: Some("state-0".to_string()),
            connected: true,
            available: true,
            used_elsewhere: false,
            instance: Some(1),
            instance_label: "My Wallet".to_string(),
        };
        store.dispatch(Action::DeviceChanged { device });

        let location = store.state().location.as_ref().unwrap();
        assert_eq!(location.pathname, "/device/abc:1/network/ethereum/account/0");
    }

    #[test]
    fn test_discovery_records_are_upserted() {
        let mut store = Store::new(AppState::default());

        let discovery = |completed| Discovery {
            device_state: "state-0".to_string(),
            network: Network::Ethereum,
            completed,
        };

        store.dispatch(Action::DiscoveryChanged {
            discovery: discovery(false),
        });
        store.dispatch(Action::DiscoveryChanged {
            discovery: discovery(true),
        });

        assert_eq!(store.state().discovery.len(), 1);
        assert!(store.state().discovery[0].completed);
    }
}
