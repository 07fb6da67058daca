use std::str::FromStr;

use bigdecimal::{BigDecimal, RoundingMode, Zero};
use rust_decimal::Decimal;

use crate::{
    api::common_types::{Account, Device, Network, PendingTransaction},
    config::CoinConfig,
};

use super::store::AppState;

pub const ADD_ACCOUNT_TOOLTIP: &str =
    "To add a new account, last account must have some transactions.";

pub const LOADING_BALANCE: &str = "Loading...";

/// View model of the device-acquisition notice, a projection of the
/// `acquiring` flag.
pub struct AcquireNotice {
    pub title: &'static str,
    pub message: &'static str,
    pub loading: bool,
    pub cancelable: bool,
    pub actions: Vec<NoticeAction>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoticeAction {
    AcquireDevice,
}

impl NoticeAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::AcquireDevice => "Acquire device",
        }
    }
}

pub fn acquire_notice(state: &AppState) -> AcquireNotice {
    if state.acquiring {
        AcquireNotice {
            title: "Device is being acquired",
            message: "Please wait",
            loading: true,
            cancelable: false,
            actions: vec![],
        }
    } else {
        AcquireNotice {
            title: "Device is used in other window",
            message: "Do you want to use your device in this window?",
            loading: false,
            cancelable: false,
            actions: vec![NoticeAction::AcquireDevice],
        }
    }
}

/// View model of the account selection list.
pub struct AccountSelectionViewModel {
    pub coin_name: String,
    pub network: Network,
    pub back_url: String,
    pub rows: Vec<AccountRowViewModel>,
    pub indicator: Option<DiscoveryIndicator>,
}

pub struct AccountRowViewModel {
    pub index: usize,
    /// `None` until the account balance is loaded.
    pub balance: Option<String>,
    pub url: String,
    pub is_selected: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DiscoveryIndicator {
    AddAccount { enabled: bool },
    ReconnectDevice { instance_label: String },
    Loading,
}

/// Projects the store snapshot into the account selection view model.
///
/// Yields `None` when no device is selected, no route is set or the active
/// coin cannot be resolved from the coin configuration; the screen then
/// renders nothing at all.
pub fn account_selection(state: &AppState) -> Option<AccountSelectionViewModel> {
    let device = state.selected_device.as_ref()?;
    let location = state.location.as_ref()?;
    let network = location.state.network;

    let coin = state.coins.iter().find(|c| c.network == network)?;

    let fiat_rate = state
        .fiat
        .iter()
        .find(|f| f.network == network)
        .map(|f| f.value);

    let device_accounts = find_device_accounts(state, device, network);
    let current_index = location.account_index();

    let mut rows: Vec<_> = device_accounts
        .iter()
        .map(|account| AccountRowViewModel {
            index: account.index,
            balance: balance_label(account, &state.pending, coin, fiat_rate),
            url: location.account_url(account.index),
            is_selected: current_index == Some(account.index),
        })
        .collect();

    // Discovery hasn't reported anything yet: show a single placeholder row,
    // but only while the device is actually connected.
    if rows.is_empty() && device.connected {
        rows.push(AccountRowViewModel {
            index: 0,
            balance: None,
            url: location.account_url(0),
            is_selected: current_index == Some(0),
        });
    }

    let indicator = discovery_indicator(state, device, network, &device_accounts);

    Some(AccountSelectionViewModel {
        coin_name: coin.name.clone(),
        network,
        back_url: location.device_base_url(),
        rows,
        indicator,
    })
}

/// Accounts belonging to the device and network, in discovery order.
pub fn find_device_accounts<'a>(
    state: &'a AppState,
    device: &Device,
    network: Network,
) -> Vec<&'a Account> {
    state
        .accounts
        .iter()
        .filter(|account| {
            account.network == network
                && Some(account.device_state.as_str()) == device.state.as_deref()
        })
        .collect()
}

fn balance_label(
    account: &Account,
    pending: &[PendingTransaction],
    coin: &CoinConfig,
    fiat_rate: Option<Decimal>,
) -> Option<String> {
    if !account.is_loaded() {
        return None;
    }

    let spendable = spendable_balance(account, pending, &coin.symbol);

    let label = match fiat_rate {
        Some(rate) => {
            let fiat = fiat_amount(&spendable, rate);
            format!("{} {} / ${}", spendable, coin.symbol, fiat)
        }
        None => format!("{} {}", spendable, coin.symbol),
    };

    Some(label)
}

/// Raw balance minus the aggregated pending amount for the account's asset.
pub fn spendable_balance(
    account: &Account,
    pending: &[PendingTransaction],
    symbol: &str,
) -> BigDecimal {
    parse_amount(&account.balance) - pending_amount(pending, account, symbol)
}

/// Sum of non-rejected pending amounts affecting the account, denominated in
/// the given asset.
pub fn pending_amount(
    pending: &[PendingTransaction],
    account: &Account,
    symbol: &str,
) -> BigDecimal {
    pending
        .iter()
        .filter(|tx| {
            !tx.rejected
                && tx.network == account.network
                && tx.address == account.address
                && tx.currency == symbol
        })
        .fold(BigDecimal::zero(), |sum, tx| sum + parse_amount(&tx.amount))
}

fn fiat_amount(spendable: &BigDecimal, rate: Decimal) -> BigDecimal {
    // Exchange rates come as `rust_decimal` values; both representations are
    // exact decimals, so converting through the string form is lossless.
    let rate = BigDecimal::from_str(&rate.to_string())
        .expect("Decimal always formats as a valid decimal string");

    (spendable * rate).with_scale_round(2, RoundingMode::HalfUp)
}

fn parse_amount(amount: &str) -> BigDecimal {
    BigDecimal::from_str(amount).unwrap_or_else(|_| BigDecimal::zero())
}

fn discovery_indicator(
    state: &AppState,
    device: &Device,
    network: Network,
    device_accounts: &[&Account],
) -> Option<DiscoveryIndicator> {
    let discovery = state.discovery.iter().find(|d| {
        Some(d.device_state.as_str()) == device.state.as_deref() && d.network == network
    })?;

    let indicator = if discovery.completed {
        let enabled = device_accounts
            .last()
            .map(|last| account_has_activity(last))
            .unwrap_or(false);

        DiscoveryIndicator::AddAccount { enabled }
    } else if !device.connected || !device.available {
        DiscoveryIndicator::ReconnectDevice {
            instance_label: device.instance_label.clone(),
        }
    } else {
        DiscoveryIndicator::Loading
    };

    Some(indicator)
}

/// New accounts may only be added after the last one has seen transactions.
fn account_has_activity(account: &Account) -> bool {
    account.nonce > 0 || parse_amount(&account.balance) > BigDecimal::zero()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        api::common_types::{Discovery, FiatRate},
        state::router::{Location, LocationState},
    };

    use super::*;

    fn device() -> Device {
        Device {
            id: "abc".to_string(),
            state: Some("state-0".to_string()),
            connected: true,
            available: true,
            used_elsewhere: false,
            instance: None,
            instance_label: "My Wallet".to_string(),
        }
    }

    fn account(index: usize, balance: &str, nonce: u64) -> Account {
        Account {
            index,
            network: Network::Ethereum,
            device_state: "state-0".to_string(),
            address: format!("0x{:040}", index),
            balance: balance.to_string(),
            nonce,
        }
    }

    fn location() -> Location {
        Location {
            pathname: "/device/abc/network/ethereum/account/0".to_string(),
            state: LocationState {
                network: Network::Ethereum,
                device: "abc".to_string(),
                device_instance: None,
            },
        }
    }

    fn state_with(accounts: Vec<Account>) -> AppState {
        AppState {
            selected_device: Some(device()),
            accounts,
            coins: vec![CoinConfig {
                network: Network::Ethereum,
                symbol: "ETH".to_string(),
                name: "Ethereum".to_string(),
            }],
            location: Some(location()),
            ..Default::default()
        }
    }

    #[test]
    fn test_acquiring_notice_is_loading_without_actions() {
        let state = AppState {
            acquiring: true,
            ..Default::default()
        };

        let notice = acquire_notice(&state);

        assert!(notice.loading);
        assert!(!notice.cancelable);
        assert!(notice.actions.is_empty());
    }

    #[test]
    fn test_idle_notice_offers_exactly_one_acquire_action() {
        let notice = acquire_notice(&AppState::default());

        assert!(!notice.loading);
        assert!(!notice.cancelable);
        assert_eq!(notice.actions, vec![NoticeAction::AcquireDevice]);
        assert_eq!(notice.actions[0].label(), "Acquire device");
    }

    #[test]
    fn test_balance_with_pending_and_fiat_rate() {
        let mut state = state_with(vec![account(0, "100", 3)]);
        state.pending = vec![PendingTransaction {
            network: Network::Ethereum,
            address: state.accounts[0].address.clone(),
            currency: "ETH".to_string(),
            amount: "30".to_string(),
            rejected: false,
        }];
        state.fiat = vec![FiatRate {
            network: Network::Ethereum,
            value: dec!(2.5),
        }];

        let model = account_selection(&state).unwrap();

        assert_eq!(model.rows.len(), 1);
        assert_eq!(model.rows[0].balance.as_deref(), Some("70 ETH / $175.00"));
    }

    #[test]
    fn test_fiat_amount_rounds_half_up_to_two_places() {
        let mut state = state_with(vec![account(0, "0.1", 1)]);
        state.fiat = vec![FiatRate {
            network: Network::Ethereum,
            value: dec!(2.5),
        }];

        let model = account_selection(&state).unwrap();
        assert_eq!(model.rows[0].balance.as_deref(), Some("0.1 ETH / $0.25"));

        let mut state = state_with(vec![account(0, "1", 1)]);
        state.fiat = vec![FiatRate {
            network: Network::Ethereum,
            value: dec!(2.555),
        }];

        let model = account_selection(&state).unwrap();
        assert_eq!(model.rows[0].balance.as_deref(), Some("1 ETH / $2.56"));
    }

    #[test]
    fn test_balance_without_fiat_rate_shows_crypto_only() {
        let state = state_with(vec![account(0, "100", 3)]);

        let model = account_selection(&state).unwrap();

        assert_eq!(model.rows[0].balance.as_deref(), Some("100 ETH"));
    }

    #[test]
    fn test_rejected_and_foreign_pending_amounts_are_ignored() {
        let account = account(0, "100", 3);
        let tx = |currency: &str, amount: &str, rejected| PendingTransaction {
            network: Network::Ethereum,
            address: account.address.clone(),
            currency: currency.to_string(),
            amount: amount.to_string(),
            rejected,
        };

        let pending = vec![tx("ETH", "30", false), tx("ETH", "5", true), tx("GNT", "7", false)];

        assert_eq!(
            spendable_balance(&account, &pending, "ETH"),
            BigDecimal::from_str("70").unwrap()
        );
    }

    #[test]
    fn test_unloaded_balance_is_placeholder() {
        let state = state_with(vec![account(0, "", 0)]);

        let model = account_selection(&state).unwrap();

        assert_eq!(model.rows[0].balance, None);
    }

    #[test]
    fn test_no_accounts_yields_single_placeholder_row_when_connected() {
        let state = state_with(vec![]);

        let model = account_selection(&state).unwrap();

        assert_eq!(model.rows.len(), 1);
        assert_eq!(model.rows[0].index, 0);
        assert_eq!(model.rows[0].balance, None);
        assert_eq!(
            model.rows[0].url,
            "/device/abc/network/ethereum/account/0"
        );
    }

    #[test]
    fn test_no_accounts_and_disconnected_device_yields_no_rows() {
        let mut state = state_with(vec![]);
        state.selected_device.as_mut().unwrap().connected = false;

        let model = account_selection(&state).unwrap();

        assert!(model.rows.is_empty());
    }

    #[test]
    fn test_add_account_disabled_when_last_account_is_empty() {
        let mut state = state_with(vec![account(0, "10", 5), account(1, "0", 0)]);
        state.discovery = vec![Discovery {
            device_state: "state-0".to_string(),
            network: Network::Ethereum,
            completed: true,
        }];

        let model = account_selection(&state).unwrap();

        assert_eq!(
            model.indicator,
            Some(DiscoveryIndicator::AddAccount { enabled: false })
        );
    }

    #[test]
    fn test_add_account_enabled_when_last_account_has_nonce() {
        let mut state = state_with(vec![account(0, "0", 1)]);
        state.discovery = vec![Discovery {
            device_state: "state-0".to_string(),
            network: Network::Ethereum,
            completed: true,
        }];

        let model = account_selection(&state).unwrap();

        assert_eq!(
            model.indicator,
            Some(DiscoveryIndicator::AddAccount { enabled: true })
        );
    }

    #[test]
    fn test_incomplete_discovery_prompts_reconnect_when_unavailable() {
        let mut state = state_with(vec![account(0, "10", 5)]);
        state.selected_device.as_mut().unwrap().available = false;
        state.discovery = vec![Discovery {
            device_state: "state-0".to_string(),
            network: Network::Ethereum,
            completed: false,
        }];

        let model = account_selection(&state).unwrap();

        assert_eq!(
            model.indicator,
            Some(DiscoveryIndicator::ReconnectDevice {
                instance_label: "My Wallet".to_string()
            })
        );
    }

    #[test]
    fn test_incomplete_discovery_on_connected_device_is_loading() {
        let mut state = state_with(vec![]);
        state.discovery = vec![Discovery {
            device_state: "state-0".to_string(),
            network: Network::Ethereum,
            completed: false,
        }];

        let model = account_selection(&state).unwrap();

        assert_eq!(model.indicator, Some(DiscoveryIndicator::Loading));
    }

    #[test]
    fn test_no_discovery_record_yields_no_indicator() {
        let state = state_with(vec![account(0, "10", 5)]);

        let model = account_selection(&state).unwrap();

        assert_eq!(model.indicator, None);
    }

    #[test]
    fn test_unresolvable_coin_renders_nothing() {
        let mut state = state_with(vec![account(0, "10", 5)]);
        state.coins.clear();

        assert!(account_selection(&state).is_none());
    }

    #[test]
    fn test_rows_link_to_their_account_urls() {
        let state = state_with(vec![account(0, "10", 5), account(1, "", 0)]);

        let model = account_selection(&state).unwrap();

        assert_eq!(model.rows[0].url, "/device/abc/network/ethereum/account/0");
        assert_eq!(model.rows[1].url, "/device/abc/network/ethereum/account/1");
        assert!(model.rows[0].is_selected);
        assert!(!model.rows[1].is_selected);
    }
}
