use ratatui::{crossterm::event::Event, Frame};

use super::{resources::Resources, OutgoingMessage, ScreenName, ScreenT};
use crate::{
    api::{
        common_types::{FiatRate, Network},
        connect::ConnectApiT,
        fiat_rates::FiatRatesApiT,
    },
    app::ApiRegistry,
    screen::common::ApiTask,
    state::{selectors, store::Action, store::Store},
};

mod controller;
mod view;

/// Account selection list: rows of discovered accounts for the selected
/// device and network, plus a discovery-status indicator.
pub struct Model<C: ConnectApiT, F: FiatRatesApiT> {
    /// Keyboard cursor over the rows, independent of the routed account.
    selected_row: Option<usize>,
    show_navigation_help: bool,
    add_account_requested: bool,

    store: Store,
    apis: ApiSubRegistry<C>,

    rates_refresh_task: ApiTask<F, Vec<FiatRate>>,
}

struct ApiSubRegistry<C: ConnectApiT> {
    connect_api: Option<C>,
}

impl<C: ConnectApiT, F: FiatRatesApiT> Model<C, F> {
    pub fn construct(
        store: Store,
        mut api_registry: ApiRegistry<C, F>,
    ) -> (Self, ApiRegistry<C, F>) {
        let apis = ApiSubRegistry {
            connect_api: api_registry.connect_api.take(),
        };

        let fiat_rates_api = api_registry
            .fiat_rates_api
            .take()
            .expect("Fiat rates API should be present");

        (
            Self {
                selected_row: None,
                show_navigation_help: false,
                add_account_requested: false,

                store,
                apis,

                rates_refresh_task: ApiTask::new(fiat_rates_api),
            },
            api_registry,
        )
    }

    async fn tick_logic(&mut self) -> Option<OutgoingMessage> {
        {
            let connect_api = self
                .apis
                .connect_api
                .as_ref()
                .expect("Connect API should be present");

            while let Some(event) = connect_api.poll_event().await {
                self.store.dispatch(event.into());
            }
        }

        self.refresh_fiat_rates().await;

        if self.add_account_requested {
            self.add_account_requested = false;

            let device = self.store.state().selected_device.clone();
            let network = self
                .store
                .state()
                .location
                .as_ref()
                .map(|location| location.state.network);

            if let (Some(device), Some(network)) = (device, network) {
                self.apis
                    .connect_api
                    .as_ref()
                    .expect("Connect API should be present")
                    .add_account(&device, network)
                    .await;
            }
        }

        let state = self.store.state();
        let session_lost = state
            .selected_device
            .as_ref()
            .map(|device| device.used_elsewhere)
            .unwrap_or(false);

        if session_lost || state.acquiring {
            return Some(OutgoingMessage::SwitchScreen(ScreenName::Acquire));
        }

        let row_count = selectors::account_selection(state)
            .map(|view_model| view_model.rows.len())
            .unwrap_or(0);

        if row_count == 0 {
            self.selected_row = None;
        } else if let Some(selected) = self.selected_row.as_mut() {
            if *selected >= row_count {
                *selected = row_count - 1;
            }
        }

        None
    }

    async fn refresh_fiat_rates(&mut self) {
        let networks: Vec<Network> = self
            .store
            .state()
            .coins
            .iter()
            .map(|coin| coin.network)
            .collect();

        let rates = self
            .rates_refresh_task
            .try_fetch_value(|api| {
                tokio::task::spawn(async move {
                    let mut rates = Vec::with_capacity(networks.len());
                    for network in networks {
                        if let Some(value) = api.get_rate(network).await {
                            rates.push(FiatRate { network, value });
                        }
                    }

                    (api, rates)
                })
            })
            .await;

        if let Some(rates) = rates {
            if !rates.is_empty() {
                self.store.dispatch(Action::FiatRatesUpdated { rates });
            }
        }
    }

    pub async fn deconstruct(
        mut self,
        mut api_registry: ApiRegistry<C, F>,
    ) -> (Store, ApiRegistry<C, F>) {
        api_registry.connect_api = self.apis.connect_api.take();
        api_registry.fiat_rates_api = Some(self.rates_refresh_task.abort().await);

        (self.store, api_registry)
    }
}

impl<C: ConnectApiT, F: FiatRatesApiT> ScreenT for Model<C, F> {
    fn render(&self, frame: &mut Frame<'_>, resources: &Resources) {
        view::render(self, frame, resources);
    }

    async fn tick(&mut self, event: Option<Event>) -> Option<OutgoingMessage> {
        if let Some(msg) = self.tick_logic().await {
            return Some(msg);
        }

        controller::process_input(event.as_ref()?, self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use crate::{
        api::{
            common_types::{Account, Device, Discovery},
            connect::{mock::ConnectApiMock, ConnectEvent},
            fiat_rates::mock::FiatRatesApiMock,
        },
        config::CoinConfig,
        state::{
            router::{Location, LocationState},
            store::AppState,
        },
    };

    use super::*;

    fn key_pressed(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn fixture_state() -> AppState {
        AppState {
            selected_device: Some(Device {
                id: "abc".to_string(),
                state: Some("state-0".to_string()),
                connected: true,
                available: true,
                used_elsewhere: false,
                instance: None,
                instance_label: "My Wallet".to_string(),
            }),
            accounts: vec![Account {
                index: 0,
                network: Network::Ethereum,
                device_state: "state-0".to_string(),
                address: format!("0x{:040}", 0),
                balance: "10".to_string(),
                nonce: 3,
            }],
            discovery: vec![Discovery {
                device_state: "state-0".to_string(),
                network: Network::Ethereum,
                completed: true,
            }],
            coins: vec![CoinConfig {
                network: Network::Ethereum,
                symbol: "ETH".to_string(),
                name: "Ethereum".to_string(),
            }],
            location: Some(Location {
                pathname: "/device/abc/network/ethereum/account/0".to_string(),
                state: LocationState {
                    network: Network::Ethereum,
                    device: "abc".to_string(),
                    device_instance: None,
                },
            }),
            ..Default::default()
        }
    }

    fn model_with(
        state: AppState,
        connect_api: Arc<ConnectApiMock>,
    ) -> Model<Arc<ConnectApiMock>, FiatRatesApiMock> {
        let api_registry = ApiRegistry {
            connect_api: Some(connect_api),
            fiat_rates_api: Some(FiatRatesApiMock::new()),
        };

        Model::construct(Store::new(state), api_registry).0
    }

    #[tokio::test]
    async fn test_add_account_key_sends_exactly_one_command() {
        let connect_api = Arc::new(ConnectApiMock::new());
        let mut model = model_with(fixture_state(), Arc::clone(&connect_api));

        assert!(model.tick(Some(key_pressed(KeyCode::Char('a')))).await.is_none());
        model.tick(None).await;
        model.tick(None).await;

        assert_eq!(connect_api.add_account_requests(), 1);
    }

    #[tokio::test]
    async fn test_add_account_key_is_ignored_while_disabled() {
        let mut state = fixture_state();
        // Last account without activity disables the action.
        state.accounts[0].balance = "0".to_string();
        state.accounts[0].nonce = 0;

        let connect_api = Arc::new(ConnectApiMock::new());
        let mut model = model_with(state, Arc::clone(&connect_api));

        model.tick(Some(key_pressed(KeyCode::Char('a')))).await;
        model.tick(None).await;

        assert_eq!(connect_api.add_account_requests(), 0);
    }

    #[tokio::test]
    async fn test_polled_events_are_dispatched_into_store() {
        let connect_api = Arc::new(ConnectApiMock::new());
        let mut model = model_with(fixture_state(), Arc::clone(&connect_api));

        connect_api.push_event(ConnectEvent::AccountDiscovered {
            account: Account {
                index: 1,
                network: Network::Ethereum,
                device_state: "state-0".to_string(),
                address: format!("0x{:040}", 1),
                balance: "".to_string(),
                nonce: 0,
            },
        });
        model.tick(None).await;

        assert_eq!(model.store.state().accounts.len(), 2);
        assert_eq!(model.store.state().accounts[1].index, 1);
    }

    #[tokio::test]
    async fn test_used_device_switches_to_acquire_screen() {
        let mut state = fixture_state();
        state.selected_device.as_mut().unwrap().used_elsewhere = true;

        let connect_api = Arc::new(ConnectApiMock::new());
        let mut model = model_with(state, connect_api);

        let msg = model.tick(None).await;

        assert!(matches!(
            msg,
            Some(OutgoingMessage::SwitchScreen(ScreenName::Acquire))
        ));
    }

    #[tokio::test]
    async fn test_fiat_rates_land_in_store() {
        let connect_api = Arc::new(ConnectApiMock::new());
        let mut model = model_with(fixture_state(), connect_api);

        for _ in 0..100 {
            model.tick(None).await;

            if !model.store.state().fiat.is_empty() {
                break;
            }

            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }

        let rate = model
            .store
            .state()
            .fiat
            .iter()
            .find(|rate| rate.network == Network::Ethereum)
            .expect("Rate should be fetched");
        assert_eq!(rate.value, rust_decimal_macros::dec!(2.5));
    }

    #[tokio::test]
    async fn test_enter_navigates_to_selected_account() {
        let mut state = fixture_state();
        state.accounts.push(Account {
            index: 1,
            network: Network::Ethereum,
            device_state: "state-0".to_string(),
            address: format!("0x{:040}", 1),
            balance: "0".to_string(),
            nonce: 0,
        });

        let connect_api = Arc::new(ConnectApiMock::new());
        let mut model = model_with(state, connect_api);

        model.tick(Some(key_pressed(KeyCode::Down))).await;
        model.tick(Some(key_pressed(KeyCode::Down))).await;
        model.tick(Some(key_pressed(KeyCode::Enter))).await;

        let location = model.store.state().location.as_ref().unwrap();
        assert_eq!(location.pathname, "/device/abc/network/ethereum/account/1");
    }
}
