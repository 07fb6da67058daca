use std::{io::stdout, time::Duration};

use ratatui::{
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    Terminal,
};

use crate::{
    api::{
        cache_utils::ModePlan,
        connect::{mock::ConnectApiMock, ConnectApi, ConnectApiT},
        fiat_rates::{cache::Cache as FiatRatesApiCache, FiatRatesApi, FiatRatesApiT},
    },
    config::AppConfig,
    screen::{resources::Resources, OutgoingMessage, Screen, ScreenName},
    state::store::{AppState, Store},
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(16);

pub struct App {
    screens: Vec<ScreenName>,
    config: AppConfig,
}

pub(crate) struct ApiRegistry<C: ConnectApiT, F: FiatRatesApiT> {
    pub connect_api: Option<C>,
    pub fiat_rates_api: Option<F>,
}

impl App {
    pub async fn new(config: AppConfig) -> Self {
        Self {
            screens: vec![ScreenName::AccountSelection],
            config,
        }
    }

    pub async fn run(self) {
        let fiat_rates_api = FiatRatesApi::new(&self.config.fiat_rates_endpoint);
        let mut fiat_rates_api = FiatRatesApiCache::new(fiat_rates_api).await;
        fiat_rates_api.set_all_modes(ModePlan::TimedOut(Duration::from_secs(
            self.config.fiat_rates_refresh_secs,
        )));

        match self.config.bridge_endpoint.clone() {
            Some(endpoint) => {
                let connect_api = ConnectApi::new(&endpoint);
                self.run_with_apis(connect_api, fiat_rates_api).await;
            }
            None => {
                log::info!("No bridge endpoint configured, running a scripted session");

                let connect_api = ConnectApiMock::scripted_session();
                self.run_with_apis(connect_api, fiat_rates_api).await;
            }
        }
    }

    async fn run_with_apis<C: ConnectApiT, F: FiatRatesApiT>(
        self,
        connect_api: C,
        fiat_rates_api: F,
    ) {
        let api_registry = ApiRegistry {
            connect_api: Some(connect_api),
            fiat_rates_api: Some(fiat_rates_api),
        };

        let store = Store::new(AppState {
            coins: self.config.coins.clone(),
            ..Default::default()
        });

        stdout().execute(EnterAlternateScreen).unwrap();
        enable_raw_mode().unwrap();
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout())).unwrap();
        terminal.clear().unwrap();

        self.main_loop(&mut terminal, store, api_registry).await;

        stdout().execute(LeaveAlternateScreen).unwrap();
        disable_raw_mode().unwrap();
    }

    async fn main_loop<B: Backend, C: ConnectApiT, F: FiatRatesApiT>(
        mut self,
        terminal: &mut Terminal<B>,
        store: Store,
        api_registry: ApiRegistry<C, F>,
    ) {
        let resources = Resources::default();

        let mut store = Some(store);
        let mut api_registry = Some(api_registry);

        loop {
            let screen_name = *self
                .screens
                .last()
                .expect("At least one screen should be present");

            let mut screen = Screen::new(
                screen_name,
                store.take().expect("Store should be present"),
                api_registry.take().expect("Api registry should be present"),
            );

            let msg = loop {
                terminal
                    .draw(|frame| screen.render(frame, &resources))
                    .unwrap();

                let event = event::poll(EVENT_POLL_TIMEOUT)
                    .unwrap()
                    .then(|| event::read().unwrap());

                if let Some(msg) = screen.tick(event).await {
                    break msg;
                }
            };

            let (returned_store, returned_apis) = screen.deconstruct().await;
            store = Some(returned_store);
            api_registry = Some(returned_apis);

            match msg {
                OutgoingMessage::Exit => {
                    return;
                }
                OutgoingMessage::Back => {
                    self.screens.pop();

                    if self.screens.is_empty() {
                        return;
                    }
                }
                OutgoingMessage::SwitchScreen(new_screen) => {
                    self.screens.push(new_screen);
                }
            }
        }
    }
}
