use ratatui::{crossterm::event::Event, Frame};

use super::{resources::Resources, OutgoingMessage, ScreenT};
use crate::{
    api::{connect::ConnectApiT, fiat_rates::FiatRatesApiT},
    app::ApiRegistry,
    state::store::Store,
};

mod controller;
mod view;

/// Device-acquisition notice: a stateless projection of the store's
/// `acquiring` flag plus a single outbound acquire command.
pub struct Model<C: ConnectApiT> {
    show_navigation_help: bool,
    /// Set by the controller on a key press, consumed by the next tick.
    acquire_requested: bool,

    store: Store,
    apis: ApiSubRegistry<C>,
}

struct ApiSubRegistry<C: ConnectApiT> {
    connect_api: Option<C>,
}

impl<C: ConnectApiT> Model<C> {
    pub fn construct<F: FiatRatesApiT>(
        store: Store,
        mut api_registry: ApiRegistry<C, F>,
    ) -> (Self, ApiRegistry<C, F>) {
        let apis = ApiSubRegistry {
            connect_api: api_registry.connect_api.take(),
        };

        (
            Self {
                show_navigation_help: false,
                acquire_requested: false,

                store,
                apis,
            },
            api_registry,
        )
    }

    async fn tick_logic(&mut self) -> Option<OutgoingMessage> {
        let connect_api = self
            .apis
            .connect_api
            .as_ref()
            .expect("Connect API should be present");

        while let Some(event) = connect_api.poll_event().await {
            self.store.dispatch(event.into());
        }

        if self.acquire_requested {
            self.acquire_requested = false;

            // Fire-and-forget: the `acquiring` flag only flips once the
            // service reports the acquisition start back as an event.
            if let Some(device) = self.store.state().selected_device.clone() {
                connect_api.acquire_device(&device).await;
            }
        }

        let state = self.store.state();
        let session_is_ours = state
            .selected_device
            .as_ref()
            .map(|device| !device.used_elsewhere)
            .unwrap_or(false);

        if session_is_ours && !state.acquiring {
            return Some(OutgoingMessage::Back);
        }

        None
    }

    pub async fn deconstruct<F: FiatRatesApiT>(
        mut self,
        mut api_registry: ApiRegistry<C, F>,
    ) -> (Store, ApiRegistry<C, F>) {
        api_registry.connect_api = self.apis.connect_api.take();

        (self.store, api_registry)
    }
}

impl<C: ConnectApiT> ScreenT for Model<C> {
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
