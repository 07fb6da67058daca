use ratatui::{crossterm::event::Event, Frame};
use resources::Resources;

use crate::{
    api::{connect::ConnectApiT, fiat_rates::FiatRatesApiT},
    app::ApiRegistry,
    state::store::Store,
};

pub mod account_selection;
pub mod acquire;
mod common;
pub mod resources;

pub struct Screen<C: ConnectApiT, F: FiatRatesApiT> {
    remaining_apis: ApiRegistry<C, F>,
    model: ScreenModel<C, F>,
}

enum ScreenModel<C: ConnectApiT, F: FiatRatesApiT> {
    Acquire(acquire::Model<C>),
    AccountSelection(account_selection::Model<C, F>),
}

impl<C: ConnectApiT, F: FiatRatesApiT> Screen<C, F> {
    pub fn new(name: ScreenName, store: Store, api_registry: ApiRegistry<C, F>) -> Self {
        match name {
            ScreenName::Acquire => {
                let (model, remaining_apis) = acquire::Model::construct(store, api_registry);
                Self {
                    remaining_apis,
                    model: ScreenModel::Acquire(model),
                }
            }
            ScreenName::AccountSelection => {
                let (model, remaining_apis) =
                    account_selection::Model::construct(store, api_registry);
                Self {
                    remaining_apis,
                    model: ScreenModel::AccountSelection(model),
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, resources: &Resources) {
        match &self.model {
            ScreenModel::Acquire(screen) => screen.render(frame, resources),
            ScreenModel::AccountSelection(screen) => screen.render(frame, resources),
        }
    }

    pub async fn tick(&mut self, event: Option<Event>) -> Option<OutgoingMessage> {
        match &mut self.model {
            ScreenModel::Acquire(screen) => screen.tick(event).await,
            ScreenModel::AccountSelection(screen) => screen.tick(event).await,
        }
    }

    pub async fn deconstruct(self) -> (Store, ApiRegistry<C, F>) {
        match self.model {
            ScreenModel::Acquire(model) => model.deconstruct(self.remaining_apis).await,
            ScreenModel::AccountSelection(model) => model.deconstruct(self.remaining_apis).await,
        }
    }
}

trait ScreenT {
    fn render(&self, frame: &mut Frame<'_>, resources: &Resources);

    async fn tick(&mut self, event: Option<Event>) -> Option<OutgoingMessage>;
}

#[derive(Debug)]
pub enum OutgoingMessage {
    SwitchScreen(ScreenName),
    Back,
    Exit,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ScreenName {
    AccountSelection,
    Acquire,
}
