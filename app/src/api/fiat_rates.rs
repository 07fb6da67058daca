use async_trait::async_trait;
use binance_spot_connector_rust::{market, ureq::BinanceHttpClient};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::common_types::Network;

#[async_trait]
pub trait FiatRatesApiT: Send + Sync + 'static {
    /// USD exchange rate for the network's base asset, `None` when no market
    /// exists for it.
    async fn get_rate(&self, network: Network) -> Option<Decimal>;
}

pub struct FiatRatesApi {
    client: BinanceHttpClient,
}

impl FiatRatesApi {
    pub fn new(url: &str) -> Self {
        let client = BinanceHttpClient::with_url(url);

        Self { client }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct MarketAvgPriceResponse {
    #[allow(dead_code)]
    mins: u32,
    price: Decimal,
    #[allow(dead_code)]
    close_time: u64,
}

fn market_ticker(network: Network) -> Option<&'static str> {
    match network {
        Network::Ethereum => Some("ETH"),
        Network::EthereumClassic => Some("ETC"),
        // Testnet coins are not traded.
        Network::Ropsten => None,
    }
}

#[async_trait]
impl FiatRatesApiT for FiatRatesApi {
    async fn get_rate(&self, network: Network) -> Option<Decimal> {
        let pair = [market_ticker(network)?, "USDT"].concat();

        let response = match self.client.send(market::avg_price(&pair)) {
            Ok(response) => response,
            Err(err) => {
                log::error!("Failed to request avg price for {}: {:?}", pair, err);
                return None;
            }
        };

        let body = match response.into_body_str() {
            Ok(body) => body,
            Err(err) => {
                log::error!("Failed to read avg price response for {}: {:?}", pair, err);
                return None;
            }
        };

        let price: MarketAvgPriceResponse = match serde_json::from_str(&body) {
            Ok(price) => price,
            Err(err) => {
                log::error!("Malformed avg price response for {}: {}", pair, err);
                return None;
            }
        };

        Some(price.price)
    }
}

pub mod cache {
    use std::collections::HashMap;

    use tokio::sync::Mutex;

    use super::*;
    use crate::api::cache_utils::{use_cache, Mode, ModePlan};

    pub struct Cache<A: FiatRatesApiT> {
        api: A,
        get_rate_cache: Mutex<(HashMap<Network, Option<Decimal>>, Mode<Network>)>,
    }

    impl<A: FiatRatesApiT> Cache<A> {
        pub async fn new(api: A) -> Self {
            Self {
                api,
                get_rate_cache: Default::default(),
            }
        }

        pub fn set_all_modes(&mut self, mode_plan: ModePlan) {
            let (_, mode) = self.get_rate_cache.get_mut();
            *mode = mode_plan.into_mode();
        }
    }

    #[async_trait]
    impl<A: FiatRatesApiT> FiatRatesApiT for Cache<A> {
        async fn get_rate(&self, network: Network) -> Option<Decimal> {
            let (cache, mode) = &mut *self.get_rate_cache.lock().await;
            let api_result = Box::pin(self.api.get_rate(network));

            use_cache(network, cache.entry(network), api_result, mode).await
        }
    }
}

pub mod mock {
    use rust_decimal_macros::dec;

    use super::*;

    pub struct FiatRatesApiMock {}

    impl FiatRatesApiMock {
        pub fn new() -> Self {
            Self {}
        }
    }

    #[async_trait]
    impl FiatRatesApiT for FiatRatesApiMock {
        async fn get_rate(&self, network: Network) -> Option<Decimal> {
            match network {
                Network::Ethereum => Some(dec!(2.5)),
                Network::EthereumClassic => Some(dec!(26.52)),
                Network::Ropsten => None,
            }
        }
    }
}
