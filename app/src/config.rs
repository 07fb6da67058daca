use std::path::Path;

use serde::Deserialize;

use crate::api::common_types::Network;

/// Per-network coin configuration, the lookup table the account selection
/// screen resolves the active coin from.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
pub struct CoinConfig {
    pub network: Network,
    pub symbol: String,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// JSON-RPC endpoint of the local bridge daemon. When unset the app runs
    /// against a scripted mock service.
    pub bridge_endpoint: Option<String>,
    pub fiat_rates_endpoint: String,
    /// Minimal interval between fiat-rate requests, in seconds.
    pub fiat_rates_refresh_secs: u64,
    pub coins: Vec<CoinConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bridge_endpoint: None,
            fiat_rates_endpoint: "https://data-api.binance.vision".to_string(),
            fiat_rates_refresh_secs: 5,
            coins: vec![
                CoinConfig {
                    network: Network::Ethereum,
                    symbol: "ETH".to_string(),
                    name: "Ethereum".to_string(),
                },
                CoinConfig {
                    network: Network::EthereumClassic,
                    symbol: "ETC".to_string(),
                    name: "Ethereum Classic".to_string(),
                },
                CoinConfig {
                    network: Network::Ropsten,
                    symbol: "tROP".to_string(),
                    name: "Ropsten".to_string(),
                },
            ],
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Self {
        if !path.is_file() {
            log::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }

        let content = std::fs::read_to_string(path).expect("Failed to read config file");

        toml::from_str(&content).expect("Failed to parse config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_with_partial_overrides() {
        let config: AppConfig = toml::from_str(
            r#"
            bridge_endpoint = "http://127.0.0.1:21325"

            [[coins]]
            network = "ethereum"
            symbol = "ETH"
            name = "Ethereum"
            "#,
        )
        .unwrap();

        assert_eq!(config.bridge_endpoint.as_deref(), Some("http://127.0.0.1:21325"));
        assert_eq!(config.coins.len(), 1);
        assert_eq!(config.coins[0].network, Network::Ethereum);
        // Untouched fields fall back to defaults.
        assert_eq!(config.fiat_rates_refresh_secs, 5);
    }
}
