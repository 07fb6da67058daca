use async_trait::async_trait;
use jsonrpsee::{
    core::client::ClientT,
    http_client::{HttpClient, HttpClientBuilder},
    rpc_params,
};
use serde::{Deserialize, Serialize};

use super::common_types::{Account, Device, Discovery, Network, PendingTransaction};

/// Connection-management service. It owns devices, account discovery and
/// pending-transaction tracking; the application only sends it commands and
/// drains its event queue into the store.
#[async_trait]
pub trait ConnectApiT: Send + Sync + 'static {
    /// Requests acquisition of the device session held by another context.
    /// Fire-and-forget: the outcome arrives later as
    /// `AcquireStarted`/`AcquireFinished` events.
    async fn acquire_device(&self, device: &Device);

    /// Requests discovery of one more account for the device on the given
    /// network. Fire-and-forget.
    async fn add_account(&self, device: &Device, network: Network);

    /// Next pending service event, `None` if the queue is empty.
    async fn poll_event(&self) -> Option<ConnectEvent>;
}

#[async_trait]
impl<A: ConnectApiT> ConnectApiT for std::sync::Arc<A> {
    async fn acquire_device(&self, device: &Device) {
        (**self).acquire_device(device).await
    }

    async fn add_account(&self, device: &Device, network: Network) {
        (**self).add_account(device, network).await
    }

    async fn poll_event(&self) -> Option<ConnectEvent> {
        (**self).poll_event().await
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConnectEvent {
    AcquireStarted,
    AcquireFinished { device: Device },
    DeviceChanged { device: Device },
    AccountDiscovered { account: Account },
    AccountUpdated { account: Account },
    DiscoveryChanged { discovery: Discovery },
    PendingChanged { pending: Vec<PendingTransaction> },
}

/// JSON-RPC client for a locally running bridge daemon.
pub struct ConnectApi {
    client: HttpClient,
}

impl ConnectApi {
    pub fn new(endpoint: &str) -> Self {
        let client = HttpClientBuilder::new().build(endpoint).unwrap();

        Self { client }
    }
}

#[async_trait]
impl ConnectApiT for ConnectApi {
    async fn acquire_device(&self, device: &Device) {
        log::info!("Requesting acquisition of device {}", device.id);

        let result: Result<bool, _> = self
            .client
            .request("device.acquire", rpc_params![&device.id, device.instance])
            .await;

        if let Err(err) = result {
            log::error!("Bridge rejected device.acquire: {}", err);
        }
    }

    async fn add_account(&self, device: &Device, network: Network) {
        log::info!("Requesting new {} account for device {}", network, device.id);

        let result: Result<bool, _> = self
            .client
            .request("account.add", rpc_params![&device.state, network])
            .await;

        if let Err(err) = result {
            log::error!("Bridge rejected account.add: {}", err);
        }
    }

    async fn poll_event(&self) -> Option<ConnectEvent> {
        let result: Result<Option<ConnectEvent>, _> =
            self.client.request("event.poll", rpc_params![]).await;

        match result {
            Ok(event) => event,
            Err(err) => {
                log::error!("Failed to poll bridge events: {}", err);
                None
            }
        }
    }
}

pub mod mock {
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    use super::*;

    pub struct ConnectApiMock {
        events: Mutex<VecDeque<ConnectEvent>>,
        acquire_requests: AtomicUsize,
        add_account_requests: AtomicUsize,
    }

    impl ConnectApiMock {
        pub fn new() -> Self {
            Self::with_events([])
        }

        pub fn with_events(events: impl IntoIterator<Item = ConnectEvent>) -> Self {
            Self {
                events: Mutex::new(events.into_iter().collect()),
                acquire_requests: AtomicUsize::new(0),
                add_account_requests: AtomicUsize::new(0),
            }
        }

        /// Scripted session: a connected device with two discovered accounts,
        /// a finished discovery and one pending transaction.
        pub fn scripted_session() -> Self {
            let device = Device {
                id: "A1B2C3D4".to_string(),
                state: Some("state-0".to_string()),
                connected: true,
                available: true,
                used_elsewhere: false,
                instance: None,
                instance_label: "My Wallet".to_string(),
            };

            let account = |index: usize, balance: &str, nonce: u64| Account {
                index,
                network: Network::Ethereum,
                device_state: "state-0".to_string(),
                address: format!("0x000000000000000000000000000000000000000{}", index),
                balance: balance.to_string(),
                nonce,
            };

            Self::with_events([
                ConnectEvent::DeviceChanged { device },
                ConnectEvent::AccountDiscovered {
                    account: account(0, "100", 12),
                },
                ConnectEvent::AccountDiscovered {
                    account: account(1, "2.5", 1),
                },
                ConnectEvent::PendingChanged {
                    pending: vec![PendingTransaction {
                        network: Network::Ethereum,
                        address: "0x0000000000000000000000000000000000000000".to_string(),
                        currency: "ETH".to_string(),
                        amount: "30".to_string(),
                        rejected: false,
                    }],
                },
                ConnectEvent::DiscoveryChanged {
                    discovery: Discovery {
                        device_state: "state-0".to_string(),
                        network: Network::Ethereum,
                        completed: true,
                    },
                },
            ])
        }

        pub fn push_event(&self, event: ConnectEvent) {
            self.events.lock().unwrap().push_back(event);
        }

        pub fn acquire_requests(&self) -> usize {
            self.acquire_requests.load(Ordering::SeqCst)
        }

        pub fn add_account_requests(&self) -> usize {
            self.add_account_requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ConnectApiT for ConnectApiMock {
        async fn acquire_device(&self, device: &Device) {
            self.acquire_requests.fetch_add(1, Ordering::SeqCst);

            // Mimics the service: acquisition starts right away and finishes
            // with the session transferred to us.
            let mut acquired = device.clone();
            acquired.used_elsewhere = false;

            let mut events = self.events.lock().unwrap();
            events.push_back(ConnectEvent::AcquireStarted);
            events.push_back(ConnectEvent::AcquireFinished { device: acquired });
        }

        async fn add_account(&self, _device: &Device, _network: Network) {
            self.add_account_requests.fetch_add(1, Ordering::SeqCst);
        }

        async fn poll_event(&self) -> Option<ConnectEvent> {
            self.events.lock().unwrap().pop_front()
        }
    }
}
