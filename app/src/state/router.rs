use crate::api::common_types::{Device, Network};

/// Current route of the wallet UI. URLs are plain path strings, mirroring
/// the scheme `/device/<id>[:<instance>]/network/<network>/account/<n>`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Location {
    pub pathname: String,
    pub state: LocationState,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LocationState {
    pub network: Network,
    pub device: String,
    pub device_instance: Option<u32>,
}

impl Location {
    /// Route pointing at account 0 of the given device and network.
    pub fn for_device(device: &Device, network: Network) -> Self {
        let state = LocationState {
            network,
            device: device.id.clone(),
            device_instance: device.instance,
        };

        let base = device_base_url(&state.device, state.device_instance);

        Self {
            pathname: format!("{}/network/{}/account/0", base, network),
            state,
        }
    }

    pub fn device_base_url(&self) -> String {
        device_base_url(&self.state.device, self.state.device_instance)
    }

    /// Current path with the `account/<n>` segment substituted.
    pub fn account_url(&self, index: usize) -> String {
        with_account_segment(&self.pathname, index)
    }

    /// Account index of the current path, `None` when the path has no
    /// `account/<n>` segment.
    pub fn account_index(&self) -> Option<usize> {
        let start = self.pathname.find(ACCOUNT_SEGMENT)? + ACCOUNT_SEGMENT.len();
        let digits: String = self.pathname[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();

        digits.parse().ok()
    }
}

const ACCOUNT_SEGMENT: &str = "account/";

fn device_base_url(device: &str, instance: Option<u32>) -> String {
    match instance {
        Some(instance) => format!("/device/{}:{}", device, instance),
        None => format!("/device/{}", device),
    }
}

/// Substitutes the index in the path's `account/<n>` segment. Paths without
/// such a segment are returned unchanged.
pub fn with_account_segment(pathname: &str, index: usize) -> String {
    let Some(pos) = pathname.find(ACCOUNT_SEGMENT) else {
        return pathname.to_string();
    };

    let digits_start = pos + ACCOUNT_SEGMENT.len();
    let digits_end = pathname[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|offset| digits_start + offset)
        .unwrap_or(pathname.len());

    format!(
        "{}account/{}{}",
        &pathname[..pos],
        index,
        &pathname[digits_end..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_segment_substitution() {
        assert_eq!(
            with_account_segment("/device/abc/network/ethereum/account/5", 3),
            "/device/abc/network/ethereum/account/3"
        );
        assert_eq!(
            with_account_segment("/device/abc/network/ethereum/account/5/send", 12),
            "/device/abc/network/ethereum/account/12/send"
        );
        assert_eq!(with_account_segment("/device/abc", 3), "/device/abc");
    }

    #[test]
    fn test_device_base_url() {
        assert_eq!(device_base_url("abc", None), "/device/abc");
        assert_eq!(device_base_url("abc", Some(2)), "/device/abc:2");
    }

    #[test]
    fn test_account_index() {
        let location = Location {
            pathname: "/device/abc/network/ethereum/account/7".to_string(),
            state: LocationState {
                network: Network::Ethereum,
                device: "abc".to_string(),
                device_instance: None,
            },
        };

        assert_eq!(location.account_index(), Some(7));
    }
}
