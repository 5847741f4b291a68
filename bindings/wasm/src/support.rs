// Support utilities for WASM bindings
use serde::de::DeserializeOwned;

/// Parse a JSON config object over the defaults.
/// Empty or malformed input yields the default config.
pub fn parse_with_defaults<T: DeserializeOwned + Default>(config_json: &str) -> T {
    let config_json = config_json.trim();
    if config_json.is_empty() {
        return T::default();
    }
    serde_json::from_str::<T>(config_json).unwrap_or_default()
}
