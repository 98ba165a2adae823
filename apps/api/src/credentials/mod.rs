// Credential resolution and persistence for the Gemini API key.

pub mod store;

pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoreError};

use tracing::{info, warn};

/// Key under which the credential is persisted.
pub const CREDENTIAL_KEY: &str = "gemini_api_key";

/// Last-resort credential. Intentionally empty: no key ships in source, so an
/// unconfigured install starts without a credential.
pub const BUILT_IN_CREDENTIAL: &str = "";

/// Where the resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Persisted,
    Configured,
    BuiltIn,
}

/// First non-empty of: persisted value, configured value, built-in fallback.
///
/// An unreadable store is logged and skipped rather than failing startup.
pub fn resolve_credential(
    store: &dyn CredentialStore,
    configured: Option<&str>,
) -> Option<(String, CredentialSource)> {
    let persisted = match store.get(CREDENTIAL_KEY) {
        Ok(value) => value,
        Err(e) => {
            warn!("Could not read persisted credential: {e}");
            None
        }
    };

    let candidates = [
        (persisted, CredentialSource::Persisted),
        (configured.map(str::to_string), CredentialSource::Configured),
        (
            Some(BUILT_IN_CREDENTIAL.to_string()),
            CredentialSource::BuiltIn,
        ),
    ];

    let resolved = candidates
        .into_iter()
        .find_map(|(value, source)| value.filter(|v| !v.trim().is_empty()).map(|v| (v, source)));

    match &resolved {
        Some((_, source)) => info!("Gemini credential resolved from {source:?} source"),
        None => info!("No Gemini credential configured"),
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_value_wins() {
        let store = MemoryCredentialStore::with_value(CREDENTIAL_KEY, "persisted");
        assert_eq!(
            resolve_credential(&store, Some("configured")),
            Some(("persisted".to_string(), CredentialSource::Persisted))
        );
    }

    #[test]
    fn test_configured_value_used_when_nothing_persisted() {
        let store = MemoryCredentialStore::new();
        assert_eq!(
            resolve_credential(&store, Some("configured")),
            Some(("configured".to_string(), CredentialSource::Configured))
        );
    }

    #[test]
    fn test_empty_sources_are_skipped() {
        let store = MemoryCredentialStore::with_value(CREDENTIAL_KEY, "");
        assert_eq!(
            resolve_credential(&store, Some("configured")),
            Some(("configured".to_string(), CredentialSource::Configured))
        );
        assert_eq!(resolve_credential(&store, Some("   ")), None);
    }

    #[test]
    fn test_no_credential_without_configuration() {
        let store = MemoryCredentialStore::new();
        assert_eq!(resolve_credential(&store, None), None);
    }
}
