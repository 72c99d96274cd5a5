//! Signing key loading: `PRIVATE_KEY`, `MARKETPLACE_KEYS_JSON`, or a near-cli credentials file.

use std::path::PathBuf;
use std::str::FromStr;

use near_crypto::{InMemorySigner, SecretKey};
use near_primitives::types::AccountId;
use tracing::info;

use crate::config::Config;
use crate::signer::TxSigner;

/// Resolution order: `PRIVATE_KEY` (with the configured account id), then
/// `MARKETPLACE_KEYS_JSON`, then the credentials file.
pub fn load_signer(config: &Config) -> Result<TxSigner, crate::Error> {
    if let Ok(private_key) = std::env::var("PRIVATE_KEY") {
        if !private_key.is_empty() {
            let account_id = config.account_id.as_deref().ok_or_else(|| {
                crate::Error::Config(
                    "PRIVATE_KEY is set but MARKETPLACE_ACCOUNT_ID is missing".into(),
                )
            })?;
            let signer = signer_from_secret(account_id, &private_key)?;
            info!(account = %signer.account_id(), source = "PRIVATE_KEY", "Loaded signing key");
            return Ok(signer);
        }
    }

    if let Ok(keys_json) = std::env::var("MARKETPLACE_KEYS_JSON") {
        let signer = parse_keys_json(&keys_json)?;
        info!(account = %signer.account_id(), source = "MARKETPLACE_KEYS_JSON", "Loaded signing key");
        return Ok(signer);
    }

    let path = credentials_path(config, std::env::var("HOME").ok())?;
    let json = std::fs::read_to_string(&path).map_err(|e| {
        crate::Error::Signing(format!("Failed to read {}: {e}", path.display()))
    })?;
    let signer = parse_keys_json(&json)?;
    info!(account = %signer.account_id(), path = %path.display(), "Loaded signing key");
    Ok(signer)
}

pub fn signer_from_secret(account_id: &str, secret_key: &str) -> Result<TxSigner, crate::Error> {
    let account_id: AccountId = account_id
        .parse()
        .map_err(|e| crate::Error::Config(format!("Invalid account '{account_id}': {e}")))?;
    let secret_key = SecretKey::from_str(secret_key.trim())
        .map_err(|e| crate::Error::Signing(format!("Invalid secret key: {e}")))?;
    Ok(TxSigner::new(InMemorySigner::from_secret_key(
        account_id, secret_key,
    )))
}

/// near-cli formats: `{"account_id", "public_key", "private_key"}` or an array of them.
pub fn parse_keys_json(json: &str) -> Result<TxSigner, crate::Error> {
    #[derive(serde::Deserialize)]
    struct KeyFile {
        account_id: String,
        #[serde(alias = "secret_key")]
        private_key: String,
    }

    let key: KeyFile = if json.trim().starts_with('[') {
        let keys: Vec<KeyFile> = serde_json::from_str(json)
            .map_err(|e| crate::Error::Signing(format!("Invalid key JSON: {e}")))?;
        keys.into_iter()
            .next()
            .ok_or_else(|| crate::Error::Signing("Empty key array".to_string()))?
    } else {
        serde_json::from_str(json)
            .map_err(|e| crate::Error::Signing(format!("Invalid key JSON: {e}")))?
    };

    signer_from_secret(&key.account_id, &key.private_key)
}

/// Configured `keys_path`, else `<home>/.near-credentials/<network>/<account>.json`.
pub fn credentials_path(config: &Config, home: Option<String>) -> Result<PathBuf, crate::Error> {
    if let Some(path) = &config.keys_path {
        return Ok(PathBuf::from(path));
    }
    let account_id = config.account_id.as_deref().ok_or_else(|| {
        crate::Error::Config(
            "No signing key: set PRIVATE_KEY, MARKETPLACE_KEYS_PATH or MARKETPLACE_ACCOUNT_ID".into(),
        )
    })?;
    let home = home.ok_or_else(|| crate::Error::Config("HOME is not set".into()))?;
    Ok(PathBuf::from(home)
        .join(".near-credentials")
        .join(&config.network)
        .join(format!("{account_id}.json")))
}
