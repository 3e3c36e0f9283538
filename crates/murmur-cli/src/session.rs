//! Local profile and client wiring for the CLI.
//!
//! Tokens live in their own file managed by [`FileTokenStore`]; the profile
//! file next to it remembers the API base URL and the last seen user so
//! commands can skip a round trip.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use murmur::{ApiClient, ApiUrl, AuthStore, FileTokenStore, SessionSnapshot, User};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// API base used when neither the flag, the environment, nor a stored
/// profile provides one.
pub const DEFAULT_API_URL: &str = "http://localhost:8084";

/// Stored CLI profile.
#[derive(Debug, Serialize, Deserialize)]
struct Profile {
    api_url: String,
    #[serde(default)]
    snapshot: SessionSnapshot,
}

/// Get the data directory, creating it if needed.
fn data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "murmur").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir().to_path_buf();
    fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

    Ok(data_dir)
}

fn profile_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("profile.json"))
}

fn tokens_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("tokens.json"))
}

/// Resolve the API base URL: the flag wins, then `MURMUR_API_URL`, then
/// the stored profile, then the default.
fn resolve_api_url(flag: Option<&str>) -> Result<ApiUrl> {
    let raw = match flag {
        Some(url) => url.to_string(),
        None => match std::env::var("MURMUR_API_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => match load_profile()? {
                Some(profile) => profile.api_url,
                None => DEFAULT_API_URL.to_string(),
            },
        },
    };
    ApiUrl::new(&raw).context("Invalid API URL")
}

/// Build an API client over the on-disk token store.
pub fn connect(api_url: Option<&str>) -> Result<ApiClient> {
    let base = resolve_api_url(api_url)?;
    let tokens = Arc::new(FileTokenStore::new(tokens_path()?));

    // When the session dies, the cached profile goes with it.
    let profile = profile_path()?;
    let hook = Arc::new(move || {
        crate::output::error("Session expired. Run 'murmur login' to sign in again.");
        tracing::debug!("discarding local profile");
        let _ = fs::remove_file(&profile);
    });

    Ok(ApiClient::new(base, tokens, hook))
}

/// Build an auth store primed with the persisted profile, if any.
pub fn auth_store(api: &ApiClient) -> AuthStore {
    let auth = AuthStore::new(api.clone());
    if let Ok(Some(profile)) = load_profile() {
        auth.restore(profile.snapshot);
    }
    auth
}

/// Persist the profile for the given client and auth state.
pub fn save_profile(api: &ApiClient, auth: &AuthStore) -> Result<()> {
    let profile = Profile {
        api_url: api.base_url().as_str().to_string(),
        snapshot: auth.snapshot(),
    };

    let path = profile_path()?;
    let json = serde_json::to_string_pretty(&profile)?;

    fs::write(&path, &json).context("Failed to write profile file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Load the stored profile from disk.
fn load_profile() -> Result<Option<Profile>> {
    let path = profile_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read profile file")?;
    let profile: Profile = serde_json::from_str(&json).context("Invalid profile file")?;
    Ok(Some(profile))
}

/// Remove the stored profile.
pub fn clear_profile() -> Result<()> {
    let path = profile_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove profile file")?;
    }

    Ok(())
}

/// The logged-in user, from the cached profile or the server.
pub async fn resolve_user(api: &ApiClient) -> Result<User> {
    let auth = auth_store(api);
    if let Some(user) = auth.user() {
        return Ok(user);
    }

    let user = auth
        .current_user()
        .await
        .context("No active session. Run 'murmur login' first.")?;
    save_profile(api, &auth)?;
    Ok(user)
}
