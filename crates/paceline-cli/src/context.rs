//! Per-invocation state: the API client and the persisted session.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use directories::ProjectDirs;

use paceline_core::{ApiUrl, LoginRedirect, Session};
use paceline_file::FileStore;
use paceline_http::ApiClient;

use crate::cli::GlobalArgs;

/// Login hint printed when the server ends the session.
#[derive(Debug, Clone, Copy)]
struct LoginHint;

impl LoginRedirect for LoginHint {
    fn redirect_to_login(&self) {
        eprintln!(
            "{}",
            "Session expired. Run 'paceline auth login' to sign in again.".yellow()
        );
    }
}

/// Everything a command needs to talk to the backend.
#[derive(Debug)]
pub struct AppContext {
    pub client: ApiClient,
}

/// Resolve the directory that holds `storage.json`.
fn data_dir(explicit: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.clone());
    }

    let dirs =
        ProjectDirs::from("", "", "paceline").context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}

impl AppContext {
    /// Restore the stored session and build a client for the configured API.
    pub fn open(args: &GlobalArgs) -> Result<Self> {
        let api = ApiUrl::new(&args.api).context("Invalid API URL")?;
        let data_dir = data_dir(args.data_dir.as_ref())?;

        let store = FileStore::new(&data_dir);
        let session = Session::restore(store).context("Failed to load session")?;
        tracing::debug!(data_dir = %data_dir.display(), logged_in = session.is_logged_in(), "Opened session");

        let client = ApiClient::builder(api)
            .session(session)
            .redirect(LoginHint)
            .user_agent(concat!("paceline-cli/", env!("PACELINE_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    /// Fail early for commands that only make sense with a token.
    pub fn require_login(&self) -> Result<()> {
        if !self.session().is_logged_in() {
            bail!("No active session. Run 'paceline auth login' first.");
        }
        Ok(())
    }
}
