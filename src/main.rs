// Entry point for the journal TUI.
// Wires config, logging, storage, session and API client, then runs the app.

use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use tracing::{error, warn};

use journal::api::{AuthClient, HttpTransport};
use journal::app::{App, Services};
use journal::cache::CacheStore;
use journal::config::Config;
use journal::session::Session;
use journal::storage::{FileStorage, MemoryStorage, SharedStorage};
use journal::{Result, logging};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "journal exited with an error");
            eprintln!("journal: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    if let Err(err) = logging::init(&config) {
        eprintln!("journal: logging disabled: {err}");
    }

    let storage: SharedStorage = match config.resolved_storage_path() {
        Some(path) => Arc::new(FileStorage::open(path)),
        None => {
            warn!("no storage location available, nothing will persist");
            Arc::new(MemoryStorage::new())
        }
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let session = Session::restore(storage.clone());
    let transport = HttpTransport::new(&config.api_base_url, config.request_timeout())?;
    let client = AuthClient::new(Arc::new(transport), session);
    let services = Services::new(CacheStore::new(storage), client);

    let mut app = App::new(services, Local::now().date_naive());

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result?;
    Ok(())
}
