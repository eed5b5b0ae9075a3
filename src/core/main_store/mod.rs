use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::models::*;
use crate::external::Interop;
use crate::transport::utils::resolve_server_url;
use crate::transport::Transport;

/// Process-wide application state: backend reachability, versions,
/// the active notification and loading status of every section.
pub struct MainStore {
    shared: Arc<Shared>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl MainStore {
    pub fn builder(transport: Arc<dyn Transport>) -> MainStoreBuilder {
        MainStoreBuilder {
            transport,
            interop: None,
            handler: Arc::new(NoopHandler),
            config: Default::default(),
        }
    }

    /// Starts polling the backend until it responds or all attempts are exhausted.
    ///
    /// The url is resolved on every attempt: `url` if present, then the one from
    /// the desktop shell, then the transport default. Any previously started
    /// polling is cancelled before the failure flag is cleared.
    ///
    /// Outside of a tokio runtime nothing is spawned and the connection is
    /// marked as failed.
    pub fn connect(&self, url: Option<&str>) {
        if let Some(previous) = self.poller.lock().take() {
            previous.abort();
        }
        self.shared.set_connection_failure(false);

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to start backend polling: {e}");
                self.shared.set_connection_failure(true);
                return;
            }
        };

        let task = runtime.spawn(poll_backend(
            self.shared.clone(),
            url.map(ToOwned::to_owned),
        ));

        // A concurrent `connect` may have stored its own poller meanwhile
        if let Some(other) = self.poller.lock().replace(task) {
            other.abort();
        }
    }

    /// Whether a connection attempt loop is still running
    pub fn is_polling(&self) -> bool {
        matches!(&*self.poller.lock(), Some(task) if !task.is_finished())
    }

    pub fn phase(&self) -> ConnectionPhase {
        let (connected, connection_failure) = {
            let state = self.shared.state.lock();
            (
                state.connection.connected,
                state.connection.connection_failure,
            )
        };

        if connected {
            ConnectionPhase::Connected
        } else if self.is_polling() {
            ConnectionPhase::Polling
        } else if connection_failure {
            ConnectionPhase::Failed
        } else {
            ConnectionPhase::Idle
        }
    }

    /// Fetches application versions, including the latest release
    pub async fn get_version(&self) -> Result<()> {
        self.shared.get_version().await
    }

    /// Fetches runtime metadata and applies the backend log level to this process
    pub async fn get_info(&self) -> Result<()> {
        self.shared.get_info().await
    }

    /// Replaces the active message. `None` clears it
    pub fn set_message(&self, message: Option<Message>) {
        self.shared.set_message(message.unwrap_or_default());
    }

    pub fn set_status(&self, section: Section, status: Status) {
        self.shared.set_status(section, status);
    }

    pub fn reset_defi_status(&self) {
        self.shared.update_status(|status| {
            Section::DEFI
                .iter()
                .fold(false, |changed, section| {
                    status.set(*section, Status::None) || changed
                })
        });
    }

    pub fn set_connected(&self, connected: bool) {
        self.shared.set_connected(connected);
    }

    pub fn set_new_user(&self, new_user: bool) {
        self.shared.set_new_user(new_user);
    }

    pub fn set_connection_failure(&self, failed: bool) {
        self.shared.set_connection_failure(failed);
    }

    /// Restores session related fields to their defaults.
    ///
    /// Connection flag, data directory and log level are left untouched.
    pub fn reset(&self) {
        let shared = &self.shared;
        shared.set_new_user(false);
        shared.set_message(Message::default());
        shared.set_version(Version::default());
        shared.set_connection_failure(false);
        shared.update_status(|status| {
            let changed = !status.is_empty();
            *status = StatusMap::default();
            changed
        });
    }

    pub fn state(&self) -> MainStoreState {
        self.shared.state.lock().clone()
    }

    pub fn connected(&self) -> bool {
        self.shared.state.lock().connection.connected
    }

    pub fn connection_failure(&self) -> bool {
        self.shared.state.lock().connection.connection_failure
    }

    pub fn new_user(&self) -> bool {
        self.shared.state.lock().connection.new_user
    }

    pub fn data_directory(&self) -> String {
        self.shared.state.lock().connection.data_directory.clone()
    }

    pub fn log_level(&self) -> LogLevel {
        self.shared.state.lock().connection.log_level
    }

    pub fn version(&self) -> Version {
        self.shared.state.lock().connection.version.clone()
    }

    pub fn message(&self) -> Message {
        self.shared.state.lock().message.clone()
    }

    pub fn status(&self) -> StatusMap {
        self.shared.state.lock().status.clone()
    }

    pub fn get_status(&self, section: Section) -> Status {
        self.shared.state.lock().status.get(section)
    }

    /// `true` while any of the balance detail sections is loading
    pub fn details_loading(&self) -> bool {
        self.shared.state.lock().status.any_loading(Section::DETAILS)
    }

    pub fn show_message(&self) -> bool {
        !self.shared.state.lock().message.is_empty()
    }

    pub fn update_needed(&self) -> bool {
        self.shared.state.lock().connection.version.update_needed()
    }

    pub fn app_version(&self) -> String {
        self.shared
            .state
            .lock()
            .connection
            .version
            .app_version()
            .to_owned()
    }
}

impl Drop for MainStore {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.get_mut().take() {
            poller.abort();
        }
    }
}

pub struct MainStoreBuilder {
    transport: Arc<dyn Transport>,
    interop: Option<Arc<dyn Interop>>,
    handler: Arc<dyn MainStoreHandler>,
    config: StoreConfig,
}

impl MainStoreBuilder {
    pub fn with_interop(mut self, interop: Arc<dyn Interop>) -> Self {
        self.interop = Some(interop);
        self
    }

    pub fn with_handler(mut self, handler: Arc<dyn MainStoreHandler>) -> Self {
        self.handler = handler;
        self
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<MainStore> {
        if self.config.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval.into());
        }

        Ok(MainStore {
            shared: Arc::new(Shared {
                transport: self.transport,
                interop: self.interop,
                handler: self.handler,
                config: self.config,
                state: Default::default(),
            }),
            poller: Default::default(),
        })
    }
}

/// Receives every change of the main store state.
///
/// Callbacks are invoked after the state is updated and only when a value
/// actually changed.
pub trait MainStoreHandler: Send + Sync {
    fn on_connected_changed(&self, _connected: bool) {}

    fn on_connection_failure_changed(&self, _failed: bool) {}

    fn on_new_user_changed(&self, _new_user: bool) {}

    fn on_message_changed(&self, _message: &Message) {}

    /// Called once per status map replacement
    fn on_status_changed(&self, _status: &StatusMap) {}

    fn on_version_changed(&self, _version: &Version) {}

    fn on_info_changed(&self, _data_directory: &str, _log_level: LogLevel) {}
}

#[derive(Debug, Copy, Clone, Default)]
pub struct NoopHandler;

impl MainStoreHandler for NoopHandler {}

struct Shared {
    transport: Arc<dyn Transport>,
    interop: Option<Arc<dyn Interop>>,
    handler: Arc<dyn MainStoreHandler>,
    config: StoreConfig,
    state: Mutex<MainStoreState>,
}

impl Shared {
    /// Single connection attempt. Returns `true` if the backend responded
    async fn try_connect(&self, url: Option<&str>) -> Result<bool> {
        let server_url = resolve_server_url(
            url,
            self.interop.as_deref(),
            self.transport.default_server_url(),
        );
        self.transport.setup(&server_url)?;

        if !self.transport.ping().await? {
            return Ok(false);
        }

        let accounts = self.transport.users().await?;
        if accounts.is_empty() {
            self.set_new_user(true);
        }

        log::info!("Connected to backend at {server_url}");
        Ok(true)
    }

    async fn get_version(&self) -> Result<()> {
        let info = self.transport.info(true).await?;
        if let Some(version) = info.version {
            self.set_version(Version {
                version: version.our_version.unwrap_or_default(),
                latest_version: version.latest_version.unwrap_or_default(),
                download_url: version.download_url.unwrap_or_default(),
            });
        }
        Ok(())
    }

    async fn get_info(&self) -> Result<()> {
        let info = self.transport.info(false).await?;

        let changed = {
            let mut state = self.state.lock();
            let connection = &mut state.connection;
            let changed = connection.data_directory != info.data_directory
                || connection.log_level != info.log_level;
            connection.data_directory = info.data_directory.clone();
            connection.log_level = info.log_level;
            changed
        };

        log::set_max_level(info.log_level.into());

        if changed {
            self.handler
                .on_info_changed(&info.data_directory, info.log_level);
        }
        Ok(())
    }

    fn set_connected(&self, connected: bool) {
        if self.replace(|state| &mut state.connection.connected, connected) {
            self.handler.on_connected_changed(connected);
        }
    }

    fn set_connection_failure(&self, failed: bool) {
        if self.replace(|state| &mut state.connection.connection_failure, failed) {
            self.handler.on_connection_failure_changed(failed);
        }
    }

    fn set_new_user(&self, new_user: bool) {
        if self.replace(|state| &mut state.connection.new_user, new_user) {
            self.handler.on_new_user_changed(new_user);
        }
    }

    fn set_message(&self, message: Message) {
        if self.replace(|state| &mut state.message, message.clone()) {
            self.handler.on_message_changed(&message);
        }
    }

    fn set_version(&self, version: Version) {
        if self.replace(|state| &mut state.connection.version, version.clone()) {
            self.handler.on_version_changed(&version);
        }
    }

    fn set_status(&self, section: Section, status: Status) {
        self.update_status(|map| map.set(section, status));
    }

    /// Applies `f` to a copy of the status map and swaps it in if `f` reports a change
    fn update_status<F>(&self, f: F)
    where
        F: FnOnce(&mut StatusMap) -> bool,
    {
        let status = {
            let mut state = self.state.lock();
            let mut status = state.status.clone();
            if !f(&mut status) {
                return;
            }
            state.status = status.clone();
            status
        };

        self.handler.on_status_changed(&status);
    }

    fn replace<T, F>(&self, field: F, value: T) -> bool
    where
        T: PartialEq,
        F: FnOnce(&mut MainStoreState) -> &mut T,
    {
        let mut state = self.state.lock();
        let field = field(&mut *state);
        if *field == value {
            return false;
        }
        *field = value;
        true
    }
}

async fn poll_backend(shared: Arc<Shared>, url: Option<String>) {
    let StoreConfig {
        poll_interval,
        max_attempts,
    } = shared.config.clone();

    let mut interval = tokio::time::interval_at(Instant::now() + poll_interval, poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    for attempt in 1..=max_attempts {
        interval.tick().await;

        log::debug!("Connecting to backend ({attempt}/{max_attempts})");
        match shared.try_connect(url.as_deref()).await {
            Ok(true) => {
                shared.set_connected(true);
                if let Err(e) = shared.get_info().await {
                    log::error!("Failed to fetch backend info: {e:?}");
                }
                if let Err(e) = shared.get_version().await {
                    log::error!("Failed to fetch backend version: {e:?}");
                }
                return;
            }
            Ok(false) => log::warn!("Backend is not ready yet"),
            Err(e) => log::error!("Backend connection attempt failed: {e:?}"),
        }
    }

    log::error!("Backend is unreachable after {max_attempts} attempts");
    shared.set_connection_failure(true);
}

#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ConfigError {
    #[error("Poll interval must be non-zero")]
    ZeroPollInterval,
}
