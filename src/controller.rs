use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use chrono_tz::Tz;
use log::{debug, error, info, warn};
use tokio::time::MissedTickBehavior;

use crate::clients::{
    LocalStorage, MixqClient, StorageKey,
    entities::{ControlAction, CurrentTrack, PlayerState, Track},
    errors::{Error, Result},
};
use crate::preferences::{
    Theme, TimeZoneOption, resolve_time_zone, system_time_zone, time_zone_options,
};
use crate::queue::Queue;
use crate::view::QueueView;

/// How often `watch` asks the player what it is doing.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

// Configuration for the Controller struct
pub struct Config {
    pub client: MixqClient,
    pub storage: Arc<LocalStorage>,
    pub poll_interval: Duration,
}

#[derive(Default)]
pub struct ConfigBuilder {
    client: Option<MixqClient>,
    server_url: Option<String>,
    storage: Option<Arc<LocalStorage>>,
    storage_path: Option<PathBuf>,
    poll_interval: Option<Duration>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an already configured client. Takes precedence over `server_url`.
    pub fn client(mut self, client: MixqClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Server to talk to. Unset means `MIXQ_SERVER_URL` or the local default.
    pub fn server_url(mut self, url: Option<String>) -> Self {
        self.server_url = url;
        self
    }

    /// Share an open store. Takes precedence over `storage_path`.
    pub fn storage(mut self, storage: Arc<LocalStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Database file. Unset means the file under the user cache directory.
    pub fn storage_path(mut self, path: Option<PathBuf>) -> Self {
        self.storage_path = path;
        self
    }

    /// Defaults to [`DEFAULT_POLL_INTERVAL`].
    pub fn poll_interval(mut self, interval: Option<Duration>) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Fill every unset part from the environment and open the store.
    pub async fn build(self) -> Result<Config> {
        let client = match (self.client, self.server_url) {
            (Some(c), _) => c,
            (None, Some(url)) => MixqClient::new(url)?,
            (None, None) => MixqClient::try_default()?,
        };
        let storage = match (self.storage, self.storage_path) {
            (Some(s), _) => s,
            (None, Some(path)) => Arc::new(LocalStorage::open(&path).await?),
            (None, None) => Arc::new(LocalStorage::try_default().await?),
        };
        let poll_interval = self.poll_interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        if poll_interval.is_zero() {
            return Err(Error::ConfigurationError(
                "poll interval must be greater than zero".into(),
            ));
        }
        Ok(Config {
            client,
            storage,
            poll_interval,
        })
    }
}

/// What one poll tick changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollOutcome {
    pub current: CurrentTrack,
    /// Track started because the player stopped after the previous one.
    pub auto_advanced: Option<Track>,
    /// The player moved on to the second track by itself.
    pub natural_advance: bool,
}

/// Keeps the local queue in step with the player and persists it.
pub struct Controller {
    config: Config,
    queue: Queue,
    theme: Theme,
    time_zone: String,
    last_playing: bool,
}

impl Controller {
    /// Open storage and bring back the queue and preferences of the last run.
    pub async fn restore(config: Config) -> Result<Self> {
        config.storage.init_db().await?;

        let theme = Theme::from_stored(config.storage.get_item(StorageKey::Theme).await?.as_deref());
        let time_zone = match config.storage.get_item(StorageKey::TimeZone).await? {
            Some(tz) => tz,
            None => system_time_zone(),
        };

        let queue = match config.storage.load_queue().await {
            Ok(Some(tracks)) => {
                debug!("Restored queue from storage: {} tracks", tracks.len());
                Queue::from_tracks(tracks)
            }
            Ok(None) => Queue::new(),
            Err(e) => {
                error!("Failed to parse saved queue: {e}");
                config.storage.remove_item(StorageKey::Queue).await?;
                Queue::new()
            }
        };

        Ok(Controller {
            config,
            queue,
            theme,
            time_zone,
            last_playing: false,
        })
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    pub fn poll_interval(&self) -> Duration {
        self.config.poll_interval
    }

    async fn save_queue(&self) -> Result<()> {
        self.config.storage.save_queue(self.queue.tracks()).await
    }

    /// Replace the queue with a server playlist. The name is sent as given,
    /// only a blank one is refused.
    pub async fn load_playlist(&mut self, playlist: &str) -> Result<usize> {
        if playlist.trim().is_empty() {
            warn!("No playlist selected");
            return Err(Error::MissingPlaylist);
        }
        let tracks = self.config.client.load_playlist(playlist).await?;
        self.queue.replace(tracks);
        info!("Loaded {} tracks from {playlist:?}", self.queue.len());
        self.save_queue().await?;
        Ok(self.queue.len())
    }

    pub async fn remove_track(&mut self, index: usize) -> Result<Option<Track>> {
        let removed = self.queue.remove(index);
        if removed.is_some() {
            self.save_queue().await?;
        }
        Ok(removed)
    }

    pub async fn randomize(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Err(Error::EmptyQueue);
        }
        self.queue.shuffle(&mut rand::rng());
        self.save_queue().await
    }

    pub async fn move_track(&mut self, from: usize, to: usize) -> Result<bool> {
        let moved = self.queue.move_track(from, to);
        if moved {
            self.save_queue().await?;
        }
        Ok(moved)
    }

    pub async fn reorder<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<()> {
        self.queue.reorder(ids);
        self.save_queue().await
    }

    /// "Next" plays the head of the local queue; the other actions are
    /// passed to the player as is.
    pub async fn control(&mut self, action: ControlAction) -> Result<()> {
        match action {
            ControlAction::NextTrack => self.play_next().await.map(|_| ()),
            other => {
                self.config.client.control(other).await?;
                debug!("Control {:?} succeeded", other.as_str());
                Ok(())
            }
        }
    }

    /// Start the head of the queue and drop it once the player accepted it.
    pub async fn play_next(&mut self) -> Result<Track> {
        let next = self.queue.front().cloned().ok_or(Error::EmptyQueue)?;
        debug!("Starting queue head {} ({})", next.id, next.name);

        let result = self.config.client.play_specific(&next.id).await?;
        if !result.success {
            return Err(Error::PlaybackRejected {
                track_id: next.id,
                reason: result.error.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        self.queue.pop_front();
        self.save_queue().await?;
        Ok(next)
    }

    /// Current player status and the page built from it. A failed status
    /// request is logged and the page is built without it.
    pub async fn refresh(&self) -> QueueView {
        let current = match self.config.client.current_track().await {
            Ok(current) => Some(current),
            Err(e) => {
                error!("Failed to fetch current track: {e}");
                None
            }
        };
        self.view(current.as_ref())
    }

    pub fn view(&self, current: Option<&CurrentTrack>) -> QueueView {
        QueueView::build(
            &self.queue,
            current,
            self.theme,
            (self.time_zone.as_str(), self.resolved_time_zone()),
            Utc::now(),
        )
    }

    fn resolved_time_zone(&self) -> Tz {
        resolve_time_zone(&self.time_zone).unwrap_or_else(|e| {
            warn!("{e}, showing times in UTC");
            chrono_tz::UTC
        })
    }

    /// One tick of the poll loop.
    pub async fn poll_once(&mut self) -> Result<PollOutcome> {
        let current = self.config.client.current_track().await?;
        let mut outcome = PollOutcome::default();

        // A pause is not a stop: only playing -> stopped moves the queue on
        if current.state == PlayerState::Stopped && self.last_playing && !self.queue.is_empty() {
            info!("Playback stopped, starting next queued track");
            match self.play_next().await {
                Ok(track) => outcome.auto_advanced = Some(track),
                Err(e) => error!("Auto-advance failed: {e}"),
            }
        }

        self.last_playing = current.state == PlayerState::Playing;

        if self.queue.reconcile(&current.id) {
            self.save_queue().await?;
            outcome.natural_advance = true;
        }

        outcome.current = current;
        Ok(outcome)
    }

    /// Poll once and build the page for it. A failed poll still yields a
    /// page, marked as lacking player status.
    pub async fn tick(&mut self) -> QueueView {
        match self.poll_once().await {
            // The status fetched before starting a track is stale
            Ok(outcome) if outcome.auto_advanced.is_some() => self.refresh().await,
            Ok(outcome) => self.view(Some(&outcome.current)),
            Err(e) => {
                error!("Poll failed: {e}");
                self.view(None)
            }
        }
    }

    /// Poll the player until Ctrl-C, handing every refreshed page to `render`.
    pub async fn watch<F>(&mut self, mut render: F) -> Result<()>
    where
        F: FnMut(&QueueView),
    {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        info!(
            "Watching {} every {:?}",
            self.config.client.base_url(),
            self.config.poll_interval
        );
        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Stopping watch");
                    return Ok(());
                }
                _ = ticker.tick() => render(&self.tick().await),
            }
        }
    }

    pub async fn toggle_theme(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggled();
        self.config
            .storage
            .set_item(StorageKey::Theme, self.theme.as_str())
            .await?;
        debug!("Switched to {} mode", self.theme);
        Ok(self.theme)
    }

    pub async fn set_time_zone(&mut self, name: &str) -> Result<()> {
        resolve_time_zone(name)?;
        self.time_zone = name.to_string();
        self.config
            .storage
            .set_item(StorageKey::TimeZone, &self.time_zone)
            .await?;
        debug!("Time zone changed to {name}");
        Ok(())
    }

    pub fn time_zone_options(&self) -> Vec<TimeZoneOption> {
        time_zone_options(&self.time_zone)
    }
}
