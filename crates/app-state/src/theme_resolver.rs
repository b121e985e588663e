//! Light/dark preference resolution
//!
//! This module reconciles the persisted appearance choice, the platform's
//! reported color scheme and user toggles into a single observable flag.
//!
//! The resolver moves through `Uninitialized → Loading → Ready` exactly once.
//! While loading it shows the platform default; when the stored record has
//! been read (or failed to read) it settles and never loads again. Toggles
//! apply to the in-memory state immediately and persist in the background.
//! Storage failures are logged and published as events, never returned.

use app_ui::theme::{theme_for, Theme};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use storage::preferences::{PreferenceRecord, PreferenceStore, PREFERENCE_KEY};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

/// Storage failures the resolver absorbs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemePreferenceError {
    /// Store unreachable or errored on read
    #[error("Failed to read theme preference: {0}")]
    Read(String),

    /// Stored value is not valid JSON or lacks `isDark`
    #[error("Failed to parse theme preference: {0}")]
    Parse(String),

    /// Store errored on write
    #[error("Failed to write theme preference: {0}")]
    Write(String),
}

/// Color scheme reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlatformColorScheme {
    /// Platform prefers light
    Light,
    /// Platform prefers dark
    Dark,
    /// Platform did not say; treated as light
    #[default]
    Unknown,
}

impl PlatformColorScheme {
    /// Seed value for the dark flag
    pub fn is_dark(self) -> bool {
        matches!(self, PlatformColorScheme::Dark)
    }
}

impl From<Option<bool>> for PlatformColorScheme {
    fn from(is_dark: Option<bool>) -> Self {
        match is_dark {
            Some(true) => PlatformColorScheme::Dark,
            Some(false) => PlatformColorScheme::Light,
            None => PlatformColorScheme::Unknown,
        }
    }
}

/// Lifecycle phase of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverPhase {
    /// Constructed, not yet started
    Uninitialized,
    /// Seeded from the platform, waiting on the stored record
    Loading,
    /// Settled; the flag only changes through toggles
    Ready,
}

/// Observable resolver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolverState {
    /// Whether the dark theme is selected
    pub is_dark: bool,
    /// True until the stored preference has been consulted
    pub is_loading: bool,
}

impl ResolverState {
    /// The theme this state selects
    pub fn theme(&self) -> &'static Theme {
        theme_for(self.is_dark)
    }
}

/// Where the settled dark flag came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceSource {
    /// Adopted from the persisted record
    Stored,
    /// Kept the platform seed (no record, or the record was unusable)
    PlatformDefault,
    /// A toggle during loading took precedence over the stored record
    UserToggle,
}

/// Events published by the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    /// Loading finished
    Loaded {
        /// Settled dark flag
        is_dark: bool,
        /// Where it came from
        source: PreferenceSource,
    },
    /// The flag was flipped by the user
    Toggled {
        /// New dark flag
        is_dark: bool,
    },
    /// A record was written to the store
    Persisted {
        /// Dark flag that was written
        is_dark: bool,
    },
    /// A storage operation failed and was absorbed
    StorageFailed(ThemePreferenceError),
}

/// Theme resolver configuration
#[derive(Debug, Clone)]
pub struct ThemeResolverConfig {
    /// Key the preference record is stored under
    pub storage_key: String,
    /// Write the platform default when no record exists yet
    pub persist_default_on_first_load: bool,
    /// Capacity of the event broadcast channel
    pub event_buffer: usize,
}

impl Default for ThemeResolverConfig {
    fn default() -> Self {
        Self {
            storage_key: PREFERENCE_KEY.to_string(),
            persist_default_on_first_load: false,
            event_buffer: 16,
        }
    }
}

impl ThemeResolverConfig {
    /// Set the storage key
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Enable or disable writing the platform default on first load
    pub fn persist_default_on_first_load(mut self, enabled: bool) -> Self {
        self.persist_default_on_first_load = enabled;
        self
    }

    /// Set the event channel capacity (minimum 1)
    pub fn event_buffer(mut self, capacity: usize) -> Self {
        self.event_buffer = capacity.max(1);
        self
    }
}

#[derive(Debug)]
struct Core {
    phase: ResolverPhase,
    is_dark: bool,
    /// Set by any toggle before loading settles
    toggled: bool,
}

impl Core {
    fn snapshot(&self) -> ResolverState {
        ResolverState {
            is_dark: self.is_dark,
            is_loading: self.phase != ResolverPhase::Ready,
        }
    }
}

struct Inner {
    store: Arc<dyn PreferenceStore>,
    config: ThemeResolverConfig,
    core: RwLock<Core>,
    load_started: AtomicBool,
    state_tx: watch::Sender<ResolverState>,
    events_tx: broadcast::Sender<ThemeEvent>,
}

/// Resolves and persists the user's light/dark preference
///
/// One instance per app. Cloning yields another handle onto the same state.
/// [`start`](Self::start) and [`toggle_theme`](Self::toggle_theme) spawn
/// onto the current Tokio runtime and must be called from within one.
///
/// # Example
///
/// ```no_run
/// use app_state::theme_resolver::{PlatformColorScheme, ThemeResolver};
/// use std::sync::Arc;
/// use storage::MemoryPreferenceStore;
///
/// #[tokio::main]
/// async fn main() {
///     let resolver = ThemeResolver::with_defaults(Arc::new(MemoryPreferenceStore::new()));
///
///     resolver.start(PlatformColorScheme::Dark);
///     resolver.wait_ready().await;
///     assert!(resolver.is_dark());
///
///     resolver.toggle_theme().await.unwrap();
///     assert!(!resolver.theme().is_dark());
/// }
/// ```
#[derive(Clone)]
pub struct ThemeResolver {
    inner: Arc<Inner>,
}

impl ThemeResolver {
    /// Create a resolver over a preference store
    pub fn new(store: Arc<dyn PreferenceStore>, config: ThemeResolverConfig) -> Self {
        let core = Core {
            phase: ResolverPhase::Uninitialized,
            is_dark: false,
            toggled: false,
        };
        let (state_tx, _) = watch::channel(core.snapshot());
        let (events_tx, _) = broadcast::channel(config.event_buffer.max(1));

        Self {
            inner: Arc::new(Inner {
                store,
                config,
                core: RwLock::new(core),
                load_started: AtomicBool::new(false),
                state_tx,
                events_tx,
            }),
        }
    }

    /// Create a resolver with the default configuration
    pub fn with_defaults(store: Arc<dyn PreferenceStore>) -> Self {
        Self::new(store, ThemeResolverConfig::default())
    }

    /// Seed from the platform and spawn the one-time load
    ///
    /// The returned handle completes once the resolver is ready. Calling
    /// `start` again neither reseeds nor reloads.
    pub fn start(&self, platform: PlatformColorScheme) -> JoinHandle<()> {
        let resolver = self.clone();
        self.seed(platform);
        tokio::spawn(async move { resolver.inner.load().await })
    }

    /// Seed from the platform and load in place
    pub async fn initialize(&self, platform: PlatformColorScheme) {
        self.seed(platform);
        self.inner.load().await;
    }

    fn seed(&self, platform: PlatformColorScheme) {
        let state = {
            let mut core = self.inner.core.write();
            if core.phase != ResolverPhase::Uninitialized {
                tracing::debug!(phase = ?core.phase, "Theme resolver already started");
                return;
            }
            core.phase = ResolverPhase::Loading;
            if !core.toggled {
                core.is_dark = platform.is_dark();
            }
            self.inner.publish(&core)
        };
        tracing::debug!(?platform, is_dark = state.is_dark, "Theme resolver loading");
    }

    /// Current state snapshot
    pub fn state(&self) -> ResolverState {
        self.inner.core.read().snapshot()
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> ResolverPhase {
        self.inner.core.read().phase
    }

    /// Whether the dark theme is selected
    pub fn is_dark(&self) -> bool {
        self.inner.core.read().is_dark
    }

    /// Whether the stored preference is still being consulted
    pub fn is_loading(&self) -> bool {
        self.state().is_loading
    }

    /// The theme for the current flag
    pub fn theme(&self) -> &'static Theme {
        theme_for(self.is_dark())
    }

    /// Flip the dark flag and persist the new value
    ///
    /// The visible state changes before this returns. The write runs in the
    /// background; the handle completes when it has landed or failed. Rapid
    /// toggles are not coalesced, so their writes may land out of order.
    pub fn toggle_theme(&self) -> JoinHandle<()> {
        let is_dark = {
            let mut core = self.inner.core.write();
            core.is_dark = !core.is_dark;
            core.toggled = true;
            self.inner.publish(&core);
            core.is_dark
        };
        self.apply_user_choice(is_dark)
    }

    /// Select a theme explicitly
    ///
    /// Returns `None` without writing when the flag already has this value.
    pub fn set_dark(&self, is_dark: bool) -> Option<JoinHandle<()>> {
        {
            let mut core = self.inner.core.write();
            if core.is_dark == is_dark {
                return None;
            }
            core.is_dark = is_dark;
            core.toggled = true;
            self.inner.publish(&core);
        }
        Some(self.apply_user_choice(is_dark))
    }

    fn apply_user_choice(&self, is_dark: bool) -> JoinHandle<()> {
        tracing::debug!(is_dark, "Theme toggled");
        let _ = self.inner.events_tx.send(ThemeEvent::Toggled { is_dark });

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move { inner.persist(is_dark).await })
    }

    /// Wait until loading has settled
    pub async fn wait_ready(&self) {
        self.inner.wait_ready().await;
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<ResolverState> {
        self.inner.state_tx.subscribe()
    }

    /// Subscribe to resolver events
    pub fn subscribe_events(&self) -> broadcast::Receiver<ThemeEvent> {
        self.inner.events_tx.subscribe()
    }
}

impl std::fmt::Debug for ThemeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let core = self.inner.core.read();
        f.debug_struct("ThemeResolver")
            .field("phase", &core.phase)
            .field("is_dark", &core.is_dark)
            .field("storage_key", &self.inner.config.storage_key)
            .finish()
    }
}

impl Inner {
    /// Push the current state to watchers
    ///
    /// Called with the core write guard held so watchers never observe a
    /// state older than the one `state()` returns.
    fn publish(&self, core: &Core) -> ResolverState {
        let state = core.snapshot();
        self.state_tx.send_replace(state);
        state
    }

    async fn wait_ready(&self) {
        let mut rx = self.state_tx.subscribe();
        // The sender lives as long as `self`, so this only returns once ready
        let _ = rx.wait_for(|state| !state.is_loading).await;
    }

    fn report(&self, error: ThemePreferenceError) {
        tracing::warn!(error = %error, "Theme preference storage failure");
        let _ = self.events_tx.send(ThemeEvent::StorageFailed(error));
    }

    async fn read_preference(&self) -> Result<Option<bool>, ThemePreferenceError> {
        let stored = self
            .store
            .get(&self.config.storage_key)
            .await
            .map_err(|e| ThemePreferenceError::Read(e.to_string()))?;

        let Some(text) = stored else {
            return Ok(None);
        };

        let record = PreferenceRecord::from_json(&text)
            .map_err(|e| ThemePreferenceError::Parse(e.to_string()))?;
        Ok(Some(record.is_dark))
    }

    async fn load(&self) {
        if self.load_started.swap(true, Ordering::SeqCst) {
            tracing::debug!("Theme preference load already running; waiting for it");
            self.wait_ready().await;
            return;
        }

        let outcome = self.read_preference().await;

        let (state, source, persist_default) = {
            let mut core = self.core.write();
            let source = match outcome {
                _ if core.toggled => PreferenceSource::UserToggle,
                Ok(Some(stored)) => {
                    core.is_dark = stored;
                    PreferenceSource::Stored
                }
                Ok(None) | Err(_) => PreferenceSource::PlatformDefault,
            };
            core.phase = ResolverPhase::Ready;
            let persist_default = self.config.persist_default_on_first_load
                && matches!(outcome, Ok(None))
                && source == PreferenceSource::PlatformDefault;
            (self.publish(&core), source, persist_default)
        };

        if let Err(error) = outcome {
            self.report(error);
        }

        match source {
            PreferenceSource::Stored => {
                tracing::info!(is_dark = state.is_dark, "Adopted stored theme preference")
            }
            _ => tracing::debug!(is_dark = state.is_dark, ?source, "Theme preference settled"),
        }

        let _ = self.events_tx.send(ThemeEvent::Loaded {
            is_dark: state.is_dark,
            source,
        });

        if persist_default {
            self.persist(state.is_dark).await;
        }
    }

    async fn persist(&self, is_dark: bool) {
        let result = match PreferenceRecord::now(is_dark).to_json() {
            Ok(json) => self
                .store
                .set(&self.config.storage_key, json)
                .await
                .map_err(|e| ThemePreferenceError::Write(e.to_string())),
            Err(e) => Err(ThemePreferenceError::Write(e.to_string())),
        };

        match result {
            Ok(()) => {
                tracing::debug!(is_dark, "Persisted theme preference");
                let _ = self.events_tx.send(ThemeEvent::Persisted { is_dark });
            }
            Err(error) => self.report(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::theme::{DARK_THEME, LIGHT_THEME};
    use async_trait::async_trait;
    use mockall::mock;
    use std::time::Duration;
    use storage::preferences::{MemoryPreferenceStore, PreferenceStoreError};

    mock! {
        Store {}

        #[async_trait]
        impl PreferenceStore for Store {
            async fn get(&self, key: &str) -> storage::preferences::Result<Option<String>>;
            async fn set(&self, key: &str, value: String) -> storage::preferences::Result<()>;
        }
    }

    /// Store whose reads take a fixed time to complete
    struct SlowStore {
        value: String,
        delay: Duration,
    }

    impl SlowStore {
        fn new(value: String, delay: Duration) -> Self {
            Self { value, delay }
        }
    }

    #[async_trait]
    impl PreferenceStore for SlowStore {
        async fn get(&self, _key: &str) -> storage::preferences::Result<Option<String>> {
            tokio::time::sleep(self.delay).await;
            Ok(Some(self.value.clone()))
        }

        async fn set(&self, _key: &str, _value: String) -> storage::preferences::Result<()> {
            Ok(())
        }
    }

    fn stored(is_dark: bool) -> String {
        PreferenceRecord::now(is_dark).to_json().unwrap()
    }

    fn resolver_over(store: &Arc<MemoryPreferenceStore>) -> ThemeResolver {
        ThemeResolver::with_defaults(store.clone())
    }

    // ==========================================================================
    // Platform Seed Tests
    // ==========================================================================

    #[test]
    fn test_platform_scheme_from_option() {
        assert_eq!(PlatformColorScheme::from(Some(true)), PlatformColorScheme::Dark);
        assert_eq!(PlatformColorScheme::from(Some(false)), PlatformColorScheme::Light);
        assert_eq!(PlatformColorScheme::from(None), PlatformColorScheme::Unknown);
        assert!(!PlatformColorScheme::Unknown.is_dark());
        assert!(PlatformColorScheme::Dark.is_dark());
    }

    #[test]
    fn test_config_builder() {
        let config = ThemeResolverConfig::default()
            .storage_key("custom:key")
            .persist_default_on_first_load(true)
            .event_buffer(0);

        assert_eq!(config.storage_key, "custom:key");
        assert!(config.persist_default_on_first_load);
        assert_eq!(config.event_buffer, 1);
        assert_eq!(ThemeResolverConfig::default().storage_key, PREFERENCE_KEY);
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);

        assert_eq!(resolver.phase(), ResolverPhase::Uninitialized);
        assert!(resolver.is_loading());
        assert_eq!(store.read_count(), 0);
    }

    // ==========================================================================
    // Load Tests
    // ==========================================================================

    #[tokio::test]
    async fn test_start_seeds_platform_default_before_load() {
        let store = Arc::new(MemoryPreferenceStore::with_value(PREFERENCE_KEY, stored(false)));
        let resolver = resolver_over(&store);

        let handle = resolver.start(PlatformColorScheme::Dark);
        // Seeded synchronously, record not consulted yet
        assert_eq!(resolver.phase(), ResolverPhase::Loading);
        assert_eq!(resolver.state(), ResolverState { is_dark: true, is_loading: true });

        handle.await.unwrap();
        assert_eq!(resolver.state(), ResolverState { is_dark: false, is_loading: false });
        assert_eq!(resolver.phase(), ResolverPhase::Ready);
    }

    #[tokio::test]
    async fn test_load_adopts_stored_preference() {
        let store = Arc::new(MemoryPreferenceStore::with_value(PREFERENCE_KEY, stored(true)));
        let resolver = resolver_over(&store);
        let mut events = resolver.subscribe_events();

        resolver.initialize(PlatformColorScheme::Light).await;

        assert!(resolver.is_dark());
        assert!(!resolver.is_loading());
        assert_eq!(
            events.recv().await.unwrap(),
            ThemeEvent::Loaded { is_dark: true, source: PreferenceSource::Stored }
        );
    }

    #[tokio::test]
    async fn test_missing_record_keeps_platform_default() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);

        resolver.initialize(PlatformColorScheme::Dark).await;

        assert_eq!(resolver.state(), ResolverState { is_dark: true, is_loading: false });
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_platform_defaults_to_light() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);

        resolver.initialize(PlatformColorScheme::Unknown).await;

        assert!(!resolver.is_dark());
        assert!(std::ptr::eq(resolver.theme(), &LIGHT_THEME));
    }

    #[tokio::test]
    async fn test_read_failure_falls_back_to_platform_default() {
        let store = Arc::new(MemoryPreferenceStore::with_value(PREFERENCE_KEY, stored(false)));
        store.fail_reads(true);
        let resolver = resolver_over(&store);
        let mut events = resolver.subscribe_events();

        resolver.initialize(PlatformColorScheme::Dark).await;

        assert_eq!(resolver.state(), ResolverState { is_dark: true, is_loading: false });
        assert!(matches!(
            events.recv().await.unwrap(),
            ThemeEvent::StorageFailed(ThemePreferenceError::Read(_))
        ));
        assert_eq!(
            events.recv().await.unwrap(),
            ThemeEvent::Loaded { is_dark: true, source: PreferenceSource::PlatformDefault }
        );
    }

    #[tokio::test]
    async fn test_parse_failure_falls_back_to_platform_default() {
        for garbage in ["not json", r#"{"lastUpdated":"2025-01-01T00:00:00Z"}"#, r#"{"isDark":1}"#] {
            let store = Arc::new(MemoryPreferenceStore::with_value(PREFERENCE_KEY, garbage));
            let resolver = resolver_over(&store);
            let mut events = resolver.subscribe_events();

            resolver.initialize(PlatformColorScheme::Light).await;

            assert_eq!(resolver.state(), ResolverState { is_dark: false, is_loading: false });
            assert!(matches!(
                events.recv().await.unwrap(),
                ThemeEvent::StorageFailed(ThemePreferenceError::Parse(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_load_happens_once() {
        let store = Arc::new(MemoryPreferenceStore::with_value(PREFERENCE_KEY, stored(true)));
        let resolver = resolver_over(&store);

        resolver.start(PlatformColorScheme::Light).await.unwrap();
        resolver.start(PlatformColorScheme::Light).await.unwrap();
        resolver.initialize(PlatformColorScheme::Light).await;

        assert_eq!(store.read_count(), 1);
        assert_eq!(resolver.phase(), ResolverPhase::Ready);
    }

    #[tokio::test]
    async fn test_loading_flag_clears_exactly_once() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);
        let mut events = resolver.subscribe_events();

        resolver.start(PlatformColorScheme::Dark).await.unwrap();
        for _ in 0..2 {
            resolver.toggle_theme().await.unwrap();
            assert!(!resolver.is_loading());
        }
        resolver.start(PlatformColorScheme::Light).await.unwrap();
        assert!(!resolver.is_loading());

        let mut loaded = 0;
        while let Ok(event) = events.try_recv() {
            if matches!(event, ThemeEvent::Loaded { .. }) {
                loaded += 1;
            }
        }
        assert_eq!(loaded, 1);
    }

    #[tokio::test]
    async fn test_persist_default_on_first_load() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let config = ThemeResolverConfig::default().persist_default_on_first_load(true);
        let resolver = ThemeResolver::new(store.clone(), config);

        resolver.initialize(PlatformColorScheme::Dark).await;

        let text = store.value(PREFERENCE_KEY).await.unwrap();
        assert!(PreferenceRecord::from_json(&text).unwrap().is_dark);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let store = Arc::new(MemoryPreferenceStore::with_value("other:key", stored(true)));
        let config = ThemeResolverConfig::default().storage_key("other:key");
        let resolver = ThemeResolver::new(store.clone(), config);

        resolver.initialize(PlatformColorScheme::Light).await;
        assert!(resolver.is_dark());

        resolver.toggle_theme().await.unwrap();
        assert!(store.value("other:key").await.is_some());
        assert!(store.value(PREFERENCE_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_timestamp_keeps_stored_flag() {
        for stamp in [r#""not a date""#, "null", "1700000000000"] {
            let text = format!(r#"{{"isDark":true,"lastUpdated":{stamp}}}"#);
            let store = Arc::new(MemoryPreferenceStore::with_value(PREFERENCE_KEY, text));
            let resolver = resolver_over(&store);

            resolver.initialize(PlatformColorScheme::Light).await;

            assert_eq!(
                resolver.state(),
                ResolverState { is_dark: true, is_loading: false },
                "lastUpdated={stamp}"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_initialize_waits_for_load_in_flight() {
        let store = Arc::new(SlowStore::new(stored(true), Duration::from_millis(100)));
        let resolver = ThemeResolver::with_defaults(store);

        let load = resolver.start(PlatformColorScheme::Light);
        tokio::task::yield_now().await;
        assert!(resolver.is_loading());

        resolver.initialize(PlatformColorScheme::Light).await;

        assert_eq!(resolver.state(), ResolverState { is_dark: true, is_loading: false });
        load.await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_watchers_agree_with_state_under_contention() {
        for _ in 0..50 {
            let store = Arc::new(MemoryPreferenceStore::with_value(PREFERENCE_KEY, stored(false)));
            let resolver = resolver_over(&store);
            let rx = resolver.subscribe();

            let load = resolver.start(PlatformColorScheme::Light);
            let toggles: Vec<_> = (0..3)
                .map(|_| {
                    let resolver = resolver.clone();
                    tokio::spawn(async move { resolver.toggle_theme().await })
                })
                .collect();

            load.await.unwrap();
            for toggle in toggles {
                toggle.await.unwrap().unwrap();
            }

            assert_eq!(*rx.borrow(), resolver.state());
            assert!(!rx.borrow().is_loading);
        }
    }

    // ==========================================================================
    // Toggle Tests
    // ==========================================================================

    #[tokio::test]
    async fn test_toggle_updates_state_before_write() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);
        resolver.initialize(PlatformColorScheme::Light).await;

        let handle = resolver.toggle_theme();
        // Optimistic: visible before the write lands
        assert!(resolver.is_dark());
        assert!(std::ptr::eq(resolver.theme(), &DARK_THEME));

        handle.await.unwrap();
        let text = store.value(PREFERENCE_KEY).await.unwrap();
        assert!(PreferenceRecord::from_json(&text).unwrap().is_dark);
    }

    #[tokio::test]
    async fn test_toggle_overwrites_previous_record() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);
        resolver.initialize(PlatformColorScheme::Light).await;

        resolver.toggle_theme().await.unwrap();
        resolver.toggle_theme().await.unwrap();

        let text = store.value(PREFERENCE_KEY).await.unwrap();
        assert!(!PreferenceRecord::from_json(&text).unwrap().is_dark);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_in_memory_state() {
        let store = Arc::new(MemoryPreferenceStore::new());
        store.fail_writes(true);
        let resolver = resolver_over(&store);
        resolver.initialize(PlatformColorScheme::Light).await;
        let mut events = resolver.subscribe_events();

        resolver.toggle_theme().await.unwrap();

        // No rollback
        assert!(resolver.is_dark());
        assert_eq!(events.recv().await.unwrap(), ThemeEvent::Toggled { is_dark: true });
        assert!(matches!(
            events.recv().await.unwrap(),
            ThemeEvent::StorageFailed(ThemePreferenceError::Write(_))
        ));
        assert_eq!(store.value(PREFERENCE_KEY).await, None);
    }

    #[tokio::test]
    async fn test_toggle_during_loading_wins_over_stored_record() {
        let store = Arc::new(MemoryPreferenceStore::with_value(PREFERENCE_KEY, stored(false)));
        let resolver = resolver_over(&store);

        let load = resolver.start(PlatformColorScheme::Light);
        let write = resolver.toggle_theme();
        assert!(resolver.is_dark());
        assert!(resolver.is_loading());

        load.await.unwrap();
        write.await.unwrap();

        assert_eq!(resolver.state(), ResolverState { is_dark: true, is_loading: false });
    }

    #[tokio::test]
    async fn test_set_dark_skips_unchanged_value() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);
        resolver.initialize(PlatformColorScheme::Dark).await;

        assert!(resolver.set_dark(true).is_none());
        resolver.set_dark(false).unwrap().await.unwrap();

        assert!(!resolver.is_dark());
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_theme_tracks_flag() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);
        resolver.initialize(PlatformColorScheme::Unknown).await;

        for _ in 0..4 {
            resolver.toggle_theme().await.unwrap();
            let state = resolver.state();
            assert!(std::ptr::eq(resolver.theme(), state.theme()));
            assert_eq!(resolver.theme().is_dark(), state.is_dark);
        }
    }

    #[tokio::test]
    async fn test_subscribers_see_toggles() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let resolver = resolver_over(&store);
        resolver.initialize(PlatformColorScheme::Light).await;
        let mut rx = resolver.subscribe();

        assert_eq!(*rx.borrow(), ResolverState { is_dark: false, is_loading: false });

        let write = resolver.toggle_theme();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), ResolverState { is_dark: true, is_loading: false });
        write.await.unwrap();
    }

    // ==========================================================================
    // Store Contract Tests
    // ==========================================================================

    #[tokio::test]
    async fn test_store_errors_never_reach_the_caller() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(PreferenceStoreError::Unavailable("offline".into())));
        store
            .expect_set()
            .withf(|key, value| key.to_string() == PREFERENCE_KEY && value.contains("\"isDark\":true"))
            .times(1)
            .returning(|_, _| Err(PreferenceStoreError::Unavailable("offline".into())));

        let resolver = ThemeResolver::with_defaults(Arc::new(store));
        resolver.initialize(PlatformColorScheme::Light).await;
        resolver.toggle_theme().await.unwrap();

        assert_eq!(resolver.state(), ResolverState { is_dark: true, is_loading: false });
    }

    #[tokio::test]
    async fn test_reads_use_configured_key() {
        let mut store = MockStore::new();
        store
            .expect_get()
            .withf(|key| key.to_string() == "scoped:theme")
            .times(1)
            .returning(|_| Ok(Some(r#"{"isDark":true,"lastUpdated":"2025-06-01T00:00:00Z"}"#.into())));

        let config = ThemeResolverConfig::default().storage_key("scoped:theme");
        let resolver = ThemeResolver::new(Arc::new(store), config);
        resolver.initialize(PlatformColorScheme::Light).await;

        assert!(resolver.is_dark());
    }
}
