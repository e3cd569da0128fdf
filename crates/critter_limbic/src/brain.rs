//! The Brain: one toy's emotions plus the heartbeat that drives them
//!
//! The Brain does not run itself. It owns a handle to a background task that
//! closes over the shared emotion state, and exposes:
//! - `interact()` for sensor events, which select an action immediately
//! - snapshots, bulk replacement and a watch channel for observers
//! - `shutdown()` to stop the heartbeat, even mid-delay

use crate::executor::{ActionExecutor, LogExecutor};
use crate::heartbeat::HeartbeatConfig;
use anyhow::Context;
use critter_core::{
    random_delay, select, stress, BrainConfig, EmotionError, EmotionState, EmotionValues,
    Interaction, RandomSource, RuleTable, SystemRandom,
};
use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;

/// State shared between the Brain handle and its heartbeat task.
struct Shared<P> {
    /// Current emotions (protected by RwLock; every update is holistic)
    state: RwLock<EmotionState>,

    /// Immutable rule table, possibly shared with other brains
    rules: Arc<RuleTable<P>>,

    /// Random source for delay jitter and tie-breaking. Never held across an await.
    rng: Mutex<Box<dyn RandomSource>>,

    /// Receives every selected payload
    executor: Arc<dyn ActionExecutor<P>>,

    /// Watch channel for state updates
    state_watch_tx: watch::Sender<EmotionState>,
}

impl<P> Shared<P>
where
    P: Clone + Debug + Send + Sync + 'static,
{
    async fn snapshot(&self) -> EmotionState {
        *self.state.read().await
    }

    async fn decay(&self, rate: u8) -> EmotionState {
        let mut state = self.state.write().await;
        state.decay(rate);
        let _ = self.state_watch_tx.send(*state);
        *state
    }

    async fn replace(&self, values: EmotionValues) -> Result<EmotionState, EmotionError> {
        let mut state = self.state.write().await;
        state.set(values)?;
        let _ = self.state_watch_tx.send(*state);
        Ok(*state)
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        // A draw never leaves the source half-updated, so poisoning is ignored.
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn draw_delay(&self, stress: u8) -> u32 {
        random_delay(stress, &mut **self.rng())
    }

    /// Select against the current snapshot and hand the result to the executor.
    async fn act(&self, interaction: Interaction) -> Option<P> {
        let emotions = self.snapshot().await;
        let picked = select(&*self.rules, &emotions, interaction, &mut **self.rng()).cloned();

        let Some(payload) = picked else {
            tracing::info!(
                %interaction,
                "No runnable actions found for current state ({})",
                emotions
            );
            return None;
        };

        tracing::info!(%interaction, "Selected action: {:?}", payload);
        if let Err(e) = self.executor.execute(&payload).await {
            tracing::warn!("Action executor failed for {:?}: {:#}", payload, e);
        }
        Some(payload)
    }
}

/// One toy's personality.
///
/// Must be created inside a Tokio runtime: construction spawns the heartbeat.
pub struct Brain<P = String> {
    shared: Arc<Shared<P>>,

    /// Receiver for state updates (cloneable)
    state_watch_rx: watch::Receiver<EmotionState>,

    /// Flipped to `true` to stop the heartbeat
    shutdown_tx: watch::Sender<bool>,

    /// Background heartbeat task; `None` once shut down
    heartbeat: Option<JoinHandle<()>>,

    heartbeat_config: HeartbeatConfig,
}

impl<P> Brain<P>
where
    P: Clone + Debug + Send + Sync + 'static,
{
    /// Create a brain with default heartbeat, entropy-seeded randomness and
    /// all emotions at zero.
    pub fn new(rules: RuleTable<P>, executor: Arc<dyn ActionExecutor<P>>) -> Self {
        Self::with_config(
            Arc::new(rules),
            executor,
            HeartbeatConfig::default(),
            Box::new(SystemRandom::new()),
            EmotionState::new(),
        )
    }

    /// Create a brain from the `[brain]` section of the config file.
    pub fn from_config(
        config: &BrainConfig,
        rules: Arc<RuleTable<P>>,
        executor: Arc<dyn ActionExecutor<P>>,
    ) -> Self {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(SystemRandom::seeded(seed)),
            None => Box::new(SystemRandom::new()),
        };
        Self::with_config(rules, executor, HeartbeatConfig::from(config), rng, config.initial)
    }

    /// Create with custom configuration
    pub fn with_config(
        rules: Arc<RuleTable<P>>,
        executor: Arc<dyn ActionExecutor<P>>,
        heartbeat_config: HeartbeatConfig,
        rng: Box<dyn RandomSource>,
        initial: EmotionState,
    ) -> Self {
        let (state_watch_tx, state_watch_rx) = watch::channel(initial);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let shared = Arc::new(Shared {
            state: RwLock::new(initial),
            rules,
            rng: Mutex::new(rng),
            executor,
            state_watch_tx,
        });

        tracing::debug!(
            rules = shared.rules.len(),
            decay_rate = heartbeat_config.decay_rate,
            "Starting brain with {}",
            initial
        );

        let mut brain = Self {
            shared,
            state_watch_rx,
            shutdown_tx,
            heartbeat: None,
            heartbeat_config,
        };
        brain.spawn_heartbeat(shutdown_rx);
        brain
    }

    /// Spawn the background heartbeat task
    fn spawn_heartbeat(&mut self, mut shutdown_rx: watch::Receiver<bool>) {
        let shared = Arc::clone(&self.shared);
        let decay_rate = self.heartbeat_config.decay_rate;
        let tick_unit = self.heartbeat_config.tick_unit;

        self.heartbeat = Some(tokio::spawn(async move {
            loop {
                if *shutdown_rx.borrow() {
                    break;
                }

                let emotions = shared.decay(decay_rate).await;
                let stress = stress(&emotions);
                let delay = shared.draw_delay(stress);
                tracing::debug!(stress, delay, "calculated stress");

                tokio::select! {
                    _ = tokio::time::sleep(tick_unit * delay) => {}
                    // Either a stop request or the Brain was dropped.
                    _ = shutdown_rx.changed() => break,
                }

                shared.act(Interaction::None).await;
            }
            tracing::debug!("Heartbeat stopped");
        }));
    }

    /// React to a sensor event right away: no decay, no delay.
    ///
    /// Returns the payload that was handed to the executor, or `None` if no
    /// rule matched.
    pub async fn interact(&self, interaction: Interaction) -> Option<P> {
        self.shared.act(interaction).await
    }

    /// Get a snapshot of the current emotions
    pub async fn emotions(&self) -> EmotionState {
        self.shared.snapshot().await
    }

    /// Replace all emotions at once. Out-of-range values are rejected and
    /// the current state is kept.
    pub async fn set_emotions(&self, values: EmotionValues) -> Result<EmotionState, EmotionError> {
        self.shared.replace(values).await
    }

    /// Current stress, as it would scale the next idle delay
    pub async fn stress(&self) -> u8 {
        stress(&self.emotions().await)
    }

    /// Subscribe to state updates
    pub fn subscribe(&self) -> watch::Receiver<EmotionState> {
        self.state_watch_rx.clone()
    }

    pub fn rules(&self) -> &RuleTable<P> {
        &self.shared.rules
    }

    pub fn heartbeat_config(&self) -> &HeartbeatConfig {
        &self.heartbeat_config
    }

    pub fn is_running(&self) -> bool {
        self.heartbeat.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the heartbeat and wait for it to finish. Interrupts a pending delay.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        let _ = self.shutdown_tx.send(true);
        if let Some(handle) = self.heartbeat.take() {
            handle.await.context("Heartbeat task panicked")?;
        }
        Ok(())
    }
}

impl Brain<String> {
    /// A brain running the default idle table, logging its actions.
    pub fn idle() -> Self {
        Self::new(RuleTable::<String>::default(), Arc::new(LogExecutor))
    }
}

impl<P> Drop for Brain<P> {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}
