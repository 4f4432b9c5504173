//! Application orchestration layer
//!
//! Wires the store worker, the input thread and the renderer together and runs the render
//! loop. State changes are delegated to [`RenderLoopState`]; this module only moves messages.

use crate::config::Settings;
use crate::contact::{LinkLauncher, OpenOutcome};
use crate::error::{MedlistError, Result};
use crate::input::{spawn_input_thread, InputAction};
use crate::render::protocol::{StoreCommand, StoreResponse};
use crate::render::ui::{UIRenderer, ViewState};
use crate::render::RenderLoopState;
use crate::store::worker::store_worker_loop;
use crate::store::{JsonFileSource, RecordSource, RecordStore};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 16;

/// Application orchestrator - owns the components, not their state
pub struct Application {
    source: Arc<dyn RecordSource>,
    ui_renderer: Box<dyn UIRenderer>,
    settings: Settings,
    launcher: Arc<LinkLauncher>,
}

impl Application {
    /// Create the application for a JSON data file
    pub fn new(data_path: &Path, ui_renderer: Box<dyn UIRenderer>, settings: Settings) -> Result<Self> {
        let source = JsonFileSource::open(data_path)?;
        Ok(Self::with_source(Arc::new(source), ui_renderer, settings))
    }

    pub fn with_source(
        source: Arc<dyn RecordSource>,
        ui_renderer: Box<dyn UIRenderer>,
        settings: Settings,
    ) -> Self {
        Self {
            source,
            ui_renderer,
            settings,
            launcher: Arc::new(LinkLauncher::system()),
        }
    }

    /// Replace the platform link launcher
    pub fn with_launcher(mut self, launcher: LinkLauncher) -> Self {
        self.launcher = Arc::new(launcher);
        self
    }

    /// Run until the user quits. The terminal is restored even when the loop fails.
    pub async fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let input_thread = spawn_input_thread(
            input_tx,
            Arc::clone(&shutdown),
            self.settings.poll_interval,
        );

        let result = self.run_loop(input_rx).await;

        shutdown.store(true, Ordering::SeqCst);
        if input_thread.join().is_err() {
            log::error!("input thread panicked");
        }

        let cleanup = self.ui_renderer.cleanup();
        result.and(cleanup)
    }

    /// Render loop over an input channel. Spawns and shuts down the store worker.
    pub async fn run_loop(&mut self, mut input_rx: mpsc::UnboundedReceiver<InputAction>) -> Result<()> {
        let (store_tx, store_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (response_tx, mut response_rx) = mpsc::channel::<StoreResponse>(CHANNEL_CAPACITY);
        let (link_tx, mut link_rx) = mpsc::unbounded_channel::<OpenOutcome>();
        let worker = tokio::spawn(store_worker_loop(
            store_rx,
            response_tx,
            Arc::clone(&self.source),
        ));

        let (width, height) = self.ui_renderer.get_terminal_size()?;
        let mut view_state = ViewState::new(
            self.source.location(),
            width,
            height,
            self.settings.initial_tab,
            self.settings.page_size,
        );
        let mut store = RecordStore::pending();
        let mut loop_state = RenderLoopState::new(Arc::clone(&self.launcher), link_tx);

        log::debug!("loading {}", self.source.location().display());
        let result = async {
            loop_state.request_load(&mut store, &store_tx).await?;
            self.ui_renderer.render(&view_state, &store)?;

            loop {
                tokio::select! {
                    action = input_rx.recv() => {
                        let Some(action) = action else { break };
                        let running = loop_state
                            .process_action(action, &mut view_state, &mut store, &store_tx)
                            .await?;
                        if !running {
                            break;
                        }
                    }
                    Some(response) = response_rx.recv() => {
                        loop_state.handle_response(response, &mut view_state, &mut store);
                    }
                    Some(outcome) = link_rx.recv() => {
                        loop_state.handle_link_outcome(outcome, &mut view_state);
                    }
                }
                self.ui_renderer.render(&view_state, &store)?;
            }
            Ok::<(), MedlistError>(())
        }
        .await;

        let _ = store_tx.send(StoreCommand::Shutdown).await;
        drop(store_tx);
        if let Err(err) = worker.await {
            log::error!("store worker failed: {err}");
        }
        result
    }
}
