//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app, and event handler. It runs the
//! main loop: render → handle events → issue requests → apply completions.
//! Backend calls run as spawned tasks reporting back over a channel, so the
//! UI never waits on the network.

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views::render;
use crate::backend::Backend;
use crate::catalog::CatalogLoader;
use crate::descriptor::CatalogSnapshot;
use crate::error::Result as ToolhubResult;
use crate::hub::{Completion, execute};
use crate::widgets::WidgetRequest;
use eyre::Result;
use log::info;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Outcome of a spawned backend call
#[derive(Debug)]
pub enum BackendEvent {
    CatalogLoaded(ToolhubResult<CatalogSnapshot>),
    Widget(Completion),
}

/// Main TUI runner that owns the event loop.
pub struct TuiRunner {
    terminal: Tui,
    app: App,
    event_handler: EventHandler,
    backend: Arc<dyn Backend>,
    tx: UnboundedSender<BackendEvent>,
    rx: UnboundedReceiver<BackendEvent>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, app: App, backend: Arc<dyn Backend>, event_handler: EventHandler) -> Self {
        let (tx, rx) = unbounded_channel();
        Self {
            terminal,
            app,
            event_handler,
            backend,
            tx,
            rx,
        }
    }

    /// Run the main TUI loop.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop, tick every {:?}", self.event_handler.tick_rate());
        spawn_catalog_load(self.backend.clone(), self.tx.clone());

        loop {
            // 1. Render current state
            self.terminal.draw(|f| render(&self.app, f))?;

            // 2. Handle events (keyboard, tick)
            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Tick | Event::Resize(_, _) => {}
            }

            // 3. Issue requests queued by the key handler
            for request in self.app.take_requests() {
                spawn_request(self.backend.clone(), self.tx.clone(), request);
            }

            // 4. Apply whatever completed meanwhile
            drain(&mut self.rx, &mut self.app);

            if self.app.should_quit() {
                break;
            }
        }

        info!("TUI main loop ended");
        Ok(())
    }
}

fn spawn_catalog_load(backend: Arc<dyn Backend>, tx: UnboundedSender<BackendEvent>) {
    tokio::spawn(async move {
        let outcome = CatalogLoader::fetch(backend.as_ref()).await;
        // receiver gone means the UI has exited
        let _ = tx.send(BackendEvent::CatalogLoaded(outcome));
    });
}

fn spawn_request(backend: Arc<dyn Backend>, tx: UnboundedSender<BackendEvent>, request: WidgetRequest) {
    log::debug!("Issuing {} {}", request.instance, request.path);
    tokio::spawn(async move {
        let completion = execute(backend.as_ref(), request).await;
        let _ = tx.send(BackendEvent::Widget(completion));
    });
}

/// Apply every queued backend event to `app`, in arrival order
pub fn drain(rx: &mut UnboundedReceiver<BackendEvent>, app: &mut App) -> usize {
    let mut applied = 0;
    while let Ok(event) = rx.try_recv() {
        match event {
            BackendEvent::CatalogLoaded(outcome) => app.finish_catalog(outcome),
            BackendEvent::Widget(completion) => {
                app.apply(completion);
            }
        }
        applied += 1;
    }
    applied
}
