use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use newsdesk_core::{Page, RequestSpec, RequestToken};
use newsdesk_logging::newsdesk_info;

use crate::dispatch::{DispatchSettings, Dispatcher, ReqwestDispatcher};
use crate::EngineEvent;

enum EngineCommand {
    Dispatch {
        page: Page,
        token: RequestToken,
        request: RequestSpec,
    },
}

/// Runs dispatches on a background tokio runtime and reports completions
/// over a channel. Each command becomes its own task, so requests overlap
/// and complete in whatever order the servers answer.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: DispatchSettings) -> std::io::Result<Self> {
        Self::with_dispatcher(Arc::new(ReqwestDispatcher::new(settings)))
    }

    pub fn with_dispatcher(dispatcher: Arc<dyn Dispatcher>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let dispatcher = dispatcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(dispatcher.as_ref(), command, event_tx).await;
                });
            }
            newsdesk_info!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn dispatch(&self, page: Page, token: RequestToken, request: RequestSpec) {
        let _ = self.cmd_tx.send(EngineCommand::Dispatch {
            page,
            token,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next completion.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    dispatcher: &dyn Dispatcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Dispatch {
            page,
            token,
            request,
        } => {
            let result = dispatcher.dispatch(page, &request).await;
            let _ = event_tx.send(EngineEvent::Completed {
                page,
                token,
                result,
            });
        }
    }
}
