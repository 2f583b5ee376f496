//! Engine acquisition state machine.
//!
//! Drives the strict load order: engine module first, worker source
//! applied, viewer script second, then the bootstrap function. If the
//! script has not installed its bootstrap by the time we look, the
//! whole sequence is retried once after yielding, then the loader
//! waits a bounded interval on the readiness signal before giving up.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::constants::BOOTSTRAP_WAIT;
use crate::engine::{BootstrapFn, EngineProvider};
use crate::error::{ViewerError, ViewerResult};
use crate::host::HostWindow;
use crate::options::ViewerOptions;

/// Where the loader currently is in the acquisition sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    LoadingLibrary,
    LoadingViewerScript,
    AwaitingBootstrap,
    Ready,
    Failed,
}

/// One-shot loader for the engine module and viewer script.
pub struct EngineLoader {
    window: Arc<HostWindow>,
    state: LoadState,
}

impl EngineLoader {
    pub fn new(window: Arc<HostWindow>) -> Self {
        Self {
            window,
            state: LoadState::NotLoaded,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Run the acquisition sequence to completion, returning the
    /// bootstrap function ready to invoke.
    pub async fn load(
        &mut self,
        provider: &dyn EngineProvider,
        options: &ViewerOptions,
    ) -> ViewerResult<BootstrapFn> {
        match self.attempt(provider, options).await {
            Ok(Some(bootstrap)) => {
                self.transition(LoadState::Ready);
                return Ok(bootstrap);
            }
            Ok(None) => {
                debug!("Bootstrap not yet installed, retrying after yield");
            }
            Err(e) => {
                self.transition(LoadState::Failed);
                return Err(e);
            }
        }

        // One full deferred retry, mirroring a script that registers
        // its bootstrap a tick after evaluation.
        tokio::task::yield_now().await;
        match self.attempt(provider, options).await {
            Ok(Some(bootstrap)) => {
                self.transition(LoadState::Ready);
                return Ok(bootstrap);
            }
            Ok(None) => {}
            Err(e) => {
                self.transition(LoadState::Failed);
                return Err(e);
            }
        }

        self.transition(LoadState::AwaitingBootstrap);
        match tokio::time::timeout(BOOTSTRAP_WAIT, self.window.wait_for_bootstrap()).await {
            Ok(bootstrap) => {
                self.transition(LoadState::Ready);
                Ok(bootstrap)
            }
            Err(_) => {
                warn!(
                    "Viewer bootstrap did not appear within {:?}",
                    BOOTSTRAP_WAIT
                );
                self.transition(LoadState::Failed);
                Err(ViewerError::BootstrapUnavailable)
            }
        }
    }

    /// One pass through the sequence. `Ok(None)` means everything
    /// loaded but the bootstrap slot is still empty.
    async fn attempt(
        &mut self,
        provider: &dyn EngineProvider,
        options: &ViewerOptions,
    ) -> ViewerResult<Option<BootstrapFn>> {
        self.transition(LoadState::LoadingLibrary);
        provider.load_module(self.window.clone()).await?;

        let module = self
            .window
            .engine_module()
            .ok_or_else(|| ViewerError::ModuleLoad("provider installed no module".into()))?;

        // The worker source must be in place before any open happens.
        module.set_worker_source(&options.worker_source);

        self.transition(LoadState::LoadingViewerScript);
        provider.install_viewer(self.window.clone()).await?;

        Ok(self.window.bootstrap())
    }

    fn transition(&mut self, next: LoadState) {
        if self.state != next {
            debug!("Load state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}
