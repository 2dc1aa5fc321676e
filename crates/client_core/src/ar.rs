//! AR session launcher.
//!
//! Drives a `<model-viewer>`-like widget through one launch at a time:
//!
//! ```text
//! Idle -> Loading -> Active | Failed | Cancelled
//! ```
//!
//! The viewer loads assets on its own schedule and reports back through
//! [`ViewerEvent`]s; the launcher never polls. Terminal phases accept a new
//! launch exactly like `Idle`. A launch while another is still loading
//! supersedes it (last request wins).

use std::str::FromStr;

use shared::domain::MenuItem;
use tracing::{debug, info, warn};

use crate::{
    error::{ArError, IOS_AR_UNAVAILABLE_MESSAGE},
    platform::Platform,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerSources {
    pub src: String,
    pub ios_src: Option<String>,
    pub poster: Option<String>,
}

/// The 3D/AR viewer widget.
pub trait ModelViewer {
    fn set_sources(&mut self, sources: &ViewerSources);
    fn clear_sources(&mut self);
    fn can_activate_ar(&self) -> bool;
    fn activate_ar(&mut self);
}

/// Page chrome around the viewer: overlay, loading indicator and alerts.
pub trait ArPresenter {
    fn show_overlay(&mut self);
    fn hide_overlay(&mut self);
    fn set_loading_visible(&mut self, visible: bool);
    fn alert(&mut self, message: &str);
}

/// Values of the viewer's `ar-status` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArStatus {
    NotPresenting,
    SessionStarted,
    ObjectPlaced,
    Failed,
}

impl FromStr for ArStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "not-presenting" => Ok(ArStatus::NotPresenting),
            "session-started" => Ok(ArStatus::SessionStarted),
            "object-placed" => Ok(ArStatus::ObjectPlaced),
            "failed" => Ok(ArStatus::Failed),
            other => Err(format!("unknown ar-status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    Load { src: String },
    Error { src: String, message: String },
    ArStatus(ArStatus),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ArSession {
    pub id: SessionId,
    pub item: MenuItem,
    pub sources: ViewerSources,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArPhase {
    Idle,
    Loading(ArSession),
    Active(ArSession),
    Failed(ArError),
    Cancelled,
}

impl ArPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ArPhase::Idle => "idle",
            ArPhase::Loading(_) => "loading",
            ArPhase::Active(_) => "active",
            ArPhase::Failed(_) => "failed",
            ArPhase::Cancelled => "cancelled",
        }
    }

    pub fn session(&self) -> Option<&ArSession> {
        match self {
            ArPhase::Loading(session) | ArPhase::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ArPhase::Loading(_))
    }
}

/// Snapshot of the single AR slot.
///
/// `active_item` is the pending launch record: it is set while the model is
/// loading and cleared once the session becomes active, fails or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArSessionState<'a> {
    pub active_item: Option<&'a MenuItem>,
    pub loading_visible: bool,
}

pub struct ArLauncher<V, P> {
    viewer: V,
    presenter: P,
    platform: Platform,
    phase: ArPhase,
    loading_visible: bool,
    next_session: u64,
}

impl<V: ModelViewer, P: ArPresenter> ArLauncher<V, P> {
    pub fn new(viewer: V, presenter: P, platform: Platform) -> Self {
        Self {
            viewer,
            presenter,
            platform,
            phase: ArPhase::Idle,
            loading_visible: false,
            next_session: 1,
        }
    }

    pub fn phase(&self) -> &ArPhase {
        &self.phase
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn state(&self) -> ArSessionState<'_> {
        ArSessionState {
            active_item: match &self.phase {
                ArPhase::Loading(session) => Some(&session.item),
                _ => None,
            },
            loading_visible: self.loading_visible,
        }
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn launch(&mut self, item: MenuItem) -> Result<SessionId, ArError> {
        let Some(glb) = item.glb().map(str::to_string) else {
            let err = ArError::MissingModel {
                item: item.name.clone(),
            };
            warn!(item = %item.name, "AR requested for item without glb model");
            self.presenter.alert(err.user_message());
            return Err(err);
        };

        if let Some(previous) = self.phase.session() {
            info!(
                session = previous.id.0,
                item = %previous.item.name,
                "superseding AR session"
            );
            self.viewer.clear_sources();
        }

        let ios_src = item.usdz().map(str::to_string);
        if self.platform.requires_usdz() && ios_src.is_none() {
            self.presenter.alert(IOS_AR_UNAVAILABLE_MESSAGE);
        }

        let sources = ViewerSources {
            src: glb,
            ios_src,
            poster: item.thumbnail().map(str::to_string),
        };
        self.viewer.set_sources(&sources);
        self.presenter.show_overlay();
        self.set_loading(true);

        let id = SessionId(self.next_session);
        self.next_session += 1;
        info!(
            session = id.0,
            item = %item.name,
            src = %sources.src,
            platform = ?self.platform,
            "AR session loading"
        );

        let native_quick_look = self.platform.presents_native_ar_immediately()
            && sources.ios_src.is_some()
            && self.viewer.can_activate_ar();
        self.phase = ArPhase::Loading(ArSession { id, item, sources });

        if native_quick_look {
            self.viewer.activate_ar();
        }
        Ok(id)
    }

    pub fn handle_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::Load { src } => {
                if !self.is_current_loading(&src) {
                    debug!(%src, phase = self.phase.name(), "ignoring stale load event");
                    return;
                }
                self.activate("load");
                if self.platform.activates_ar_after_load() && self.viewer.can_activate_ar() {
                    self.viewer.activate_ar();
                }
            }
            ViewerEvent::Error { src, message } => {
                let current = self
                    .phase
                    .session()
                    .is_some_and(|session| session.sources.src == src);
                if !current {
                    debug!(%src, %message, "ignoring error for superseded source");
                    return;
                }
                self.fail(ArError::ViewerLoad { src, message });
            }
            ViewerEvent::ArStatus(status) => self.handle_status(status),
        }
    }

    /// User pressed cancel while the model was still loading.
    pub fn cancel(&mut self) -> bool {
        let ArPhase::Loading(session) = &self.phase else {
            return false;
        };
        info!(session = session.id.0, "AR session cancelled");
        self.teardown();
        self.phase = ArPhase::Cancelled;
        true
    }

    /// Close button: ends whatever is showing and returns to `Idle`.
    pub fn close(&mut self) -> bool {
        match self.phase {
            ArPhase::Idle => false,
            ArPhase::Loading(_) => self.cancel(),
            ArPhase::Active(_) => {
                self.teardown();
                self.phase = ArPhase::Idle;
                true
            }
            ArPhase::Failed(_) | ArPhase::Cancelled => {
                self.phase = ArPhase::Idle;
                true
            }
        }
    }

    fn handle_status(&mut self, status: ArStatus) {
        match (status, &self.phase) {
            (ArStatus::SessionStarted, ArPhase::Loading(_)) => self.activate("session-started"),
            (ArStatus::Failed, ArPhase::Loading(_)) => self.fail(ArError::SessionFailed),
            (ArStatus::Failed, ArPhase::Active(session)) => {
                // The 3D preview is still usable without AR.
                warn!(session = session.id.0, "AR session failed after model load");
                self.presenter.alert(ArError::SessionFailed.user_message());
            }
            (status, phase) => {
                debug!(?status, phase = phase.name(), "ar-status without transition");
            }
        }
    }

    fn is_current_loading(&self, src: &str) -> bool {
        matches!(&self.phase, ArPhase::Loading(session) if session.sources.src == src)
    }

    fn activate(&mut self, trigger: &'static str) {
        let phase = std::mem::replace(&mut self.phase, ArPhase::Idle);
        let ArPhase::Loading(session) = phase else {
            self.phase = phase;
            return;
        };
        info!(session = session.id.0, trigger, "AR session active");
        self.set_loading(false);
        self.phase = ArPhase::Active(session);
    }

    fn fail(&mut self, err: ArError) {
        warn!(error = %err, phase = self.phase.name(), "AR session failed");
        self.set_loading(false);
        self.presenter.alert(err.user_message());
        self.viewer.clear_sources();
        self.presenter.hide_overlay();
        self.phase = ArPhase::Failed(err);
    }

    fn teardown(&mut self) {
        self.set_loading(false);
        self.viewer.clear_sources();
        self.presenter.hide_overlay();
    }

    fn set_loading(&mut self, visible: bool) {
        if self.loading_visible != visible {
            self.loading_visible = visible;
            self.presenter.set_loading_visible(visible);
        }
    }
}

#[cfg(test)]
#[path = "tests/ar_tests.rs"]
mod tests;
