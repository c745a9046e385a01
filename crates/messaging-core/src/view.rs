use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ViewportClass;

/// One of the three visual regions governed by the coordinator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    List,
    Thread,
    Profile,
}

/// Joint visibility state of the three panels.
///
/// Narrow viewports show exactly one panel and swap it; wide viewports
/// always show list and thread together, with the profile independently
/// toggled. The two `ListAndThread*` states are reachable only when wide.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PanelLayout {
    ListOnly,
    ThreadOnly,
    ListAndThread,
    ListAndThreadAndProfile,
}

impl PanelLayout {
    /// Panels visible in this layout.
    pub fn visible_panels(self) -> &'static [Panel] {
        match self {
            Self::ListOnly => &[Panel::List],
            Self::ThreadOnly => &[Panel::Thread],
            Self::ListAndThread => &[Panel::List, Panel::Thread],
            Self::ListAndThreadAndProfile => &[Panel::List, Panel::Thread, Panel::Profile],
        }
    }
}

/// Finite state machine deriving panel visibility from viewport class and
/// navigation actions.
#[derive(Debug, Clone)]
pub struct ViewCoordinator {
    viewport: ViewportClass,
    layout: PanelLayout,
}

impl ViewCoordinator {
    /// Initial layout for a viewport class, before any selection exists.
    pub fn new(viewport: ViewportClass) -> Self {
        let layout = match viewport {
            ViewportClass::Narrow => PanelLayout::ListOnly,
            ViewportClass::Wide => PanelLayout::ListAndThread,
        };
        Self { viewport, layout }
    }

    /// Current viewport class.
    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    /// Current layout.
    pub fn layout(&self) -> PanelLayout {
        self.layout
    }

    /// React to a conversation being selected.
    ///
    /// Narrow viewports swap from the list to the thread; wide viewports
    /// keep their layout and only the thread content changes.
    pub fn on_conversation_selected(&mut self) {
        if self.viewport == ViewportClass::Narrow {
            self.layout = PanelLayout::ThreadOnly;
        }
    }

    /// React to back navigation.
    ///
    /// Returns `true` when the caller must also clear the active
    /// conversation selection, so re-entering shows the list rather than a
    /// stale thread. Anywhere else, back is ignored.
    pub fn on_back(&mut self) -> bool {
        if self.viewport == ViewportClass::Narrow && self.layout == PanelLayout::ThreadOnly {
            self.layout = PanelLayout::ListOnly;
            return true;
        }
        false
    }

    /// Toggle the participant profile panel.
    ///
    /// Narrow layouts never show the profile, so the toggle is ignored
    /// there; callers are not required to know the viewport class first.
    pub fn on_toggle_profile(&mut self) {
        match (self.viewport, self.layout) {
            (ViewportClass::Wide, PanelLayout::ListAndThread) => {
                self.layout = PanelLayout::ListAndThreadAndProfile;
            }
            (ViewportClass::Wide, PanelLayout::ListAndThreadAndProfile) => {
                self.layout = PanelLayout::ListAndThread;
            }
            _ => {
                debug!("profile toggle ignored on narrow viewport");
            }
        }
    }

    /// React to an external viewport classification change.
    ///
    /// Collapsing to narrow keeps the thread in focus when one is active;
    /// expanding to wide always resets the profile panel to hidden.
    pub fn on_viewport_changed(&mut self, viewport: ViewportClass, thread_active: bool) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.layout = match viewport {
            ViewportClass::Narrow if thread_active => PanelLayout::ThreadOnly,
            ViewportClass::Narrow => PanelLayout::ListOnly,
            ViewportClass::Wide => PanelLayout::ListAndThread,
        };
    }
}
