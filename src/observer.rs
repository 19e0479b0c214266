use serde::Serialize;

/// Whether a watcher keeps observing a target after it first fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerPolicy {
    Repeating,
    OneShot,
}

/// Options for one visibility watcher (an `IntersectionObserver`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchSpec {
    pub threshold: f64,
    /// How far the viewport's bottom edge is pulled in, in pixels.
    pub bottom_margin_px: f64,
    pub policy: TriggerPolicy,
}

impl WatchSpec {
    pub fn root_margin(&self) -> String {
        if self.bottom_margin_px == 0.0 {
            return "0px 0px 0px 0px".to_string();
        }
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchOutcome {
    Ignored,
    Triggered { unobserve: bool },
}

/// Tracks which targets a watcher still observes, indexed by registration order.
#[derive(Clone, Debug)]
pub struct Watcher {
    spec: WatchSpec,
    watching: Vec<bool>,
}

impl Watcher {
    pub fn new(spec: WatchSpec, target_count: usize) -> Self {
        Self {
            spec,
            watching: vec![true; target_count],
        }
    }

    pub fn spec(&self) -> WatchSpec {
        self.spec
    }

    pub fn is_watching(&self, index: usize) -> bool {
        self.watching.get(index).copied().unwrap_or(false)
    }

    pub fn on_entry(&mut self, index: usize, is_intersecting: bool) -> WatchOutcome {
        if !is_intersecting || !self.is_watching(index) {
            return WatchOutcome::Ignored;
        }

        match self.spec.policy {
            TriggerPolicy::Repeating => WatchOutcome::Triggered { unobserve: false },
            TriggerPolicy::OneShot => {
                self.watching[index] = false;
                WatchOutcome::Triggered { unobserve: true }
            }
        }
    }
}
