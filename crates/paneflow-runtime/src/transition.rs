#![forbid(unsafe_code)]

//! Transitions between pane snapshots.
//!
//! A transition always runs from `current` to `target`. Forward
//! navigation and pops animate on a clock via [`TransitionState::tick`];
//! a predictive back gesture instead scrubs the fraction directly with
//! [`TransitionState::seek_to`]. Starting any new operation supersedes
//! whatever was in flight; nothing is ever queued.
//!
//! # Invariants
//!
//! - `fraction` is always in [0.0, 1.0]
//! - A settled state has `current == target` and fraction 0
//! - The predictive edge is set only while a seek is in progress

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use paneflow_scene::{PaneSnapshot, Slot};

/// Which screen edge a predictive back gesture started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeEdge {
    Left,
    Right,
}

/// What is happening to the content of one slot during the current
/// transition. Hosts pick their animation curves from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionType {
    /// Empty before and after.
    None,
    /// Content appearing in a previously empty slot.
    Enter,
    /// Content leaving the slot empty.
    Exit,
    /// Content changing, moving forward.
    Nav,
    /// Content changing, moving back.
    Pop,
    /// Content changing under a back gesture still in progress.
    PredictivePop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drive {
    Idle,
    Animating { elapsed: Duration, duration: Duration },
    Seeking,
}

/// Animation state between two pane snapshots.
#[derive(Debug)]
pub struct TransitionState {
    current: PaneSnapshot,
    target: PaneSnapshot,
    fraction: f32,
    predictive_edge: Option<SwipeEdge>,
    drive: Drive,
    generation: u64,
}

impl TransitionState {
    /// A settled state showing `initial`.
    #[must_use]
    pub fn new(initial: PaneSnapshot) -> Self {
        Self {
            current: initial.clone(),
            target: initial,
            fraction: 0.0,
            predictive_edge: None,
            drive: Drive::Idle,
            generation: 0,
        }
    }

    /// The snapshot the transition started from.
    #[must_use]
    pub fn current(&self) -> &PaneSnapshot {
        &self.current
    }

    /// The snapshot the transition is heading to.
    #[must_use]
    pub fn target(&self) -> &PaneSnapshot {
        &self.target
    }

    /// Progress in [0, 1].
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.fraction
    }

    /// Bumped by every snap, animate and seek; an observer holding a stale
    /// generation knows its operation was superseded.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the transition runs backwards through the history.
    #[must_use]
    pub fn is_pop(&self) -> bool {
        self.current.size() > self.target.size()
    }

    /// Whether a predictive back gesture is scrubbing the transition.
    #[must_use]
    pub fn is_predictive_pop(&self) -> bool {
        self.predictive_edge.is_some()
    }

    /// The gesture's origin edge while a predictive pop is in progress.
    #[must_use]
    pub fn predictive_edge(&self) -> Option<SwipeEdge> {
        self.predictive_edge
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.current == self.target && matches!(self.drive, Drive::Idle)
    }

    /// Classify what `slot` is doing in the current transition.
    #[must_use]
    pub fn transition_type(&self, slot: Slot) -> TransitionType {
        let from = self.current.get(slot);
        let to = self.target.get(slot);
        match (from, to) {
            (None, None) => TransitionType::None,
            (Some(_), None) => TransitionType::Exit,
            (None, Some(_)) => TransitionType::Enter,
            (Some(_), Some(_)) => {
                if self.is_predictive_pop() {
                    TransitionType::PredictivePop
                } else if self.is_pop() {
                    TransitionType::Pop
                } else {
                    TransitionType::Nav
                }
            }
        }
    }

    /// Jump straight to `target` with no animation.
    pub fn snap_to(&mut self, target: PaneSnapshot) {
        self.generation += 1;
        self.predictive_edge = None;
        self.current = target.clone();
        self.target = target;
        self.fraction = 0.0;
        self.drive = Drive::Idle;
    }

    /// Animate from the current snapshot to `target` over `duration`,
    /// driven by [`TransitionState::tick`]. Supersedes any in-flight
    /// operation; an already-shown target snaps instead.
    pub fn animate_to(&mut self, target: PaneSnapshot, duration: Duration) {
        if self.current == target && matches!(self.drive, Drive::Idle) {
            return;
        }
        self.generation += 1;
        self.predictive_edge = None;
        if duration.is_zero() || self.current == target {
            self.current = target.clone();
            self.target = target;
            self.fraction = 0.0;
            self.drive = Drive::Idle;
            return;
        }
        self.target = target;
        self.fraction = 0.0;
        self.drive = Drive::Animating {
            elapsed: Duration::ZERO,
            duration,
        };
    }

    /// Scrub to `fraction` of the way towards `target`, as a predictive
    /// gesture from `edge`. The state stays wherever the gesture leaves it
    /// until a snap or animate settles it.
    pub fn seek_to(&mut self, fraction: f32, target: PaneSnapshot, edge: SwipeEdge) {
        self.generation += 1;
        self.predictive_edge = Some(edge);
        self.target = target;
        self.fraction = fraction.clamp(0.0, 1.0);
        self.drive = Drive::Seeking;
    }

    /// Advance a running animation. Returns `true` when this call settled
    /// the transition. Seeks and settled states ignore ticks.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Drive::Animating { elapsed, duration } = self.drive else {
            return false;
        };
        let elapsed = elapsed + delta;
        if elapsed >= duration {
            self.current = self.target.clone();
            self.fraction = 0.0;
            self.predictive_edge = None;
            self.drive = Drive::Idle;
            return true;
        }
        self.fraction = (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0);
        self.drive = Drive::Animating { elapsed, duration };
        false
    }
}

/// A [`TransitionState`] shared between the navigation side (which starts
/// transitions) and the render side (which ticks and reads them). All
/// access is serialized through the mutex; a poisoned lock keeps the last
/// state rather than unwinding again.
#[derive(Debug, Clone)]
pub struct SharedTransition {
    inner: Arc<Mutex<TransitionState>>,
}

impl SharedTransition {
    #[must_use]
    pub fn new(initial: PaneSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TransitionState::new(initial))),
        }
    }

    /// Run `f` against the locked state.
    pub fn with<R>(&self, f: impl FnOnce(&mut TransitionState) -> R) -> R {
        let mut state = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    pub fn snap_to(&self, target: PaneSnapshot) {
        self.with(|state| state.snap_to(target));
    }

    pub fn animate_to(&self, target: PaneSnapshot, duration: Duration) {
        self.with(|state| state.animate_to(target, duration));
    }

    pub fn seek_to(&self, fraction: f32, target: PaneSnapshot, edge: SwipeEdge) {
        self.with(|state| state.seek_to(fraction, target, edge));
    }

    pub fn tick(&self, delta: Duration) -> bool {
        self.with(|state| state.tick(delta))
    }

    #[must_use]
    pub fn transition_type(&self, slot: Slot) -> TransitionType {
        self.with(|state| state.transition_type(slot))
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.with(|state| state.is_settled())
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.with(|state| state.generation())
    }
}
