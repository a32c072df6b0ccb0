use crate::error::SignalError;
use crate::trend::{self, TrendKind};

/// Two-mode verdict from comparing a self window against an environment
/// window: either the environment is pulling ahead, or it is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    /// Self drift falls behind environment drift: seek a new strategy.
    EvolveOrDie,
    /// Self drift keeps up (ties included): consolidate and refine.
    ObserveAndFarm,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::EvolveOrDie => "evolve_or_die",
            Decision::ObserveAndFarm => "observe_and_farm",
        }
    }
}

/// Three-mode action with a dead band around zero drift. Small imbalances
/// land in the band and read as "watch, don't commit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    EvolveOrDie,
    Observe,
    FarmAndOptimize,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::EvolveOrDie => "evolve_or_die",
            Action::Observe => "observe",
            Action::FarmAndOptimize => "farm_and_optimize",
        }
    }
}

/// Collapse the band: observing and farming are both "stay the course".
impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        match action {
            Action::EvolveOrDie => Decision::EvolveOrDie,
            Action::Observe | Action::FarmAndOptimize => Decision::ObserveAndFarm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolicyConfig {
    pub trend: TrendKind,

    // Dead band edges for the three-mode rule. Drift above tau_pos reads as
    // a clear edge, below tau_neg as falling behind.
    pub tau_pos: f32,
    pub tau_neg: f32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            trend: TrendKind::MedianDiff,
            tau_pos: 0.2,
            tau_neg: -0.2,
        }
    }
}

/// Stateless comparator over two reading windows.
///
/// Every call recomputes both trends from scratch; nothing is cached and no
/// decision history is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatePolicy {
    pub cfg: PolicyConfig,
}

impl GatePolicy {
    pub fn new(cfg: PolicyConfig) -> Self {
        Self { cfg }
    }

    /// `trend(q_self) - trend(q_env)`. Negative means the environment is
    /// moving faster than the self signal.
    pub fn delta(&self, q_self: &[f32], q_env: &[f32]) -> Result<f32, SignalError> {
        let self_drift = trend::estimate(q_self, self.cfg.trend)?;
        let env_drift = trend::estimate(q_env, self.cfg.trend)?;
        Ok(self_drift - env_drift)
    }

    /// Two-mode rule: strictly negative drift evolves, everything else
    /// (ties included) observes and farms.
    pub fn compare(&self, q_self: &[f32], q_env: &[f32]) -> Result<Decision, SignalError> {
        let delta = self.delta(q_self, q_env)?;
        if delta < 0.0 {
            Ok(Decision::EvolveOrDie)
        } else {
            Ok(Decision::ObserveAndFarm)
        }
    }

    /// Banded rule: inside `[tau_neg, tau_pos]` neither side dominates.
    pub fn decide(&self, q_self: &[f32], q_env: &[f32]) -> Result<Action, SignalError> {
        let delta = self.delta(q_self, q_env)?;
        if delta < self.cfg.tau_neg {
            Ok(Action::EvolveOrDie)
        } else if delta > self.cfg.tau_pos {
            Ok(Action::FarmAndOptimize)
        } else {
            Ok(Action::Observe)
        }
    }
}

/// Compare two reading windows with the default trend formula and no dead
/// band.
pub fn compare(q_self: &[f32], q_env: &[f32]) -> Result<Decision, SignalError> {
    GatePolicy::default().compare(q_self, q_env)
}
