use hashbrown::HashMap;

use crate::error::SignalError;
use crate::policy::{Action, Decision, GatePolicy};
use crate::signal::SignalTrace;

/// Named registry of signal traces.
///
/// Storage only: the board never computes or discovers readings, it just
/// keeps the windows that comparisons run over. A name nobody has observed
/// yet compares as an empty history.
#[derive(Debug, Clone, Default)]
pub struct SignalBoard {
    traces: HashMap<String, SignalTrace>,
    // Window bound applied to traces created through this board; 0 means
    // unbounded.
    cap: usize,
}

impl SignalBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every trace created through this board keeps at most `cap` readings.
    pub fn with_window(cap: usize) -> Self {
        Self {
            traces: HashMap::new(),
            cap,
        }
    }

    /// Append one reading to the named trace, creating it on first use.
    pub fn observe(&mut self, name: &str, value: f32) {
        if let Some(trace) = self.traces.get_mut(name) {
            trace.push(value);
            return;
        }
        let mut trace = if self.cap > 0 {
            SignalTrace::bounded(self.cap)
        } else {
            SignalTrace::new()
        };
        trace.push(value);
        self.traces.insert(name.to_string(), trace);
    }

    pub fn trace(&self, name: &str) -> Option<&SignalTrace> {
        self.traces.get(name)
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    fn window(&self, name: &str) -> &[f32] {
        self.traces.get(name).map(SignalTrace::values).unwrap_or(&[])
    }

    /// Two-mode comparison over two named traces.
    pub fn compare(
        &self,
        policy: &GatePolicy,
        self_name: &str,
        env_name: &str,
    ) -> Result<Decision, SignalError> {
        policy.compare(self.window(self_name), self.window(env_name))
    }

    /// Banded decision over two named traces.
    pub fn decide(
        &self,
        policy: &GatePolicy,
        self_name: &str,
        env_name: &str,
    ) -> Result<Action, SignalError> {
        policy.decide(self.window(self_name), self.window(env_name))
    }

    /// Signed drift gap between two named traces.
    pub fn delta(
        &self,
        policy: &GatePolicy,
        self_name: &str,
        env_name: &str,
    ) -> Result<f32, SignalError> {
        policy.delta(self.window(self_name), self.window(env_name))
    }
}
