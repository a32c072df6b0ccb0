//! Demonstration driver for the driftgate comparator.
//!
//! Examples:
//!   cargo run
//!   cargo run -- --json
//!   cargo run -- sweep
//!   cargo run -- sweep --config gate.json
//!
//! The default run compares two fixed five-reading windows. `sweep` feeds a
//! signal board step by step and watches the decision flip as the environment
//! starts to outpace the tracked capability. Output is illustrative only.

use serde::{Deserialize, Serialize};
use tracing::info;

use driftgate::board::SignalBoard;
use driftgate::error::SignalError;
use driftgate::policy::{Action, Decision, GatePolicy, PolicyConfig};
use driftgate::trend::{self, TrendKind, MIN_READINGS};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
struct DemoConfig {
    trend: TrendKind,
    tau_pos: f32,
    tau_neg: f32,

    // Sweep-only knobs.
    steps: u32,
    window: usize,
    noise_amp: f32,
    seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            trend: TrendKind::MedianDiff,
            tau_pos: 0.2,
            tau_neg: -0.2,
            steps: 400,
            window: 16,
            noise_amp: 0.02,
            seed: 0x5EED_D21F,
        }
    }
}

impl DemoConfig {
    fn policy(&self) -> GatePolicy {
        GatePolicy::new(PolicyConfig {
            trend: self.trend,
            tau_pos: self.tau_pos,
            tau_neg: self.tau_neg,
        })
    }
}

#[derive(Debug, Serialize)]
struct CompareReport {
    trend: TrendKind,
    tau_pos: f32,
    tau_neg: f32,
    self_drift: f32,
    env_drift: f32,
    delta: f32,
    decision: Decision,
    action: Action,
}

#[derive(Debug, Serialize)]
struct SweepReport {
    steps: u32,
    evolve: u32,
    observe: u32,
    farm: u32,
    switches: u32,
    final_action: Option<Action>,
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    let mut json = false;
    let mut config_path: Option<String> = None;
    let mut command: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" | "help" => {
                print_help();
                return;
            }
            "--json" => json = true,
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => config_path = Some(path.clone()),
                    None => {
                        eprintln!("--config needs a file path");
                        print_help();
                        std::process::exit(2);
                    }
                }
            }
            other if command.is_none() && !other.starts_with('-') => {
                command = Some(other.to_string());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_help();
                std::process::exit(2);
            }
        }
        i += 1;
    }

    let cfg = match load_config(config_path.as_deref()) {
        Ok(cfg) => cfg,
        Err(msg) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
    };

    let result = match command.as_deref() {
        None => run_once(&cfg, json),
        Some("sweep") => run_sweep(&cfg, json),
        Some(other) => {
            eprintln!("Unknown command: {other}");
            print_help();
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("driftgate: {e}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&str>) -> Result<DemoConfig, String> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| format!("read {path}: {e}"))?;
    let cfg: DemoConfig = serde_json::from_str(&text).map_err(|e| format!("parse {path}: {e}"))?;
    info!("Loaded config from {path}");
    Ok(cfg)
}

fn run_once(cfg: &DemoConfig, json: bool) -> Result<(), SignalError> {
    // Synthetic drift windows: internal capability climbing but flattening,
    // external pressure climbing steadily.
    let q_self = [0.0, 0.1, 0.18, 0.25, 0.29];
    let q_env = [0.0, 0.12, 0.22, 0.31, 0.41];

    let policy = cfg.policy();
    let self_drift = trend::estimate(&q_self, cfg.trend)?;
    let env_drift = trend::estimate(&q_env, cfg.trend)?;
    let delta = policy.delta(&q_self, &q_env)?;
    let decision = policy.compare(&q_self, &q_env)?;
    let action = policy.decide(&q_self, &q_env)?;

    if json {
        let report = CompareReport {
            trend: cfg.trend,
            tau_pos: cfg.tau_pos,
            tau_neg: cfg.tau_neg,
            self_drift,
            env_drift,
            delta,
            decision,
            action,
        };
        print_json(&report);
        return Ok(());
    }

    println!("q_self drift={self_drift:+.3}  q_env drift={env_drift:+.3}  delta={delta:+.3}");
    println!("comparator: {}", decision.as_str());
    println!(
        "banded:     {}  ({})",
        action.as_str(),
        rationale(action)
    );
    Ok(())
}

fn run_sweep(cfg: &DemoConfig, json: bool) -> Result<(), SignalError> {
    let policy = cfg.policy();
    let mut board = SignalBoard::with_window(cfg.window);
    let mut rng_seed = cfg.seed;

    info!(steps = cfg.steps, window = cfg.window, "starting sweep");

    let half = cfg.steps / 2;
    let mut evolve = 0u32;
    let mut observe = 0u32;
    let mut farm = 0u32;
    let mut switches = 0u32;
    let mut last_action: Option<Action> = None;

    for t in 0..cfg.steps {
        let tf = t as f32;
        // Capability climbs fast then saturates; pressure ramps gently until
        // a mid-run regime change steepens it.
        let base_self = 45.0 * (1.0 - (-tf / 150.0).exp());
        let base_env = if t < half {
            0.04 * tf
        } else {
            0.04 * half as f32 + 0.45 * (tf - half as f32)
        };
        board.observe("q_self", base_self + cfg.noise_amp * noise(&mut rng_seed));
        board.observe("q_env", base_env + cfg.noise_amp * noise(&mut rng_seed));

        // The first reading alone has no direction yet.
        if (t as usize) + 1 < MIN_READINGS {
            continue;
        }

        let action = board.decide(&policy, "q_self", "q_env")?;
        match action {
            Action::EvolveOrDie => evolve += 1,
            Action::Observe => observe += 1,
            Action::FarmAndOptimize => farm += 1,
        }

        if let Some(prev) = last_action {
            if prev != action {
                switches += 1;
                if !json {
                    let delta = board.delta(&policy, "q_self", "q_env")?;
                    println!(
                        "t={t:4} delta={delta:+.3}  {} -> {}",
                        prev.as_str(),
                        action.as_str()
                    );
                }
            }
        }
        last_action = Some(action);

        if !json && t % 40 == 0 {
            let delta = board.delta(&policy, "q_self", "q_env")?;
            println!("t={t:4} delta={delta:+.3} action={}", action.as_str());
        }
    }

    if json {
        let report = SweepReport {
            steps: cfg.steps,
            evolve,
            observe,
            farm,
            switches,
            final_action: last_action,
        };
        print_json(&report);
        return Ok(());
    }

    println!(
        "steps={} evolve={evolve} observe={observe} farm={farm} switches={switches}",
        cfg.steps
    );
    if let Some(action) = last_action {
        println!("final action: {}  ({})", action.as_str(), rationale(action));
    }
    Ok(())
}

fn rationale(action: Action) -> &'static str {
    match action {
        Action::EvolveOrDie => "environment is pulling ahead; look for a new strategy",
        Action::Observe => "neither side dominates; keep probing cheaply",
        Action::FarmAndOptimize => "current edge holds; harvest and refine",
    }
}

fn print_json<T: Serialize>(report: &T) {
    match serde_json::to_string_pretty(report) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("report: {e}");
            std::process::exit(1);
        }
    }
}

// Multiplicative congruential step in [-1, 1); reproducible by seed, same
// shape the toy sweeps use for jitter.
fn noise(seed: &mut u64) -> f32 {
    *seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
    let u = (*seed >> 11) as u32;
    let unit = ((u >> 8) as f32) / ((1u32 << 24) as f32);
    2.0 * unit - 1.0
}

fn print_help() {
    println!("driftgate (self-vs-environment drift comparator)");
    println!("usage:");
    println!("  cargo run");
    println!("  cargo run -- --json");
    println!("  cargo run -- sweep");
    println!("  cargo run -- sweep --config gate.json");
    println!("  cargo run -- --help");
}
