//! Counter-vector registry for userstat.
//!
//! Each `CounterVec` has a fixed, ordered set of label names. Samples are keyed
//! by the label values in that order and rendered in declared order, so
//! `user` always precedes `status` in the exposition output.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Name of the per-user/per-status counter.
pub const USER_STATUS_METRIC: &str = "http_request_get_user_status_count";

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

pub struct CounterVec<const N: usize> {
    name: &'static str,
    help: &'static str,
    label_names: [&'static str; N],
    map: DashMap<[String; N], AtomicU64>,
}

impl<const N: usize> CounterVec<N> {
    pub fn new(name: &'static str, help: &'static str, label_names: [&'static str; N]) -> Self {
        Self {
            name,
            help,
            label_names,
            map: DashMap::new(),
        }
    }

    /// Increment by 1.
    pub fn inc(&self, values: [&str; N]) {
        let key = values.map(|v| v.to_string());
        // Fast path: existing series only needs a shared lock.
        if let Some(counter) = self.map.get(&key) {
            counter.fetch_add(1, Ordering::Relaxed);
            return;
        }
        self.map
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Current value of one series; 0 if never incremented.
    pub fn get(&self, values: [&str; N]) -> u64 {
        let key = values.map(|v| v.to_string());
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Snapshot of all series, sorted by label values.
    pub fn samples(&self) -> Vec<([String; N], u64)> {
        let mut out: Vec<_> = self
            .map
            .iter()
            .map(|r| (r.key().clone(), r.value().load(Ordering::Relaxed)))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", self.name, escape_help(self.help));
        let _ = writeln!(out, "# TYPE {} counter", self.name);
        for (values, val) in self.samples() {
            let label_str = self
                .label_names
                .iter()
                .zip(values.iter())
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", self.name, label_str, val);
        }
    }
}

pub struct UserstatMetrics {
    /// Labels: `user`, `status`.
    pub user_status: CounterVec<2>,
}

impl Default for UserstatMetrics {
    fn default() -> Self {
        Self {
            user_status: CounterVec::new(
                USER_STATUS_METRIC,
                "Count of status returned by user.",
                ["user", "status"],
            ),
        }
    }
}

impl UserstatMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified request.
    pub fn record_user_status(&self, user: &str, status: &str) {
        self.user_status.inc([user, status]);
    }

    /// Sum of one user's samples across all status labels.
    pub fn user_total(&self, user: &str) -> u64 {
        self.user_status
            .samples()
            .into_iter()
            .filter(|([u, _], _)| u == user)
            .map(|(_, v)| v)
            .sum()
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.user_status.render(&mut out);
        out
    }
}
