//! Minimal metrics registry.
//!
//! Counter/gauge/histogram families with declared label names and dynamic label
//! values backed by `DashMap`, a sharded-lock map whose entries are atomics.
//! Recording an existing series takes a shard read lock and one atomic update;
//! a new series takes the shard write lock once. Concurrent recorders never
//! lose updates and never take a handler-level lock. Families
//! live in a `Registry` that refuses duplicate names and renders Prometheus
//! text exposition (0.0.4).

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use burnin_core::error::{BurninError, Result};

/// Conventional latency buckets, in seconds.
pub const DEFAULT_BUCKETS: [f64; 11] = [0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn series_key(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn label_str(names: &[&'static str], values: &[String]) -> String {
    names
        .iter()
        .zip(values)
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn header(out: &mut String, desc: &Desc, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", desc.name, desc.help);
    let _ = writeln!(out, "# TYPE {} {}", desc.name, kind);
}

/// Series snapshot sorted by label values, for stable output.
fn sorted<V, T>(map: &DashMap<Vec<String>, V>, read: impl Fn(&V) -> T) -> Vec<(Vec<String>, T)> {
    let mut rows: Vec<_> = map.iter().map(|r| (r.key().clone(), read(r.value()))).collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    rows
}

#[derive(Debug, Clone)]
struct Desc {
    name: String,
    help: String,
    labels: Vec<&'static str>,
}

impl Desc {
    /// A sample with the wrong number of label values is dropped and logged;
    /// it would otherwise render as a malformed series.
    fn check(&self, values: &[&str]) -> bool {
        if values.len() == self.labels.len() {
            return true;
        }
        tracing::warn!(
            metric = %self.name,
            expected = self.labels.len(),
            got = values.len(),
            "label cardinality mismatch, sample dropped"
        );
        false
    }
}

pub struct CounterVec {
    desc: Desc,
    map: DashMap<Vec<String>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1. `values` follow the declared label order.
    pub fn inc(&self, values: &[&str]) {
        self.add(values, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, values: &[&str], v: u64) {
        if !self.desc.check(values) {
            return;
        }
        let key = series_key(values);
        if let Some(counter) = self.map.get(&key) {
            counter.fetch_add(v, Ordering::Relaxed);
            return;
        }
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never observed).
    pub fn get(&self, values: &[&str]) -> u64 {
        self.map
            .get(&series_key(values))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, out: &mut String) {
        header(out, &self.desc, "counter");
        for (key, val) in sorted(&self.map, |c| c.load(Ordering::Relaxed)) {
            let _ = writeln!(out, "{}{{{}}} {}", self.desc.name, label_str(&self.desc.labels, &key), val);
        }
    }
}

pub struct GaugeVec {
    desc: Desc,
    map: DashMap<Vec<String>, AtomicI64>,
}

impl GaugeVec {
    /// Increment by 1.
    pub fn inc(&self, values: &[&str]) { self.add(values, 1); }
    /// Decrement by 1.
    pub fn dec(&self, values: &[&str]) { self.add(values, -1); }

    /// Add an arbitrary signed delta.
    pub fn add(&self, values: &[&str], v: i64) {
        if !self.desc.check(values) {
            return;
        }
        let key = series_key(values);
        if let Some(gauge) = self.map.get(&key) {
            gauge.fetch_add(v, Ordering::Relaxed);
            return;
        }
        let gauge = self.map.entry(key).or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, values: &[&str]) -> i64 {
        self.map
            .get(&series_key(values))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, out: &mut String) {
        header(out, &self.desc, "gauge");
        for (key, val) in sorted(&self.map, |g| g.load(Ordering::Relaxed)) {
            let _ = writeln!(out, "{}{{{}}} {}", self.desc.name, label_str(&self.desc.labels, &key), val);
        }
    }
}

struct AtomicHistogram {
    count: AtomicU64,
    /// f64 bit pattern of the running sum, in seconds.
    sum_bits: AtomicU64,
    /// Per-bucket (non-cumulative) counts; `render` accumulates.
    buckets: Vec<AtomicU64>,
}

impl AtomicHistogram {
    fn new(n: usize) -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_bits: AtomicU64::new(0f64.to_bits()),
            buckets: (0..n).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    fn observe(&self, bounds: &[f64], secs: f64) {
        if let Some(i) = bounds.iter().position(|&le| secs <= le) {
            self.buckets[i].fetch_add(1, Ordering::Relaxed);
        }
        let _ = self.sum_bits.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
            Some((f64::from_bits(bits) + secs).to_bits())
        });
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    fn sum(&self) -> f64 {
        f64::from_bits(self.sum_bits.load(Ordering::Relaxed))
    }
}

struct HistogramSnapshot {
    buckets: Vec<u64>,
    count: u64,
    sum: f64,
}

pub struct HistogramVec {
    desc: Desc,
    bounds: Vec<f64>,
    map: DashMap<Vec<String>, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration (recorded in seconds).
    pub fn observe(&self, values: &[&str], duration: Duration) {
        if !self.desc.check(values) {
            return;
        }
        let key = series_key(values);
        let secs = duration.as_secs_f64();
        if let Some(hist) = self.map.get(&key) {
            hist.observe(&self.bounds, secs);
            return;
        }
        let hist = self
            .map
            .entry(key)
            .or_insert_with(|| AtomicHistogram::new(self.bounds.len()));
        hist.observe(&self.bounds, secs);
    }

    /// Number of observations in one series.
    pub fn sample_count(&self, values: &[&str]) -> u64 {
        self.map
            .get(&series_key(values))
            .map(|h| h.count.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum of observations in one series, in seconds.
    pub fn sample_sum(&self, values: &[&str]) -> f64 {
        self.map.get(&series_key(values)).map(|h| h.sum()).unwrap_or(0.0)
    }

    fn render(&self, out: &mut String) {
        header(out, &self.desc, "histogram");
        let name = &self.desc.name;
        let rows = sorted(&self.map, |h| HistogramSnapshot {
            buckets: h.buckets.iter().map(|b| b.load(Ordering::Relaxed)).collect(),
            count: h.count.load(Ordering::Relaxed),
            sum: h.sum(),
        });
        for (key, snap) in rows {
            let labels = label_str(&self.desc.labels, &key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            let mut cumulative = 0;
            for (le, n) in self.bounds.iter().zip(&snap.buckets) {
                cumulative += n;
                let _ = writeln!(out, "{}_bucket{{{}le=\"{}\"}} {}", name, prefix, le, cumulative);
            }
            // A concurrent observe may have bumped `count` but not yet its bucket.
            let total = snap.count.max(cumulative);
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, total);
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, snap.sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, total);
        }
    }
}

#[derive(Clone)]
enum Collector {
    Counter(Arc<CounterVec>),
    Gauge(Arc<GaugeVec>),
    Histogram(Arc<HistogramVec>),
}

impl Collector {
    fn render(&self, out: &mut String) {
        match self {
            Collector::Counter(c) => c.render(out),
            Collector::Gauge(g) => g.render(out),
            Collector::Histogram(h) => h.render(out),
        }
    }
}

/// Named collector families. Each name may be registered once.
#[derive(Default)]
pub struct Registry {
    collectors: DashMap<String, Collector>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_counter(&self, name: &str, help: &str, labels: &[&'static str]) -> Result<Arc<CounterVec>> {
        let c = Arc::new(CounterVec { desc: desc(name, help, labels), map: DashMap::new() });
        self.insert(name, Collector::Counter(Arc::clone(&c)))?;
        Ok(c)
    }

    pub fn register_gauge(&self, name: &str, help: &str, labels: &[&'static str]) -> Result<Arc<GaugeVec>> {
        let g = Arc::new(GaugeVec { desc: desc(name, help, labels), map: DashMap::new() });
        self.insert(name, Collector::Gauge(Arc::clone(&g)))?;
        Ok(g)
    }

    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        labels: &[&'static str],
        buckets: &[f64],
    ) -> Result<Arc<HistogramVec>> {
        let mut bounds: Vec<f64> = buckets.iter().copied().filter(|b| b.is_finite()).collect();
        bounds.sort_by(|a, b| a.total_cmp(b));
        bounds.dedup();
        if bounds.is_empty() {
            return Err(BurninError::Config(format!("histogram {name} needs at least one finite bucket")));
        }
        let h = Arc::new(HistogramVec { desc: desc(name, help, labels), bounds, map: DashMap::new() });
        self.insert(name, Collector::Histogram(Arc::clone(&h)))?;
        Ok(h)
    }

    fn insert(&self, name: &str, c: Collector) -> Result<()> {
        match self.collectors.entry(name.to_string()) {
            Entry::Occupied(_) => Err(BurninError::AlreadyRegistered(name.to_string())),
            Entry::Vacant(v) => {
                v.insert(c);
                Ok(())
            }
        }
    }

    /// Render all registered families in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut families: Vec<(String, Collector)> = self
            .collectors
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        families.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        for (_, c) in families {
            c.render(&mut out);
        }
        out
    }
}

fn desc(name: &str, help: &str, labels: &[&'static str]) -> Desc {
    Desc { name: name.to_string(), help: help.to_string(), labels: labels.to_vec() }
}
