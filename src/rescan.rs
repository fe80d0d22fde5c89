// Copyright 2026-present Nomen Contributors
// SPDX-License-Identifier: Apache-2.0

//! Cooperative rescan scheduling: a scan gate and a debouncer.
//!
//! The host drives everything from one event loop, so there are no threads
//! and no locks here, just explicit state the host polls.
//!
//! `ScanGate` replaces the raw "scan in progress" boolean that loses
//! requests: a request arriving mid-scan parks in a single pending slot and
//! runs as soon as the current scan finishes, instead of being dropped.
//! There is no queue; coalescing repeated requests into one pending run is
//! the point, since a full rescan reads the same state however often it was
//! asked for.
//!
//! `Debouncer` coalesces rapid triggers per logical key (typically a file
//! path) by cancel-and-reschedule: every trigger pushes the key's deadline
//! out by the full delay, and the host polls `due()` from its loop.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Idle → Scanning and back, with one pending-request slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Scanning,
}

#[derive(Debug)]
pub struct ScanGate {
    state: GateState,
    pending: bool,
}

impl Default for ScanGate {
    fn default() -> Self {
        ScanGate::new()
    }
}

impl ScanGate {
    pub fn new() -> Self {
        ScanGate {
            state: GateState::Idle,
            pending: false,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Ask to scan. `true` means "go now"; `false` means a scan is already
    /// running and this request was parked (or coalesced into an already
    /// parked one).
    pub fn request(&mut self) -> bool {
        match self.state {
            GateState::Idle => {
                self.state = GateState::Scanning;
                true
            }
            GateState::Scanning => {
                self.pending = true;
                false
            }
        }
    }

    /// Report the running scan finished. `true` means a parked request is
    /// now live: the caller must run another scan, and the gate stays in
    /// `Scanning` for it.
    pub fn finish(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            true
        } else {
            self.state = GateState::Idle;
            false
        }
    }
}

/// Per-key trailing-edge debounce. Not a timer itself: the host's loop
/// calls `due()` and runs whatever comes back.
#[derive(Debug)]
pub struct Debouncer<K: Eq + Hash + Clone> {
    delay: Duration,
    deadlines: HashMap<K, Instant>,
}

impl<K: Eq + Hash + Clone> Debouncer<K> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            deadlines: HashMap::new(),
        }
    }

    /// Schedule (or push out) the key's deadline to now + delay.
    pub fn trigger(&mut self, key: K) {
        self.trigger_at(key, Instant::now());
    }

    /// Deterministic variant for tests and hosts with their own clock.
    pub fn trigger_at(&mut self, key: K, now: Instant) {
        self.deadlines.insert(key, now + self.delay);
    }

    /// Forget a key without firing it.
    pub fn cancel(&mut self, key: &K) {
        self.deadlines.remove(key);
    }

    /// Drain every key whose deadline has passed.
    pub fn due(&mut self, now: Instant) -> Vec<K> {
        let ready: Vec<K> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &ready {
            self.deadlines.remove(key);
        }
        ready
    }

    /// Keys still waiting.
    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_runs_immediately_when_idle() {
        let mut gate = ScanGate::new();
        assert!(gate.request());
        assert_eq!(gate.state(), GateState::Scanning);
        assert!(!gate.finish());
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn concurrent_request_parks_and_reruns() {
        let mut gate = ScanGate::new();
        assert!(gate.request());
        assert!(!gate.request()); // parked
        assert!(!gate.request()); // coalesced into the same slot
        assert!(gate.finish()); // parked request is now live
        assert_eq!(gate.state(), GateState::Scanning);
        assert!(!gate.finish());
        assert_eq!(gate.state(), GateState::Idle);
    }

    #[test]
    fn debounce_coalesces_rapid_triggers() {
        let mut debouncer: Debouncer<&str> = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        debouncer.trigger_at("note.md", t0);
        debouncer.trigger_at("note.md", t0 + Duration::from_millis(50));

        // First deadline was pushed out by the second trigger.
        assert!(debouncer.due(t0 + Duration::from_millis(120)).is_empty());
        assert_eq!(
            debouncer.due(t0 + Duration::from_millis(160)),
            vec!["note.md"]
        );
        assert!(debouncer.is_empty());
    }

    #[test]
    fn debounce_keys_are_independent() {
        let mut debouncer: Debouncer<&str> = Debouncer::new(Duration::from_millis(100));
        let t0 = Instant::now();
        debouncer.trigger_at("a.md", t0);
        debouncer.trigger_at("b.md", t0 + Duration::from_millis(80));

        let first = debouncer.due(t0 + Duration::from_millis(110));
        assert_eq!(first, vec!["a.md"]);
        assert_eq!(debouncer.len(), 1);
    }

    #[test]
    fn cancel_drops_key() {
        let mut debouncer: Debouncer<String> = Debouncer::new(Duration::from_millis(10));
        let t0 = Instant::now();
        debouncer.trigger_at("x".to_string(), t0);
        debouncer.cancel(&"x".to_string());
        assert!(debouncer.due(t0 + Duration::from_secs(1)).is_empty());
    }
}
