//! Serves recorded interactions back in order.

use std::collections::{HashMap, VecDeque};

use thiserror::Error;

use super::format::{Cassette, Interaction};

/// A replay request the cassette cannot satisfy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    /// No interaction was ever recorded for this port and method.
    #[error("Cassette has no interactions for {port}::{method}; recorded pairs: [{available}]")]
    NotRecorded {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// Comma-separated `port::method` pairs present in the cassette.
        available: String,
    },
    /// Every recorded interaction for this port and method was consumed.
    #[error("Cassette exhausted for {port}::{method} after {served} interaction(s)")]
    Exhausted {
        /// Requested port.
        port: String,
        /// Requested method.
        method: String,
        /// How many were served.
        served: usize,
    },
}

#[derive(Debug, Default)]
struct Queue {
    pending: VecDeque<Interaction>,
    served: usize,
}

/// Replays one cassette, with an independent queue per `port::method` pair.
#[derive(Debug)]
pub struct CassetteReplayer {
    queues: HashMap<(String, String), Queue>,
}

impl CassetteReplayer {
    /// Indexes the cassette's interactions by port and method, keeping order.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<(String, String), Queue> = HashMap::new();
        for interaction in &cassette.interactions {
            queues
                .entry((interaction.port.clone(), interaction.method.clone()))
                .or_default()
                .pending
                .push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Takes the next recorded interaction for `port::method`.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] when nothing (more) was recorded for the pair.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<Interaction, ReplayError> {
        let key = (port.to_string(), method.to_string());
        if !self.queues.contains_key(&key) {
            let mut pairs: Vec<String> =
                self.queues.keys().map(|(p, m)| format!("{p}::{m}")).collect();
            pairs.sort();
            return Err(ReplayError::NotRecorded {
                port: key.0,
                method: key.1,
                available: pairs.join(", "),
            });
        }
        let queue = self.queues.entry(key).or_default();
        match queue.pending.pop_front() {
            Some(interaction) => {
                queue.served += 1;
                Ok(interaction)
            }
            None => Err(ReplayError::Exhausted {
                port: port.to_string(),
                method: method.to_string(),
                served: queue.served,
            }),
        }
    }

    /// Output of the next interaction; panics with the replay error otherwise.
    ///
    /// Replay adapters call this: running off the end of a cassette means the
    /// code under test diverged from the recording.
    ///
    /// # Panics
    ///
    /// Panics if the cassette cannot serve the request.
    pub fn next_output(&mut self, port: &str, method: &str) -> serde_json::Value {
        match self.next_interaction(port, method) {
            Ok(interaction) => interaction.output,
            Err(err) => panic!("{err}"),
        }
    }
}
