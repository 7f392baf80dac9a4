//! Replays recorded interactions from a cassette.

use std::collections::{HashMap, VecDeque};

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette.
///
/// Interactions are matched on port, method and input rather than on call
/// order, since index documents for different sites are fetched concurrently.
/// Each recorded interaction is served at most once.
pub struct CassetteReplayer {
    /// Per port+method queue of not-yet-served interactions, in recorded order.
    queues: HashMap<PortMethodKey, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push_back(interaction.clone());
        }
        Self { queues }
    }

    /// Take the earliest unserved interaction for `port`/`method` whose input equals `input`.
    ///
    /// Returns `None` when the cassette holds no (more) matching interactions.
    pub fn take(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Option<Interaction> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };
        let queue = self.queues.get_mut(&key)?;
        let position = queue.iter().position(|i| &i.input == input)?;
        queue.remove(position)
    }

    /// Number of interactions that have not been served yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
