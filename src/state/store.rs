use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use thiserror::Error;

use crate::state::session::RaceSession;

/// Number of characters in a join code.
pub const CODE_LENGTH: usize = 6;

/// Characters a join code is drawn from.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Attempted to create a session under a code that is already in use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("game code `{code}` is already in use")]
pub struct CodeTaken {
    /// The contested join code.
    pub code: String,
}

/// Tells the store what to do with the entry once a mutation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionUpdate {
    /// Keep the mutated session in the registry.
    Keep,
    /// Drop the session from the registry.
    Remove,
}

/// Registry of live race sessions keyed by join code.
///
/// Every mutation runs under the map's per-key exclusive access, so two
/// mutations of the same code never interleave while different codes
/// proceed independently.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, RaceSession>,
}

impl SessionStore {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cloned snapshot of a session, side-effect free.
    pub fn get(&self, code: &str) -> Option<RaceSession> {
        self.sessions.get(code).map(|entry| entry.value().clone())
    }

    /// Create a session under a freshly generated, unused join code.
    pub fn create(&self, leader_id: String, leader_name: String) -> RaceSession {
        loop {
            let code = generate_code();
            match self.sessions.entry(code) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(slot) => {
                    let session =
                        RaceSession::new(slot.key().clone(), leader_id, leader_name);
                    let snapshot = session.clone();
                    slot.insert(session);
                    return snapshot;
                }
            }
        }
    }

    /// Create a session under a caller-chosen join code.
    pub fn create_with_code(
        &self,
        code: String,
        leader_id: String,
        leader_name: String,
    ) -> Result<RaceSession, CodeTaken> {
        match self.sessions.entry(code) {
            Entry::Occupied(entry) => Err(CodeTaken {
                code: entry.key().clone(),
            }),
            Entry::Vacant(slot) => {
                let session = RaceSession::new(slot.key().clone(), leader_id, leader_name);
                let snapshot = session.clone();
                slot.insert(session);
                Ok(snapshot)
            }
        }
    }

    /// Run an atomic read-modify-write against one session.
    ///
    /// The mutator executes under the entry's exclusive lock and must stay
    /// synchronous: no awaiting, no calls back into the store. Returning
    /// [`SessionUpdate::Remove`] deletes the entry within the same critical
    /// section. `None` means the code is unknown.
    pub fn with_session<T, F>(&self, code: &str, mutate: F) -> Option<T>
    where
        F: FnOnce(&mut RaceSession) -> (T, SessionUpdate),
    {
        match self.sessions.entry(code.to_string()) {
            Entry::Occupied(mut entry) => {
                let (value, update) = mutate(entry.get_mut());
                if update == SessionUpdate::Remove {
                    entry.remove();
                }
                Some(value)
            }
            Entry::Vacant(_) => None,
        }
    }

    /// Drop a session. Unknown codes are a no-op.
    pub fn remove(&self, code: &str) -> Option<RaceSession> {
        self.sessions.remove(code).map(|(_, session)| session)
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no session is live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Draw a random join code from the uppercase alphanumeric alphabet.
fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
