use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use log::{debug, info, warn};

use crate::keyspace::{Advance, Alphabet, Keyspace, MAX_LEN};
use crate::message::MessageBuffer;
use crate::sha1::{digests_equal, sha1, Digest};

/// CrackConfig bounds a brute-force search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrackConfig {
    /// Longest candidate to try, in `1..=MAX_LEN`.
    pub max_len: usize,
    /// Stop after hashing this many candidates.
    pub candidate_limit: Option<u64>,
}

impl Default for CrackConfig {
    fn default() -> Self {
        CrackConfig {
            max_len: MAX_LEN,
            candidate_limit: None,
        }
    }
}

/// CancelToken stops a running search from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Outcome is how a search ended. `attempts` counts the candidates hashed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A candidate hashed to the target.
    Found { plaintext: String, attempts: u64 },
    /// Every candidate up to the maximum length was tried.
    NotFound { attempts: u64 },
    /// The cancel token fired.
    Cancelled { attempts: u64 },
    /// The configured candidate limit was reached.
    LimitReached { attempts: u64 },
}

impl Outcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found { .. })
    }

    pub fn plaintext(&self) -> Option<&str> {
        match self {
            Outcome::Found { plaintext, .. } => Some(plaintext.as_str()),
            _ => None,
        }
    }

    pub fn attempts(&self) -> u64 {
        match self {
            Outcome::Found { attempts, .. }
            | Outcome::NotFound { attempts }
            | Outcome::Cancelled { attempts }
            | Outcome::LimitReached { attempts } => *attempts,
        }
    }
}

/// Cracker searches a bounded keyspace for a plaintext hashing to `target`.
pub struct Cracker {
    target: Digest,
    alphabet: Alphabet,
    config: CrackConfig,
    cancel: CancelToken,
}

impl Cracker {
    pub fn new(target: Digest, alphabet: Alphabet) -> Self {
        Cracker {
            target,
            alphabet,
            config: CrackConfig::default(),
            cancel: CancelToken::default(),
        }
    }

    pub fn with_config(mut self, config: CrackConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// run enumerates candidates shortest first until one matches the target, the keyspace
    /// runs out, the token is cancelled or the candidate limit is hit.
    pub fn run(&self) -> Result<Outcome> {
        let mut keyspace = Keyspace::new(self.alphabet.clone(), self.config.max_len)?;
        info!(
            "cracking {} over {} symbols, up to {} characters ({} candidates)",
            self.target,
            self.alphabet.len(),
            self.config.max_len,
            keyspace.size()
        );

        let mut attempts = 0u64;
        let outcome = loop {
            if self.cancel.is_cancelled() {
                warn!("search for {} cancelled after {} candidates", self.target, attempts);
                break Outcome::Cancelled { attempts };
            }
            if self.config.candidate_limit == Some(attempts) {
                warn!(
                    "search for {} stopped at the limit of {} candidates",
                    self.target, attempts
                );
                break Outcome::LimitReached { attempts };
            }

            let candidate = match keyspace.current_candidate() {
                Some(candidate) => candidate,
                None => break Outcome::NotFound { attempts },
            };
            let digest = sha1(MessageBuffer::from_text(&candidate));
            attempts += 1;
            if digests_equal(&digest, &self.target) {
                break Outcome::Found {
                    plaintext: candidate,
                    attempts,
                };
            }

            match keyspace.advance() {
                Advance::Stepped => {}
                Advance::Lengthened(len) => {
                    debug!("trying candidates of length {} after {} attempts", len, attempts)
                }
                Advance::Exhausted => break Outcome::NotFound { attempts },
            }
        };

        match &outcome {
            Outcome::Found {
                plaintext,
                attempts,
            } => info!("found {:?} for {} after {} candidates", plaintext, self.target, attempts),
            Outcome::NotFound { attempts } => {
                info!("no plaintext for {} in {} candidates", self.target, attempts)
            }
            _ => {}
        }
        Ok(outcome)
    }
}

/// crack runs a [`Cracker`] with the default configuration.
pub fn crack(target: &Digest, alphabet: &Alphabet) -> Result<Outcome> {
    Cracker::new(*target, alphabet.clone()).run()
}
