use anyhow::{anyhow, bail, ensure, Result};
use once_cell::sync::Lazy;

/// MAX_LEN is the longest candidate the enumerator will produce.
pub const MAX_LEN: usize = 10;

/// LOWERCASE holds the 26 lowercase latin letters.
pub static LOWERCASE: Lazy<Alphabet> =
    Lazy::new(|| Alphabet::from_ascii(b"abcdefghijklmnopqrstuvwxyz"));

/// ALPHANUMERIC holds `a-z`, then `A-Z`, then `0-9`.
pub static ALPHANUMERIC: Lazy<Alphabet> = Lazy::new(|| {
    Alphabet::from_ascii(b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789")
});

/// Alphabet is an ordered set of distinct ASCII symbols.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<u8>,
}

impl Alphabet {
    /// new validates the symbols: at least one, all ASCII and pairwise distinct.
    pub fn new(symbols: &str) -> Result<Self> {
        let bytes = symbols.as_bytes();
        ensure!(!bytes.is_empty(), "alphabet is empty");
        ensure!(symbols.is_ascii(), "alphabet {:?} contains non-ASCII symbols", symbols);

        let mut seen = [false; 128];
        for &b in bytes {
            if seen[b as usize] {
                bail!("alphabet {:?} repeats symbol {:?}", symbols, b as char);
            }
            seen[b as usize] = true;
        }

        Ok(Self::from_ascii(bytes))
    }

    fn from_ascii(symbols: &[u8]) -> Self {
        Alphabet {
            symbols: symbols.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).map(|b| *b as char)
    }

    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.symbols.contains(&(c as u8))
    }

    pub fn as_str(&self) -> &str {
        // only ASCII bytes are ever stored
        std::str::from_utf8(&self.symbols).unwrap_or_default()
    }
}

/// Counter is the odometer behind the enumerator.
///
/// Slots `0..active_len` hold alphabet indices, the least significant digit first. Slots at
/// or past `active_len` are sentinels: not yet part of the candidate. A sentinel only ever
/// becomes 0, which is how the candidate grows by one symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counter {
    slots: [u8; MAX_LEN],
    active_len: usize,
}

impl Default for Counter {
    fn default() -> Self {
        Counter {
            slots: [0; MAX_LEN],
            active_len: 1,
        }
    }
}

impl Counter {
    /// slot returns `None` for sentinel slots and an error for indices past `MAX_LEN`.
    pub fn slot(&self, index: usize) -> Result<Option<u8>> {
        if index >= MAX_LEN {
            return Err(anyhow!(
                "counter slot {} out of range, capacity is {}",
                index,
                MAX_LEN
            ));
        }
        if index >= self.active_len {
            return Ok(None);
        }
        Ok(Some(self.slots[index]))
    }

    pub fn active_len(&self) -> usize {
        self.active_len
    }

    pub fn digits(&self) -> &[u8] {
        &self.slots[..self.active_len]
    }
}

/// Advance is the result of stepping the enumerator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The next candidate has the same length as the previous one.
    Stepped,
    /// The carry reached a sentinel slot; the next candidate has this length.
    Lengthened(usize),
    /// Every candidate up to the maximum length has been produced.
    Exhausted,
}

/// Keyspace enumerates every string over an alphabet, shortest first, up to `max_len`
/// symbols. Within one length slot 0 varies fastest.
#[derive(Clone, Debug)]
pub struct Keyspace {
    alphabet: Alphabet,
    counter: Counter,
    max_len: usize,
    exhausted: bool,
}

impl Keyspace {
    pub fn new(alphabet: Alphabet, max_len: usize) -> Result<Self> {
        ensure!(
            (1..=MAX_LEN).contains(&max_len),
            "max length {} out of range 1..={}",
            max_len,
            MAX_LEN
        );
        Ok(Keyspace {
            alphabet,
            counter: Counter::default(),
            max_len,
            exhausted: false,
        })
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// size returns the number of candidates, `A + A^2 + ... + A^max_len`.
    pub fn size(&self) -> u128 {
        let a = self.alphabet.len() as u128;
        (1..=self.max_len as u32).map(|l| a.pow(l)).sum()
    }

    /// current_candidate returns the candidate selected by the active slots, or `None`
    /// once the keyspace is exhausted.
    pub fn current_candidate(&self) -> Option<String> {
        if self.exhausted {
            return None;
        }
        Some(
            self.counter
                .digits()
                .iter()
                .map(|&d| self.alphabet.symbols[d as usize] as char)
                .collect(),
        )
    }

    /// advance moves to the next candidate.
    pub fn advance(&mut self) -> Advance {
        if self.exhausted {
            return Advance::Exhausted;
        }

        let top = (self.alphabet.len() - 1) as u8;
        let counter = &mut self.counter;
        for i in 0..self.max_len {
            if i == counter.active_len {
                counter.slots[i] = 0;
                counter.active_len += 1;
                return Advance::Lengthened(counter.active_len);
            }
            if counter.slots[i] == top {
                counter.slots[i] = 0;
            } else {
                counter.slots[i] += 1;
                return Advance::Stepped;
            }
        }

        self.exhausted = true;
        Advance::Exhausted
    }
}

impl Iterator for Keyspace {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let candidate = self.current_candidate()?;
        self.advance();
        Some(candidate)
    }
}
