use crate::message::CHUNK_WORDS;

/// Number of mixing rounds applied to every chunk.
pub const ROUNDS: usize = 80;

/// INITIAL_STATE is the value of the five accumulators before the first chunk.
pub const INITIAL_STATE: [u32; 5] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476, 0xC3D2E1F0];

/// RoundFunction is the boolean mixing function used by one 20-round stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundFunction {
    /// `b` selects between `c` and `d`.
    Choose,
    /// Bitwise xor of all three inputs.
    Parity,
    /// Each bit is set when at least two inputs have it set.
    Majority,
}

impl RoundFunction {
    #[inline(always)]
    pub fn apply(self, b: u32, c: u32, d: u32) -> u32 {
        match self {
            RoundFunction::Choose => (b & c) | (!b & d),
            RoundFunction::Parity => b ^ c ^ d,
            RoundFunction::Majority => (b & c) | (b & d) | (c & d),
        }
    }
}

// stage = round / 20
const STAGES: [(RoundFunction, u32); 4] = [
    (RoundFunction::Choose, 0x5A827999),
    (RoundFunction::Parity, 0x6ED9EBA1),
    (RoundFunction::Majority, 0x8F1BBCDC),
    (RoundFunction::Parity, 0xCA62C1D6),
];

/// stage returns the round function and additive constant used in the given round.
pub fn stage(round: usize) -> (RoundFunction, u32) {
    STAGES[round / 20]
}

/// compress mixes one 512-bit chunk into the running accumulators.
///
/// The message schedule is kept as a 16-word ring: from round 16 on, slot `r % 16` is
/// overwritten with the expansion of the four words it depends on.
pub fn compress(state: &mut [u32; 5], chunk: &[u32; CHUNK_WORDS]) {
    let mut w = *chunk;
    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for r in 0..ROUNDS {
        if r >= CHUNK_WORDS {
            let z = w[(r - 16) % 16] ^ w[(r - 14) % 16] ^ w[(r - 8) % 16] ^ w[(r - 3) % 16];
            w[r % 16] = z.rotate_left(1);
        }

        let (f, k) = stage(r);
        let temp = e
            .wrapping_add(f.apply(b, c, d))
            .wrapping_add(a.rotate_left(5))
            .wrapping_add(w[r % 16])
            .wrapping_add(k);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}

/// compress_words runs every 16-word chunk of a padded message through [`compress`].
pub fn compress_words(state: &mut [u32; 5], words: &[u32]) {
    if words.len() % CHUNK_WORDS != 0 {
        panic!(
            "could not compress message. word count is {:?}, expected a multiple of {:?}",
            words.len(),
            CHUNK_WORDS
        );
    }

    words.chunks_exact(CHUNK_WORDS).for_each(|chunk| {
        let mut block = [0u32; CHUNK_WORDS];
        block.copy_from_slice(chunk);
        compress(state, &block);
    });
}
