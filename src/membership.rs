//! Growable bit set over point indices.
//!
//! Bit `i` is set while point `i` belongs to the support. Reads past the
//! end are `false`, writes past the end grow the set.

const WORD_BITS: usize = u64::BITS as usize;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Membership {
    words: Vec<u64>,
}

impl Membership {
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: vec![0; (bits + WORD_BITS - 1) / WORD_BITS],
        }
    }

    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .map_or(false, |word| (word >> (index % WORD_BITS)) & 1 != 0)
    }

    pub fn set(&mut self, index: usize, value: bool) {
        let word = index / WORD_BITS;
        if word >= self.words.len() {
            if !value {
                return;
            }
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << (index % WORD_BITS);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    pub fn reset(&mut self) {
        self.words.iter_mut().for_each(|word| *word = 0);
    }

    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }
}
