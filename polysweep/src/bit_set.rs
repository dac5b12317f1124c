//! Bit sets of active inputs and the ordered mask to value map used to attribute tagged areas.
use std::{fmt, str::FromStr};

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const WORD_BITS: usize = u32::BITS as usize;

/// Growable set of bit indexes.
///
/// Trailing zero words are never stored so two sets holding the same bits compare equal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitSet {
    words: Vec<u32>,
}

impl BitSet {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .map_or(false, |w| w & (1 << (index % WORD_BITS)) != 0)
    }

    pub fn set(&mut self, index: usize) {
        let w = index / WORD_BITS;
        if w >= self.words.len() {
            self.words.resize(w + 1, 0);
        }
        self.words[w] |= 1 << (index % WORD_BITS);
    }

    pub fn reset(&mut self, index: usize) {
        let w = index / WORD_BITS;
        if let Some(word) = self.words.get_mut(w) {
            *word &= !(1 << (index % WORD_BITS));
            while self.words.last() == Some(&0) {
                self.words.pop();
            }
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Index one past the highest set bit.
    pub fn size(&self) -> usize {
        match self.words.last() {
            Some(&w) => (self.words.len() - 1) * WORD_BITS + (WORD_BITS - w.leading_zeros() as usize),
            None => 0,
        }
    }
}

impl FromIterator<usize> for BitSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        let mut bs = BitSet::new();
        for i in iter {
            bs.set(i);
        }
        bs
    }
}

impl fmt::Display for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size() {
            f.write_str(if self.get(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Condition a [BitSetMask] places on one bit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskValue {
    /// Bit must be clear ('0').
    False,
    /// Bit must be set ('1').
    True,
    /// Bit is ignored ('-').
    Any,
    /// Never matches ('X').
    Never,
}

/// Pattern over bit sets, written as a string of `0`, `1`, `-` and `X` with bit 0 first.
///
/// Bits beyond the end of the mask are not constrained.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitSetMask {
    values: Vec<MaskValue>,
}

impl BitSetMask {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn set(&mut self, index: usize, value: MaskValue) {
        if index >= self.values.len() {
            self.values.resize(index + 1, MaskValue::Any);
        }
        self.values[index] = value;
    }

    #[inline]
    pub fn get(&self, index: usize) -> MaskValue {
        self.values.get(index).copied().unwrap_or(MaskValue::Any)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn matches(&self, bs: &BitSet) -> bool {
        self.values.iter().enumerate().all(|(i, v)| match v {
            MaskValue::False => !bs.get(i),
            MaskValue::True => bs.get(i),
            MaskValue::Any => true,
            MaskValue::Never => false,
        })
    }
}

impl FromStr for BitSetMask {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .chars()
            .map(|c| match c {
                '0' => Ok(MaskValue::False),
                '1' => Ok(MaskValue::True),
                '-' => Ok(MaskValue::Any),
                'X' | 'x' => Ok(MaskValue::Never),
                _ => Err(Error::InvalidBitSetMask(s.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }
}

impl fmt::Display for BitSetMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.values {
            f.write_str(match v {
                MaskValue::False => "0",
                MaskValue::True => "1",
                MaskValue::Any => "-",
                MaskValue::Never => "X",
            })?;
        }
        Ok(())
    }
}

/// Ordered map from [BitSetMask] to values.
///
/// Entries are collected with [BitSetMap::insert], then [BitSetMap::sort] must be called once
/// before the first [BitSetMap::lookup].
#[derive(Debug, Clone)]
pub struct BitSetMap<V> {
    entries: Vec<(BitSetMask, V)>,
    sorted: bool,
}

impl<V> Default for BitSetMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> BitSetMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            sorted: false,
        }
    }

    pub fn insert(&mut self, mask: BitSetMask, value: V) {
        self.entries.push((mask, value));
        self.sorted = false;
    }

    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
        self.sorted = true;
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Calls `inserter` with every value whose mask matches `bs`, in mask order.
    pub fn lookup<F>(&self, bs: &BitSet, mut inserter: F)
    where
        F: FnMut(&V),
    {
        assert!(self.sorted, "BitSetMap::sort must be called before lookup");
        for (mask, value) in &self.entries {
            if mask.matches(bs) {
                inserter(value);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BitSetMask, &V)> + '_ {
        self.entries.iter().map(|(m, v)| (m, v))
    }
}

impl<V> FromIterator<(BitSetMask, V)> for BitSetMap<V> {
    fn from_iter<T: IntoIterator<Item = (BitSetMask, V)>>(iter: T) -> Self {
        let mut map = BitSetMap::new();
        for (m, v) in iter {
            map.insert(m, v);
        }
        map.sort();
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_set_normalizes_trailing_words() {
        let mut a = BitSet::new();
        a.set(40);
        a.set(1);
        a.reset(40);
        let b: BitSet = [1].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "01");
        assert_eq!(a.count(), 1);
    }

    #[test]
    fn mask_parsing_and_matching() {
        let m: BitSetMask = "1-0".parse().unwrap();
        assert_eq!(m.to_string(), "1-0");
        assert!(m.matches(&[0].into_iter().collect()));
        assert!(m.matches(&[0, 1, 5].into_iter().collect()));
        assert!(!m.matches(&[0, 2].into_iter().collect()));
        assert!(!"X".parse::<BitSetMask>().unwrap().matches(&BitSet::new()));
        assert_eq!(
            "10a".parse::<BitSetMask>(),
            Err(Error::InvalidBitSetMask("10a".to_string()))
        );
    }

    #[test]
    fn map_lookup_visits_matching_values() {
        let mut map = BitSetMap::new();
        map.insert("10".parse().unwrap(), 1);
        map.insert("01".parse().unwrap(), 2);
        map.insert("1".parse().unwrap(), 4);
        map.sort();
        let mut sum = 0;
        map.lookup(&[0].into_iter().collect(), |v| sum += v);
        assert_eq!(sum, 5);
    }

    #[test]
    #[should_panic]
    fn lookup_requires_sort() {
        let mut map = BitSetMap::new();
        map.insert(BitSetMask::new(), 1);
        map.lookup(&BitSet::new(), |_| {});
    }
}
