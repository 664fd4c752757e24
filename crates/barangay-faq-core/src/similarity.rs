//! Lexical similarity scoring.
//!
//! Two measures are combined by the matcher:
//!
//! - [`ratio`]: a character-level sequence similarity in `[0, 1]`, computed
//!   as `2 * M / (len(a) + len(b))` where `M` is the number of characters
//!   covered by the matching blocks found by recursive longest-common-block
//!   search (the Ratcliff/Obershelp "gestalt" approach, not edit distance).
//! - [`word_overlap`]: the share of whitespace-delimited words two strings
//!   have in common.
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use std::collections::{HashMap, HashSet};

/// Second operands at least this long have their most frequent characters
/// excluded from block seeding.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Sequence similarity of `a` against `b`, in `[0, 1]`.
///
/// Two empty strings are identical (`1.0`); one empty operand gives `0.0`.
/// The measure is not symmetric: long `b` operands are subject to the
/// popular-character heuristic, and block selection prefers the earliest
/// position in `a`.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// [`ratio`] over pre-split character slices.
pub fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched = BlockMatcher::new(a, b).matched_len();
    2.0 * matched as f64 / total as f64
}

/// Longest-matching-block search over two character sequences.
struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    /// Positions of each character in `b`, ascending. Popular characters
    /// of long `b` sequences are absent.
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &ch) in b.iter().enumerate() {
            b2j.entry(ch).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }

        Self { a, b, b2j }
    }

    /// Longest block `a[i..i+k] == b[j..j+k]` within the given windows.
    ///
    /// Among equally long blocks the one starting earliest in `a`, then
    /// earliest in `b`, wins. Returns `(i, j, k)`; `k == 0` means no match.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (a, b) = (self.a, self.b);
        let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0usize);

        // j2len[j] = length of the block ending at a[i-1], b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
            let mut next: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(ch) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next.insert(j, k);
                    if k > best_k {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_k = k;
                    }
                }
            }
            j2len = next;
        }

        // Popular characters never seed a block but may still extend one.
        while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_k += 1;
        }
        while best_i + best_k < ahi && best_j + best_k < bhi && a[best_i + best_k] == b[best_j + best_k]
        {
            best_k += 1;
        }

        (best_i, best_j, best_k)
    }

    /// Total characters covered by all matching blocks.
    fn matched_len(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];

        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }

        total
    }
}

/// Word-overlap score between two already-normalized strings.
///
/// Returns `None` when they share no whitespace-delimited word, otherwise
/// `common / max(|words(a)|, |words(b)|)` over distinct words.
pub fn word_overlap(a: &str, b: &str) -> Option<f64> {
    let a_words: HashSet<&str> = a.split_whitespace().collect();
    let b_words: HashSet<&str> = b.split_whitespace().collect();

    let common = a_words.intersection(&b_words).count();
    if common == 0 {
        return None;
    }

    let denom = a_words.len().max(b_words.len());
    Some(common as f64 / denom as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        assert!(approx(ratio("barangay hall", "barangay hall"), 1.0));
    }

    #[test]
    fn test_both_empty_is_one() {
        assert!(approx(ratio("", ""), 1.0));
    }

    #[test]
    fn test_one_empty_is_zero() {
        assert!(approx(ratio("", "what is a barangay?"), 0.0));
        assert!(approx(ratio("what is a barangay?", ""), 0.0));
    }

    #[test]
    fn test_disjoint_characters() {
        assert!(approx(ratio("qqq", "what is a barangay?"), 0.0));
    }

    #[test]
    fn test_shifted_overlap() {
        // "bcd" is the only block: 2 * 3 / 8
        assert!(approx(ratio("abcd", "bcde"), 0.75));
    }

    #[test]
    fn test_ratio_is_not_symmetric() {
        // tide/diet: the first longest block chosen differs with operand order
        assert!(approx(ratio("tide", "diet"), 0.25));
        assert!(approx(ratio("diet", "tide"), 0.5));
    }

    #[test]
    fn test_recursive_blocks_are_counted() {
        // " barangay" (9) + " a" (2) + "t" (1) + " " (1) = 13 of 41 chars
        let r = ratio("tell me about barangay", "what is a barangay?");
        assert!(approx(r, 26.0 / 41.0), "got {}", r);
    }

    #[test]
    fn test_popular_characters_in_long_operand_do_not_seed() {
        let a = "x".repeat(10);
        let b = format!("y{}", "x".repeat(299));
        assert!(approx(ratio(&a, &b), 0.0));
        // Below the length cutoff the same characters match normally.
        let short_b = format!("y{}", "x".repeat(149));
        assert!(approx(ratio(&a, &short_b), 20.0 / 160.0));
    }

    #[test]
    fn test_popular_characters_extend_from_window_start() {
        // No block is seeded, but the empty best block still grows forward.
        let r = ratio(&"x".repeat(10), &"x".repeat(300));
        assert!(approx(r, 20.0 / 310.0));
    }

    #[test]
    fn test_unicode_counts_scalar_values() {
        // 'ñ' is two bytes but one character
        assert!(approx(ratio("niño", "nino"), 0.75));
    }

    #[test]
    fn test_ratio_in_unit_interval() {
        let samples = [
            ("", "a"),
            ("how do i file a complaint", "how to file a complaint?"),
            ("lupon tagapamayapa", "what does the lupon do"),
            ("a b c", "c b a"),
        ];
        for (a, b) in samples {
            let r = ratio(a, b);
            assert!((0.0..=1.0).contains(&r), "{} vs {} gave {}", a, b, r);
        }
    }

    #[test]
    fn test_word_overlap_none_without_common_words() {
        assert_eq!(word_overlap("tell me about barangay", "what is a barangay?"), None);
    }

    #[test]
    fn test_word_overlap_uses_larger_set() {
        let score = word_overlap("alpha beta", "beta gamma delta").unwrap();
        assert!(approx(score, 1.0 / 3.0));
    }

    #[test]
    fn test_word_overlap_counts_distinct_words() {
        let score = word_overlap("fee fee fee", "fee").unwrap();
        assert!(approx(score, 1.0));
    }

    #[test]
    fn test_word_overlap_empty_input() {
        assert_eq!(word_overlap("", "anything"), None);
    }
}
