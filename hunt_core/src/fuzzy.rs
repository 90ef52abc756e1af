//! Approximate string matching
//!
//! Ratcliff/Obershelp similarity: twice the number of matched characters
//! divided by the combined length, where matches are found by repeatedly
//! taking the longest common block and recursing on both sides of it.

/// Similarity in `0.0..=1.0`
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_match(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

/// Longest common block as (start in a, start in b, length).
/// Ties go to the block that ends earliest in `a`, then in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            let k = curr[j + 1];
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

/// Up to `n` candidates scoring at least `cutoff`, best first.
/// Equal scores keep candidate order.
pub fn close_matches<'a, I>(word: &str, candidates: I, n: usize, cutoff: f64) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(f64, &'a str)> = candidates
        .into_iter()
        .map(|c| (ratio(word, c), c))
        .filter(|(score, _)| *score >= cutoff)
        .collect();
    scored.sort_by(|x, y| y.0.partial_cmp(&x.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(n).map(|(_, c)| c).collect()
}

/// Single best candidate scoring at least `cutoff`
pub fn best_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    close_matches(word, candidates, 1, cutoff).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identity_and_disjoint() {
        assert!((ratio("Tail", "Tail") - 1.0).abs() < f64::EPSILON);
        assert!(ratio("abc", "xyz").abs() < f64::EPSILON);
        assert!((ratio("", "") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ratio_known_value() {
        // "abcd" vs "bcde": block "bcd" -> 2 * 3 / 8
        assert!((ratio("abcd", "bcde") - 0.75).abs() < 1e-12);
        // "Wing" vs "Wings": 2 * 4 / 9
        assert!((ratio("Wing", "Wings") - 8.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_close_matches_cutoff() {
        let breaks = ["Head", "Back", "Wings", "Tail"];
        assert_eq!(best_match("Wing", breaks.iter().copied(), 0.8), Some("Wings"));
        assert_eq!(best_match("Neck", breaks.iter().copied(), 0.8), None);
        let many = close_matches("Rathalos Rubi", ["Rathalos Ruby", "Rathian Ruby", "Bone"], 3, 0.5);
        assert_eq!(many[0], "Rathalos Ruby");
        assert!(!many.contains(&"Bone"));
    }
}
