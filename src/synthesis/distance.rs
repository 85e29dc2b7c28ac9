//! Plain Levenshtein distance

/// Minimum number of single-character inserts, removes and replaces turning
/// `s1` into `s2`.
pub fn edit_distance(s1: &str, s2: &str) -> usize {
    let s1: Vec<char> = s1.chars().collect();
    let s2: Vec<char> = s2.chars().collect();

    let mut previous: Vec<usize> = (0..=s1.len()).collect();
    let mut current = vec![0; s1.len() + 1];

    for j in 1..=s2.len() {
        current[0] = j;
        for i in 1..=s1.len() {
            current[i] = if s1[i - 1] == s2[j - 1] {
                previous[i - 1]
            } else {
                1 + previous[i].min(current[i - 1]).min(previous[i - 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[s1.len()]
}
