//! k-subset enumeration and counting.

/// Binomial coefficient C(n, k), saturating at `u128::MAX`.
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // Exact at every step: result * (n - i) is divisible by (i + 1).
        result = result.saturating_mul((n - i) as u128) / (i as u128 + 1);
    }
    result
}

/// Lexicographic iterator over the k-subsets of `0..n`, as index vectors.
#[derive(Debug, Clone)]
pub struct Combinations {
    indices: Vec<usize>,
    n: usize,
    done: bool,
}

/// Enumerate every k-subset of `0..n`.
pub fn combinations(n: usize, k: usize) -> Combinations {
    Combinations {
        indices: (0..k).collect(),
        n,
        done: k > n,
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.clone();

        let k = self.indices.len();
        // Rightmost index that can still move right.
        match (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(5, 3), 10);
        assert_eq!(binomial(52, 5), 2_598_960);
        assert_eq!(binomial(43, 4), 123_410);
        assert_eq!(binomial(7, 0), 1);
        assert_eq!(binomial(3, 4), 0);
    }

    #[test]
    fn test_combinations_match_binomial() {
        for n in 0..9 {
            for k in 0..=n {
                assert_eq!(combinations(n, k).count() as u128, binomial(n, k), "C({}, {})", n, k);
            }
        }
        assert_eq!(combinations(3, 5).count(), 0);
    }

    #[test]
    fn test_combinations_order() {
        let all: Vec<Vec<usize>> = combinations(4, 2).collect();
        assert_eq!(
            all,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(combinations(5, 0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
    }
}
