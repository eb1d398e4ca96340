//! Reviewer selection for pull requests.

use rand::seq::SliceRandom;
use rand::Rng;

/// Build the candidate pool: candidates minus the author and excluded names.
///
/// Order is kept and duplicates are dropped.
pub fn reviewer_pool(candidates: &[String], author: &str, exclude: &[String]) -> Vec<String> {
    let mut pool: Vec<String> = Vec::with_capacity(candidates.len());
    for name in candidates {
        if name != author && !exclude.contains(name) && !pool.contains(name) {
            pool.push(name.clone());
        }
    }
    pool
}

/// Pick up to `amount` reviewers from the pool.
///
/// An `amount` of zero, or a pool no larger than `amount`, selects the
/// whole pool in its original order.
pub fn pick_reviewers(pool: Vec<String>, amount: usize, rng: &mut impl Rng) -> Vec<String> {
    if amount == 0 || pool.len() <= amount {
        return pool;
    }

    let mut pool = pool;
    pool.shuffle(rng);
    pool.truncate(amount);
    pool
}

/// Select reviewers for a pull request.
pub fn select_reviewers(
    candidates: &[String],
    author: &str,
    exclude: &[String],
    amount: usize,
    rng: &mut impl Rng,
) -> Vec<String> {
    let pool = reviewer_pool(candidates, author, exclude);
    log::debug!("Picking {} reviewer(s) from {:?}", amount, pool);
    pick_reviewers(pool, amount, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pool_excludes_author_and_excluded() {
        let pool = reviewer_pool(
            &names(&["alice", "bob", "carol", "dave", "bob"]),
            "alice",
            &names(&["carol"]),
        );
        assert_eq!(pool, names(&["bob", "dave"]));
    }

    #[test]
    fn test_amount_zero_selects_everyone() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = names(&["a", "b", "c"]);
        assert_eq!(pick_reviewers(pool.clone(), 0, &mut rng), pool);
    }

    #[test]
    fn test_small_pool_selects_everyone() {
        let mut rng = StdRng::seed_from_u64(7);
        let pool = names(&["a", "b"]);
        assert_eq!(pick_reviewers(pool.clone(), 2, &mut rng), pool);
        assert_eq!(pick_reviewers(pool.clone(), 5, &mut rng), pool);
    }

    #[test]
    fn test_random_subset() {
        let mut rng = StdRng::seed_from_u64(42);
        let pool = names(&["a", "b", "c", "d", "e"]);
        let picked = pick_reviewers(pool.clone(), 2, &mut rng);

        assert_eq!(picked.len(), 2);
        assert_ne!(picked[0], picked[1]);
        assert!(picked.iter().all(|name| pool.contains(name)));
    }

    #[test]
    fn test_select_reviewers_never_picks_author() {
        let mut rng = StdRng::seed_from_u64(1);
        let candidates = names(&["author", "x", "y", "z"]);
        for _ in 0..20 {
            let picked = select_reviewers(&candidates, "author", &[], 1, &mut rng);
            assert_eq!(picked.len(), 1);
            assert_ne!(picked[0], "author");
        }
    }
}
