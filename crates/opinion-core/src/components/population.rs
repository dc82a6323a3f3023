//! Population
//!
//! The indexed collection of users. A user's identity is its index, which
//! never changes during a run.

use std::ops::{Index, IndexMut};

use crate::components::user::User;
use crate::rng::{SimRng, MAX_SAMPLING_ATTEMPTS};

/// All users of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    users: Vec<User>,
}

impl Population {
    /// Creates `n` users with default attributes, to be seeded by the initializer.
    pub fn with_size(n: usize) -> Self {
        Self {
            users: vec![User::default(); n],
        }
    }

    pub fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    /// Uniformly random user index
    pub fn random_user(&self, rng: &mut SimRng) -> usize {
        rng.index(self.users.len())
    }

    /// Uniformly random ordered pair of distinct users.
    ///
    /// Returns `None` for populations smaller than two.
    pub fn random_pair(&self, rng: &mut SimRng) -> Option<(usize, usize)> {
        if self.users.len() < 2 {
            return None;
        }
        let v = self.random_user(rng);
        let mut nb = self.random_user(rng);
        while nb == v {
            nb = self.random_user(rng);
        }
        Some((v, nb))
    }

    /// Uniformly random user other than `exclude` satisfying `accept`.
    ///
    /// Resamples up to `MAX_SAMPLING_ATTEMPTS` times, then draws directly from
    /// the matching users. Returns `None` if no user matches.
    pub fn random_user_where<F>(&self, rng: &mut SimRng, exclude: usize, accept: F) -> Option<usize>
    where
        F: Fn(&User) -> bool,
    {
        let eligible = |i: usize| i != exclude && accept(&self.users[i]);
        if !(0..self.users.len()).any(eligible) {
            return None;
        }
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            let candidate = self.random_user(rng);
            if eligible(candidate) {
                return Some(candidate);
            }
        }
        let candidates: Vec<usize> = (0..self.users.len()).filter(|&i| eligible(i)).collect();
        Some(candidates[rng.index(candidates.len())])
    }

    /// Number of users whose group equals `group`
    pub fn group_size(&self, group: f64) -> usize {
        self.users.iter().filter(|u| u.group == group).count()
    }
}

impl Index<usize> for Population {
    type Output = User;

    fn index(&self, index: usize) -> &User {
        &self.users[index]
    }
}

impl IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut User {
        &mut self.users[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_pair_is_distinct() {
        let pop = Population::with_size(3);
        let mut rng = SimRng::seed_from_u64(11);
        for _ in 0..200 {
            let (v, nb) = pop.random_pair(&mut rng).unwrap();
            assert_ne!(v, nb);
            assert!(v < 3 && nb < 3);
        }
    }

    #[test]
    fn test_random_pair_needs_two_users() {
        let mut rng = SimRng::seed_from_u64(11);
        assert!(Population::with_size(1).random_pair(&mut rng).is_none());
        assert!(Population::with_size(0).random_pair(&mut rng).is_none());
    }

    #[test]
    fn test_random_user_where_respects_filter() {
        let pop = Population::from_users(vec![
            User::new(0.0, 0.1),
            User::new(1.0, 0.2),
            User::new(0.0, 0.3),
            User::new(1.0, 0.4),
        ]);
        let mut rng = SimRng::seed_from_u64(5);
        for _ in 0..100 {
            let nb = pop.random_user_where(&mut rng, 0, |u| u.group == 0.0).unwrap();
            assert_eq!(nb, 2);
        }
    }

    #[test]
    fn test_random_user_where_without_match() {
        let pop = Population::from_users(vec![User::new(0.0, 0.1), User::new(1.0, 0.2)]);
        let mut rng = SimRng::seed_from_u64(5);
        assert!(pop.random_user_where(&mut rng, 0, |u| u.group == 0.0).is_none());
    }

    #[test]
    fn test_group_size() {
        let pop = Population::from_users(vec![
            User::new(0.0, 0.1),
            User::new(1.0, 0.2),
            User::new(0.0, 0.3),
        ]);
        assert_eq!(pop.group_size(0.0), 2);
        assert_eq!(pop.group_size(2.0), 0);
    }
}
