//! User Record
//!
//! The mutable state of one member of the population.

use serde::{Deserialize, Serialize};

/// Each user is a member of a group, may or may not discriminate against
/// members of other groups, holds an opinion, has a tolerance, and is
/// susceptible to other opinions.
///
/// In ageing mode `group` holds the age and advances over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub group: f64,
    /// Fixed at initialization
    pub discriminates: bool,
    /// Kept within [0, 1] by every update
    pub opinion: f64,
    /// Opinion distance up to which an interaction has any effect
    pub tolerance: f64,
    /// Same-group interaction strength
    pub susceptibility_1: f64,
    /// Reduced inter-group interaction strength
    pub susceptibility_2: f64,
}

impl Default for User {
    fn default() -> Self {
        Self {
            group: 0.0,
            discriminates: false,
            opinion: 0.5,
            tolerance: 0.0,
            susceptibility_1: 0.0,
            susceptibility_2: 0.0,
        }
    }
}

impl User {
    pub fn new(group: f64, opinion: f64) -> Self {
        Self {
            group,
            opinion,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_susceptibilities(mut self, susceptibility_1: f64, susceptibility_2: f64) -> Self {
        self.susceptibility_1 = susceptibility_1;
        self.susceptibility_2 = susceptibility_2;
        self
    }

    pub fn with_discrimination(mut self, discriminates: bool) -> Self {
        self.discriminates = discriminates;
        self
    }

    /// Whether `nb_op` lies within this user's bounded-confidence interval.
    pub fn tolerates(&self, nb_op: f64) -> bool {
        (self.opinion - nb_op).abs() <= self.tolerance
    }

    pub fn same_group(&self, other: &User) -> bool {
        self.group == other.group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let user = User::new(2.0, 0.3)
            .with_tolerance(0.2)
            .with_susceptibilities(0.5, 0.25)
            .with_discrimination(true);

        assert_eq!(user.group, 2.0);
        assert_eq!(user.opinion, 0.3);
        assert_eq!(user.tolerance, 0.2);
        assert_eq!(user.susceptibility_1, 0.5);
        assert_eq!(user.susceptibility_2, 0.25);
        assert!(user.discriminates);
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let user = User::new(0.0, 0.25).with_tolerance(0.25);
        assert!(user.tolerates(0.5));
        assert!(user.tolerates(0.0));
        assert!(!user.tolerates(0.51));
    }
}
