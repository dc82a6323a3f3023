//! Opinion Update Functions
//!
//! The bounded-confidence primitives shared by every interaction mode. Each
//! one changes the user's opinion only if the partner's opinion lies within
//! the user's tolerance.

use crate::components::User;

/// Tolerance as a function of opinion. Users with extreme opinions have a
/// reduced tolerance; the maximum `tolerance_param` is reached at 0.5.
pub fn tolerance_func(opinion: f64, tolerance_param: f64) -> f64 {
    tolerance_param * (1.0 - 2.0 * (opinion - 0.5).powi(2))
}

/// New opinion of a user with opinion `op_1` rejecting opinion `op_2`.
///
/// A user at exactly 0 always takes the first branch; the second divides
/// by `op_1`.
pub fn rejection_func(op_1: f64, op_2: f64, susc: f64) -> f64 {
    if op_1 < op_2 || op_1 == 0.0 {
        op_1 * (1.0 - susc * ((op_2 - op_1) / (1.0 - op_1)))
    } else {
        op_1 + susc * ((1.0 - op_1) * (op_1 - op_2) / op_1)
    }
}

/// Moves the user toward `nb_op` with the same-group susceptibility.
pub fn update_opinion(user: &mut User, nb_op: f64) {
    if user.tolerates(nb_op) {
        user.opinion += user.susceptibility_1 * (nb_op - user.opinion);
    }
}

/// Moves the user toward `nb_op` with the reduced susceptibility.
pub fn update_opinion_disc(user: &mut User, nb_op: f64) {
    if user.tolerates(nb_op) {
        user.opinion += user.susceptibility_2 * (nb_op - user.opinion);
    }
}

/// Pushes the user away from `nb_op`. Users reject opinions to the same
/// degree they would otherwise agree with them.
pub fn reject_opinion(user: &mut User, nb_op: f64) {
    if user.tolerates(nb_op) {
        user.opinion = rejection_func(user.opinion, nb_op, user.susceptibility_1);
    }
}

/// Recomputes the user's tolerance from its current opinion.
pub fn refresh_tolerance(user: &mut User, tolerance_param: f64) {
    user.tolerance = tolerance_func(user.opinion, tolerance_param);
}
