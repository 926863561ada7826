//! Move and build legality.
//!
//! The `Evaluator` computes the sets of legal destinations from the board,
//! the tokens and the rule overrides in effect. It never knows which deity
//! card produced those overrides.

mod evaluator;

pub use evaluator::Evaluator;
