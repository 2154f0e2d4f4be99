//! Predicate modules for the [`crate::model::shape::Shape`] kernel: epsilon
//! comparisons, containment, distance and intersection tests. Kept separate
//! from the shape types themselves so each predicate family can be tested in
//! isolation.
pub mod contains;
pub mod distance;
pub mod intersects;
pub mod math;
