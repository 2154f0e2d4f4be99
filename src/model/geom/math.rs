use approx::{relative_eq, relative_ne};

/// Epsilon-aware float comparisons. The board-level geometry is all in
/// millimetres, so an absolute/relative combination via `approx` avoids the
/// usual accumulation of rounding error across chained transforms.
pub fn eq(a: f64, b: f64) -> bool {
    relative_eq!(a, b)
}

pub fn lt(a: f64, b: f64) -> bool {
    relative_ne!(a, b) && a < b
}

pub fn le(a: f64, b: f64) -> bool {
    relative_eq!(a, b) || a < b
}

pub fn gt(a: f64, b: f64) -> bool {
    relative_ne!(a, b) && a > b
}

pub fn ge(a: f64, b: f64) -> bool {
    relative_eq!(a, b) || a > b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsilon_equal() {
        assert!(eq(1.0, 1.0 + 1e-15));
        assert!(!lt(1.0, 1.0 + 1e-15));
        assert!(le(1.0, 1.0 + 1e-15));
    }
}
