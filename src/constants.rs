pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
pub const CONVERGENCE_TOLERANCE: f64 = 1e-4;
pub const ROUNDING_PRECISION: i32 = 5;
/// Below this many degrees of freedom the solver iterates to convergence.
pub const REFINEMENT_DOF_LIMIT: usize = 31;
/// Above this many degrees of freedom the Wilson-Hilferty approximation is used as is.
pub const SERIES_DOF_LIMIT: usize = 100;
pub const UPPER_TAIL_CUTOFF: f64 = 400.0;
pub const ITERATION_LIMIT: usize = 1000;
