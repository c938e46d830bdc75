pub mod non_linear;
pub mod spline;
