pub mod heuristics;
pub mod policy;
