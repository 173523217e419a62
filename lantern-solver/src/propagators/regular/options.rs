use std::fmt::Display;

use clap::ValueEnum;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum RegularFiltering {
    /// Maintain the layered graph between calls and only recompute the layers affected by
    /// domain changes
    #[default]
    Incremental,
    /// Rebuild the layered graph on every call
    FromScratch,
}

impl Display for RegularFiltering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegularFiltering::Incremental => write!(f, "incremental"),
            RegularFiltering::FromScratch => write!(f, "from-scratch"),
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RegularPropagatorOptions {
    /// How the propagator maintains its layered graph
    pub filtering: RegularFiltering,
}

impl RegularPropagatorOptions {
    pub fn new(filtering: RegularFiltering) -> Self {
        Self { filtering }
    }
}
