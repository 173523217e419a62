//! Collections shared by the automaton and the solver.
mod keyed_vec;

use fnv::FnvBuildHasher;
pub use keyed_vec::*;

/// [`std::collections::HashMap`] with the deterministic FNV hasher.
#[allow(clippy::disallowed_types, reason = "the one place the std map is named")]
pub type HashMap<K, V, Hasher = FnvBuildHasher> = std::collections::HashMap<K, V, Hasher>;
/// [`std::collections::HashSet`] with the deterministic FNV hasher.
#[allow(clippy::disallowed_types, reason = "the one place the std set is named")]
pub type HashSet<K, Hasher = FnvBuildHasher> = std::collections::HashSet<K, Hasher>;
