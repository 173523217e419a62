mod solver_options;
pub(crate) mod solver;

pub mod variables {
    //! The variables of the [`Solver`].
    //!
    //! Integer variables are [`DomainId`]s, made with [`Solver::new_bounded_integer`] or, for a
    //! domain with holes, [`Solver::new_sparse_integer`]. The symbols of a regular constraint are
    //! usually sparse. Any [`IntegerVariable`] can be turned into an [`AffineView`] through
    //! [`TransformableVariable`], and a [`Literal`] is a 0-1 variable from
    //! [`Solver::new_literal`] used to reify constraints.
    pub use crate::engine::variables::AffineView;
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::IntegerVariable;
    pub use crate::engine::variables::Literal;
    pub use crate::engine::variables::TransformableVariable;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! Contains the options which can be passed to the [`Solver`].
    //!
    //! Currently these determine how the regular constraint maintains its layered graph.
    pub use crate::api::solver_options::SolverOptions;
    pub use crate::propagators::regular::RegularFiltering;
    pub use crate::propagators::regular::RegularPropagatorOptions;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod predicates {
    //! Contains the atomic constraints `[x >= v]`, `[x <= v]`, `[x == v]`, and `[x != v]` which
    //! can be posted to the [`Solver`] with [`Solver::post`].
    //!
    //! Predicates are most easily constructed with the [`predicate!`](crate::predicate) macro.
    pub use crate::engine::predicates::predicate::Predicate;
    pub use crate::engine::predicates::predicate_constructor::PredicateConstructor;
    #[cfg(doc)]
    use crate::Solver;
}
