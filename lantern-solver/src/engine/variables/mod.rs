//! Integer variables: domains stored in the solver and affine views over them.

mod affine_view;
mod domain_id;
mod integer_variable;
mod literal;
mod transformable_variable;

pub use affine_view::AffineView;
pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
pub use literal::Literal;
pub use transformable_variable::TransformableVariable;
