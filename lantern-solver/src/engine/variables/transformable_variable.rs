/// Affine views over a variable, which are created without adding a constraint.
pub trait TransformableVariable<View> {
    /// The view `scale * self`.
    ///
    /// Only multiples of `scale` are in its domain: with `dom(x) = {1, 2}`,
    /// `dom(x.scaled(2)) = {2, 4}`.
    fn scaled(&self, scale: i32) -> View;

    /// The view `self + offset`.
    fn offset(&self, offset: i32) -> View;
}
