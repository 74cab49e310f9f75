/// Variables from which an affine view `scale * x + offset` can be derived.
///
/// The view shares the domain of `x`, so no constraint links the two. Scaling spreads the values
/// apart: with `dom(x) = {1, 2}` the view `x.scaled(2)` has the domain `{2, 4}`.
pub trait TransformableVariable<View> {
    fn scaled(&self, scale: i32) -> View;

    fn offset(&self, offset: i32) -> View;
}
