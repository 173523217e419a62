use std::cmp::Ordering;

use enumset::EnumSet;

use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::cp::DomainEvent;
use crate::engine::cp::OpaqueDomainEvent;
use crate::engine::cp::Watchers;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::predicates::predicate_constructor::PredicateConstructor;
use crate::engine::variables::DomainId;
use crate::engine::Assignments;
use crate::math::num_ext::NumExt;

/// The view `y = scale * x + offset` on the domain of `x`; the domain of `y` is never stored.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct AffineView<Inner> {
    inner: Inner,
    scale: i32,
    offset: i32,
}

impl<Inner> AffineView<Inner> {
    /// # Panics
    /// If `scale` is zero, as the view would not be invertible.
    pub fn new(inner: Inner, scale: i32, offset: i32) -> Self {
        assert_ne!(scale, 0, "an affine view cannot have a scale of zero");
        AffineView {
            inner,
            scale,
            offset,
        }
    }

    pub fn inner(&self) -> &Inner {
        &self.inner
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// A negative scale turns lower bounds of the inner variable into upper bounds of the view.
    fn is_decreasing(&self) -> bool {
        self.scale < 0
    }

    fn map(&self, value: i32) -> i32 {
        self.scale * value + self.offset
    }

    /// The value of the inner variable which maps onto `value`, if there is one.
    fn preimage(&self, value: i32) -> Option<i32> {
        let shifted = value - self.offset;
        (shifted % self.scale == 0).then(|| shifted / self.scale)
    }

    /// The smallest inner value which maps onto at least `bound` (at most `bound` when the view
    /// is decreasing).
    fn ceil_preimage(&self, bound: i32) -> i32 {
        <i32 as NumExt>::div_ceil(bound - self.offset, self.scale)
    }

    /// The largest inner value which maps onto at most `bound` (at least `bound` when the view is
    /// decreasing).
    fn floor_preimage(&self, bound: i32) -> i32 {
        <i32 as NumExt>::div_floor(bound - self.offset, self.scale)
    }
}

impl<View> IntegerVariable for AffineView<View>
where
    View: IntegerVariable,
{
    type AffineView = Self;

    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        let inner_bound = if self.is_decreasing() {
            self.inner.upper_bound(assignments)
        } else {
            self.inner.lower_bound(assignments)
        };
        self.map(inner_bound)
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        let inner_bound = if self.is_decreasing() {
            self.inner.lower_bound(assignments)
        } else {
            self.inner.upper_bound(assignments)
        };
        self.map(inner_bound)
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        self.preimage(value)
            .is_some_and(|inner_value| self.inner.contains(assignments, inner_value))
    }

    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32> {
        self.inner
            .iterate_domain(assignments)
            .map(|value| self.map(value))
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        let events = if self.is_decreasing() {
            events.iter().map(mirror_bound_event).collect()
        } else {
            events
        };
        self.inner.watch_all(watchers, events);
    }

    fn unpack_event(&self, event: OpaqueDomainEvent) -> DomainEvent {
        let event = self.inner.unpack_event(event);
        if self.is_decreasing() {
            mirror_bound_event(event)
        } else {
            event
        }
    }
}

/// Swaps lower and upper bound events, which is how a negative scale affects the events.
fn mirror_bound_event(event: DomainEvent) -> DomainEvent {
    match event {
        DomainEvent::LowerBound => DomainEvent::UpperBound,
        DomainEvent::UpperBound => DomainEvent::LowerBound,
        other => other,
    }
}

impl<View> TransformableVariable<AffineView<View>> for AffineView<View>
where
    View: IntegerVariable,
{
    fn scaled(&self, scale: i32) -> AffineView<View> {
        AffineView::new(self.inner.clone(), self.scale * scale, self.offset * scale)
    }

    fn offset(&self, offset: i32) -> AffineView<View> {
        AffineView::new(self.inner.clone(), self.scale, self.offset + offset)
    }
}

impl<Var: std::fmt::Debug> std::fmt::Debug for AffineView<Var> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scale {
            1 => write!(f, "({:?})", self.inner)?,
            -1 => write!(f, "-({:?})", self.inner)?,
            scale => write!(f, "{scale} * ({:?})", self.inner)?,
        }

        match self.offset.cmp(&0) {
            Ordering::Less => write!(f, " - {}", -self.offset),
            Ordering::Equal => Ok(()),
            Ordering::Greater => write!(f, " + {}", self.offset),
        }
    }
}

impl<Var: PredicateConstructor<Value = i32>> PredicateConstructor for AffineView<Var> {
    type Value = i32;

    fn lower_bound_predicate(&self, bound: i32) -> Predicate {
        if self.is_decreasing() {
            self.inner.upper_bound_predicate(self.floor_preimage(bound))
        } else {
            self.inner.lower_bound_predicate(self.ceil_preimage(bound))
        }
    }

    fn upper_bound_predicate(&self, bound: i32) -> Predicate {
        if self.is_decreasing() {
            self.inner.lower_bound_predicate(self.ceil_preimage(bound))
        } else {
            self.inner.upper_bound_predicate(self.floor_preimage(bound))
        }
    }

    fn equality_predicate(&self, value: i32) -> Predicate {
        self.preimage(value)
            .map_or_else(Predicate::trivially_false, |inner_value| {
                self.inner.equality_predicate(inner_value)
            })
    }

    fn disequality_predicate(&self, value: i32) -> Predicate {
        self.preimage(value)
            .map_or_else(Predicate::trivially_true, |inner_value| {
                self.inner.disequality_predicate(inner_value)
            })
    }
}

impl From<DomainId> for AffineView<DomainId> {
    fn from(value: DomainId) -> Self {
        AffineView::new(value, 1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn scaling_an_affine_view_scales_the_offset() {
        let view = AffineView::new(DomainId::new(1), 3, 4);
        let scaled_view = view.scaled(-2);

        assert_eq!(-6, scaled_view.scale);
        assert_eq!(-8, scaled_view.offset);
    }

    #[test]
    fn bounds_are_rounded_into_the_inner_domain() {
        let domain = DomainId::new(1);
        let view = AffineView::new(domain, 2, 0);

        assert_eq!(predicate!(domain >= 1), predicate!(view >= 1));
        assert_eq!(predicate!(domain >= -1), predicate!(view >= -3));
        assert_eq!(predicate!(domain <= 0), predicate!(view <= 1));
        assert_eq!(predicate!(domain <= -3), predicate!(view <= -5));
    }

    #[test]
    fn negative_scale_swaps_the_bound_direction() {
        let domain = DomainId::new(1);
        let view = AffineView::new(domain, -2, 0);

        assert_eq!(predicate!(domain >= 2), predicate!(view <= -3));
        assert_eq!(predicate!(domain <= -3), predicate!(view >= 5));
    }

    #[test]
    fn values_outside_the_image_are_trivial() {
        let view = AffineView::new(DomainId::new(1), 2, 1);

        assert_eq!(Predicate::trivially_false(), predicate!(view == 4));
        assert_eq!(Predicate::trivially_true(), predicate!(view != 4));
        assert_eq!(predicate!(view.inner == 2), predicate!(view == 5));
    }
}
