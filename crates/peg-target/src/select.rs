//! Pick the two largest strip candidates of a frame and order them left/right.
//!
//! The scan keeps two slots and, once both are full, lets a newcomer evict
//! the smaller slot only when it is strictly larger than at least one of
//! them. The retained *areas* always equal the two largest areas seen, but
//! on equal areas the identity of the survivor depends on arrival order:
//! - a newcomer equal to both slots is discarded,
//! - when both slots hold the same area, slot A (the earlier pick) is the
//!   one evicted.

use log::trace;
use peg_target_core::Contour;

use crate::classifier::ContourClassifier;
use crate::descriptor::ContourDescriptor;
use crate::target::TargetState;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, Default)]
struct StripSlots {
    a: Option<ContourDescriptor>,
    b: Option<ContourDescriptor>,
}

impl StripSlots {
    fn offer(&mut self, d: ContourDescriptor) {
        match (self.a, self.b) {
            (None, _) => self.a = Some(d),
            (Some(_), None) => self.b = Some(d),
            (Some(a), Some(b)) => {
                if d.area > a.area || d.area > b.area {
                    if a.area > b.area {
                        trace!("strip {} replaces strip {} in slot B", d.index, b.index);
                        self.b = Some(d);
                    } else {
                        trace!("strip {} replaces strip {} in slot A", d.index, a.index);
                        self.a = Some(d);
                    }
                } else {
                    trace!("strip {} (area {}) discarded", d.index, d.area);
                }
            }
        }
    }

    fn into_state(self) -> TargetState {
        match (self.a, self.b) {
            (Some(a), Some(b)) => {
                let (left, right) = if a.left_edge() > b.left_edge() {
                    (b, a)
                } else {
                    (a, b)
                };
                TargetState::Complete { left, right }
            }
            (Some(strip), None) | (None, Some(strip)) => TargetState::Partial { strip },
            (None, None) => TargetState::Absent,
        }
    }
}

/// Run the two-slot scan over descriptors that already passed classification.
///
/// Descriptors are consumed in iteration order; that order decides ties.
pub fn select_from_descriptors<I>(descriptors: I) -> TargetState
where
    I: IntoIterator<Item = ContourDescriptor>,
{
    let mut slots = StripSlots::default();
    for d in descriptors {
        slots.offer(d);
    }
    slots.into_state()
}

/// Classify every contour of a frame and select up to two strips.
///
/// Input order is preserved all the way into the scan. An empty frame, or
/// one where nothing passes the classifier, yields [`TargetState::Absent`].
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(contours, classifier), fields(contours = contours.len()))
)]
pub fn select_strips<C>(contours: &[Contour], classifier: &C) -> TargetState
where
    C: ContourClassifier + ?Sized,
{
    select_from_descriptors(
        contours
            .iter()
            .enumerate()
            .filter(|(_, c)| classifier.is_target_strip(c))
            .map(|(index, c)| ContourDescriptor::new(index, c)),
    )
}
