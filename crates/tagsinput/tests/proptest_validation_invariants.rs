//! Property-based invariant tests for the tag validation rules.
//!
//! 1. A proposed list containing a blank string is always rejected and the
//!    previous value is kept.
//! 2. With a non-empty allow-list, a list is rejected iff some tag is outside it.
//! 3. With an empty allow-list, every non-blank list is accepted verbatim.
//! 4. Numeric lists are rejected iff some tag is below `min` or above `max`.
//! 5. Re-assigning the current value always succeeds.

use proptest::prelude::*;
use tagsinput::{IntTagCollection, StringTagCollection, TagInput, ValidationError};

// ── Helpers ─────────────────────────────────────────────────────────────

fn tag_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,3}"
}

fn tags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(tag_strategy(), 0..8)
}

fn bound_strategy() -> impl Strategy<Value = Option<i64>> {
    prop::option::of(-50i64..50)
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn blank_tag_always_rejected(
        previous in tags_strategy(),
        mut proposed in tags_strategy(),
        at in any::<prop::sample::Index>(),
    ) {
        let mut widget = StringTagCollection::new();
        widget.set_value(previous.clone()).unwrap();

        let position = at.index(proposed.len() + 1);
        proposed.insert(position, String::new());

        prop_assert_eq!(widget.set_value(proposed), Err(ValidationError::BlankValue));
        prop_assert_eq!(widget.value(), previous.as_slice());
    }

    #[test]
    fn allow_list_rejects_iff_outsider(
        allowed in prop::collection::vec(tag_strategy(), 1..5),
        proposed in tags_strategy(),
    ) {
        let mut widget = StringTagCollection::new();
        widget.set_allowed_tags(allowed.clone());

        let has_outsider = proposed.iter().any(|tag| !allowed.contains(tag));
        let result = widget.set_value(proposed.clone());

        prop_assert_eq!(result.is_err(), has_outsider);
        if has_outsider {
            prop_assert!(
                matches!(result, Err(ValidationError::NotAllowed { .. })),
                "expected NotAllowed error"
            );
            prop_assert!(widget.value().is_empty());
        } else {
            prop_assert_eq!(widget.value(), proposed.as_slice());
        }
    }

    #[test]
    fn empty_allow_list_accepts_everything_non_blank(proposed in tags_strategy()) {
        let mut widget = StringTagCollection::new();
        prop_assert!(widget.set_value(proposed.clone()).is_ok());
        prop_assert_eq!(widget.value(), proposed.as_slice());
    }

    #[test]
    fn range_rejects_iff_out_of_bounds(
        min in bound_strategy(),
        max in bound_strategy(),
        proposed in prop::collection::vec(-100i64..100, 0..8),
    ) {
        let mut widget = IntTagCollection::new();
        widget.set_min(min);
        widget.set_max(max);

        let out_of_bounds = proposed.iter().any(|&tag| {
            min.is_some_and(|min| tag < min) || max.is_some_and(|max| tag > max)
        });
        let result = widget.set_value(proposed.clone());

        prop_assert_eq!(result.is_err(), out_of_bounds);
        if out_of_bounds {
            prop_assert!(
                matches!(result, Err(ValidationError::OutOfRange { .. })),
                "expected OutOfRange error"
            );
        } else {
            prop_assert_eq!(widget.value(), proposed.as_slice());
        }
    }

    #[test]
    fn current_value_is_always_reacceptable(
        allowed in prop::collection::vec(tag_strategy(), 0..5),
        proposed in tags_strategy(),
    ) {
        let mut widget = StringTagCollection::new();
        widget.set_allowed_tags(allowed);
        let _ = widget.set_value(proposed);

        let current = widget.value().to_vec();
        prop_assert!(widget.set_value(current.clone()).is_ok());
        prop_assert_eq!(widget.value(), current.as_slice());
    }

    #[test]
    fn int_value_is_reacceptable_under_bounds(
        min in bound_strategy(),
        max in bound_strategy(),
        proposed in prop::collection::vec(-100i64..100, 0..8),
    ) {
        let mut widget = IntTagCollection::new();
        widget.set_min(min);
        widget.set_max(max);
        let _ = widget.set_value(proposed);

        let current = widget.value().to_vec();
        prop_assert!(widget.set_value(current).is_ok());
    }
}
