use kiln_core::{Callback, memo};

use crate::snapshot::Snapshot;
use crate::state::use_merge_state;

/// Boolean state with a flip callback. The callback keeps its identity for
/// the life of the instance.
pub fn use_toggle(initial: bool) -> (Snapshot<bool>, Callback) {
    let (state, set_state) = use_merge_state(initial);
    let toggle = memo(set_state, |set_state| {
        let set_state = set_state.clone();
        Callback::new(move || set_state.update(|prev| !**prev))
    });
    (state, toggle)
}

/// [`use_toggle`] starting from `false`.
pub fn use_toggle_default() -> (Snapshot<bool>, Callback) {
    use_toggle(false)
}
