use std::rc::Rc;

use kiln_core::{ByAddress, Callback, HookError, InvalidHookReason, memo};

/// Prefix every hook name has to carry.
pub const HOOK_PREFIX: &str = "use";

/// A hook to wrap, by name.
#[derive(Clone)]
pub struct HookSpec {
    pub hook: Option<Rc<dyn Fn()>>,
    pub name: String,
}

impl HookSpec {
    pub fn new(name: impl Into<String>, hook: impl Fn() + 'static) -> Self {
        Self {
            hook: Some(Rc::new(hook)),
            name: name.into(),
        }
    }
}

/// Checks `spec` and returns a callback that runs its hook.
///
/// The result is memoized on the hook's identity and the name, so the
/// callback stays the same across renders until either changes. The memo slot
/// is taken whether or not validation passes, keeping later hooks in place.
pub fn use_hook(spec: HookSpec) -> Result<Callback, HookError> {
    let HookSpec { hook, name } = spec;
    memo((hook.map(ByAddress), name), |(hook, name)| {
        let Some(hook) = hook else {
            return Err(HookError::InvalidHook {
                name: name.clone(),
                reason: InvalidHookReason::NotCallable,
            });
        };
        if !name.starts_with(HOOK_PREFIX) {
            return Err(HookError::InvalidHook {
                name: name.clone(),
                reason: InvalidHookReason::MissingPrefix,
            });
        }
        let hook = hook.0.clone();
        Ok(Callback::new(move || hook()))
    })
}
