use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidHookReason {
    #[error("hook is not callable")]
    NotCallable,
    #[error("name must start with `use`")]
    MissingPrefix,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("Invalid hook `{name}`: {reason}")]
    InvalidHook {
        name: String,
        reason: InvalidHookReason,
    },
}
