//! # Hooks
//!
//! The centrepiece is [`use_merge_state`], a state container with
//! shallow-merge updates. It is generic over the state's shape through the
//! [`Merge`] trait:
//!
//! - [`Value`]: dynamically shaped records, sequences and primitives.
//! - types declared with [`record_state!`]: typed records with a generated
//!   patch struct.
//! - primitives and `Vec<T>`: a patch is the whole new value.
//!
//! ```rust
//! use kiln_core::Instance;
//! use kiln_hooks::*;
//!
//! let mut form = Instance::mount(|| use_merge_state(record! { "a" => 1, "b" => 2 }));
//!
//! form.act(|(_, set)| set.set(record! { "b" => 5 }));
//! assert_eq!(*form.current().0, record! { "a" => 1, "b" => 5 });
//!
//! form.act(|(_, set)| {
//!     set.update(|prev| {
//!         let a = prev.get("a").and_then(Value::as_f64).unwrap_or(0.0);
//!         record! { "b" => a + 10.0 }
//!     })
//! });
//! assert_eq!(*form.current().0, record! { "a" => 1, "b" => 11 });
//! ```
//!
//! Updates are queued and applied on the next render, in the order they were
//! issued; an updater sees the state left by the update before it. The
//! snapshot a render receives is read-only and only changes when the state
//! does. The [`SetState`] handle never changes.
//!
//! The other hooks are small:
//!
//! - [`use_toggle`]: a boolean with a stable flip callback.
//! - [`use_interval`]: a repeating timer that only re-arms when its delay
//!   changes.
//! - [`use_console`]: the host console, or a no-op one.
//! - [`use_hook`]: validates a hook by name and memoizes a callback for it.

pub mod console;
pub mod interval;
pub mod merge;
pub mod shallow;
pub mod snapshot;
pub mod state;
pub mod toggle;
pub mod validate;
pub mod value;

#[cfg(test)]
mod tests;

pub use console::*;
pub use interval::*;
pub use merge::*;
pub use shallow::*;
pub use snapshot::*;
pub use state::*;
pub use toggle::*;
pub use validate::*;
pub use value::*;
