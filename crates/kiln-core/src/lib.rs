//! # Host runtime for kiln hooks
//!
//! `kiln-core` is the small runtime hooks run on top of. It does not know
//! about any particular hook; it provides the primitives they are built from:
//!
//! - `Instance`: a mounted component: render function, props, slot table,
//!   cleanup scope.
//! - `remember*`: order-based (or key-based) storage bound to an instance.
//! - `state_slot`: a remembered `Rc<T>` with a queue of pending updates and a
//!   stable setter.
//! - `memo`: a derived value recomputed only when its deps change.
//! - `effect` / `scoped_effect` / `disposable_effect`: side-effects with
//!   cleanup.
//! - `set_interval` / `advance_timers`: repeating timers on a pluggable
//!   `Clock`.
//! - `install_console` / `host_console`: the host logging object.
//!
//! ## Remembered state
//!
//! ```rust
//! use kiln_core::*;
//!
//! let mut clicks = Instance::mount(|| {
//!     let count = remember_state(|| 0);
//!     *count.borrow_mut() += 1;
//!     *count.borrow()
//! });
//! assert_eq!(*clicks.current(), 1);
//!
//! clicks.rerender();
//! assert_eq!(*clicks.current(), 2);
//! ```
//!
//! - `remember` and `remember_state` are order-based: the Nth call in a
//!   render always refers to the Nth stored value.
//! - `remember_with_key` and `remember_state_with_key` are key-based and stay
//!   stable across conditional branches.
//!
//! ## Effects and cleanup
//!
//! `disposable_effect(key, f)` runs `f` on the first render and whenever `key`
//! changes; the `Dispose` it returns runs before the next run and when the
//! instance unmounts. Timers, subscriptions and the like should be registered
//! this way so they go away with the instance that owns them.

pub mod callback;
pub mod clock;
pub mod console;
pub mod effects;
pub mod effects_ext;
pub mod error;
pub mod instance;
pub mod memo;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod state;
pub mod timer;


pub use callback::*;
pub use clock::*;
pub use console::*;
pub use effects::*;
pub use effects_ext::*;
pub use error::*;
pub use instance::*;
pub use memo::*;
pub use runtime::*;
pub use scope::*;
pub use state::*;
pub use timer::*;
