pub use crate::callback::Callback;
pub use crate::clock::{Clock, ManualClock, SystemClock, set_clock};
pub use crate::console::{Console, LogConsole, host_console, install_console};
pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::effects_ext::disposable_effect;
pub use crate::error::{HookError, InvalidHookReason};
pub use crate::instance::{Instance, RenderConfig};
pub use crate::memo::{ByAddress, memo};
pub use crate::runtime::{remember, remember_state, remember_state_with_key, remember_with_key};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::state::{SlotSetter, StateSlot, state_slot};
pub use crate::timer::{TimerId, advance_timers, clear_interval, set_interval};
