//! # Component instances
//!
//! An `Instance` is one mounted component: a render function, its props, the
//! slot table its hooks write into and the scope its effects clean up in.
//!
//! ```rust
//! use kiln_core::*;
//!
//! let mut counter = Instance::mount(|| {
//!     let slot = state_slot(|| 0u32);
//!     (*slot.current(), slot.setter())
//! });
//! assert_eq!(counter.current().0, 0);
//!
//! counter.act(|(_, set)| set.enqueue(|n| std::rc::Rc::new(**n + 1)));
//! assert_eq!(counter.current().0, 1);
//! ```
//!
//! Updates issued outside a render only mark the instance dirty. `act` runs a
//! closure (an event handler, a timer tick) and then re-renders once if
//! anything was invalidated, so several updates in one `act` are batched.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use bitflags::bitflags;

use crate::runtime::{ComposeGuard, Composer};
use crate::scope::Scope;

thread_local! {
    static NEXT_INSTANCE_ID: Cell<u64> = const { Cell::new(1) };
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InstanceFlags: u8 {
        const MOUNTED = 1;
        const DIRTY = 1 << 1;
        const RENDERING = 1 << 2;
    }
}

/// Weak handle used by state slots to schedule a re-render of their owner.
#[derive(Clone)]
pub struct Invalidator(Weak<Cell<InstanceFlags>>);

impl Invalidator {
    /// An invalidator that belongs to no instance; invalidating it is a no-op.
    pub fn detached() -> Self {
        Self(Weak::new())
    }

    pub fn invalidate(&self) {
        match self.0.upgrade() {
            Some(flags) => {
                let mut f = flags.get();
                if f.contains(InstanceFlags::MOUNTED) {
                    f.insert(InstanceFlags::DIRTY);
                    flags.set(f);
                }
            }
            None => log::trace!("invalidate: owning instance is gone; update dropped"),
        }
    }
}

/// Render loop tuning.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Upper bound on consecutive render passes caused by updates issued
    /// while rendering.
    pub max_passes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { max_passes: 25 }
    }
}

struct Host {
    id: u64,
    composer: Rc<RefCell<Composer>>,
    flags: Rc<Cell<InstanceFlags>>,
    scope: Scope,
    config: RenderConfig,
    renders: usize,
}

impl Host {
    fn new(config: RenderConfig) -> Self {
        let id = NEXT_INSTANCE_ID.with(|n| {
            let id = n.get();
            n.set(id + 1);
            id
        });
        let flags = Rc::new(Cell::new(InstanceFlags::MOUNTED));
        let composer = Composer::new(Invalidator(Rc::downgrade(&flags)));
        Self {
            id,
            composer: Rc::new(RefCell::new(composer)),
            flags,
            scope: Scope::new(),
            config,
            renders: 0,
        }
    }

    fn update_flags(&self, f: impl FnOnce(&mut InstanceFlags)) {
        let mut flags = self.flags.get();
        f(&mut flags);
        self.flags.set(flags);
    }

    fn is_dirty(&self) -> bool {
        self.flags.get().contains(InstanceFlags::DIRTY)
    }

    fn pass<P, R>(&mut self, render: &mut dyn FnMut(&P) -> R, props: &P) -> R {
        self.update_flags(|f| {
            f.remove(InstanceFlags::DIRTY);
            f.insert(InstanceFlags::RENDERING);
        });
        let out = {
            let _guard = ComposeGuard::begin(self.composer.clone());
            self.scope.run(|| render(props))
        };
        self.update_flags(|f| f.remove(InstanceFlags::RENDERING));
        self.renders += 1;

        #[cfg(feature = "inspector")]
        log::trace!(
            "instance {} rendered (pass {}, {} slots)",
            self.id,
            self.renders,
            self.composer.borrow().slots.len()
        );

        out
    }

    fn compose<P, R>(&mut self, render: &mut dyn FnMut(&P) -> R, props: &P) -> R {
        let mut out = self.pass(render, props);
        let mut passes = 1;
        while self.is_dirty() {
            if passes >= self.config.max_passes {
                log::warn!(
                    "instance {}: still invalidated after {} render passes; \
                     an update issued during render keeps scheduling another",
                    self.id,
                    passes
                );
                break;
            }
            out = self.pass(render, props);
            passes += 1;
        }
        out
    }
}

/// A mounted component instance.
pub struct Instance<P: 'static, R: 'static> {
    render: Box<dyn FnMut(&P) -> R>,
    props: P,
    output: R,
    host: Host,
}

impl<R: 'static> Instance<(), R> {
    /// Mounts a component without props and runs its first render.
    pub fn mount(mut render: impl FnMut() -> R + 'static) -> Self {
        Self::mount_with_props((), move |_: &()| render())
    }
}

impl<P: 'static, R: 'static> Instance<P, R> {
    pub fn mount_with_props(props: P, render: impl FnMut(&P) -> R + 'static) -> Self {
        Self::mount_with(RenderConfig::default(), props, render)
    }

    pub fn mount_with(
        config: RenderConfig,
        props: P,
        render: impl FnMut(&P) -> R + 'static,
    ) -> Self {
        let mut host = Host::new(config);
        let mut render: Box<dyn FnMut(&P) -> R> = Box::new(render);
        log::debug!("mounting instance {}", host.id);
        let output = host.compose(&mut *render, &props);
        Self {
            render,
            props,
            output,
            host,
        }
    }

    pub fn id(&self) -> u64 {
        self.host.id
    }

    /// Output of the most recent render.
    pub fn current(&self) -> &R {
        &self.output
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    /// Number of render passes run so far.
    pub fn render_count(&self) -> usize {
        self.host.renders
    }

    pub fn is_dirty(&self) -> bool {
        self.host.is_dirty()
    }

    pub fn is_mounted(&self) -> bool {
        self.host.flags.get().contains(InstanceFlags::MOUNTED)
    }

    /// Re-renders unconditionally with the current props.
    pub fn rerender(&mut self) {
        self.output = self.host.compose(&mut *self.render, &self.props);
    }

    /// Replaces the props and re-renders.
    pub fn rerender_with(&mut self, props: P) {
        self.props = props;
        self.rerender();
    }

    /// Re-renders if an update was issued since the last render.
    pub fn flush(&mut self) -> bool {
        if !self.host.is_dirty() {
            return false;
        }
        self.rerender();
        true
    }

    /// Runs `f` with the latest render output, then applies every update it
    /// issued in a single re-render.
    pub fn act<T>(&mut self, f: impl FnOnce(&R) -> T) -> T {
        let result = f(&self.output);
        self.flush();
        result
    }

    /// Tears the instance down: runs scope disposers and drops all slots.
    pub fn unmount(self) {
        drop(self);
    }
}

impl<P: 'static, R: 'static> Drop for Instance<P, R> {
    fn drop(&mut self) {
        if !self.is_mounted() {
            return;
        }
        log::debug!("unmounting instance {}", self.host.id);
        self.host.update_flags(|f| *f = InstanceFlags::empty());
        self.host.scope.clone().dispose();
        self.host.composer.borrow_mut().clear();
    }
}
