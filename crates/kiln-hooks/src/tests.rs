use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kiln_core::{
    Callback, Console, HookError, Instance, InvalidHookReason, ManualClock, active_timers,
    advance_timers, install_console, set_clock, uninstall_console,
};
use web_time::Duration;

use crate::*;
use crate::{record, record_state};

#[derive(Debug, PartialEq)]
struct Deep {
    x: i32,
}

record_state! {
    #[derive(Debug, PartialEq)]
    struct S => SPatch {
        a: i32,
        b: i32,
        deep: Option<Rc<Deep>>,
    }
}

fn s(a: i32, b: i32) -> S {
    S { a, b, deep: None }
}

type Hook<T> = (Snapshot<T>, SetState<T>);

fn mount_value(initial: Value) -> Instance<(), Hook<Value>> {
    Instance::mount(move || use_merge_state(initial.clone()))
}

#[test]
fn initial_snapshot_is_a_shallow_copy() {
    let deep = record! { "x" => 1 };
    let initial = record! { "a" => 1, "b" => 2, "deep" => deep.clone() };
    let inst = mount_value(initial.clone());
    let (state, _) = inst.current();

    assert_eq!(**state, initial);
    assert!(!Value::ptr_eq(state, &initial));
    let nested = state.get("deep").map(|d| d.ptr_eq(&deep));
    assert_eq!(nested, Some(true));
}

#[test]
fn typed_initial_snapshot_shares_nested_fields() {
    let deep = Rc::new(Deep { x: 1 });
    let inst = Instance::mount({
        let deep = deep.clone();
        move || {
            use_merge_state(S {
                a: 1,
                b: 2,
                deep: Some(deep.clone()),
            })
        }
    });
    let (state, _) = inst.current();
    assert_eq!(state.a, 1);
    assert!(Rc::ptr_eq(state.deep.as_ref().unwrap(), &deep));
}

#[test]
fn patch_object_is_merged() {
    let mut inst = Instance::mount(|| use_merge_state(s(1, 2)));
    inst.act(|(_, set)| set.set(SPatch::default().b(5)));
    assert_eq!(*inst.current().0, s(1, 5));
}

#[test]
fn record_merge_preserves_and_overwrites_keys() {
    let current = record! { "a" => 1, "b" => 2, "c" => 3 };
    let merged = current.merge(record! { "b" => 20, "d" => 4 });
    assert_eq!(merged, record! { "a" => 1, "b" => 20, "c" => 3, "d" => 4 });
}

#[test]
fn empty_patch_keeps_every_key() {
    let current = record! { "a" => 1, "b" => 2 };
    let merged = current.merge(record! {});
    assert_eq!(merged, current);
    assert!(!merged.ptr_eq(&current));

    let mut inst = mount_value(current.clone());
    inst.act(|(_, set)| set.set(record! {}));
    assert_eq!(*inst.current().0, current);
}

#[test]
fn nested_field_is_replaced_not_merged() {
    let current = record! { "a" => 1, "deep" => record! { "x" => 1 } };
    let merged = current.merge(record! { "deep" => record! { "y" => 2 } });
    assert_eq!(merged.get("deep"), Some(&record! { "y" => 2 }));

    let mut inst = Instance::mount(|| {
        use_merge_state(S {
            a: 1,
            b: 2,
            deep: Some(Rc::new(Deep { x: 1 })),
        })
    });
    inst.act(|(_, set)| set.set(SPatch::default().deep(Some(Rc::new(Deep { x: 9 })))));
    assert_eq!(inst.current().0.deep.as_deref(), Some(&Deep { x: 9 }));
}

#[test]
fn non_record_sides_are_replaced() {
    let list = Value::sequence([1, 2, 3]);
    assert_eq!(list.merge(Value::sequence([4])), Value::sequence([4]));
    assert_eq!(record! { "a" => 1 }.merge(Value::from(7)), Value::from(7));
    assert_eq!(Value::from(7).merge(record! { "a" => 1 }), record! { "a" => 1 });
    assert_eq!(vec![1, 2].merge(vec![3]), vec![3]);
}

#[test]
fn no_patch_keeps_the_same_snapshot() {
    let mut inst = Instance::mount(|| use_merge_state(s(1, 2)));
    let before = inst.current().0.clone();
    inst.act(|(_, set)| set.set(None::<SPatch>));
    assert!(before.ptr_eq(&inst.current().0));

    inst.act(|(_, set)| set.update(|_| None::<SPatch>));
    assert!(before.ptr_eq(&inst.current().0));
}

#[test]
fn snapshot_writes_never_reach_state() {
    let mut inst = mount_value(record! { "a" => 1, "b" => 2 });
    let before = inst.current().0.clone();

    let mut copy = before.to_owned_value();
    assert!(copy.set("a", 999));
    copy.remove("b");

    let mut clone = (*before).clone();
    clone.set("a", 999);

    assert_eq!(before.get("a"), Some(&Value::from(1)));
    assert_eq!(inst.current().0.get("a"), Some(&Value::from(1)));

    inst.rerender();
    assert_eq!(*inst.current().0, record! { "a" => 1, "b" => 2 });
}

#[test]
fn writes_to_primitive_snapshots_are_absorbed() {
    let inst = mount_value(Value::from(3));
    let mut copy = inst.current().0.to_owned_value();
    assert!(!copy.set("a", 1));
    assert_eq!(copy.remove("a"), None);
    assert_eq!(*inst.current().0, Value::from(3));
}

#[test]
fn updater_can_return_a_patch() {
    let mut inst = Instance::mount(|| use_merge_state(s(1, 2)));
    inst.act(|(_, set)| set.update(|prev| SPatch::default().b(prev.a + prev.b)));
    assert_eq!(*inst.current().0, s(1, 3));
}

#[test]
fn updater_can_return_a_full_value() {
    let mut inst = mount_value(record! { "a" => 0, "b" => 0 });
    inst.act(|(_, set)| {
        set.update(|_| record! { "a" => 10, "b" => 20, "deep" => record! { "x" => 7 } })
    });
    assert_eq!(
        *inst.current().0,
        record! { "a" => 10, "b" => 20, "deep" => record! { "x" => 7 } }
    );

    let mut typed = Instance::mount(|| use_merge_state(s(0, 0)));
    typed.act(|(_, set)| {
        set.update(|_| {
            SPatch::from(S {
                a: 10,
                b: 20,
                deep: Some(Rc::new(Deep { x: 7 })),
            })
        })
    });
    assert_eq!(typed.current().0.a, 10);
    assert_eq!(typed.current().0.deep.as_deref(), Some(&Deep { x: 7 }));
}

#[test]
fn updaters_in_one_batch_see_the_latest_value() {
    let mut inst = Instance::mount(|| use_merge_state(s(1, 2)));
    let renders = inst.render_count();
    inst.act(|(_, set)| {
        set.set(SPatch::default().b(5));
        set.update(|prev| SPatch::default().b(prev.a + prev.b));
        set.update(|prev| SPatch::default().a(prev.b * 2));
    });
    assert_eq!(*inst.current().0, s(12, 6));
    assert_eq!(inst.render_count(), renders + 1);
}

#[test]
fn set_state_is_stable_and_snapshot_changes_only_on_update() {
    let mut inst = Instance::mount(|| use_merge_state(s(1, 2)));
    let (s1, set1) = inst.current().clone();

    inst.rerender();
    let (s2, set2) = inst.current().clone();
    assert!(set2.ptr_eq(&set1));
    assert!(s2.ptr_eq(&s1));

    inst.act(|(_, set)| set.set(SPatch::default().a(2)));
    let (s3, set3) = inst.current().clone();
    assert!(!s3.ptr_eq(&s1));
    assert!(set3.ptr_eq(&set1));
    assert_eq!(*s3, s(2, 2));
}

#[test]
fn dispatch_accepts_both_update_forms() {
    let mut inst = Instance::mount(|| use_merge_state(s(1, 1)));
    inst.act(|(_, set)| {
        set.dispatch(Update::Patch(Some(SPatch::default().a(4))));
        set.dispatch(Update::Compute(Box::new(|prev: &Snapshot<S>| {
            Some(SPatch::default().b(prev.a + 1))
        })));
    });
    assert_eq!(*inst.current().0, s(4, 5));
}

#[test]
fn lazy_initializer_runs_once() {
    let runs = Rc::new(Cell::new(0));
    let mut inst = Instance::mount({
        let runs = runs.clone();
        move || {
            let runs = runs.clone();
            use_merge_state_with(move || {
                runs.set(runs.get() + 1);
                vec![1, 2, 3]
            })
        }
    });
    inst.rerender();
    inst.act(|(_, set)| set.set(vec![4]));
    assert_eq!(runs.get(), 1);
    assert_eq!(*inst.current().0, vec![4]);
}

#[test]
fn primitive_state_round_trips_through_toggle() {
    let mut inst = Instance::mount(|| use_merge_state(false));
    inst.act(|(_, set)| set.update(|prev| !**prev));
    assert!(*inst.current().0);
    inst.act(|(_, set)| set.update(|prev| !**prev));
    assert!(!*inst.current().0);
}

#[test]
fn toggle_defaults_to_false() {
    let inst = Instance::mount(use_toggle_default);
    assert!(!*inst.current().0);
}

#[test]
fn toggle_respects_initial_value() {
    let inst = Instance::mount(|| use_toggle(true));
    assert!(*inst.current().0);
}

#[test]
fn toggle_flips_and_keeps_its_identity() {
    let mut inst = Instance::mount(|| use_toggle(false));
    let first = inst.current().1.clone();

    inst.act(|(_, toggle)| toggle.call());
    assert!(*inst.current().0);
    inst.act(|(_, toggle)| toggle.call());
    assert!(!*inst.current().0);

    inst.rerender();
    assert!(inst.current().1.ptr_eq(&first));
}

type IntervalProps = (Rc<Cell<u32>>, Option<Duration>);

fn mount_interval(
    counter: Rc<Cell<u32>>,
    delay: Option<Duration>,
) -> Instance<IntervalProps, ()> {
    Instance::mount_with_props((counter, delay), |(counter, delay): &IntervalProps| {
        let counter = counter.clone();
        use_interval(move || counter.set(counter.get() + 1), *delay);
    })
}

#[test]
fn interval_ticks() {
    let clock = ManualClock::new();
    set_clock(clock.clone());
    let calls = Rc::new(Cell::new(0));

    let mut inst = mount_interval(calls.clone(), Some(Duration::from_millis(100)));
    clock.advance(Duration::from_millis(350));
    inst.act(|_| advance_timers());

    assert_eq!(calls.get(), 3);
}

#[test]
fn interval_keeps_its_period_when_the_callback_changes() {
    let clock = ManualClock::new();
    set_clock(clock.clone());
    let baseline = active_timers();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let delay = Some(Duration::from_millis(100));

    let mut inst = mount_interval(first.clone(), delay);
    clock.advance(Duration::from_millis(350));
    advance_timers();
    assert_eq!(first.get(), 3);

    inst.rerender_with((second.clone(), delay));
    assert_eq!(active_timers(), baseline + 1);

    clock.advance(Duration::from_millis(50));
    advance_timers();
    assert_eq!(first.get(), 3);
    assert_eq!(second.get(), 1);
}

#[test]
fn interval_rearms_when_the_delay_changes() {
    let clock = ManualClock::new();
    set_clock(clock.clone());
    let baseline = active_timers();
    let calls = Rc::new(Cell::new(0));

    let mut inst = mount_interval(calls.clone(), Some(Duration::from_millis(100)));
    inst.rerender_with((calls.clone(), Some(Duration::from_millis(30))));
    assert_eq!(active_timers(), baseline + 1);

    clock.advance(Duration::from_millis(100));
    advance_timers();
    assert_eq!(calls.get(), 3);

    inst.rerender_with((calls.clone(), None));
    assert_eq!(active_timers(), baseline);
    clock.advance(Duration::from_secs(1));
    advance_timers();
    assert_eq!(calls.get(), 3);
}

#[test]
fn interval_is_cleared_on_unmount() {
    let clock = ManualClock::new();
    set_clock(clock.clone());
    let baseline = active_timers();
    let calls = Rc::new(Cell::new(0));

    let inst = mount_interval(calls.clone(), Some(Duration::from_millis(10)));
    assert_eq!(active_timers(), baseline + 1);
    inst.unmount();
    assert_eq!(active_timers(), baseline);

    clock.advance(Duration::from_millis(100));
    advance_timers();
    assert_eq!(calls.get(), 0);
}

#[test]
fn interval_callback_can_update_state() {
    let clock = ManualClock::new();
    set_clock(clock.clone());

    let mut inst = Instance::mount(|| {
        let (count, set) = use_merge_state(0u32);
        use_interval(move || set.update(|n| **n + 1), Some(Duration::from_millis(100)));
        count
    });
    clock.advance(Duration::from_millis(200));
    inst.act(|_| advance_timers());
    assert_eq!(**inst.current(), 2);
}

struct Recording(RefCell<Vec<String>>);

impl Console for Recording {
    fn log(&self, message: &str) {
        self.0.borrow_mut().push(format!("log: {message}"));
    }
    fn warn(&self, message: &str) {
        self.0.borrow_mut().push(format!("warn: {message}"));
    }
    fn error(&self, message: &str) {
        self.0.borrow_mut().push(format!("error: {message}"));
    }
}

#[test]
fn console_falls_back_to_noop() {
    uninstall_console();
    let console = use_console();
    console.log("noop");
    console.warn("noop");
    console.error("noop");
}

#[test]
fn console_returns_the_host_console() {
    let recording = Rc::new(Recording(RefCell::new(Vec::new())));
    let host: Rc<dyn Console> = recording.clone();
    install_console(host.clone());

    let console = use_console();
    assert!(Rc::ptr_eq(&console, &host));
    console.warn("careful");
    uninstall_console();

    assert_eq!(*recording.0.borrow(), vec!["warn: careful"]);
}

type HookProps = (Option<Rc<dyn Fn()>>, String);

fn mount_hook(
    hook: Option<Rc<dyn Fn()>>,
    name: &str,
) -> Instance<HookProps, Result<Callback, HookError>> {
    Instance::mount_with_props((hook, name.to_string()), |(hook, name): &HookProps| {
        use_hook(HookSpec {
            hook: hook.clone(),
            name: name.clone(),
        })
    })
}

#[test]
fn use_hook_rejects_a_missing_hook() {
    let inst = mount_hook(None, "useExample");
    let err = inst.current().clone().unwrap_err();
    assert_eq!(
        err,
        HookError::InvalidHook {
            name: "useExample".into(),
            reason: InvalidHookReason::NotCallable,
        }
    );
    assert!(err.to_string().starts_with("Invalid hook"));
}

#[test]
fn use_hook_rejects_a_misnamed_hook() {
    let inst = mount_hook(Some(Rc::new(|| {})), "hook");
    assert!(matches!(
        inst.current(),
        Err(HookError::InvalidHook {
            reason: InvalidHookReason::MissingPrefix,
            ..
        })
    ));
}

#[test]
fn use_hook_callback_runs_the_hook() {
    let calls = Rc::new(Cell::new(0));
    let hook: Rc<dyn Fn()> = {
        let calls = calls.clone();
        Rc::new(move || calls.set(calls.get() + 1))
    };
    let inst = mount_hook(Some(hook), "useUnderlying");
    let callback = inst.current().clone().unwrap();
    callback.call();
    assert_eq!(calls.get(), 1);
}

#[test]
fn use_hook_memoizes_while_inputs_stay_the_same() {
    let hook: Rc<dyn Fn()> = Rc::new(|| {});
    let mut inst = mount_hook(Some(hook.clone()), "useStable");
    let first = inst.current().clone().unwrap();

    inst.rerender_with((Some(hook), "useStable".to_string()));
    assert!(inst.current().as_ref().unwrap().ptr_eq(&first));

    inst.rerender_with((Some(Rc::new(|| {})), "useStable".to_string()));
    assert!(!inst.current().as_ref().unwrap().ptr_eq(&first));
}

#[test]
fn hook_spec_new_builds_a_callable_spec() {
    let inst = Instance::mount(|| use_hook(HookSpec::new("useNothing", || {})).is_ok());
    assert!(*inst.current());
}

#[test]
fn failed_validation_keeps_later_state_in_place() {
    let mut inst = Instance::mount_with_props("useOk".to_string(), |name: &String| {
        let _ = use_hook(HookSpec::new(name.clone(), || {}));
        use_merge_state(5i32)
    });
    inst.act(|(_, set)| set.set(7));
    assert_eq!(*inst.current().0, 7);

    inst.rerender_with("bad".to_string());
    assert_eq!(*inst.current().0, 7);

    inst.rerender_with("useOk".to_string());
    assert_eq!(*inst.current().0, 7);
}

#[test]
fn sequence_items_are_read_by_index() {
    let inst = mount_value(Value::sequence(vec![Value::from(1), Value::from("two")]));
    let list = &inst.current().0;
    assert_eq!(list.at(1).and_then(Value::as_str), Some("two"));
    assert!(list.at(2).is_none());
    assert!(Value::from(3).at(0).is_none());
}
