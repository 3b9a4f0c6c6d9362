use std::rc::Rc;

use kiln_core::prelude::*;
use kiln_hooks::record_state;
use kiln_hooks::*;
use web_time::Duration;

record_state! {
    #[derive(Debug)]
    pub struct Counter => CounterPatch {
        pub count: i64,
        pub step: i64,
        pub label: Rc<str>,
    }
}

struct View {
    counter: Snapshot<Counter>,
    set_counter: SetState<Counter>,
    paused: Snapshot<bool>,
    toggle_pause: Callback,
    report: Callback,
}

fn app() -> Result<View, HookError> {
    let (counter, set_counter) = use_merge_state(Counter {
        count: 0,
        step: 1,
        label: "ticks".into(),
    });
    let (paused, toggle_pause) = use_toggle(false);

    let tick = {
        let set_counter = set_counter.clone();
        move || set_counter.update(|prev| CounterPatch::default().count(prev.count + prev.step))
    };
    let delay = (!*paused).then(|| Duration::from_millis(250));
    use_interval(tick, delay);

    let report = use_hook(HookSpec::new("useReport", {
        let counter = counter.clone();
        move || {
            use_console().log(&format!("{} = {}", counter.label, counter.count));
        }
    }))?;

    Ok(View {
        counter,
        set_counter,
        paused,
        toggle_pause,
        report,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    install_console(Rc::new(LogConsole));

    let clock = ManualClock::new();
    set_clock(clock.clone());

    let mut root = Instance::mount(app);
    root.current().as_ref().map_err(Clone::clone)?;

    for _ in 0..4 {
        clock.advance(Duration::from_millis(250));
        root.act(|_| advance_timers());
    }
    let view = root.current().as_ref().map_err(Clone::clone)?;
    log::info!("after 1s: {:?}", *view.counter);
    view.report.call();

    root.act(|view| {
        if let Ok(view) = view {
            view.toggle_pause.call();
            view.set_counter.set(CounterPatch::default().step(10).label("paused".into()));
        }
    });
    clock.advance(Duration::from_secs(1));
    root.act(|_| advance_timers());

    let view = root.current().as_ref().map_err(Clone::clone)?;
    log::info!("paused = {}, counter = {:?}", *view.paused, *view.counter);
    view.report.call();

    root.unmount();
    Ok(())
}
