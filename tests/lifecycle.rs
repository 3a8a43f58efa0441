use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use landing_wasm::config::OverlayConfig;
use landing_wasm::engine::{AnimationInstance, EngineConfig, EngineEvent};
use landing_wasm::overlay::OverlayPhase;
use landing_wasm::scroll::ScrollState;
use landing_wasm::{
    Controller, ControllerConfig, Error, Host, Timer, WidgetDescriptor, WidgetId, WidgetState,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Construct(String),
    Resize(String, f64),
    Play(String),
    Pause(String),
    Dispose(String),
    SetNumber(String, String, f64),
    WatchProximity(String, f64),
    UnwatchProximity(String),
    WatchVisibility(String, f64),
    Timeout(f64, Timer),
    HideOverlay(f64),
    OpenUrl(String, String),
}

type Log = Rc<RefCell<Vec<Call>>>;

struct FakeInstance {
    anchor: String,
    log: Log,
}

impl AnimationInstance for FakeInstance {
    fn resize_to_anchor(&self, pixel_ratio: f64) {
        self.log.borrow_mut().push(Call::Resize(self.anchor.clone(), pixel_ratio));
    }

    fn play(&self) {
        self.log.borrow_mut().push(Call::Play(self.anchor.clone()));
    }

    fn pause(&self) {
        self.log.borrow_mut().push(Call::Pause(self.anchor.clone()));
    }

    fn dispose(&self) {
        self.log.borrow_mut().push(Call::Dispose(self.anchor.clone()));
    }

    fn set_number(&self, property: &str, value: f64) -> bool {
        self.log
            .borrow_mut()
            .push(Call::SetNumber(self.anchor.clone(), property.into(), value));
        true
    }
}

struct FakeHost {
    now: f64,
    dpr: f64,
    anchors: HashSet<String>,
    broken: HashSet<String>,
    timers: Vec<(f64, Timer)>,
    log: Log,
}

impl FakeHost {
    fn new(anchors: &[&str]) -> Self {
        Self {
            now: 0.0,
            dpr: 1.0,
            anchors: anchors.iter().map(|a| a.to_string()).collect(),
            broken: HashSet::new(),
            timers: Vec::new(),
            log: Rc::default(),
        }
    }

    /// Earliest timer due at or before `t`.
    fn pop_due(&mut self, t: f64) -> Option<(f64, Timer)> {
        let (index, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (due, _))| *due <= t)
            .min_by(|a, b| a.1 .0.total_cmp(&b.1 .0))?;
        Some(self.timers.remove(index))
    }
}

impl Host for FakeHost {
    type Instance = FakeInstance;

    fn now_ms(&self) -> f64 {
        self.now
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn has_anchor(&self, anchor: &str) -> bool {
        self.anchors.contains(anchor)
    }

    fn construct(
        &mut self,
        _id: WidgetId,
        anchor: &str,
        _config: &EngineConfig,
    ) -> landing_wasm::Result<FakeInstance> {
        if self.broken.contains(anchor) {
            return Err(Error::Js("not a canvas".into()));
        }
        self.log.borrow_mut().push(Call::Construct(anchor.into()));
        Ok(FakeInstance {
            anchor: anchor.into(),
            log: self.log.clone(),
        })
    }

    fn watch_proximity(&mut self, anchor: &str, margin_px: f64) {
        self.log
            .borrow_mut()
            .push(Call::WatchProximity(anchor.into(), margin_px));
    }

    fn unwatch_proximity(&mut self, anchor: &str) {
        self.log.borrow_mut().push(Call::UnwatchProximity(anchor.into()));
    }

    fn watch_visibility(&mut self, _id: WidgetId, anchor: &str, threshold: f64) {
        self.log
            .borrow_mut()
            .push(Call::WatchVisibility(anchor.into(), threshold));
    }

    fn set_timeout(&mut self, delay_ms: f64, timer: Timer) {
        self.log.borrow_mut().push(Call::Timeout(delay_ms, timer));
        self.timers.push((self.now + delay_ms, timer));
    }

    fn hide_overlay(&mut self) {
        self.log.borrow_mut().push(Call::HideOverlay(self.now));
    }

    fn open_url(&mut self, url: &str, target: &str) {
        self.log
            .borrow_mut()
            .push(Call::OpenUrl(url.into(), target.into()));
    }
}

fn controller(anchors: &[&str]) -> (Controller<FakeHost>, Log) {
    let host = FakeHost::new(anchors);
    let log = host.log.clone();
    (Controller::new(host, ControllerConfig::default()), log)
}

/// Fire every timer due up to `t` in order, then leave the clock at `t`.
fn run_until(c: &mut Controller<FakeHost>, t: f64) {
    while let Some((due, timer)) = c.host_mut().pop_due(t) {
        c.host_mut().now = due;
        c.on_timer(timer);
    }
    c.host_mut().now = t;
}

fn set_now(c: &mut Controller<FakeHost>, t: f64) {
    c.host_mut().now = t;
}

fn count(log: &Log, f: impl Fn(&Call) -> bool) -> usize {
    log.borrow().iter().filter(|c| f(c)).count()
}

fn ready_widget(c: &mut Controller<FakeHost>, anchor: &str) -> WidgetId {
    let id = c
        .register(WidgetDescriptor::eager(anchor, format!("{anchor}.riv")))
        .unwrap()
        .unwrap();
    c.on_widget_ready(id);
    id
}

#[test]
fn play_and_pause_once_per_transition() {
    let (mut c, log) = controller(&["a"]);
    let id = ready_widget(&mut c, "a");
    assert_eq!(c.state(id), Some(WidgetState::ReadyPaused));

    for visible in [true, true, false, false] {
        c.on_visibility_change(id, visible);
    }

    assert_eq!(count(&log, |c| matches!(c, Call::Play(_))), 1);
    assert_eq!(count(&log, |c| matches!(c, Call::Pause(_))), 1);
    assert_eq!(c.state(id), Some(WidgetState::ReadyPaused));
}

#[test]
fn visibility_before_ready_is_ignored() {
    let (mut c, log) = controller(&["a"]);
    let id = c
        .register(WidgetDescriptor::eager("a", "a.riv"))
        .unwrap()
        .unwrap();
    c.on_visibility_change(id, true);
    assert_eq!(count(&log, |c| matches!(c, Call::Play(_))), 0);
    assert_eq!(c.state(id), Some(WidgetState::Loading));
}

#[test]
fn ready_resizes_watches_and_goes_live_once() {
    let (mut c, log) = controller(&["a"]);
    c.host_mut().dpr = 3.0;
    let id = ready_widget(&mut c, "a");
    c.on_widget_ready(id);

    assert_eq!(count(&log, |c| *c == Call::Resize("a".into(), 2.0)), 1);
    assert_eq!(count(&log, |c| *c == Call::WatchVisibility("a".into(), 0.1)), 1);
    assert_eq!(c.live(), &[id]);
}

#[test]
fn overlay_respects_minimum_even_when_ready_at_zero() {
    let (mut c, log) = controller(&["rive-canvas"]);
    c.start_loading_overlay(None).unwrap();
    let primary = c
        .register_primary(WidgetDescriptor::eager("rive-canvas", "m.riv"))
        .unwrap();
    c.on_widget_ready(primary);

    assert_eq!(count(&log, |c| *c == Call::Timeout(1000.0, Timer::HideOverlay)), 1);
    run_until(&mut c, 999.0);
    assert_eq!(count(&log, |c| matches!(c, Call::HideOverlay(_))), 0);
    run_until(&mut c, 1000.0);
    assert_eq!(count(&log, |c| *c == Call::HideOverlay(1000.0)), 1);
}

#[test]
fn overlay_hides_once_with_fallback() {
    let (mut c, log) = controller(&["rive-canvas", "loading-canvas"]);
    c.start_loading_overlay(Some(WidgetDescriptor::eager("loading-canvas", "l.riv")))
        .unwrap();
    let primary = c
        .register_primary(WidgetDescriptor::eager("rive-canvas", "m.riv"))
        .unwrap();

    set_now(&mut c, 300.0);
    c.on_widget_ready(primary);
    set_now(&mut c, 400.0);
    assert!(!c.maybe_hide_loading_overlay());
    run_until(&mut c, 1200.0);
    assert!(!c.maybe_hide_loading_overlay());
    run_until(&mut c, 10_000.0);

    assert_eq!(count(&log, |c| matches!(c, Call::HideOverlay(_))), 1);
    assert_eq!(count(&log, |c| *c == Call::Dispose("loading-canvas".into())), 1);
    assert_eq!(c.overlay_phase(), Some(OverlayPhase::Disposed));
}

#[test]
fn fallback_alone_hides_overlay() {
    let (mut c, log) = controller(&["rive-canvas"]);
    c.start_loading_overlay(None).unwrap();
    c.register_primary(WidgetDescriptor::eager("rive-canvas", "m.riv"))
        .unwrap();
    set_now(&mut c, 2500.0);
    assert!(c.maybe_hide_loading_overlay());
    run_until(&mut c, 2500.0);
    assert_eq!(count(&log, |c| *c == Call::HideOverlay(2500.0)), 1);
}

#[test]
fn overlay_is_one_shot() {
    let (mut c, _log) = controller(&[]);
    c.start_loading_overlay(None).unwrap();
    assert!(matches!(
        c.start_loading_overlay(None),
        Err(Error::OverlayAlreadyStarted)
    ));
    c.maybe_hide_loading_overlay();
    run_until(&mut c, 5000.0);
    assert_eq!(c.overlay_phase(), Some(OverlayPhase::Disposed));
    assert!(c.start_loading_overlay(None).is_err());
}

#[test]
fn broadcast_resize_only_touches_ready_widgets() {
    let (mut c, log) = controller(&["a", "b", "c"]);
    let ids: Vec<_> = ["a", "b", "c"]
        .iter()
        .map(|a| {
            c.register(WidgetDescriptor::eager(*a, "x.riv"))
                .unwrap()
                .unwrap()
        })
        .collect();

    assert_eq!(c.broadcast_resize(), 0);
    assert_eq!(count(&log, |c| matches!(c, Call::Resize(..))), 0);

    c.on_widget_ready(ids[0]);
    c.on_widget_ready(ids[2]);
    log.borrow_mut().clear();

    assert_eq!(c.broadcast_resize(), 2);
    let resized: Vec<_> = log
        .borrow()
        .iter()
        .filter_map(|c| match c {
            Call::Resize(anchor, _) => Some(anchor.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(resized, vec!["a".to_string(), "c".to_string()]);
}

#[test]
fn resize_ratio_is_capped() {
    let (mut c, log) = controller(&["a"]);
    ready_widget(&mut c, "a");
    let mut applied = Vec::new();
    for dpr in [1.0, 1.5, 2.0, 3.0, 4.0] {
        c.host_mut().dpr = dpr;
        log.borrow_mut().clear();
        c.broadcast_resize();
        if let Some(Call::Resize(_, ratio)) = log.borrow().first() {
            applied.push(*ratio);
        }
    }
    assert_eq!(applied, vec![1.0, 1.5, 2.0, 2.0, 2.0]);
}

#[test]
fn lazy_widget_waits_for_proximity() {
    let (mut c, log) = controller(&["riveCanvas2"]);
    let id = c
        .register(WidgetDescriptor::lazy("riveCanvas2", "calc.riv", 1700.0))
        .unwrap()
        .unwrap();

    assert_eq!(count(&log, |c| *c == Call::WatchProximity("riveCanvas2".into(), 1700.0)), 1);
    c.broadcast_resize();
    run_until(&mut c, 60_000.0);
    assert_eq!(count(&log, |c| matches!(c, Call::Construct(_))), 0);
    assert_eq!(c.state(id), Some(WidgetState::Unconstructed));

    assert!(c.on_proximity("riveCanvas2"));
    assert!(!c.on_proximity("riveCanvas2"));
    assert_eq!(count(&log, |c| matches!(c, Call::Construct(_))), 1);
    assert_eq!(count(&log, |c| matches!(c, Call::UnwatchProximity(_))), 1);
    assert_eq!(c.state(id), Some(WidgetState::Loading));
}

#[test]
fn proximity_margin_comes_from_each_widget() {
    let (mut c, log) = controller(&["near", "far"]);
    c.register(WidgetDescriptor::lazy("near", "a.riv", 200.0)).unwrap();
    c.register(WidgetDescriptor::lazy("far", "b.riv", 3000.0)).unwrap();
    assert_eq!(count(&log, |c| *c == Call::WatchProximity("near".into(), 200.0)), 1);
    assert_eq!(count(&log, |c| *c == Call::WatchProximity("far".into(), 3000.0)), 1);
}

#[test]
fn unknown_proximity_report_is_ignored() {
    let (mut c, log) = controller(&["a"]);
    ready_widget(&mut c, "a");
    assert!(!c.on_proximity("a"));
    assert!(!c.on_proximity("nowhere"));
    assert_eq!(count(&log, |c| matches!(c, Call::Construct(_))), 1);
}

#[test]
fn end_to_end_overlay_timeline() {
    let (mut c, log) = controller(&["rive-canvas", "loading-canvas"]);
    c.start_loading_overlay(Some(WidgetDescriptor::eager("loading-canvas", "l.riv")))
        .unwrap();
    let spinner = c.widget_id("loading-canvas").unwrap();
    let primary = c
        .register_primary(WidgetDescriptor::eager("rive-canvas", "m.riv"))
        .unwrap();

    set_now(&mut c, 50.0);
    c.on_widget_ready(spinner);
    c.on_visibility_change(spinner, true);

    set_now(&mut c, 200.0);
    c.on_widget_ready(primary);
    assert_eq!(count(&log, |c| *c == Call::Timeout(800.0, Timer::HideOverlay)), 1);
    assert_eq!(
        c.overlay_phase(),
        Some(OverlayPhase::HideScheduled { at_ms: 1000.0 })
    );

    run_until(&mut c, 1000.0);
    assert_eq!(count(&log, |c| *c == Call::HideOverlay(1000.0)), 1);
    assert_eq!(count(&log, |c| *c == Call::Timeout(500.0, Timer::DisposeOverlay)), 1);
    assert_eq!(c.overlay_phase(), Some(OverlayPhase::Fading));

    run_until(&mut c, 1499.0);
    assert_eq!(count(&log, |c| matches!(c, Call::Dispose(_))), 0);
    run_until(&mut c, 1500.0);
    assert_eq!(count(&log, |c| *c == Call::Dispose("loading-canvas".into())), 1);
    assert_eq!(c.state(spinner), Some(WidgetState::Disposed));
    assert_eq!(c.live(), &[primary]);

    // a disposed widget is out of every later broadcast
    assert_eq!(c.broadcast_resize(), 1);
}

#[test]
fn missing_anchor_is_skipped() {
    let (mut c, log) = controller(&[]);
    assert!(c
        .register(WidgetDescriptor::eager("logo-canvas-nav", "logo.riv"))
        .unwrap()
        .is_none());
    assert!(log.borrow().is_empty());
}

#[test]
fn missing_primary_is_fatal() {
    let (mut c, _log) = controller(&[]);
    let err = c
        .register_primary(WidgetDescriptor::eager("rive-canvas", "m.riv"))
        .unwrap_err();
    assert!(matches!(err, Error::MissingPrimarySurface(ref a) if a == "rive-canvas"));
}

#[test]
fn duplicate_anchor_is_rejected() {
    let (mut c, _log) = controller(&["a"]);
    c.register(WidgetDescriptor::eager("a", "1.riv")).unwrap();
    assert!(matches!(
        c.register(WidgetDescriptor::lazy("a", "2.riv", 10.0)),
        Err(Error::DuplicateAnchor(_))
    ));
}

#[test]
fn failed_widgets_stay_out() {
    let (mut c, log) = controller(&["a", "b"]);
    c.host_mut().broken.insert("b".into());
    let a = c
        .register(WidgetDescriptor::eager("a", "a.riv"))
        .unwrap()
        .unwrap();
    let b = c
        .register(WidgetDescriptor::eager("b", "b.riv"))
        .unwrap()
        .unwrap();
    assert_eq!(c.state(b), Some(WidgetState::Failed));

    c.on_widget_failed(a);
    assert_eq!(c.state(a), Some(WidgetState::Failed));
    c.on_widget_ready(a);
    c.on_visibility_change(a, true);

    assert_eq!(c.broadcast_resize(), 0);
    assert!(c.live().is_empty());
    assert_eq!(count(&log, |c| matches!(c, Call::Play(_) | Call::WatchVisibility(..))), 0);
}

#[test]
fn scroll_progress_reaches_bound_widgets() {
    let (mut c, log) = controller(&["rive-canvas", "a"]);
    let mascot = c
        .register(WidgetDescriptor::eager("rive-canvas", "m.riv").bind_scroll("ScrollParalax", 60.0))
        .unwrap()
        .unwrap();
    ready_widget(&mut c, "a");

    let state = ScrollState {
        offset: 500.0,
        progress: 0.25,
        delta: 20.0,
    };
    assert_eq!(c.on_scroll(&state), 0);

    c.on_widget_ready(mascot);
    assert_eq!(c.on_scroll(&state), 1);
    assert_eq!(
        log.borrow().last(),
        Some(&Call::SetNumber("rive-canvas".into(), "ScrollParalax".into(), 15.0))
    );
}

#[test]
fn open_url_event_opens_one_context() {
    let (mut c, log) = controller(&["cta-canvas-nav"]);
    let id = ready_widget(&mut c, "cta-canvas-nav");
    c.on_engine_event(
        id,
        EngineEvent::OpenUrl {
            url: "https://example.com/contact".into(),
            target: None,
        },
    );
    c.on_engine_event(id, EngineEvent::General { name: "hover".into() });

    let opened: Vec<_> = log
        .borrow()
        .iter()
        .filter(|c| matches!(c, Call::OpenUrl(..)))
        .cloned()
        .collect();
    assert_eq!(
        opened,
        vec![Call::OpenUrl("https://example.com/contact".into(), "_blank".into())]
    );
}

#[test]
fn overlay_config_is_honoured() {
    let host = FakeHost::new(&["rive-canvas"]);
    let log = host.log.clone();
    let config = ControllerConfig {
        overlay: OverlayConfig {
            minimum_ms: 250.0,
            fade_ms: 100.0,
        },
        ..ControllerConfig::default()
    };
    let mut c = Controller::new(host, config);
    c.start_loading_overlay(None).unwrap();
    let primary = c
        .register_primary(WidgetDescriptor::eager("rive-canvas", "m.riv"))
        .unwrap();
    c.on_widget_ready(primary);
    run_until(&mut c, 1000.0);
    assert_eq!(count(&log, |c| *c == Call::HideOverlay(250.0)), 1);
    assert_eq!(count(&log, |c| *c == Call::Timeout(100.0, Timer::DisposeOverlay)), 1);
}
