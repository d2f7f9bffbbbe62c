#![forbid(unsafe_code)]

//! Native build of the web crate: stub export, error mapping, the debounce
//! timer driven by a real page controller, and mount/unmount bookkeeping.

#![cfg(not(target_arch = "wasm32"))]

use std::convert::Infallible;
use std::time::Duration;

use pretty_assertions::assert_eq;
use treasure_core::{ConfigError, Msg, PageConfig, TreasurePage};
use treasure_core::RecordingSurface;
use treasure_web::events::{EventHost, Listeners};
use treasure_web::frames::{FrameHost, FrameLoop};
use treasure_web::timer::{SearchTimer, TimerHost};
use treasure_web::{MountError, TreasureMapWeb};

#[derive(Default)]
struct ManualTimers {
    next: u32,
    live: Vec<u32>,
}

impl TimerHost for ManualTimers {
    type Handle = u32;
    type Error = Infallible;

    fn arm(&mut self, _delay: Duration) -> Result<u32, Infallible> {
        self.next += 1;
        self.live.push(self.next);
        Ok(self.next)
    }

    fn disarm(&mut self, handle: u32) {
        self.live.retain(|h| *h != handle);
    }
}

#[test]
fn native_stub_is_never_mounted() {
    assert!(!TreasureMapWeb::new().is_mounted());
}

#[test]
fn bad_options_surface_as_config_errors() {
    let err: MountError = PageConfig::from_json(r#"{"particleCount":0}"#)
        .unwrap_err()
        .into();
    assert_eq!(err, MountError::Config(ConfigError::NoParticles));
}

#[test]
fn typing_keeps_a_single_live_timer() {
    let cfg = PageConfig {
        seed: Some(1),
        ..PageConfig::default()
    };
    let mut page = TreasurePage::new(cfg, 800.0, 600.0, 0);
    let mut timer = SearchTimer::new();
    let mut host = ManualTimers::default();

    for (i, text) in ["д", "ду", "дуб"].into_iter().enumerate() {
        let now = Duration::from_millis(100 * i as u64);
        let cmd = page.update(Msg::Input(text.into()), now);
        timer.apply(cmd, &mut host).unwrap();
        assert_eq!(host.live.len(), 1);
    }
    assert!(page.search().is_loading());

    let ticket = timer.fire().unwrap();
    page.update(Msg::SearchDue(ticket), Duration::from_millis(700));
    assert!(!page.search().is_loading());
    assert_eq!(page.search().results().len(), 1);
    assert_eq!(page.search().results()[0].location, "Река Светлая");
}

#[test]
fn clearing_disarms_pending_timer() {
    let mut page = TreasurePage::new(PageConfig::default(), 800.0, 600.0, 9);
    let mut timer = SearchTimer::new();
    let mut host = ManualTimers::default();

    let cmd = page.update(Msg::Input("фонтан".into()), Duration::ZERO);
    timer.apply(cmd, &mut host).unwrap();
    let cmd = page.update(Msg::Clear, Duration::from_millis(10));
    timer.apply(cmd, &mut host).unwrap();

    assert!(host.live.is_empty());
    assert_eq!(timer.armed_ticket(), None);
    assert!(page.search().results().is_empty());
}

/// Browser stand-in that records every registration.
#[derive(Default)]
struct FakeBrowser {
    timers: ManualTimers,
    next_frame: u32,
    live_frames: Vec<u32>,
    added: Vec<(&'static str, &'static str, u32)>,
    removed: Vec<(&'static str, &'static str, u32)>,
}

impl FrameHost for FakeBrowser {
    type Handle = u32;
    type Error = Infallible;

    fn request(&mut self) -> Result<u32, Infallible> {
        self.next_frame += 1;
        self.live_frames.push(self.next_frame);
        Ok(self.next_frame)
    }

    fn cancel(&mut self, handle: u32) {
        self.live_frames.retain(|h| *h != handle);
    }
}

impl EventHost for FakeBrowser {
    type Target = &'static str;
    type Callback = u32;
    type Error = Infallible;

    fn add(
        &mut self,
        target: &&'static str,
        kind: &'static str,
        cb: &u32,
    ) -> Result<(), Infallible> {
        self.added.push((*target, kind, *cb));
        Ok(())
    }

    fn remove(&mut self, target: &&'static str, kind: &'static str, cb: &u32) {
        self.removed.push((*target, kind, *cb));
    }
}

/// What one mount owns, wired the way the browser host wires it.
struct Mount {
    page: TreasurePage,
    timer: SearchTimer<u32>,
    frames: FrameLoop<u32>,
    listeners: Listeners<&'static str, u32>,
}

impl Mount {
    fn start(browser: &mut FakeBrowser) -> Self {
        let mut listeners = Listeners::new();
        for (i, (target, kind)) in [
            ("window", "resize"),
            ("window", "mousemove"),
            ("toggle", "click"),
            ("input", "input"),
            ("clear", "click"),
        ]
        .into_iter()
        .enumerate()
        {
            listeners.listen(browser, target, kind, i as u32).unwrap();
        }
        let mut frames = FrameLoop::new();
        frames.start(browser).unwrap();
        Self {
            page: TreasurePage::new(PageConfig::default(), 640.0, 480.0, 4),
            timer: SearchTimer::new(),
            frames,
            listeners,
        }
    }

    fn on_frame(&mut self, browser: &mut FakeBrowser, surface: &mut RecordingSurface) {
        if self.frames.begin_frame() {
            self.page.frame(surface);
            self.frames.schedule(browser).unwrap();
        }
    }

    fn unmount(&mut self, browser: &mut FakeBrowser) {
        self.frames.stop(browser);
        self.timer.disarm(&mut browser.timers);
        self.listeners.clear(browser);
    }
}

#[test]
fn unmount_releases_everything_it_registered() {
    let mut browser = FakeBrowser::default();
    let mut surface = RecordingSurface::new();
    let mut mount = Mount::start(&mut browser);

    for _ in 0..3 {
        browser.live_frames.clear();
        mount.on_frame(&mut browser, &mut surface);
    }
    let cmd = mount.page.update(Msg::Input("дуб".into()), Duration::ZERO);
    mount.timer.apply(cmd, &mut browser.timers).unwrap();
    assert_eq!(browser.live_frames.len(), 1);
    assert_eq!(browser.timers.live.len(), 1);

    mount.unmount(&mut browser);
    assert_eq!(browser.removed, browser.added);
    assert!(mount.listeners.is_empty());
    assert!(browser.live_frames.is_empty());
    assert!(!mount.frames.has_pending());
    assert!(browser.timers.live.is_empty());
}

#[test]
fn frame_callback_after_unmount_draws_nothing() {
    let mut browser = FakeBrowser::default();
    let mut surface = RecordingSurface::new();
    let mut mount = Mount::start(&mut browser);
    mount.unmount(&mut browser);

    // A callback the browser had already dequeued still runs once.
    mount.on_frame(&mut browser, &mut surface);
    assert!(surface.commands().is_empty());
    assert!(browser.live_frames.is_empty());
    assert_eq!(browser.next_frame, 1);
}
