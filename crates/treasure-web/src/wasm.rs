#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use treasure_core::{Msg, PageConfig, TreasurePage};
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlElement, MouseEvent, Window};

use crate::canvas::CanvasSurface;
use crate::dom::PageDom;
use crate::error::MountError;
use crate::frames::{FrameHost, FrameLoop};
use crate::listeners::ListenerSet;
use crate::timer::{SearchTimer, TimerHost};

/// The Treasure Map page as a JS object.
///
/// Exported API: `new`, `mount(root, options?)`, `unmount`, `toggleTheme`,
/// `setQuery`, plus read-only getters used by hosts and tests.
#[wasm_bindgen]
pub struct TreasureMapWeb {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl TreasureMapWeb {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { mounted: None }
    }

    /// Build the page inside `root` and start animating.
    ///
    /// `options` is a plain object with any of `particleCount`,
    /// `linkDistance`, `searchDelayMs`, `seed`, `theme`.
    pub fn mount(&mut self, root: HtmlElement, options: Option<JsValue>) -> Result<(), JsValue> {
        if self.mounted.is_some() {
            return Err(MountError::AlreadyMounted.into());
        }
        let config = parse_options(options)?;
        self.mounted = Some(Mounted::start(&root, config)?);
        Ok(())
    }

    /// Stop the animation, disarm the search timer, remove the listeners and
    /// the markup. No-op when not mounted.
    pub fn unmount(&mut self) {
        self.mounted = None;
    }

    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&mut self) {
        self.dispatch(Msg::ToggleTheme);
    }

    /// Same as typing `text` into the search box.
    #[wasm_bindgen(js_name = setQuery)]
    pub fn set_query(&mut self, text: String) {
        self.dispatch(Msg::Input(text));
    }

    pub fn query(&self) -> String {
        self.read(|p| p.search().query().to_owned()).unwrap_or_default()
    }

    /// `"light"` or `"dark"`; empty when not mounted.
    pub fn theme(&self) -> String {
        self.read(|p| p.theme().name().to_owned()).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = resultCount)]
    pub fn result_count(&self) -> u32 {
        self.read(|p| p.search().results().len() as u32).unwrap_or(0)
    }

    /// Current results serialized as a JSON array.
    #[wasm_bindgen(js_name = resultsJson)]
    pub fn results_json(&self) -> String {
        self.read(|p| serde_json::to_string(p.search().results()).unwrap_or_default())
            .unwrap_or_else(|| "[]".to_owned())
    }

    #[wasm_bindgen(js_name = isLoading)]
    pub fn is_loading(&self) -> bool {
        self.read(|p| p.search().is_loading()).unwrap_or(false)
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> u32 {
        self.read(|p| p.field().len() as u32).unwrap_or(0)
    }
}

impl Default for TreasureMapWeb {
    fn default() -> Self {
        Self::new()
    }
}

impl TreasureMapWeb {
    fn dispatch(&mut self, msg: Msg) {
        if let Some(m) = &self.mounted
            && let Ok(mut state) = m.state.try_borrow_mut()
        {
            state.dispatch(msg);
        }
    }

    fn read<T>(&self, f: impl FnOnce(&TreasurePage) -> T) -> Option<T> {
        let m = self.mounted.as_ref()?;
        let state = m.state.try_borrow().ok()?;
        Some(f(&state.page))
    }
}

fn parse_options(options: Option<JsValue>) -> Result<PageConfig, MountError> {
    match options {
        Some(v) if !v.is_undefined() && !v.is_null() => {
            let json: String = js_sys::JSON::stringify(&v)?.into();
            Ok(PageConfig::from_json(&json)?)
        }
        _ => Ok(PageConfig::default()),
    }
}

pub(crate) fn report(err: &JsValue) {
    web_sys::console::error_2(&JsValue::from_str("treasure-map:"), err);
}

/// A live page. Dropping it tears everything down.
struct Mounted {
    state: Rc<RefCell<PageState>>,
    listeners: ListenerSet,
}

struct PageState {
    window: Window,
    page: TreasurePage,
    dom: PageDom,
    surface: CanvasSurface,
    timer: SearchTimer<i32>,
    frames: FrameLoop<i32>,
    callbacks: Option<Callbacks>,
}

/// Persistent closures handed to `requestAnimationFrame` and `setTimeout`.
struct Callbacks {
    frame: Closure<dyn FnMut()>,
    search_due: Closure<dyn FnMut()>,
}

/// `requestAnimationFrame` / `cancelAnimationFrame` for the particle loop.
struct BrowserFrames<'a> {
    window: &'a Window,
    callback: &'a Closure<dyn FnMut()>,
}

impl FrameHost for BrowserFrames<'_> {
    type Handle = i32;
    type Error = JsValue;

    fn request(&mut self) -> Result<i32, JsValue> {
        self.window.request_animation_frame(self.callback.as_ref().unchecked_ref())
    }

    fn cancel(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            report(&err);
        }
    }
}

/// `setTimeout` / `clearTimeout` for the search debounce.
struct BrowserTimers<'a> {
    window: &'a Window,
    callback: &'a Closure<dyn FnMut()>,
}

impl TimerHost for BrowserTimers<'_> {
    type Handle = i32;
    type Error = JsValue;

    fn arm(&mut self, delay: Duration) -> Result<i32, JsValue> {
        let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                self.callback.as_ref().unchecked_ref(),
                ms,
            )
    }

    fn disarm(&mut self, handle: i32) {
        self.window.clear_timeout_with_handle(handle);
    }
}

fn viewport(window: &Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

fn now(window: &Window) -> Duration {
    let ms = window.performance().map_or(0.0, |p| p.now());
    Duration::from_secs_f64(ms.max(0.0) / 1000.0)
}

/// Run `f` on the page state if it is still alive and not borrowed.
fn with_state(weak: &Weak<RefCell<PageState>>, f: impl FnOnce(&mut PageState)) {
    if let Some(state) = weak.upgrade()
        && let Ok(mut s) = state.try_borrow_mut()
    {
        f(&mut s);
    }
}

impl Mounted {
    fn start(root: &HtmlElement, config: PageConfig) -> Result<Self, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let document = window.document().ok_or(MountError::NoDocument)?;

        let dom = PageDom::build(&document, root)?;
        let surface = match CanvasSurface::new(dom.canvas.clone()) {
            Ok(s) => s,
            Err(err) => {
                dom.remove();
                return Err(err);
            }
        };
        let (vw, vh) = viewport(&window);
        let (width, height) = surface.resize_to(vw, vh);

        let entropy = (js_sys::Math::random() * u64::MAX as f64) as u64;
        let page = TreasurePage::new(config, width, height, entropy);

        let state = Rc::new(RefCell::new(PageState {
            window: window.clone(),
            page,
            dom,
            surface,
            timer: SearchTimer::new(),
            frames: FrameLoop::new(),
            callbacks: None,
        }));

        let frame = {
            let weak = Rc::downgrade(&state);
            Closure::wrap(
                Box::new(move || with_state(&weak, PageState::on_frame)) as Box<dyn FnMut()>
            )
        };
        let search_due = {
            let weak = Rc::downgrade(&state);
            Closure::wrap(
                Box::new(move || with_state(&weak, PageState::on_search_due)) as Box<dyn FnMut()>
            )
        };
        state.borrow_mut().callbacks = Some(Callbacks { frame, search_due });

        // From here on, dropping `mounted` undoes everything.
        let mut mounted = Self {
            state,
            listeners: ListenerSet::new(),
        };
        mounted.register_listeners(&window)?;
        {
            let mut s = mounted.state.borrow_mut();
            s.render();
            s.start_frames();
        }
        Ok(mounted)
    }

    fn register_listeners(&mut self, window: &Window) -> Result<(), MountError> {
        let (toggle, input, clear) = {
            let s = self.state.borrow();
            (
                s.dom.toggle.clone(),
                s.dom.input.clone(),
                s.dom.clear.clone(),
            )
        };

        let weak = Rc::downgrade(&self.state);
        self.listeners.listen(window, "resize", move |_: Event| {
            with_state(&weak, PageState::fit_viewport);
        })?;

        let weak = Rc::downgrade(&self.state);
        self.listeners.listen(window, "mousemove", move |e: Event| {
            if let Some(e) = e.dyn_ref::<MouseEvent>() {
                let msg = Msg::PointerMove {
                    x: f64::from(e.client_x()),
                    y: f64::from(e.client_y()),
                };
                with_state(&weak, |s| s.dispatch(msg));
            }
        })?;

        let weak = Rc::downgrade(&self.state);
        self.listeners.listen(&toggle, "click", move |_: Event| {
            with_state(&weak, |s| s.dispatch(Msg::ToggleTheme));
        })?;

        let weak = Rc::downgrade(&self.state);
        let field = input.clone();
        self.listeners.listen(&input, "input", move |_: Event| {
            let text = field.value();
            with_state(&weak, |s| s.dispatch(Msg::Input(text)));
        })?;

        let weak = Rc::downgrade(&self.state);
        self.listeners.listen(&clear, "click", move |_: Event| {
            with_state(&weak, |s| s.dispatch(Msg::Clear));
            if let Err(err) = input.focus() {
                report(&err);
            }
        })?;

        treasure_core::debug!("listeners registered");
        Ok(())
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.listeners.clear();
        if let Ok(mut s) = self.state.try_borrow_mut() {
            s.teardown();
        }
    }
}

impl PageState {
    fn dispatch(&mut self, msg: Msg) {
        let cmd = self.page.update(msg, now(&self.window));
        if let Some(cb) = &self.callbacks {
            let mut timers = BrowserTimers {
                window: &self.window,
                callback: &cb.search_due,
            };
            if let Err(err) = self.timer.apply(cmd, &mut timers) {
                report(&err);
            }
        }
        self.render();
    }

    fn render(&mut self) {
        let view = self.page.view();
        self.dom.render(&view);
    }

    fn on_search_due(&mut self) {
        if let Some(ticket) = self.timer.fire() {
            self.dispatch(Msg::SearchDue(ticket));
        }
    }

    fn on_frame(&mut self) {
        if !self.frames.begin_frame() {
            return;
        }
        self.page.frame(&mut self.surface);
        self.schedule_frame();
    }

    fn start_frames(&mut self) {
        let Some(cb) = &self.callbacks else {
            return;
        };
        let mut host = BrowserFrames {
            window: &self.window,
            callback: &cb.frame,
        };
        if let Err(err) = self.frames.start(&mut host) {
            report(&err);
        }
    }

    fn schedule_frame(&mut self) {
        let Some(cb) = &self.callbacks else {
            return;
        };
        let mut host = BrowserFrames {
            window: &self.window,
            callback: &cb.frame,
        };
        if let Err(err) = self.frames.schedule(&mut host) {
            report(&err);
        }
    }

    fn fit_viewport(&mut self) {
        let (vw, vh) = viewport(&self.window);
        let (width, height) = self.surface.resize_to(vw, vh);
        self.dispatch(Msg::Resize { width, height });
    }

    fn teardown(&mut self) {
        if let Some(cb) = &self.callbacks {
            self.frames.stop(&mut BrowserFrames {
                window: &self.window,
                callback: &cb.frame,
            });
            let mut timers = BrowserTimers {
                window: &self.window,
                callback: &cb.search_due,
            };
            self.timer.disarm(&mut timers);
        }
        self.callbacks = None;
        self.dom.remove();
        treasure_core::info!("page unmounted");
    }
}
