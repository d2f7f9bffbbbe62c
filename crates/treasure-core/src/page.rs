#![forbid(unsafe_code)]

//! Page controller.
//!
//! [`TreasurePage`] owns the whole page state (theme, search, pointer,
//! particle field) and changes it only through [`TreasurePage::update`].
//! Side effects the host must perform are returned as a [`Cmd`]: arming or
//! disarming the search timer. Everything else (re-rendering markup, drawing
//! the next frame) the host does unconditionally after each update.

use std::time::Duration;

use crate::config::PageConfig;
use crate::filter::{SearchState, SearchTicket};
use crate::particles::{ParticleField, ParticleRng};
use crate::pointer::PointerState;
use crate::surface::Surface;
use crate::theme::Theme;
use crate::view::PageView;

/// Input to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Search box content changed to this raw value.
    Input(String),
    /// Clear control pressed.
    Clear,
    /// Theme toggle pressed.
    ToggleTheme,
    /// Viewport resized (surface pixels).
    Resize { width: f64, height: f64 },
    /// Pointer moved (surface pixels).
    PointerMove { x: f64, y: f64 },
    /// A host timer armed by [`Cmd::ScheduleSearch`] fired.
    SearchDue(SearchTicket),
}

/// Side effect requested from the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cmd {
    /// Nothing to do.
    #[default]
    None,
    /// Perform each command in order.
    Batch(Vec<Cmd>),
    /// Arm a one-shot timer that sends [`Msg::SearchDue`] after `delay`.
    ScheduleSearch { ticket: SearchTicket, delay: Duration },
    /// Disarm the timer for a superseded ticket.
    CancelSearch(SearchTicket),
}

impl Cmd {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Combine commands, flattening no-ops.
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Visit every leaf command in order.
    pub fn for_each(self, f: &mut impl FnMut(Cmd)) {
        match self {
            Self::None => {}
            Self::Batch(cmds) => {
                for cmd in cmds {
                    cmd.for_each(f);
                }
            }
            other => f(other),
        }
    }
}

/// The Treasure Map page.
#[derive(Debug, Clone)]
pub struct TreasurePage {
    config: PageConfig,
    theme: Theme,
    search: SearchState,
    pointer: PointerState,
    field: ParticleField,
}

impl TreasurePage {
    /// Mount a page on a `width` x `height` surface.
    ///
    /// `entropy` seeds the particle RNG unless the config fixes a seed.
    #[must_use]
    pub fn new(config: PageConfig, width: f64, height: f64, entropy: u64) -> Self {
        let rng = ParticleRng::new(config.seed.unwrap_or(entropy));
        let field = ParticleField::new(
            width,
            height,
            config.theme,
            config.particle_count,
            config.link_distance,
            rng,
        );
        crate::info!(
            width,
            height,
            theme = config.theme.name(),
            particles = config.particle_count,
            "page mounted"
        );
        Self {
            theme: config.theme,
            config,
            search: SearchState::new(),
            pointer: PointerState::unknown(),
            field,
        }
    }

    /// Apply one message. `now` is the host's monotonic time.
    pub fn update(&mut self, msg: Msg, now: Duration) -> Cmd {
        match msg {
            Msg::Input(text) => self.set_query(text, now),
            Msg::Clear => self.set_query(String::new(), now),
            Msg::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.field.set_theme(self.theme);
                crate::info!(theme = self.theme.name(), "theme toggled");
                Cmd::none()
            }
            Msg::Resize { width, height } => {
                self.field.resize(width, height);
                Cmd::none()
            }
            Msg::PointerMove { x, y } => {
                self.pointer.move_to(x, y);
                Cmd::none()
            }
            Msg::SearchDue(ticket) => {
                self.search.complete(ticket);
                Cmd::none()
            }
        }
    }

    fn set_query(&mut self, text: String, now: Duration) -> Cmd {
        let change = self
            .search
            .set_query(text, now, self.config.search_delay());
        let cancel = change.cancelled.map_or(Cmd::None, Cmd::CancelSearch);
        let schedule = change
            .scheduled
            .map_or(Cmd::None, |(ticket, delay)| Cmd::ScheduleSearch { ticket, delay });
        Cmd::batch(vec![cancel, schedule])
    }

    /// Complete a due search without a host timer. Returns `true` when the
    /// results changed.
    pub fn poll(&mut self, now: Duration) -> bool {
        self.search.poll(now)
    }

    /// Advance the particle field one frame and draw it.
    pub fn frame(&mut self, surface: &mut impl Surface) {
        self.field.step(&self.pointer, surface);
    }

    /// Snapshot of what the markup should show.
    #[must_use]
    pub fn view(&self) -> PageView {
        PageView::build(self.theme, &self.search)
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    #[must_use]
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    #[must_use]
    pub fn field(&self) -> &ParticleField {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn page() -> TreasurePage {
        let cfg = PageConfig {
            seed: Some(17),
            ..PageConfig::default()
        };
        TreasurePage::new(cfg, 1024.0, 768.0, 0)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn input_schedules_search() {
        let mut p = page();
        let cmd = p.update(Msg::Input("дуб".into()), ms(0));
        match cmd {
            Cmd::ScheduleSearch { delay, .. } => assert_eq!(delay, ms(500)),
            other => panic!("unexpected {other:?}"),
        }
        assert!(p.search().is_loading());
    }

    #[test]
    fn second_input_cancels_then_schedules() {
        let mut p = page();
        let first = p.update(Msg::Input("д".into()), ms(0));
        let Cmd::ScheduleSearch { ticket: t1, .. } = first else {
            panic!("expected schedule");
        };
        let cmd = p.update(Msg::Input("ду".into()), ms(50));
        let Cmd::Batch(cmds) = cmd else {
            panic!("expected batch");
        };
        assert_eq!(cmds[0], Cmd::CancelSearch(t1));
        assert!(matches!(cmds[1], Cmd::ScheduleSearch { ticket, .. } if ticket > t1));
    }

    #[test]
    fn search_due_delivers_results() {
        let mut p = page();
        let Cmd::ScheduleSearch { ticket, .. } = p.update(Msg::Input("фонтан".into()), ms(0))
        else {
            panic!("expected schedule");
        };
        p.update(Msg::SearchDue(ticket), ms(500));
        assert_eq!(p.search().results().len(), 1);
        assert_eq!(p.search().results()[0].location, "Центральная площадь");
    }

    #[test]
    fn clear_resets_without_loading() {
        let mut p = page();
        p.update(Msg::Input("дуб".into()), ms(0));
        let cmd = p.update(Msg::Clear, ms(10));
        assert!(matches!(cmd, Cmd::CancelSearch(_)));
        assert_eq!(p.search().query(), "");
        assert!(!p.search().is_loading());
        assert!(p.search().results().is_empty());
    }

    #[test]
    fn toggle_regenerates_field() {
        let mut p = page();
        let generation = p.field().generation();
        p.update(Msg::ToggleTheme, ms(0));
        assert_eq!(p.theme(), Theme::Dark);
        assert_eq!(p.field().theme(), Theme::Dark);
        assert_eq!(p.field().generation(), generation + 1);
        assert_eq!(p.field().len(), 80);
    }

    #[test]
    fn resize_updates_field_size() {
        let mut p = page();
        p.update(
            Msg::Resize {
                width: 320.0,
                height: 200.0,
            },
            ms(0),
        );
        assert_eq!(p.field().size(), (320.0, 200.0));
        assert_eq!(p.field().len(), 80);
    }

    #[test]
    fn resending_finished_query_is_a_no_op() {
        let mut p = page();
        p.update(Msg::Input("дуб".into()), ms(0));
        p.poll(ms(500));
        assert_eq!(p.update(Msg::Input("дуб".into()), ms(900)), Cmd::None);
        assert!(!p.search().is_loading());
        assert_eq!(p.search().results().len(), 1);
    }

    #[test]
    fn pointer_tracking() {
        let mut p = page();
        p.update(Msg::PointerMove { x: 4.0, y: 2.0 }, ms(0));
        assert_eq!(p.pointer().position(), Some((4.0, 2.0)));
        p.update(Msg::PointerMove { x: 9.0, y: 1.0 }, ms(0));
        assert_eq!(p.pointer().position(), Some((9.0, 1.0)));
    }

    #[test]
    fn pointer_links_persist_without_movement() {
        let mut p = page();
        let first = p.field().particles()[0];
        p.update(
            Msg::PointerMove {
                x: first.x,
                y: first.y,
            },
            ms(0),
        );
        let pointer = p.theme().pointer_link_color();
        let mut surface = RecordingSurface::new();
        for _ in 0..5 {
            surface.take();
            p.frame(&mut surface);
        }
        assert!(p.pointer().position().is_some());
        assert!(surface.lines_with_color(pointer).count() > 0);
    }

    #[test]
    fn frame_draws_every_particle() {
        let mut p = page();
        let mut surface = RecordingSurface::new();
        p.frame(&mut surface);
        assert_eq!(surface.circle_count(), 80);
    }

    #[test]
    fn config_seed_beats_entropy() {
        let cfg = PageConfig {
            seed: Some(5),
            ..PageConfig::default()
        };
        let a = TreasurePage::new(cfg.clone(), 100.0, 100.0, 1);
        let b = TreasurePage::new(cfg, 100.0, 100.0, 2);
        assert_eq!(a.field().particles(), b.field().particles());
    }

    #[test]
    fn batch_flattens_noops() {
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None);
        let t = SearchTicket::from_raw(1);
        assert_eq!(
            Cmd::batch(vec![Cmd::None, Cmd::CancelSearch(t)]),
            Cmd::CancelSearch(t)
        );
    }

    #[test]
    fn for_each_visits_leaves_in_order() {
        let t1 = SearchTicket::from_raw(1);
        let t2 = SearchTicket::from_raw(2);
        let cmd = Cmd::Batch(vec![
            Cmd::CancelSearch(t1),
            Cmd::Batch(vec![Cmd::None, Cmd::CancelSearch(t2)]),
        ]);
        let mut seen = Vec::new();
        cmd.for_each(&mut |c| seen.push(c));
        assert_eq!(seen, vec![Cmd::CancelSearch(t1), Cmd::CancelSearch(t2)]);
    }
}
