//! Particle field lifecycle: regeneration on theme change and resize,
//! bounded motion, and link drawing against the pointer.

use std::time::Duration;

use proptest::prelude::*;
use treasure_core::particles::{LinkKind, links};
use treasure_core::surface::DrawCommand;
use treasure_core::{
    Msg, PageConfig, ParticleField, ParticleRng, RecordingSurface, Rgba, Theme, TreasurePage,
};

fn page(seed: u64) -> TreasurePage {
    let cfg = PageConfig {
        seed: Some(seed),
        ..PageConfig::default()
    };
    TreasurePage::new(cfg, 1280.0, 720.0, 0)
}

#[test]
fn double_toggle_restores_theme_and_coloring() {
    let mut p = page(4);
    assert!(p.field().particles().iter().all(|q| q.color == Rgba::BLUE));

    p.update(Msg::ToggleTheme, Duration::ZERO);
    assert!(p.field().particles().iter().all(|q| q.color == Rgba::WHITE));

    p.update(Msg::ToggleTheme, Duration::ZERO);
    assert_eq!(p.theme(), Theme::Light);
    assert_eq!(p.field().len(), 80);
    assert!(p.field().particles().iter().all(|q| q.color == Rgba::BLUE));
}

#[test]
fn resize_keeps_count_and_rerandomizes() {
    let mut p = page(8);
    let before = p.field().particles().to_vec();
    p.update(
        Msg::Resize {
            width: 1280.0,
            height: 720.0,
        },
        Duration::ZERO,
    );
    assert_eq!(p.field().len(), 80);
    let moved = before
        .iter()
        .zip(p.field().particles())
        .filter(|(a, b)| a.x != b.x || a.vx != b.vx)
        .count();
    assert!(moved > 70, "only {moved} particles changed");
}

#[test]
fn pointer_lines_use_pointer_color() {
    let mut p = page(2);
    p.update(Msg::PointerMove { x: 640.0, y: 360.0 }, Duration::ZERO);
    let mut surface = RecordingSurface::new();
    p.frame(&mut surface);

    for cmd in surface.lines_with_color(Theme::Light.pointer_link_color()) {
        let DrawCommand::Line { to, .. } = cmd else {
            unreachable!()
        };
        assert_eq!(*to, (640.0, 360.0));
    }
}

#[test]
fn dark_theme_frame_uses_white() {
    let mut p = page(6);
    p.update(Msg::ToggleTheme, Duration::ZERO);
    let mut surface = RecordingSurface::new();
    p.frame(&mut surface);
    for cmd in surface.commands() {
        match cmd {
            DrawCommand::Clear => {}
            DrawCommand::Circle { color, .. } => assert_eq!(*color, Rgba::WHITE),
            DrawCommand::Line { color, .. } => {
                let pair = Rgba::rgba(255, 255, 255, 0x50);
                let pointer = Rgba::rgba(255, 255, 255, 0x80);
                assert!(*color == pair || *color == pointer, "{color:?}");
            }
        }
    }
}

#[test]
fn particles_stay_near_surface_over_many_frames() {
    let mut field = ParticleField::new(200.0, 100.0, Theme::Light, 80, 100.0, ParticleRng::new(21));
    let mut surface = RecordingSurface::new();
    let pointer = Default::default();
    for _ in 0..2_000 {
        field.step(&pointer, &mut surface);
        surface.take();
    }
    // Reflection keeps each particle within one step of the edges.
    for q in field.particles() {
        assert!(q.x > -2.0 && q.x < 202.0, "x escaped: {}", q.x);
        assert!(q.y > -2.0 && q.y < 102.0, "y escaped: {}", q.y);
    }
}

proptest! {
    #[test]
    fn count_is_fixed_for_any_viewport(
        w in 0.0f64..4000.0,
        h in 0.0f64..4000.0,
        seed in any::<u64>(),
    ) {
        let mut p = page(seed);
        p.update(Msg::Resize { width: w, height: h }, Duration::ZERO);
        prop_assert_eq!(p.field().len(), 80);
        for q in p.field().particles() {
            prop_assert!(q.x >= 0.0 && q.x <= w);
            prop_assert!(q.y >= 0.0 && q.y <= h);
        }
    }

    #[test]
    fn link_set_is_symmetric_in_distance(
        seed in any::<u64>(),
        px in 0.0f64..300.0,
        py in 0.0f64..300.0,
    ) {
        let rng = ParticleRng::new(seed);
        let field = ParticleField::new(300.0, 300.0, Theme::Dark, 30, 100.0, rng);
        let mut pointer = treasure_core::PointerState::unknown();
        pointer.move_to(px, py);
        for link in links(field.particles(), &pointer, 100.0) {
            let dx = link.from.0 - link.to.0;
            let dy = link.from.1 - link.to.1;
            prop_assert!((dx * dx + dy * dy).sqrt() < 100.0 + 1e-9);
            if link.kind == LinkKind::Pointer {
                prop_assert_eq!(link.to, (px, py));
            }
        }
    }
}
