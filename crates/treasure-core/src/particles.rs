#![forbid(unsafe_code)]

//! Background particle field.
//!
//! Particles are plain data. The free functions [`spawn_particles`],
//! [`advance`] and [`links`] do all the work; [`ParticleField`] owns one
//! generation of particles together with the surface size and theme it was
//! built for.
//!
//! A field is never repaired in place: a theme change or a resize throws the
//! particles away and spawns a fresh set of exactly `count` particles.
//!
//! # Frame
//!
//! 1. Clear the surface.
//! 2. For each particle: move by velocity, reflect velocity on edges, draw.
//! 3. Link every pair closer than `link_distance`.
//! 4. Link every particle closer than `link_distance` to the pointer.

use crate::pointer::PointerState;
use crate::surface::Surface;
use crate::theme::{Rgba, Theme};

/// Smallest particle radius (inclusive).
pub const MIN_RADIUS: f64 = 1.0;
/// Largest particle radius (exclusive).
pub const MAX_RADIUS: f64 = 4.0;
/// Largest absolute velocity component (exclusive).
pub const MAX_SPEED: f64 = 1.0;
/// Stroke width of link lines.
pub const LINK_WIDTH: f64 = 1.0;

// ---------------------------------------------------------------------------
// RNG
// ---------------------------------------------------------------------------

/// Seeded xorshift64* generator.
///
/// Deterministic for a given seed, which keeps frames reproducible in tests.
#[derive(Debug, Clone)]
pub struct ParticleRng {
    state: u64,
}

impl ParticleRng {
    /// Create a generator. Any seed is valid, including `0`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        // splitmix64 scramble so nearby seeds diverge and state is never zero
        let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        Self {
            state: if z == 0 { 0x2545_F491_4F6C_DD1D } else { z },
        }
    }

    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Uniform in `[lo, hi)`.
    #[inline]
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

// ---------------------------------------------------------------------------
// Particle
// ---------------------------------------------------------------------------

/// One moving dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub color: Rgba,
}

/// What a link connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Two particles.
    Pair,
    /// A particle and the pointer.
    Pointer,
}

/// A segment to stroke after all particles moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub kind: LinkKind,
}

/// Spawn `count` particles inside a `width` x `height` surface.
///
/// Position is uniform over the surface, radius in `[1, 4)`, each velocity
/// component in `[-1, 1)`, color from `theme`.
pub fn spawn_particles(
    count: usize,
    width: f64,
    height: f64,
    theme: Theme,
    rng: &mut ParticleRng,
) -> Vec<Particle> {
    let color = theme.particle_color();
    (0..count)
        .map(|_| {
            let radius = rng.range(MIN_RADIUS, MAX_RADIUS);
            let x = rng.next_f64() * width;
            let y = rng.next_f64() * height;
            let vx = rng.range(-MAX_SPEED, MAX_SPEED);
            let vy = rng.range(-MAX_SPEED, MAX_SPEED);
            Particle {
                x,
                y,
                vx,
                vy,
                radius,
                color,
            }
        })
        .collect()
}

/// Move `p` one step and reflect its velocity at the surface edges.
///
/// The position is not clamped: a particle that overshoots an edge turns
/// around and drifts back on the following steps.
pub fn advance(p: &mut Particle, width: f64, height: f64) {
    p.x += p.vx;
    p.y += p.vy;

    if p.x + p.radius > width || p.x - p.radius < 0.0 {
        p.vx = -p.vx;
    }
    if p.y + p.radius > height || p.y - p.radius < 0.0 {
        p.vy = -p.vy;
    }
}

/// Links between distinct particle pairs, then between particles and the
/// pointer, for every distance strictly below `max_distance`.
#[must_use]
pub fn links(particles: &[Particle], pointer: &PointerState, max_distance: f64) -> Vec<Link> {
    let max_sq = max_distance * max_distance;
    let mut out = Vec::new();

    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            if distance_sq((a.x, a.y), (b.x, b.y)) < max_sq {
                out.push(Link {
                    from: (a.x, a.y),
                    to: (b.x, b.y),
                    kind: LinkKind::Pair,
                });
            }
        }
    }

    if let Some(target) = pointer.position() {
        for p in particles {
            if distance_sq((p.x, p.y), target) < max_sq {
                out.push(Link {
                    from: (p.x, p.y),
                    to: target,
                    kind: LinkKind::Pointer,
                });
            }
        }
    }

    out
}

#[inline]
fn distance_sq(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

// ---------------------------------------------------------------------------
// ParticleField
// ---------------------------------------------------------------------------

/// One generation of particles bound to a surface size and theme.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    theme: Theme,
    count: usize,
    link_distance: f64,
    generation: u64,
    rng: ParticleRng,
}

impl ParticleField {
    /// Build the first generation.
    #[must_use]
    pub fn new(
        width: f64,
        height: f64,
        theme: Theme,
        count: usize,
        link_distance: f64,
        rng: ParticleRng,
    ) -> Self {
        let mut field = Self {
            particles: Vec::with_capacity(count),
            width,
            height,
            theme,
            count,
            link_distance,
            generation: 0,
            rng,
        };
        field.regenerate();
        field
    }

    /// Rebuild for a new surface size. Previous particles are discarded.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    /// Rebuild for a new theme. Previous particles are discarded.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.regenerate();
    }

    /// Discard all particles and spawn a fresh set.
    pub fn regenerate(&mut self) {
        self.particles = spawn_particles(
            self.count,
            self.width,
            self.height,
            self.theme,
            &mut self.rng,
        );
        self.generation += 1;
        crate::debug!(
            generation = self.generation,
            width = self.width,
            height = self.height,
            theme = self.theme.name(),
            "particle field regenerated"
        );
    }

    /// Advance one frame and draw it onto `surface`.
    pub fn step(&mut self, pointer: &PointerState, surface: &mut impl Surface) {
        surface.clear();
        for p in &mut self.particles {
            advance(p, self.width, self.height);
            surface.fill_circle(p.x, p.y, p.radius, p.color);
        }
        self.draw_links(pointer, surface);
    }

    fn draw_links(&self, pointer: &PointerState, surface: &mut impl Surface) {
        let pair_color = self.theme.link_color();
        let pointer_color = self.theme.pointer_link_color();
        for link in links(&self.particles, pointer, self.link_distance) {
            let color = match link.kind {
                LinkKind::Pair => pair_color,
                LinkKind::Pointer => pointer_color,
            };
            surface.stroke_line(link.from, link.to, LINK_WIDTH, color);
        }
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Increments on every regeneration, starting at 1.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
