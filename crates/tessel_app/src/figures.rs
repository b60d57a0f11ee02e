//! Figure catalog
//!
//! One geometric figure per cell. A figure is a short list of marks in
//! local coordinates around its anchor, plus motion hints that override the
//! randomized defaults. Sizes scale with the viewport's shorter side so
//! figures fill the display at any resolution.

use std::f32::consts::PI;

use smallvec::SmallVec;
use tessel_animation::{EnterKind, ExitKind, HoldMotion};
use tessel_core::{Color, Point, Size};

/// Number of figures, one per grid cell
pub const CELL_COUNT: usize = 36;

/// Rotation rate for the radiating figures
const RADIATE_SPEED: f32 = 0.03;

/// Viewport used when the real one has no area yet
const FALLBACK_VIEWPORT: Size = Size::new(1920.0, 1080.0);

// ─────────────────────────────────────────────────────────────────────────────
// Marks
// ─────────────────────────────────────────────────────────────────────────────

/// Geometry of a single mark, in local coordinates
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Regular polygon; `rotation` turns it about its own center
    Polygon {
        center: Point,
        radius: f32,
        sides: u32,
        rotation: f32,
    },
    Star {
        center: Point,
        inner: f32,
        outer: f32,
        points: u32,
    },
    Line {
        from: Point,
        to: Point,
    },
    Ellipse {
        center: Point,
        rx: f32,
        ry: f32,
    },
    Circle {
        center: Point,
        radius: f32,
    },
    /// Annular sector between two radii and two angles
    ArcSegment {
        center: Point,
        inner: f32,
        outer: f32,
        start: f32,
        end: f32,
        rotation: f32,
    },
}

/// How a mark is painted
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke { color: Color, width: f32 },
}

/// A painted primitive
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub shape: Primitive,
    pub paint: Paint,
}

/// Motion overrides a figure asks for
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionHints {
    /// `None` draws from the configured enter pool
    pub enter: Option<EnterKind>,
    /// `None` draws from the configured exit pool
    pub exit: Option<ExitKind>,
    pub hold: HoldMotion,
    /// Resting rotation before jitter
    pub base_rotation: f32,
    pub rotation_speed: Option<f32>,
}

impl MotionHints {
    fn breathe() -> Self {
        Self {
            hold: HoldMotion::Breathe,
            ..Default::default()
        }
    }

    fn radiate() -> Self {
        Self {
            hold: HoldMotion::Radiate,
            rotation_speed: Some(RADIATE_SPEED),
            ..Default::default()
        }
    }

    fn turned(rotation: f32) -> Self {
        Self {
            base_rotation: rotation,
            ..Self::breathe()
        }
    }
}

/// A built figure, ready to be placed in the scene
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub name: &'static str,
    pub marks: SmallVec<[Mark; 8]>,
    pub hints: MotionHints,
}

impl Figure {
    fn new(name: &'static str, hints: MotionHints) -> Self {
        Self {
            name,
            marks: SmallVec::new(),
            hints,
        }
    }

    fn fill(&mut self, shape: Primitive, color: Color) {
        self.marks.push(Mark {
            shape,
            paint: Paint::Fill(color),
        });
    }

    fn stroke(&mut self, shape: Primitive, color: Color, width: f32) {
        self.marks.push(Mark {
            shape,
            paint: Paint::Stroke { color, width },
        });
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Color, width: f32) {
        self.stroke(
            Primitive::Line {
                from: Point::new(from.0, from.1),
                to: Point::new(to.0, to.1),
            },
            color,
            width,
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Viewport-derived measures every builder works from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measures {
    pub w: f32,
    pub h: f32,
    /// Shorter side
    pub min: f32,
    /// Standard radius
    pub r: f32,
    /// Standard half-length for lines
    pub l: f32,
}

impl Measures {
    pub fn new(viewport: Size) -> Self {
        let viewport = if viewport.is_empty() {
            FALLBACK_VIEWPORT
        } else {
            viewport
        };
        let min = viewport.min_side();
        Self {
            w: viewport.width,
            h: viewport.height,
            min,
            r: min * 0.45,
            l: min * 0.5,
        }
    }

    /// Stroke width: a fraction of the short side, never below `floor` px
    fn stroke(&self, floor: f32, fraction: f32) -> f32 {
        floor.max(self.min * fraction)
    }
}

fn polygon(x: f32, y: f32, radius: f32, sides: u32, rotation: f32) -> Primitive {
    Primitive::Polygon {
        center: Point::new(x, y),
        radius,
        sides,
        rotation,
    }
}

fn triangle(x: f32, y: f32, radius: f32, rotation: f32) -> Primitive {
    polygon(x, y, radius, 3, rotation)
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

type Builder = fn(&Measures, Color) -> Figure;

const BUILDERS: [Builder; CELL_COUNT] = [
    wedge,
    chevron_stack,
    eight_rays,
    stepped_fan,
    triangle_sunburst,
    hammer,
    arrow_wedge,
    fine_sunburst,
    speed_lines,
    hammer_and_sickle,
    shield,
    stepped_column,
    ray_burst,
    great_wedge,
    triangle_outline,
    double_arrow,
    cross_slash,
    chevron_row,
    triangle_fan,
    pentagon,
    peak,
    star_outline,
    layered_fan,
    eight_point_burst,
    octagon,
    divider,
    tri_cross,
    pyramid,
    star,
    compass,
    hexagon,
    rings,
    diamond_grid,
    half_arc,
    parallels,
    cross_star,
];

/// Build the figure for a cell, or `None` past the catalog
pub fn build(cell: usize, viewport: Size, color: Color) -> Option<Figure> {
    let builder = BUILDERS.get(cell)?;
    Some(builder(&Measures::new(viewport), color))
}

/// Build the figure for a cell; cells past the catalog wrap around
pub fn build_wrapping(cell: usize, viewport: Size, color: Color) -> Figure {
    BUILDERS[cell % CELL_COUNT](&Measures::new(viewport), color)
}

/// Name of the figure for a cell
pub fn name(cell: usize) -> Option<&'static str> {
    build(cell, FALLBACK_VIEWPORT, Color::WHITE).map(|figure| figure.name)
}

fn wedge(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("wedge", MotionHints::turned(PI / 3.0));
    fig.fill(triangle(0.0, 0.0, s.r * 0.88, 0.0), color);
    fig
}

fn chevron_stack(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("chevron-stack", MotionHints::breathe());
    let lw = s.stroke(3.0, 0.005);
    let rise = s.min * 0.04;
    for i in -2i32..=2 {
        let y = i as f32 * s.min * 0.14;
        let half = s.w * (0.36 - i.abs() as f32 * 0.05) * 0.5;
        fig.line((-half, y + rise), (0.0, y - rise), color, lw);
        fig.line((0.0, y - rise), (half, y + rise), color, lw);
    }
    fig
}

fn eight_rays(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("eight-rays", MotionHints::breathe());
    let lw = s.stroke(2.0, 0.004);
    let d = s.l * 0.44;
    let k = d * 0.707;
    fig.line((-d, 0.0), (d, 0.0), color, lw);
    fig.line((0.0, -d), (0.0, d), color, lw);
    fig.line((-k, -k), (k, k), color, lw);
    fig.line((-k, k), (k, -k), color, lw);
    fig
}

fn stepped_fan(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("stepped-fan", MotionHints::breathe());
    for i in 0..4 {
        let r = s.r * (0.22 + i as f32 * 0.22);
        fig.fill(triangle(0.0, -r * 0.5, r * 0.55, PI / 2.0), color);
    }
    fig
}

fn triangle_sunburst(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("triangle-sunburst", MotionHints::radiate());
    let n = 10;
    let rad = s.r * 0.78;
    for i in 0..n {
        let a = i as f32 / n as f32 * PI * 2.0;
        fig.fill(
            triangle(a.cos() * rad * 0.38, a.sin() * rad * 0.38, rad * 0.42, a + PI / 2.0),
            color,
        );
    }
    fig
}

fn hammer(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new(
        "hammer",
        MotionHints {
            enter: Some(EnterKind::SlamDown),
            exit: Some(ExitKind::SlamUp),
            ..MotionHints::breathe()
        },
    );
    fig.fill(
        Primitive::Ellipse {
            center: Point::new(0.0, -s.r * 0.24),
            rx: s.r * 0.42,
            ry: s.r * 0.1,
        },
        color,
    );
    fig.line((0.0, -s.r * 0.16), (0.0, s.r * 0.6), color, s.stroke(4.0, 0.006));
    fig
}

fn arrow_wedge(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("arrow-wedge", MotionHints::turned(PI / 2.0));
    fig.fill(triangle(0.0, 0.0, s.r * 0.85, 0.0), color);
    fig
}

fn rays(fig: &mut Figure, count: usize, len: f32, color: Color, width: f32) {
    for i in 0..count {
        let a = i as f32 / count as f32 * PI * 2.0;
        fig.line((0.0, 0.0), (a.cos() * len, a.sin() * len), color, width);
    }
}

fn fine_sunburst(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("fine-sunburst", MotionHints::radiate());
    rays(&mut fig, 16, s.r * 0.86, color, s.stroke(2.0, 0.003));
    fig
}

fn speed_lines(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("speed-lines", MotionHints::breathe());
    let lw = s.stroke(2.0, 0.003);
    let n = 8;
    let mid = (n - 1) as f32 / 2.0;
    for i in 0..n {
        let offset = i as f32 - mid;
        let dy = offset * s.min * 0.1;
        let half = s.w * (0.42 - offset.abs() * 0.04) * 0.5;
        fig.line((-half, dy), (half, dy), color, lw);
    }
    fig
}

fn hammer_and_sickle(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new(
        "hammer-and-sickle",
        MotionHints {
            enter: Some(EnterKind::FlipIn),
            exit: Some(ExitKind::FlipOut),
            ..MotionHints::breathe()
        },
    );
    fig.fill(
        Primitive::Ellipse {
            center: Point::new(0.0, -s.r * 0.22),
            rx: s.r * 0.34,
            ry: s.r * 0.1,
        },
        color,
    );
    fig.line((0.0, -s.r * 0.1), (0.0, s.r * 0.5), color, s.stroke(3.0, 0.005));
    fig.fill(
        Primitive::ArcSegment {
            center: Point::new(s.r * 0.05, s.r * 0.03),
            inner: s.r * 0.18,
            outer: s.r * 0.44,
            start: PI * 0.38,
            end: PI * 0.85,
            rotation: -PI / 3.5,
        },
        color,
    );
    fig
}

fn shield(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("shield", MotionHints::turned(-PI / 2.0));
    fig.fill(polygon(0.0, 0.0, s.r * 0.8, 5, 0.0), color);
    fig
}

fn stepped_column(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("stepped-column", MotionHints::breathe());
    for i in 0..4 {
        let w = s.min * (0.1 + i as f32 * 0.06);
        let y = (i as f32 - 1.5) * s.h * 0.22;
        fig.fill(triangle(0.0, y, w * 0.55, PI / 2.0), color);
    }
    fig
}

fn ray_burst(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("ray-burst", MotionHints::radiate());
    rays(&mut fig, 18, s.l * 0.86, color, s.stroke(2.0, 0.003));
    fig
}

fn great_wedge(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("great-wedge", MotionHints::turned(PI / 4.0));
    fig.fill(triangle(0.0, 0.0, s.r * 1.05, 0.0), color);
    fig
}

fn triangle_outline(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("triangle-outline", MotionHints::turned(PI / 6.0));
    fig.stroke(triangle(0.0, 0.0, s.r * 0.82, 0.0), color, s.stroke(4.0, 0.006));
    fig
}

fn double_arrow(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("double-arrow", MotionHints::breathe());
    let r = s.r * 0.42;
    fig.fill(triangle(-r, 0.0, r, PI / 2.0), color);
    fig.fill(triangle(r, 0.0, r, -PI / 2.0), color);
    fig
}

fn cross_slash(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("cross-slash", MotionHints::breathe());
    let lw = s.stroke(3.0, 0.005);
    let d = s.l * 0.84;
    fig.line((-d, -d * 0.6), (d, d * 0.6), color, lw);
    fig.line((-d, d * 0.6), (d, -d * 0.6), color, lw);
    fig
}

fn chevron_row(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("chevron-row", MotionHints::breathe());
    let lw = s.stroke(2.0, 0.004);
    let dip = s.h * 0.12;
    let arm = s.w * 0.12;
    for i in -2i32..=2 {
        let x = i as f32 * s.w * 0.18;
        fig.line((x - arm, 0.0), (x, dip), color, lw);
        fig.line((x, dip), (x + arm, 0.0), color, lw);
    }
    fig
}

fn triangle_fan(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("triangle-fan", MotionHints::radiate());
    let n = 6;
    let rad = s.r * 0.78;
    for i in 0..n {
        let a = i as f32 / n as f32 * PI * 1.3;
        fig.fill(
            triangle(a.cos() * rad * 0.45, a.sin() * rad * 0.45, rad * 0.5, a + PI / 2.0),
            color,
        );
    }
    fig
}

fn pentagon(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("pentagon", MotionHints::turned(0.15));
    fig.fill(polygon(0.0, 0.0, s.r * 0.8, 5, 0.0), color);
    fig
}

fn peak(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("peak", MotionHints::breathe());
    let lw = s.stroke(4.0, 0.006);
    let (x, y) = (s.w * 0.38, s.h * 0.28);
    fig.line((-x, y), (0.0, -y), color, lw);
    fig.line((0.0, -y), (x, y), color, lw);
    fig
}

fn star_outline(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("star-outline", MotionHints::turned(-PI / 2.0));
    fig.stroke(
        Primitive::Star {
            center: Point::ZERO,
            inner: s.r * 0.38,
            outer: s.r * 0.78,
            points: 5,
        },
        color,
        s.stroke(3.0, 0.005),
    );
    fig
}

fn layered_fan(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("layered-fan", MotionHints::radiate());
    for i in 0..5 {
        let a = PI * 0.2 + i as f32 / 5.0 * PI * 0.6;
        let r = s.r * (0.45 + i as f32 * 0.12);
        fig.fill(
            triangle(a.cos() * r * 0.5, a.sin() * r * 0.5, r * 0.4, a + PI / 2.0),
            color,
        );
    }
    fig
}

fn eight_point_burst(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("eight-point-burst", MotionHints::radiate());
    let n = 8;
    for i in 0..n {
        let a = i as f32 / n as f32 * PI * 2.0;
        fig.fill(triangle(0.0, 0.0, s.r * 0.35, a), color);
    }
    fig
}

fn octagon(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("octagon", MotionHints::turned(PI / 8.0));
    fig.fill(polygon(0.0, 0.0, s.r * 0.72, 8, 0.0), color);
    fig
}

fn divider(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("divider", MotionHints::breathe());
    fig.line((0.0, -s.h * 0.44), (0.0, s.h * 0.44), color, s.stroke(3.0, 0.005));
    fig
}

fn tri_cross(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("tri-cross", MotionHints::breathe());
    let lw = s.stroke(3.0, 0.005);
    let d = s.l * 0.86;
    fig.line((-d, -d * 0.5), (d, d * 0.5), color, lw);
    fig.line((-d * 0.7, d * 0.5), (d * 0.7, -d * 0.5), color, lw);
    fig.line((0.0, -d), (0.0, d), color, lw);
    fig
}

fn pyramid(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("pyramid", MotionHints::breathe());
    let w = s.min * 0.2;
    for row in 0..4 {
        let n = 4 - row;
        let y = (row as f32 - 1.5) * s.min * 0.22;
        for col in 0..n {
            let x = (col as f32 - (n - 1) as f32 / 2.0) * w * 1.1;
            fig.fill(triangle(x, y, w * 0.45, PI / 2.0), color);
        }
    }
    fig
}

fn star(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("star", MotionHints::turned(-PI / 2.0));
    fig.fill(
        Primitive::Star {
            center: Point::ZERO,
            inner: s.r * 0.42,
            outer: s.r * 0.82,
            points: 5,
        },
        color,
    );
    fig
}

fn compass(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("compass", MotionHints::radiate());
    for a in [0.0, PI / 2.0, PI, -PI / 2.0] {
        fig.fill(triangle(0.0, 0.0, s.r * 0.38, a), color);
    }
    fig
}

fn hexagon(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("hexagon", MotionHints::turned(PI / 6.0));
    fig.fill(polygon(0.0, 0.0, s.r * 0.75, 6, 0.0), color);
    fig
}

fn rings(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("rings", MotionHints::breathe());
    let lw = s.stroke(3.0, 0.005);
    for radius in [s.r * 0.35, s.r * 0.65] {
        fig.stroke(
            Primitive::Circle {
                center: Point::ZERO,
                radius,
            },
            color,
            lw,
        );
    }
    fig
}

fn diamond_grid(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("diamond-grid", MotionHints::breathe());
    let lw = s.stroke(2.0, 0.003);
    for i in -1..=1 {
        for j in -1..=1 {
            fig.stroke(
                polygon(
                    i as f32 * s.w * 0.2,
                    j as f32 * s.h * 0.2,
                    s.min * 0.08,
                    4,
                    PI / 4.0,
                ),
                color,
                lw,
            );
        }
    }
    fig
}

fn half_arc(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("half-arc", MotionHints::breathe());
    fig.stroke(
        Primitive::ArcSegment {
            center: Point::ZERO,
            inner: s.r * 0.3,
            outer: s.r * 0.85,
            start: 0.0,
            end: PI,
            rotation: 0.0,
        },
        color,
        s.stroke(4.0, 0.006),
    );
    fig
}

fn parallels(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("parallels", MotionHints::breathe());
    let lw = s.stroke(2.0, 0.003);
    for i in [-1.0, 0.0, 1.0] {
        let y = i * s.h * 0.15;
        fig.line((-s.w * 0.4, y), (s.w * 0.4, y), color, lw);
    }
    fig
}

fn cross_star(s: &Measures, color: Color) -> Figure {
    let mut fig = Figure::new("cross-star", MotionHints::radiate());
    let lw = s.stroke(3.0, 0.005);
    let d = s.r * 0.8;
    let k = d * 0.5;
    fig.line((-d, 0.0), (d, 0.0), color, lw);
    fig.line((0.0, -d), (0.0, d), color, lw);
    fig.line((-k, -k), (k, k), color, lw);
    fig.line((-k, k), (k, -k), color, lw);
    fig
}
