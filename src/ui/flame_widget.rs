use eframe::egui;
use eframe::egui::epaint::{EllipseShape, PathShape, PathStroke};
use eframe::egui::{Color32, Pos2, Rect, Shape, Stroke, vec2};

// The candle is modeled in a 140x220 design space and scaled to the
// widget rect. The flame occupies y 30..110, the wax body y 120..200.
const DESIGN_W: f32 = 140.0;
const DESIGN_H: f32 = 220.0;

const OUTER_FLAME: Color32 = Color32::from_rgb(245, 158, 11);
const OUTER_FLAME_EDGE: Color32 = Color32::from_rgb(220, 38, 38);
const INNER_FLAME: Color32 = Color32::from_rgb(254, 243, 199);
const GLOW: Color32 = Color32::from_rgb(255, 200, 87);
const WICK: Color32 = Color32::from_rgb(31, 41, 55);
const WAX: Color32 = Color32::from_rgb(229, 231, 235);
const WAX_RIM: Color32 = Color32::from_rgb(209, 213, 219);

/// Lays out and paints a candle of the given height, flame swaying by
/// `offset` (the animator sample) and glow pulsing on wall-clock `t`.
pub fn candle(ui: &mut egui::Ui, height: f32, offset: f64, t: f64) -> egui::Response {
    let size = vec2(height * (DESIGN_W / DESIGN_H), height);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        paint_candle(ui.painter(), rect, offset as f32, t);
    }
    response
}

/// Paints the candle into `rect`. Pure rendering: consumes the current
/// sway sample and emits nothing back.
pub fn paint_candle(painter: &egui::Painter, rect: Rect, offset: f32, t: f64) {
    let sx = rect.width() / DESIGN_W;
    let sy = rect.height() / DESIGN_H;
    let map = |x: f32, y: f32| Pos2::new(rect.min.x + x * sx, rect.min.y + y * sy);
    let o = offset;

    // Pulsing halo behind the flame, one slow breath every two seconds.
    let pulse = 0.9 + 0.1 * (t * std::f64::consts::PI).sin() as f32;
    for (radius, alpha) in [(52.0, 28.0), (38.0, 40.0), (24.0, 55.0)] {
        painter.add(Shape::Ellipse(EllipseShape {
            center: map(70.0, 62.0),
            radius: vec2(radius * sx * pulse, radius * sy * pulse),
            fill: Color32::from_rgba_unmultiplied(
                GLOW.r(),
                GLOW.g(),
                GLOW.b(),
                (alpha * pulse) as u8,
            ),
            stroke: Stroke::NONE,
        }));
    }

    // Outer flame. Control points carry the sway with falloff factors so
    // the tip moves further than the base.
    let mut outer = FlamePath::start(map(70.0, 30.0));
    outer.quad_to(map(55.0 + o * 0.5, 40.0), map(50.0 + o, 60.0));
    outer.quad_to(map(45.0 + o * 0.8, 80.0), map(50.0, 100.0));
    outer.quad_to(map(55.0, 110.0), map(70.0, 110.0));
    outer.quad_to(map(85.0, 110.0), map(90.0, 100.0));
    outer.quad_to(map(95.0 - o * 0.8, 80.0), map(90.0 - o, 60.0));
    outer.quad_to(map(85.0 - o * 0.5, 40.0), map(70.0, 30.0));
    painter.add(Shape::Path(PathShape::convex_polygon(
        outer.points,
        OUTER_FLAME,
        Stroke::new(1.0 * sx, OUTER_FLAME_EDGE),
    )));

    // Inner flame, a narrower teardrop with gentler sway.
    let mut inner = FlamePath::start(map(70.0, 40.0));
    inner.quad_to(map(60.0 + o * 0.7, 50.0), map(58.0 + o * 0.9, 70.0));
    inner.quad_to(map(56.0 + o * 0.6, 85.0), map(60.0, 95.0));
    inner.quad_to(map(65.0, 100.0), map(70.0, 100.0));
    inner.quad_to(map(75.0, 100.0), map(80.0, 95.0));
    inner.quad_to(map(84.0 - o * 0.6, 85.0), map(82.0 - o * 0.9, 70.0));
    inner.quad_to(map(80.0 - o * 0.7, 50.0), map(70.0, 40.0));
    painter.add(Shape::Path(PathShape::convex_polygon(
        inner.points,
        INNER_FLAME,
        Stroke::NONE,
    )));

    // Bright core, drifting and swelling slightly with the sway.
    painter.add(Shape::Ellipse(EllipseShape {
        center: map(70.0, 75.0 + o * 0.3),
        radius: vec2((8.0 + o.abs() * 0.2) * sx, (18.0 + o.abs() * 0.3) * sy),
        fill: Color32::from_rgba_unmultiplied(255, 255, 255, 180),
        stroke: Stroke::NONE,
    }));

    // Wick.
    painter.line_segment(
        [map(70.0, 110.0), map(70.0, 120.0)],
        Stroke::new(2.0 * sx, WICK),
    );

    // Wax body and rim.
    painter.rect_filled(
        Rect::from_min_max(map(55.0, 120.0), map(85.0, 200.0)),
        egui::CornerRadius::same(3),
        WAX,
    );
    painter.add(Shape::Ellipse(EllipseShape {
        center: map(70.0, 120.0),
        radius: vec2(15.0 * sx, 4.0 * sy),
        fill: WAX_RIM,
        stroke: Stroke::NONE,
    }));

    // A single wax drip down the left side.
    let mut drip = FlamePath::start(map(58.0, 130.0));
    drip.quad_to(map(57.0, 135.0), map(58.0, 140.0));
    drip.points.push(map(56.0, 145.0));
    painter.add(Shape::line(
        drip.points,
        PathStroke::new(1.5 * sx, WAX_RIM),
    ));
}

/// Flattens chained quadratic segments into a polyline.
struct FlamePath {
    points: Vec<Pos2>,
    cursor: Pos2,
}

impl FlamePath {
    const STEPS: usize = 10;

    fn start(at: Pos2) -> Self {
        FlamePath {
            points: vec![at],
            cursor: at,
        }
    }

    fn quad_to(&mut self, ctrl: Pos2, to: Pos2) {
        let from = self.cursor;
        for i in 1..=Self::STEPS {
            let t = i as f32 / Self::STEPS as f32;
            let u = 1.0 - t;
            self.points.push(Pos2::new(
                u * u * from.x + 2.0 * u * t * ctrl.x + t * t * to.x,
                u * u * from.y + 2.0 * u * t * ctrl.y + t * t * to.y,
            ));
        }
        self.cursor = to;
    }
}
