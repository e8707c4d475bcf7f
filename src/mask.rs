use std::fmt::Write as _;

use kurbo::Rect;

use crate::radius::CornerRadius;

/// Builds the cut-out mask path: an outer clockwise rectangle covering the
/// whole overlay, then an inner counter-clockwise rounded rectangle around
/// the target. The opposite winding makes the inner subpath a hole under the
/// default nonzero fill rule (and under even-odd alike).
///
/// Corners are quarter-ellipse `A` commands (sweep 0). A corner whose radius
/// is zero on both axes collapses to a point, so a 0-radius target produces
/// an inner subpath of straight edges only.
///
/// Both rectangles must be in the same coordinate space; the caller is
/// responsible for applying scroll offsets before building the path.
pub fn mask_path(overlay: Rect, target: Rect, radius: CornerRadius) -> String {
    let mut d = String::with_capacity(256);

    // Outer rectangle, clockwise from the top-left corner.
    move_to(&mut d, overlay.x0, overlay.y0);
    line_to(&mut d, overlay.x1, overlay.y0);
    line_to(&mut d, overlay.x1, overlay.y1);
    line_to(&mut d, overlay.x0, overlay.y1);
    close(&mut d);

    // Inner rounded rectangle, counter-clockwise: down the left edge, across
    // the bottom, up the right edge, back along the top.
    let (x, y) = (target.x0, target.y0);
    let (w, h) = (target.width(), target.height());
    let CornerRadius { h: rh, v: rv } = radius;

    move_to(&mut d, x + rh, y);
    arc_to(&mut d, radius, x, y + rv);
    line_to(&mut d, x, y + h - rv);
    arc_to(&mut d, radius, x + rh, y + h);
    line_to(&mut d, x + w - rh, y + h);
    arc_to(&mut d, radius, x + w, y + h - rv);
    line_to(&mut d, x + w, y + rv);
    arc_to(&mut d, radius, x + w - rh, y);
    close(&mut d);

    d
}

fn move_to(d: &mut String, x: f64, y: f64) {
    let _ = write!(d, "M {} {} ", num(x), num(y));
}

fn line_to(d: &mut String, x: f64, y: f64) {
    let _ = write!(d, "L {} {} ", num(x), num(y));
}

fn arc_to(d: &mut String, radius: CornerRadius, x: f64, y: f64) {
    if radius.is_zero() {
        // Degenerate corner: start and end coincide, nothing to draw.
        return;
    }
    let _ = write!(
        d,
        "A {} {} 0 0 0 {} {} ",
        num(radius.h),
        num(radius.v),
        num(x),
        num(y)
    );
}

fn close(d: &mut String) {
    d.push_str("Z ");
}

/// Integral values print without a trailing `.0` to keep paths compact.
fn num(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
