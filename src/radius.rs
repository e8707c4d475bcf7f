use crate::dom::{DomBackend, ElementHandle};

/// Per-corner radius pair in pixels (horizontal and vertical axis).
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct CornerRadius {
    pub h: f64,
    pub v: f64,
}

impl CornerRadius {
    pub const ZERO: Self = Self { h: 0.0, v: 0.0 };

    pub fn is_zero(self) -> bool {
        self.h == 0.0 && self.v == 0.0
    }
}

/// Measurements needed to resolve relative border-radius units.
#[derive(Clone, Copy, Debug)]
pub struct RadiusMetrics {
    pub offset_width: f64,
    pub offset_height: f64,
    pub font_size_px: f64,
    pub root_font_size_px: f64,
}

/// Converts a computed `border-radius` value into pixels.
///
/// Percentages scale by the element's own offset width/height, `rem` by the
/// root font size, `em` by the element's font size, `px` parses directly.
/// Unrecognized units resolve to no radius. Only the leading numeric value is
/// considered, matching how the source widget read multi-value shorthands.
pub fn border_radius_px(raw: &str, metrics: &RadiusMetrics) -> CornerRadius {
    let Some(value) = leading_float(raw) else {
        return CornerRadius::ZERO;
    };

    if raw.contains('%') {
        let fraction = value / 100.0;
        CornerRadius {
            h: metrics.offset_width * fraction,
            v: metrics.offset_height * fraction,
        }
    } else if raw.contains("rem") {
        uniform(value * metrics.root_font_size_px)
    } else if raw.contains("em") {
        uniform(value * metrics.font_size_px)
    } else if raw.contains("px") {
        uniform(value)
    } else {
        CornerRadius::ZERO
    }
}

/// Reads the computed border-radius of `el` and resolves it to pixels.
pub fn resolve_border_radius<D: DomBackend + ?Sized>(dom: &D, el: ElementHandle) -> CornerRadius {
    let style = dom.computed_style(el);
    let size = dom.offset_size(el);
    let metrics = RadiusMetrics {
        offset_width: size.width,
        offset_height: size.height,
        font_size_px: style.font_size_px,
        root_font_size_px: dom.root_font_size_px(),
    };
    border_radius_px(&style.border_radius, &metrics)
}

fn uniform(px: f64) -> CornerRadius {
    CornerRadius { h: px, v: px }
}

/// Longest valid leading float, after whitespace. `None` when the value does
/// not start with a number.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let bytes = s.as_bytes();
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start {
        return None;
    }
    s[..end].parse().ok()
}
