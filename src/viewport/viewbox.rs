//! `viewBox` and `preserveAspectRatio` parsing

use pest::Parser;

use crate::units::parse::{Rule, ValueParser};

/// A parsed `viewBox`. Width and height are always positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBoxInfo {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBoxInfo {
    /// Build a viewBox, refusing non-positive or non-finite sizes.
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Option<Self> {
        let vb = ViewBoxInfo {
            min_x,
            min_y,
            width,
            height,
        };
        vb.is_valid().then_some(vb)
    }

    /// Whether this viewBox can drive a mapping.
    ///
    /// Values built with a struct literal may be invalid; the resolver
    /// treats those exactly like a missing viewBox.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Parse a `viewBox` attribute.
///
/// Exactly four numbers separated by whitespace and/or commas. Anything
/// else, including a zero or negative size, is `None`.
pub fn parse_viewbox(value: &str) -> Option<ViewBoxInfo> {
    let pairs = ValueParser::parse(Rule::view_box, value).ok()?;
    let numbers: Vec<f64> = pairs
        .flatten()
        .filter(|p| p.as_rule() == Rule::number)
        .map(|p| p.as_str().parse::<f64>())
        .collect::<Result<_, _>>()
        .ok()?;

    let [min_x, min_y, width, height] = numbers.as_slice() else {
        return None;
    };
    let vb = ViewBoxInfo::new(*min_x, *min_y, *width, *height);
    if vb.is_none() {
        crate::log::debug!(value, "viewBox with non-positive size ignored");
    }
    vb
}

/// Alignment part of `preserveAspectRatio`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AspectAlign {
    /// Stretch each axis independently
    None,
    XMinYMin,
    XMidYMin,
    XMaxYMin,
    XMinYMid,
    #[default]
    XMidYMid,
    XMaxYMid,
    XMinYMax,
    XMidYMax,
    XMaxYMax,
}

impl AspectAlign {
    const NAMED: [(&'static str, AspectAlign); 10] = [
        ("none", AspectAlign::None),
        ("xminymin", AspectAlign::XMinYMin),
        ("xmidymin", AspectAlign::XMidYMin),
        ("xmaxymin", AspectAlign::XMaxYMin),
        ("xminymid", AspectAlign::XMinYMid),
        ("xmidymid", AspectAlign::XMidYMid),
        ("xmaxymid", AspectAlign::XMaxYMid),
        ("xminymax", AspectAlign::XMinYMax),
        ("xmidymax", AspectAlign::XMidYMax),
        ("xmaxymax", AspectAlign::XMaxYMax),
    ];

    fn from_token(token: &str) -> Option<Self> {
        Self::NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(token))
            .map(|(_, align)| *align)
    }

    /// Share of the leftover space placed before the content, per axis.
    ///
    /// `None` has no alignment and returns `None`.
    pub fn factors(self) -> Option<(f64, f64)> {
        Some(match self {
            AspectAlign::None => return None,
            AspectAlign::XMinYMin => (0.0, 0.0),
            AspectAlign::XMidYMin => (0.5, 0.0),
            AspectAlign::XMaxYMin => (1.0, 0.0),
            AspectAlign::XMinYMid => (0.0, 0.5),
            AspectAlign::XMidYMid => (0.5, 0.5),
            AspectAlign::XMaxYMid => (1.0, 0.5),
            AspectAlign::XMinYMax => (0.0, 1.0),
            AspectAlign::XMidYMax => (0.5, 1.0),
            AspectAlign::XMaxYMax => (1.0, 1.0),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MeetOrSlice {
    /// Fit entirely inside the viewport
    #[default]
    Meet,
    /// Fill the viewport, cropping overflow
    Slice,
}

/// Parse a `preserveAspectRatio` attribute.
///
/// Tokens are case-insensitive and unknown ones are skipped, so a partial
/// value keeps the defaults (`xMidYMid meet`) for whatever it leaves out.
pub fn parse_preserve_aspect_ratio(value: Option<&str>) -> (AspectAlign, MeetOrSlice) {
    let mut align = AspectAlign::default();
    let mut meet_or_slice = MeetOrSlice::default();

    for token in value.unwrap_or("").split_whitespace() {
        if token.eq_ignore_ascii_case("meet") {
            meet_or_slice = MeetOrSlice::Meet;
        } else if token.eq_ignore_ascii_case("slice") {
            meet_or_slice = MeetOrSlice::Slice;
        } else if let Some(a) = AspectAlign::from_token(token) {
            align = a;
        } else {
            crate::log::debug!(token, "ignoring preserveAspectRatio token");
        }
    }

    (align, meet_or_slice)
}
