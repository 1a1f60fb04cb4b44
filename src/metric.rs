//! CSS metric parsing
//!
//! Theme values arrive as CSS length tokens (`"24px"`, `"0.5in"`, bare
//! numbers). The engine only needs pixel values; anything it cannot resolve
//! to pixels is handed back unchanged so the caller can treat it as a
//! keyword (`"100%"`, `"none"`, …).
//!
//! Absolute units convert at the CSS reference ratios: 1in = 96px,
//! 1pt = 1/72in, 1pc = 12pt, 1q = 1/4mm.

/// Result of [`parse_metric`]: a resolved pixel value or the unparsed
/// input.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
  /// A resolved pixel value.
  Px(f32),
  /// The input, returned unchanged because it is not an absolute length.
  Raw(String),
}

impl Metric {
  /// The pixel value, if this metric resolved.
  pub fn px(&self) -> Option<f32> {
    match self {
      Self::Px(value) => Some(*value),
      Self::Raw(_) => None,
    }
  }
}

/// Converts a CSS length token to pixels.
///
/// Bare numbers are treated as pixels, matching how layout code consumes
/// unitless theme values. Relative units (`em`, `%`, `vw`, …) and keywords
/// cannot be resolved without context and come back as [`Metric::Raw`].
///
/// # Examples
///
/// ```
/// use dropkit::{parse_metric, Metric};
///
/// assert_eq!(parse_metric("24px"), Metric::Px(24.0));
/// assert_eq!(parse_metric("12"), Metric::Px(12.0));
/// assert_eq!(parse_metric("1in"), Metric::Px(96.0));
/// assert_eq!(parse_metric("100%"), Metric::Raw("100%".to_string()));
/// ```
pub fn parse_metric(value: &str) -> Metric {
  let trimmed = value.trim();

  let (number, unit) = match trimmed.find(|ch: char| ch.is_ascii_alphabetic() || ch == '%') {
    Some(split) => trimmed.split_at(split),
    None => (trimmed, ""),
  };

  let Ok(number) = number.trim().parse::<f32>() else {
    return Metric::Raw(value.to_owned());
  };

  let px = match unit.to_ascii_lowercase().as_str() {
    "" | "px" => number,
    "pt" => number * 96.0 / 72.0,
    "pc" => number * 16.0,
    "in" => number * 96.0,
    "cm" => number * 96.0 / 2.54,
    "mm" => number * 96.0 / 25.4,
    "q" => number * 96.0 / 101.6,
    _ => return Metric::Raw(value.to_owned()),
  };
  Metric::Px(px)
}
