//! Drop theming defaults
//!
//! Theming proper is out of scope for the engine; what remains is the thin
//! contract the positioning layer consumes: the decoration defaults an
//! un-`plain` drop container is dressed with at mount, plus the theme's
//! height constraint. Decoration values are plain CSS tokens so hosts can
//! pass them through unchanged; `max_height` is resolved to pixels through
//! [`parse_metric`] and caps the computed placement height.

use crate::metric::{parse_metric, Metric};

/// Default presentation values for drop containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTheme {
  /// Elevation (shadow size) name.
  pub elevation: String,
  /// Container background.
  pub background: String,
  /// Default cap on drop height, as a CSS length token. Non-length tokens
  /// (`"none"`, percentages) leave the height unconstrained.
  pub max_height: String,
}

impl Default for DropTheme {
  fn default() -> Self {
    Self {
      elevation: "small".to_owned(),
      background: "#ffffff".to_owned(),
      max_height: "none".to_owned(),
    }
  }
}

/// Presentation resolved for one mounted drop: option overrides applied on
/// top of the theme, or no decoration at all for `plain` drops.
#[derive(Debug, Clone, PartialEq)]
pub struct DropPresentation {
  pub elevation: Option<String>,
  pub background: Option<String>,
  /// CSS overflow applied to the container.
  pub overflow: String,
  /// Pixel cap on the container's height, when the theme token resolved
  /// to a length. A height constraint, not decoration, so `plain` drops
  /// carry it too.
  pub max_height: Option<f32>,
}

impl DropPresentation {
  /// Resolves presentation from the theme and per-drop overrides.
  pub fn resolve(
    theme: &DropTheme,
    plain: bool,
    elevation: Option<&str>,
    background: Option<&str>,
    overflow: Option<&str>,
  ) -> Self {
    let overflow = overflow.unwrap_or("auto").to_owned();
    let max_height = match parse_metric(&theme.max_height) {
      Metric::Px(px) => Some(px),
      Metric::Raw(_) => None,
    };
    if plain {
      return Self {
        elevation: None,
        background: None,
        overflow,
        max_height,
      };
    }
    Self {
      elevation: Some(elevation.unwrap_or(&theme.elevation).to_owned()),
      background: Some(background.unwrap_or(&theme.background).to_owned()),
      overflow,
      max_height,
    }
  }
}
