//! Positioned text fragments.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Font weight at or above which a fragment counts as bold.
pub const BOLD_WEIGHT: f64 = 700.0;

/// Number of entries in a PDF affine matrix `[a b c d e f]`.
pub const TRANSFORM_LEN: usize = 6;

/// One run of text emitted by a page's content stream.
///
/// Field names serialize the way pdf.js names them in
/// `getTextContent()` items, so a dump of that call deserializes directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The literal text of the run
    #[serde(rename = "str")]
    pub text: String,

    /// Font name (e.g., "ABCDEF+Arial-BoldMT")
    #[serde(
        rename = "fontName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub font_name: Option<String>,

    /// Numeric font weight (400 = regular, 700 = bold)
    #[serde(
        rename = "fontWeight",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub font_weight: Option<f64>,

    /// Affine matrix; element 4 is the x translation, element 5 the baseline y
    #[serde(default)]
    pub transform: Vec<f64>,

    /// Horizontal advance of the run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl TextFragment {
    /// Create a fragment at `(x, y)` with an identity scale.
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            font_name: None,
            font_weight: None,
            transform: vec![1.0, 0.0, 0.0, 1.0, x, y],
            width: None,
        }
    }

    /// Create a fragment from a full transform matrix.
    pub fn with_transform(text: impl Into<String>, transform: Vec<f64>) -> Self {
        Self {
            text: text.into(),
            font_name: None,
            font_weight: None,
            transform,
            width: None,
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font_name = Some(name.into());
        self
    }

    /// Set the font weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.font_weight = Some(weight);
        self
    }

    /// Set the advance width.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Position of the run as `(x, baseline y)`.
    ///
    /// Fails when the transform is too short or its translation is not a
    /// finite number. The returned error carries page 0; callers that know
    /// the page use [`Error::on_page`].
    pub fn position(&self, index: usize) -> Result<(f64, f64)> {
        if self.transform.len() < TRANSFORM_LEN {
            return Err(Error::InvalidFragment {
                page: 0,
                index,
                reason: format!(
                    "transform has {} entries, expected {}",
                    self.transform.len(),
                    TRANSFORM_LEN
                ),
            });
        }

        let x = self.transform[4];
        let y = self.transform[5];
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidFragment {
                page: 0,
                index,
                reason: format!("non-finite position ({}, {})", x, y),
            });
        }

        Ok((x, y))
    }

    /// X translation, if the transform has one.
    pub fn x(&self) -> Option<f64> {
        self.transform.get(4).copied()
    }

    /// Baseline y, if the transform has one.
    pub fn y(&self) -> Option<f64> {
        self.transform.get(5).copied()
    }

    /// Width, treating a missing width as zero.
    pub fn advance(&self) -> f64 {
        self.width.unwrap_or(0.0)
    }

    /// Right edge of the run, `x + width`, if the transform has an x.
    pub fn right_edge(&self) -> Option<f64> {
        self.x().map(|x| x + self.advance())
    }

    /// Whether the run should render bold.
    ///
    /// Either signal is enough: a font name containing "bold" in any case,
    /// or a weight of at least 700.
    pub fn is_bold(&self) -> bool {
        let bold_name = self
            .font_name
            .as_deref()
            .map(|name| name.to_lowercase().contains("bold"))
            .unwrap_or(false);
        let bold_weight = self.font_weight.map(|w| w >= BOLD_WEIGHT).unwrap_or(false);
        bold_name || bold_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_detection_by_name() {
        let frag = TextFragment::new("Hi", 0.0, 0.0).with_font("Arial-Bold");
        assert!(frag.is_bold());

        let frag = TextFragment::new("Hi", 0.0, 0.0).with_font("ABCDEF+HELVETICA-BOLDOBLIQUE");
        assert!(frag.is_bold());

        let frag = TextFragment::new("Hi", 0.0, 0.0).with_font("Helvetica");
        assert!(!frag.is_bold());
    }

    #[test]
    fn test_bold_detection_by_weight() {
        let frag = TextFragment::new("Hi", 0.0, 0.0).with_weight(700.0);
        assert!(frag.is_bold());

        let frag = TextFragment::new("Hi", 0.0, 0.0).with_weight(699.0);
        assert!(!frag.is_bold());

        let frag = TextFragment::new("Hi", 0.0, 0.0)
            .with_font("Times-Roman")
            .with_weight(900.0);
        assert!(frag.is_bold());
    }

    #[test]
    fn test_position() {
        let frag = TextFragment::with_transform("a", vec![12.0, 0.0, 0.0, 12.0, 72.0, 700.0]);
        assert_eq!(frag.position(0).unwrap(), (72.0, 700.0));
        assert_eq!(frag.x(), Some(72.0));
        assert_eq!(frag.y(), Some(700.0));
        assert_eq!(frag.right_edge(), Some(72.0));
        assert_eq!(frag.clone().with_width(40.5).right_edge(), Some(112.5));
    }

    #[test]
    fn test_position_short_transform() {
        let frag = TextFragment::with_transform("a", vec![1.0, 0.0, 0.0, 1.0]);
        let err = frag.position(3).unwrap_err();
        assert!(matches!(err, Error::InvalidFragment { index: 3, .. }));
        assert_eq!(frag.y(), None);
    }

    #[test]
    fn test_position_non_finite() {
        let frag = TextFragment::with_transform("a", vec![1.0, 0.0, 0.0, 1.0, f64::NAN, 1.0]);
        assert!(frag.position(0).is_err());
    }

    #[test]
    fn test_deserialize_pdfjs_item() {
        let json = r#"{
            "str": "Hello",
            "dir": "ltr",
            "width": 30.5,
            "height": 12,
            "transform": [12, 0, 0, 12, 72, 700],
            "fontName": "g_d0_f1",
            "hasEOL": false
        }"#;
        let frag: TextFragment = serde_json::from_str(json).unwrap();
        assert_eq!(frag.text, "Hello");
        assert_eq!(frag.width, Some(30.5));
        assert_eq!(frag.font_name.as_deref(), Some("g_d0_f1"));
        assert_eq!(frag.font_weight, None);
        assert_eq!(frag.position(0).unwrap(), (72.0, 700.0));
    }

    #[test]
    fn test_advance_defaults_to_zero() {
        let frag = TextFragment::new("a", 10.0, 0.0);
        assert_eq!(frag.advance(), 0.0);
        assert_eq!(frag.with_width(4.5).advance(), 4.5);
    }
}
