//! Font metrics needed to place and style text runs.

use lopdf::{Dictionary, Document as LopdfDocument, Object};

/// Glyph width used when a font carries no metrics (half an em).
pub const DEFAULT_GLYPH_WIDTH: f64 = 500.0;

/// ForceBold flag in a font descriptor's `Flags` entry (bit 19).
const FORCE_BOLD_FLAG: i64 = 1 << 18;

/// The parts of a font resource that matter for reflow.
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    /// `BaseFont` name (e.g., "ABCDEF+Arial-BoldMT")
    pub name: String,
    /// Weight from the font descriptor, if any
    pub weight: Option<f64>,
    /// First character code covered by `widths`
    pub first_char: u32,
    /// Glyph widths in 1/1000 em, starting at `first_char`
    pub widths: Vec<f64>,
    /// Width for codes outside `widths`
    pub missing_width: f64,
    /// Composite (Type0) font using two-byte codes
    pub composite: bool,
}

impl FontInfo {
    /// Fallback for a font name with no resource entry.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: None,
            first_char: 0,
            widths: Vec::new(),
            missing_width: DEFAULT_GLYPH_WIDTH,
            composite: false,
        }
    }

    /// Read a font dictionary.
    pub fn from_dict(doc: &LopdfDocument, dict: &Dictionary) -> Self {
        let name = dict
            .get(b"BaseFont")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let composite = dict
            .get(b"Subtype")
            .ok()
            .and_then(|o| o.as_name().ok())
            .map(|n| n == b"Type0")
            .unwrap_or(false);

        let first_char = dict
            .get(b"FirstChar")
            .ok()
            .and_then(get_number)
            .map(|n| n.max(0.0) as u32)
            .unwrap_or(0);

        let widths: Vec<f64> = dict
            .get(b"Widths")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_array().ok())
            .map(|arr| {
                arr.iter()
                    .map(|w| get_number(resolve(doc, w)).unwrap_or(0.0))
                    .collect()
            })
            .unwrap_or_default();

        let descriptor = dict
            .get(b"FontDescriptor")
            .ok()
            .map(|o| resolve(doc, o))
            .and_then(|o| o.as_dict().ok());

        let mut weight = descriptor
            .and_then(|d| d.get(b"FontWeight").ok())
            .and_then(get_number);
        let force_bold = descriptor
            .and_then(|d| d.get(b"Flags").ok())
            .and_then(|o| o.as_i64().ok())
            .map(|flags| flags & FORCE_BOLD_FLAG != 0)
            .unwrap_or(false);
        if force_bold && weight.map(|w| w < 700.0).unwrap_or(true) {
            weight = Some(700.0);
        }

        // Fonts without a Widths array are usually the standard 14; their
        // metrics are built in, so fall back to an average width.
        let missing_width = descriptor
            .and_then(|d| d.get(b"MissingWidth").ok())
            .and_then(get_number)
            .filter(|_| !widths.is_empty())
            .unwrap_or(DEFAULT_GLYPH_WIDTH);

        Self {
            name,
            weight,
            first_char,
            widths,
            missing_width,
            composite,
        }
    }

    /// Width of a character code in 1/1000 em.
    pub fn glyph_width(&self, code: u32) -> f64 {
        code.checked_sub(self.first_char)
            .and_then(|idx| self.widths.get(idx as usize))
            .copied()
            .unwrap_or(self.missing_width)
    }

    /// Split a shown string into character codes.
    pub fn codes(&self, bytes: &[u8]) -> Vec<u32> {
        if self.composite {
            bytes
                .chunks(2)
                .map(|c| {
                    if c.len() == 2 {
                        u16::from_be_bytes([c[0], c[1]]) as u32
                    } else {
                        c[0] as u32
                    }
                })
                .collect()
        } else {
            bytes.iter().map(|&b| b as u32).collect()
        }
    }
}

/// Follow an indirect reference, returning the object itself otherwise.
pub(crate) fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Helper to extract number from PDF object.
pub(crate) fn get_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_font_info_from_dict() {
        let mut doc = LopdfDocument::with_version("1.5");
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "FontWeight" => 400,
            "Flags" => 32,
            "MissingWidth" => 250,
        });
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => "ABCDEF+Arial-BoldMT",
            "FirstChar" => 65,
            "Widths" => vec![Object::Integer(667), Object::Integer(600)],
            "FontDescriptor" => descriptor_id,
        };

        let info = FontInfo::from_dict(&doc, &font);
        assert_eq!(info.name, "ABCDEF+Arial-BoldMT");
        assert_eq!(info.weight, Some(400.0));
        assert!(!info.composite);
        assert_eq!(info.glyph_width(65), 667.0);
        assert_eq!(info.glyph_width(66), 600.0);
        assert_eq!(info.glyph_width(67), 250.0);
        assert_eq!(info.glyph_width(10), 250.0);
    }

    #[test]
    fn test_force_bold_flag() {
        let mut doc = LopdfDocument::with_version("1.5");
        let descriptor_id = doc.add_object(dictionary! {
            "Type" => "FontDescriptor",
            "Flags" => FORCE_BOLD_FLAG,
        });
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "CustomSans",
            "FontDescriptor" => descriptor_id,
        };

        let info = FontInfo::from_dict(&doc, &font);
        assert_eq!(info.weight, Some(700.0));
        assert_eq!(info.glyph_width(65), DEFAULT_GLYPH_WIDTH);
    }

    #[test]
    fn test_composite_codes() {
        let doc = LopdfDocument::with_version("1.5");
        let font = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type0",
            "BaseFont" => "NotoSansCJK",
        };
        let info = FontInfo::from_dict(&doc, &font);
        assert!(info.composite);
        assert_eq!(info.codes(&[0x00, 0x41, 0x4E, 0x2D]), vec![0x41, 0x4E2D]);
    }

    #[test]
    fn test_unknown_font() {
        let info = FontInfo::unknown("F1");
        assert_eq!(info.name, "F1");
        assert_eq!(info.codes(b"ab"), vec![97, 98]);
        assert_eq!(info.glyph_width(97), DEFAULT_GLYPH_WIDTH);
    }
}
