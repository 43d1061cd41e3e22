//! Content stream interpreter producing positioned text fragments.
//!
//! Walks a page's operators the way a text layer would: tracks the graphics
//! state (`q`/`Q`/`cm`), the text state (`Tf`, `Tc`, `Tw`, `Tz`, `TL`, `Ts`)
//! and the text matrices, and emits one [`TextFragment`] per text-showing
//! operator in stream order.

use std::collections::{BTreeMap, HashMap};

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::error::{Error, Result};
use crate::model::TextFragment;

use super::fonts::{get_number, FontInfo};

/// Affine matrix `[a b c d e f]`.
pub type Matrix = [f64; 6];

/// The identity matrix.
pub const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Negative `TJ` adjustment (1/1000 em) treated as a word space.
const TJ_SPACE_THRESHOLD: f64 = 200.0;

/// Multiply two matrices: `m1 × m2`.
pub fn multiply(m1: &Matrix, m2: &Matrix) -> Matrix {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

fn translation(tx: f64, ty: f64) -> Matrix {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

/// Horizontal scale factor of a matrix.
fn x_scale(m: &Matrix) -> f64 {
    (m[0] * m[0] + m[1] * m[1]).sqrt()
}

#[derive(Debug, Clone)]
struct TextState {
    font: Vec<u8>,
    size: f64,
    char_spacing: f64,
    word_spacing: f64,
    h_scale: f64,
    leading: f64,
    rise: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: Vec::new(),
            size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            h_scale: 1.0,
            leading: 0.0,
            rise: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
struct GraphicsState {
    ctm: Matrix,
    text: TextState,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            text: TextState::default(),
        }
    }
}

/// A piece of a text-showing operand: a string or a `TJ` adjustment.
enum ShowItem<'o> {
    Text(&'o [u8]),
    Adjust(f64),
}

/// Interprets one page's content stream.
pub struct ContentInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: HashMap<Vec<u8>, FontInfo>,
    font_dicts: BTreeMap<Vec<u8>, &'a Dictionary>,
}

impl<'a> ContentInterpreter<'a> {
    /// Create an interpreter for a page's font resources.
    pub fn new(doc: &'a LopdfDocument, font_dicts: BTreeMap<Vec<u8>, &'a Dictionary>) -> Self {
        let fonts = font_dicts
            .iter()
            .map(|(name, dict)| (name.clone(), FontInfo::from_dict(doc, dict)))
            .collect();
        Self {
            doc,
            fonts,
            font_dicts,
        }
    }

    /// Decode the stream and return its fragments in stream order.
    pub fn run(&self, content: &[u8]) -> Result<Vec<TextFragment>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut fragments = Vec::new();
        let mut gs = GraphicsState::default();
        let mut stack: Vec<GraphicsState> = Vec::new();
        let mut tm = IDENTITY;
        let mut tlm = IDENTITY;
        let mut in_text_block = false;

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => stack.push(gs.clone()),
                "Q" => {
                    if let Some(saved) = stack.pop() {
                        gs = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_operand(operands) {
                        gs.ctm = multiply(&m, &gs.ctm);
                    }
                }
                "BT" => {
                    in_text_block = true;
                    tm = IDENTITY;
                    tlm = IDENTITY;
                }
                "ET" => in_text_block = false,
                "Tf" => {
                    if operands.len() >= 2 {
                        if let Object::Name(name) = &operands[0] {
                            gs.text.font = name.clone();
                        }
                        gs.text.size = get_number(&operands[1]).unwrap_or(12.0);
                    }
                }
                "Tc" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        gs.text.char_spacing = v;
                    }
                }
                "Tw" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        gs.text.word_spacing = v;
                    }
                }
                "Tz" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        gs.text.h_scale = v / 100.0;
                    }
                }
                "TL" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        gs.text.leading = v;
                    }
                }
                "Ts" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        gs.text.rise = v;
                    }
                }
                "Td" | "TD" => {
                    if operands.len() >= 2 {
                        let tx = get_number(&operands[0]).unwrap_or(0.0);
                        let ty = get_number(&operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            gs.text.leading = -ty;
                        }
                        tlm = multiply(&translation(tx, ty), &tlm);
                        tm = tlm;
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operand(operands) {
                        tlm = m;
                        tm = m;
                    }
                }
                "T*" => {
                    tlm = multiply(&translation(0.0, -gs.text.leading), &tlm);
                    tm = tlm;
                }
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "\"" && operands.len() >= 3 {
                        gs.text.word_spacing = get_number(&operands[0]).unwrap_or(0.0);
                        gs.text.char_spacing = get_number(&operands[1]).unwrap_or(0.0);
                    }
                    if op.operator == "'" || op.operator == "\"" {
                        tlm = multiply(&translation(0.0, -gs.text.leading), &tlm);
                        tm = tlm;
                    }
                    if !in_text_block {
                        continue;
                    }

                    let items = show_items(op.operator.as_str(), operands);
                    if let Some(fragment) = self.show(&items, &gs, &mut tm) {
                        fragments.push(fragment);
                    }
                }
                _ => {}
            }
        }

        Ok(fragments)
    }

    /// Place one text-showing operation and advance the text matrix past it.
    fn show(
        &self,
        items: &[ShowItem<'_>],
        gs: &GraphicsState,
        tm: &mut Matrix,
    ) -> Option<TextFragment> {
        let ts = &gs.text;
        let fallback;
        let font = match self.fonts.get(&ts.font) {
            Some(font) => font,
            None => {
                fallback = FontInfo::unknown(String::from_utf8_lossy(&ts.font));
                &fallback
            }
        };
        let encoding = self
            .font_dicts
            .get(&ts.font)
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        let start = multiply(tm, &gs.ctm);
        let mut text = String::new();
        let mut advance = 0.0;

        for item in items {
            match item {
                ShowItem::Text(bytes) => {
                    let decoded = match encoding {
                        Some(ref enc) => {
                            LopdfDocument::decode_text(enc, bytes).unwrap_or_default()
                        }
                        None => decode_text_simple(bytes),
                    };
                    text.push_str(&decoded);

                    for code in font.codes(bytes) {
                        let w0 = font.glyph_width(code) / 1000.0;
                        let spacing = if !font.composite && code == 32 {
                            ts.char_spacing + ts.word_spacing
                        } else {
                            ts.char_spacing
                        };
                        advance += (w0 * ts.size + spacing) * ts.h_scale;
                    }
                }
                ShowItem::Adjust(n) => {
                    advance -= n / 1000.0 * ts.size * ts.h_scale;
                    if -n > TJ_SPACE_THRESHOLD && needs_space(&text) {
                        text.push(' ');
                    }
                }
            }
        }

        *tm = multiply(&translation(advance, 0.0), tm);

        if text.is_empty() {
            return None;
        }

        let font_matrix = [ts.size * ts.h_scale, 0.0, 0.0, ts.size, 0.0, ts.rise];
        let transform = multiply(&font_matrix, &start);

        let mut fragment = TextFragment::with_transform(text, transform.to_vec())
            .with_font(font.name.clone())
            .with_width(advance * x_scale(&start));
        fragment.font_weight = font.weight;
        Some(fragment)
    }
}

fn show_items<'o>(operator: &str, operands: &'o [Object]) -> Vec<ShowItem<'o>> {
    let string_at = |idx: usize| match operands.get(idx) {
        Some(Object::String(bytes, _)) => vec![ShowItem::Text(bytes.as_slice())],
        _ => Vec::new(),
    };

    match operator {
        "TJ" => match operands.first() {
            Some(Object::Array(arr)) => arr
                .iter()
                .filter_map(|item| match item {
                    Object::String(bytes, _) => Some(ShowItem::Text(bytes.as_slice())),
                    other => get_number(other).map(ShowItem::Adjust),
                })
                .collect(),
            _ => Vec::new(),
        },
        "\"" => string_at(2),
        _ => string_at(0),
    }
}

fn matrix_operand(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = IDENTITY;
    for (slot, obj) in m.iter_mut().zip(operands) {
        *slot = get_number(obj)?;
    }
    Some(m)
}

/// Whether a kerning gap after `text` should become a space.
fn needs_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// Simple text decoding fallback when no encoding is available.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
