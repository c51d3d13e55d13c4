//! Text widths from installed fonts.
//!
//! Faces are resolved once per (family list, weight) through `fontdb` and their
//! advances read with `ttf-parser`. Resolved faces are also written to
//! `$XDG_CACHE_HOME/fhover/font-cache` so later runs skip the system scan.
//! When no face resolves, widths fall back to per-character estimates.

use crate::font::FontSpec;
use crate::surface::TextMeasure;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;
use ttf_parser::Face;

static TEXT_MEASURER: Lazy<Mutex<TextMeasurer>> = Lazy::new(|| Mutex::new(TextMeasurer::new()));

/// Width from real font data, or `None` when no matching face is installed.
pub fn measure_text_width(text: &str, font: &FontSpec) -> Option<f64> {
    if text.is_empty() || font.size <= 0.0 {
        return Some(0.0);
    }
    let mut guard = TEXT_MEASURER.lock().ok()?;
    guard.measure(text, font)
}

/// Width estimate for Arial-like sans-serif faces.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().map(estimated_advance).sum::<f64>() * font_size
}

fn estimated_advance(ch: char) -> f64 {
    match ch {
        ' ' => 0.278,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '|' | '!' | '\'' => 0.24,
        'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.334,
        'm' | 'w' | 'M' | 'W' => 0.86,
        '%' | '@' | '&' | '#' => 0.89,
        '0'..='9' => 0.556,
        'A'..='Z' => 0.667,
        _ => 0.556,
    }
}

/// [`TextMeasure`] backed by installed fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontMeasure {
    /// Skip font lookup and always use the estimate.
    pub fast: bool,
}

impl TextMeasure for FontMeasure {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        if self.fast {
            return estimate_text_width(text, font.size);
        }
        measure_text_width(text, font).unwrap_or_else(|| estimate_text_width(text, font.size))
    }
}

struct TextMeasurer {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<FontFace>>,
}

impl TextMeasurer {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn measure(&mut self, text: &str, font: &FontSpec) -> Option<f64> {
        let weight = parse_weight(&font.weight);
        let key = format!("{}@{}", font.family.trim(), weight.0);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(&key, &font.family, weight);
            self.faces.insert(key.clone(), face);
        }
        let face = self.faces.get(&key)?.as_ref()?;
        Some(face.width(text, font.size))
    }

    fn load_face(&mut self, key: &str, family_list: &str, weight: Weight) -> Option<FontFace> {
        if let Some(face) = load_cached_face(key) {
            return Some(face);
        }

        let names: Vec<String> = family_list
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names.iter().map(|name| generic_family(name)).collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
            debug!(faces = self.db.len(), "loaded system fonts");
        }

        let query = Query {
            families: &families,
            weight,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| {
                let face = FontFace::parse(data.to_vec(), index)?;
                store_cached_face(key, &face);
                Some(face)
            })
            .flatten()
    }
}

fn generic_family(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

fn parse_weight(weight: &str) -> Weight {
    match weight.trim().to_ascii_lowercase().as_str() {
        "bold" | "bolder" => Weight::BOLD,
        "lighter" => Weight::LIGHT,
        "normal" | "" => Weight::NORMAL,
        other => other.parse::<u16>().map(Weight).unwrap_or(Weight::NORMAL),
    }
}

/// Owned face data with ASCII advances resolved up front.
struct FontFace {
    data: Vec<u8>,
    index: u32,
    units_per_em: u16,
    ascii_advances: [u16; 128],
}

impl FontFace {
    fn parse(data: Vec<u8>, index: u32) -> Option<Self> {
        let face = Face::parse(&data, index).ok()?;
        let units_per_em = face.units_per_em().max(1);
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        Some(Self {
            data,
            index,
            units_per_em,
            ascii_advances,
        })
    }

    fn width(&self, text: &str, font_size: f64) -> f64 {
        let scale = font_size / self.units_per_em as f64;
        let advance_px = |advance: u16, ch: char| {
            if advance == 0 {
                estimated_advance(ch) * font_size
            } else {
                advance as f64 * scale
            }
        };

        if text.is_ascii() {
            return text
                .bytes()
                .filter(|byte| *byte != b'\n')
                .map(|byte| advance_px(self.ascii_advances[byte as usize], byte as char))
                .sum();
        }

        let Ok(face) = Face::parse(&self.data, self.index) else {
            return estimate_text_width(text, font_size);
        };
        text.chars()
            .filter(|ch| *ch != '\n')
            .map(|ch| {
                let advance = face
                    .glyph_index(ch)
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .unwrap_or(0);
                advance_px(advance, ch)
            })
            .sum()
    }
}

fn cache_paths(key: &str) -> Option<(PathBuf, PathBuf)> {
    let base = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();
    let dir = base.join("fhover").join("font-cache");
    Some((dir.join(format!("{hash:x}.font")), dir.join(format!("{hash:x}.meta"))))
}

fn load_cached_face(key: &str) -> Option<FontFace> {
    let (font_path, meta_path) = cache_paths(key)?;
    let bytes = fs::read(font_path).ok()?;
    let index: u32 = fs::read_to_string(meta_path).ok()?.trim().parse().ok()?;
    FontFace::parse(bytes, index)
}

fn store_cached_face(key: &str, face: &FontFace) {
    let Some((font_path, meta_path)) = cache_paths(key) else {
        return;
    };
    if font_path.exists() {
        return;
    }
    if let Some(parent) = font_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let _ = fs::write(&font_path, &face.data);
    let _ = fs::write(&meta_path, face.index.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_scales_with_size() {
        let small = estimate_text_width("Acme Corp", 10.0);
        let large = estimate_text_width("Acme Corp", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-9);
        assert!(estimate_text_width("iii", 12.0) < estimate_text_width("MMM", 12.0));
    }

    #[test]
    fn weights_map_to_fontdb() {
        assert_eq!(parse_weight("bold"), Weight::BOLD);
        assert_eq!(parse_weight("600"), Weight(600));
        assert_eq!(parse_weight("normal"), Weight::NORMAL);
        assert_eq!(parse_weight("weird"), Weight::NORMAL);
    }

    #[test]
    fn fast_measure_uses_estimate() {
        let font = FontSpec::new("normal", 14.0, "Arial");
        let measure = FontMeasure { fast: true };
        assert_eq!(measure.measure("12%", &font), estimate_text_width("12%", 14.0));
    }

    #[test]
    fn empty_text_is_zero_wide() {
        let font = FontSpec::new("normal", 14.0, "Arial");
        assert_eq!(measure_text_width("", &font), Some(0.0));
    }
}
