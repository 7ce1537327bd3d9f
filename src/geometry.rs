use crate::consts::{DEFAULT_PROXIMITY_RADIUS, NOT_A_CODE_POINT};
use crate::core_types::{to_base_lower, CodePoint};
use crate::error::{SgResult, SuggestError};
use crate::input::{NearbyKey, ProximityKind, TouchPoint};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Resolves raw touch coordinates into key candidates.
pub trait ProximityModel {
    fn resolve(&self, x: f32, y: f32) -> TouchPoint;

    /// Centre of the key producing `code`, if the model has one.
    fn key_center(&self, code: CodePoint) -> Option<(f32, f32)>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyNode {
    pub code: CodePoint,
    pub x: f32, // Centre X (units ~1u key width)
    pub y: f32, // Centre Y
    #[serde(default = "default_key_size")]
    pub w: f32,
    #[serde(default = "default_key_size")]
    pub h: f32,
}

fn default_key_size() -> f32 {
    1.0
}

fn default_radius() -> f32 {
    DEFAULT_PROXIMITY_RADIUS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub keys: Vec<KeyNode>,
    #[serde(default = "default_radius")]
    pub proximity_radius: f32,
}

#[inline(always)]
pub fn squared_dist(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let dx = x1 - x2;
    let dy = y1 - y2;
    dx * dx + dy * dy
}

impl KeyboardLayout {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SgResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let layout: Self = serde_json::from_str(&content)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> SgResult<()> {
        if self.keys.is_empty() {
            return Err(SuggestError::Validation("Layout has 0 keys".to_string()));
        }
        if let Some(k) = self.keys.iter().find(|k| k.w <= 0.0 || k.h <= 0.0) {
            return Err(SuggestError::Validation(format!(
                "Key {:?} has a non-positive size",
                char::from_u32(k.code)
            )));
        }
        if self.proximity_radius <= 0.0 {
            return Err(SuggestError::Validation(
                "proximity_radius must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Standard row-staggered QWERTY letter block.
    pub fn qwerty() -> Self {
        let rows: [(&str, f32); 3] = [("qwertyuiop", 0.0), ("asdfghjkl'", 0.25), ("zxcvbnm-", 0.75)];
        let mut keys = Vec::new();
        for (r, (chars, offset)) in rows.iter().enumerate() {
            for (c, ch) in chars.chars().enumerate() {
                keys.push(KeyNode {
                    code: ch as CodePoint,
                    x: c as f32 + offset + 0.5,
                    y: r as f32 + 0.5,
                    w: 1.0,
                    h: 1.0,
                });
            }
        }
        Self {
            keys,
            proximity_radius: DEFAULT_PROXIMITY_RADIUS,
        }
    }

    /// The width shared by most keys; distances are normalized by it.
    pub fn most_common_key_width(&self) -> f32 {
        let mut widths: Vec<(u32, usize)> = Vec::new();
        for k in &self.keys {
            let bits = k.w.to_bits();
            match widths.iter_mut().find(|(w, _)| *w == bits) {
                Some((_, n)) => *n += 1,
                None => widths.push((bits, 1)),
            }
        }
        widths
            .iter()
            .max_by_key(|(_, n)| *n)
            .map(|(w, _)| f32::from_bits(*w))
            .unwrap_or(1.0)
    }

    fn find_key(&self, code: CodePoint) -> Option<&KeyNode> {
        let code = to_base_lower(code);
        self.keys.iter().find(|k| to_base_lower(k.code) == code)
    }
}

impl ProximityModel for KeyboardLayout {
    fn resolve(&self, x: f32, y: f32) -> TouchPoint {
        let width = self.most_common_key_width();
        let norm = width * width;
        let radius_sq = self.proximity_radius * self.proximity_radius;

        let mut keys: Vec<NearbyKey> = self
            .keys
            .iter()
            .map(|k| {
                let distance = squared_dist(x, y, k.x, k.y) / norm;
                let kind = if distance <= radius_sq {
                    ProximityKind::Near
                } else if distance <= 4.0 * radius_sq {
                    ProximityKind::Additional
                } else {
                    ProximityKind::Far
                };
                NearbyKey {
                    code: k.code,
                    distance,
                    kind,
                }
            })
            .collect();
        keys.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.code.cmp(&b.code)));

        // A key whose bounds contain the point wins over plain nearest-centre.
        let containing = self
            .keys
            .iter()
            .find(|k| (x - k.x).abs() <= k.w / 2.0 && (y - k.y).abs() <= k.h / 2.0)
            .map(|k| k.code);

        let primary = containing
            .or_else(|| keys.first().map(|n| n.code))
            .unwrap_or(NOT_A_CODE_POINT);

        TouchPoint {
            x,
            y,
            primary,
            keys,
        }
    }

    fn key_center(&self, code: CodePoint) -> Option<(f32, f32)> {
        self.find_key(code).map(|k| (k.x, k.y))
    }
}
