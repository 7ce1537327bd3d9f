use crate::consts::{MAX_POINT_TO_KEY_LENGTH, NOT_A_CODE_POINT};
use crate::core_types::{to_base_lower, CodePoint};
use crate::error::{SgResult, SuggestError};
use crate::geometry::ProximityModel;
use serde::{Deserialize, Serialize};

/// How far a key lies from a touch, relative to the layout's proximity radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProximityKind {
    /// Within the radius: a plain (possibly proximity) match.
    Near,
    /// Within twice the radius.
    Additional,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbyKey {
    pub code: CodePoint,
    /// Squared distance from the touch to the key centre, in key widths.
    pub distance: f32,
    pub kind: ProximityKind,
}

/// One user touch with every key of the layout, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    pub primary: CodePoint,
    pub keys: Vec<NearbyKey>,
}

impl TouchPoint {
    fn find(&self, code: CodePoint) -> Option<&NearbyKey> {
        let code = to_base_lower(code);
        self.keys.iter().find(|n| to_base_lower(n.code) == code)
    }

    pub fn key_length(&self, code: CodePoint) -> f32 {
        self.find(code)
            .map(|n| n.distance)
            .unwrap_or(MAX_POINT_TO_KEY_LENGTH)
    }

    pub fn kind_of(&self, code: CodePoint) -> Option<ProximityKind> {
        self.find(code).map(|n| n.kind)
    }

    /// The key for `code` is inside the proximity radius.
    pub fn contains(&self, code: CodePoint) -> bool {
        self.kind_of(code) == Some(ProximityKind::Near)
    }
}

/// The immutable input of one suggestion request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSequence {
    points: Vec<TouchPoint>,
}

impl InputSequence {
    pub fn new(points: Vec<TouchPoint>) -> Self {
        Self { points }
    }

    /// Simulates a perfect tap on the centre of each typed key.
    pub fn from_text<M: ProximityModel + ?Sized>(model: &M, text: &str) -> SgResult<Self> {
        let mut points = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let (x, y) = model.key_center(ch as CodePoint).ok_or_else(|| {
                SuggestError::Validation(format!("No key for character '{}'", ch))
            })?;
            points.push(model.resolve(x, y));
        }
        Ok(Self { points })
    }

    /// Resolves raw coordinates, e.g. a recorded gesture trace.
    pub fn from_coordinates<M: ProximityModel + ?Sized>(model: &M, coords: &[(f32, f32)]) -> Self {
        Self {
            points: coords.iter().map(|&(x, y)| model.resolve(x, y)).collect(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline(always)]
    pub fn point(&self, index: usize) -> Option<&TouchPoint> {
        self.points.get(index)
    }

    /// Normalized squared length from the touch at `index` to the key for `code`.
    #[inline]
    pub fn point_to_key_length(&self, index: usize, code: CodePoint) -> f32 {
        self.points
            .get(index)
            .map(|p| p.key_length(code))
            .unwrap_or(MAX_POINT_TO_KEY_LENGTH)
    }

    #[inline]
    pub fn primary_code_point_at(&self, index: usize) -> CodePoint {
        self.points
            .get(index)
            .map(|p| p.primary)
            .unwrap_or(NOT_A_CODE_POINT)
    }

    /// True when a neighbouring touch also lists this touch's primary key.
    pub fn exists_adjacent_proximity_chars(&self, index: usize) -> bool {
        if index >= self.points.len() {
            return false;
        }
        let current = self.primary_code_point_at(index);
        if index > 0 && self.points[index - 1].contains(current) {
            return true;
        }
        self.points
            .get(index + 1)
            .is_some_and(|p| p.contains(current))
    }

    /// Number of consecutive touches starting at `index` whose primary key is `code`.
    pub fn same_key_run(&self, index: usize, code: CodePoint) -> usize {
        let code = to_base_lower(code);
        self.points[index.min(self.points.len())..]
            .iter()
            .take_while(|p| to_base_lower(p.primary) == code)
            .count()
    }
}
