//! Arc extraction and deduplication for shared-boundary encoding
//!
//! Rings are cut at junctions, the vertices whose distinct neighbours across
//! all rings number anything other than two. The pieces between junctions
//! are arcs; an arc traversed in either direction by several rings is stored
//! once. Rings without junctions become a single closed arc rotated to start
//! at their smallest vertex, so identical rings share it too.
//!
//! Coordinates are compared bit for bit. Nothing is snapped or quantized.

use geo::{Coord, LineString};
use std::collections::HashMap;

/// Reference to an arc: `i` for arc `i`, `!i` (that is `-i - 1`) for arc `i`
/// traversed backwards
pub type ArcRef = i64;

/// Exact identity of a coordinate; `-0.0` is folded into `0.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct PointKey(u64, u64);

impl PointKey {
    const fn of(coord: Coord<f64>) -> Self {
        Self(canonical_bits(coord.x), canonical_bits(coord.y))
    }
}

const fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 { 0.0_f64.to_bits() } else { value.to_bits() }
}

/// Deduplicated arcs and, for every input ring, the arcs that rebuild it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcSet {
    /// Coordinate sequences, each stored once
    pub arcs: Vec<Vec<Coord<f64>>>,
    /// One reference list per input ring, in input order
    pub rings: Vec<Vec<ArcRef>>,
}

impl ArcSet {
    /// Cut `rings` into shared arcs
    ///
    /// Rings may be closed (first point repeated at the end) or open.
    pub fn build(rings: &[LineString<f64>]) -> Self {
        let open_rings: Vec<Vec<Coord<f64>>> = rings.iter().map(open_ring).collect();
        let neighbours = neighbour_sets(&open_rings);
        let is_junction = |coord: &Coord<f64>| {
            neighbours
                .get(&PointKey::of(*coord))
                .is_some_and(|set| set.len() != 2)
        };

        let mut set = Self::default();
        let mut index: HashMap<Vec<PointKey>, usize> = HashMap::new();

        for ring in &open_rings {
            let refs = split_ring(ring, &is_junction)
                .into_iter()
                .map(|arc| set.intern(&mut index, arc))
                .collect();
            set.rings.push(refs);
        }

        set
    }

    fn intern(
        &mut self,
        index: &mut HashMap<Vec<PointKey>, usize>,
        arc: Vec<Coord<f64>>,
    ) -> ArcRef {
        let keys: Vec<PointKey> = arc.iter().map(|c| PointKey::of(*c)).collect();
        if let Some(&existing) = index.get(&keys) {
            return existing as ArcRef;
        }

        let reversed: Vec<PointKey> = keys.iter().rev().copied().collect();
        if let Some(&existing) = index.get(&reversed) {
            return !(existing as ArcRef);
        }

        let id = self.arcs.len();
        self.arcs.push(arc);
        index.insert(keys, id);
        id as ArcRef
    }

    /// Rebuild the closed ring described by `refs`
    ///
    /// Returns `None` if a reference points past the end of the arc list.
    pub fn decode_ring(arcs: &[Vec<Coord<f64>>], refs: &[ArcRef]) -> Option<Vec<Coord<f64>>> {
        let mut ring: Vec<Coord<f64>> = Vec::new();

        for &arc_ref in refs {
            let (id, reversed) = if arc_ref < 0 {
                (!arc_ref, true)
            } else {
                (arc_ref, false)
            };
            let arc = arcs.get(usize::try_from(id).ok()?)?;

            let skip = usize::from(!ring.is_empty());
            if reversed {
                ring.extend(arc.iter().rev().skip(skip).copied());
            } else {
                ring.extend(arc.iter().skip(skip).copied());
            }
        }

        Some(ring)
    }
}

/// Drop the closing point and any repeated consecutive vertices
fn open_ring(ring: &LineString<f64>) -> Vec<Coord<f64>> {
    let mut points: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    for &coord in &ring.0 {
        if points.last().is_none_or(|last| PointKey::of(*last) != PointKey::of(coord)) {
            points.push(coord);
        }
    }

    while points.len() > 1
        && points
            .first()
            .zip(points.last())
            .is_some_and(|(first, last)| PointKey::of(*first) == PointKey::of(*last))
    {
        points.pop();
    }

    points
}

fn neighbour_sets(rings: &[Vec<Coord<f64>>]) -> HashMap<PointKey, Vec<PointKey>> {
    let mut neighbours: HashMap<PointKey, Vec<PointKey>> = HashMap::new();

    for ring in rings {
        let n = ring.len();
        for (i, coord) in ring.iter().enumerate() {
            let prev = ring.get((i + n - 1) % n).map(|c| PointKey::of(*c));
            let next = ring.get((i + 1) % n).map(|c| PointKey::of(*c));
            let entry = neighbours.entry(PointKey::of(*coord)).or_default();
            for key in [prev, next].into_iter().flatten() {
                if !entry.contains(&key) {
                    entry.push(key);
                }
            }
        }
    }

    neighbours
}

/// Cut one open ring into closed-path arcs between junctions
fn split_ring(
    ring: &[Coord<f64>],
    is_junction: &impl Fn(&Coord<f64>) -> bool,
) -> Vec<Vec<Coord<f64>>> {
    if ring.is_empty() {
        return Vec::new();
    }

    let junction_start = ring.iter().position(is_junction);
    let start = junction_start.unwrap_or_else(|| {
        ring.iter()
            .enumerate()
            .min_by_key(|(_, c)| PointKey::of(**c))
            .map_or(0, |(i, _)| i)
    });

    // Walk the ring once from `start` and back to it
    let walk: Vec<Coord<f64>> = ring
        .iter()
        .cycle()
        .skip(start)
        .take(ring.len() + 1)
        .copied()
        .collect();

    if junction_start.is_none() {
        return vec![walk];
    }

    let mut arcs = Vec::new();
    let mut current: Vec<Coord<f64>> = Vec::new();
    for (step, coord) in walk.iter().enumerate() {
        current.push(*coord);
        if step > 0 && is_junction(coord) {
            arcs.push(std::mem::replace(&mut current, vec![*coord]));
        }
    }

    arcs
}
