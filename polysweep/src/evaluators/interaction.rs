use std::collections::{BTreeMap, BTreeSet};

use super::{wrap_delta, EdgeEvaluator, PropertyId, WrapCounts};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What relationship an [InteractionDetector] records.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// `(primary, secondary)` pairs which overlap (or touch, if enabled). Mode `0`.
    Interacting,
    /// Secondaries not overlapping any primary, reported as `(secondary, secondary)`.
    /// Mode `+1`.
    Outside,
    /// `(primary, secondary)` pairs where the secondary lies completely inside the primary.
    /// Mode `-1`.
    Inside,
    /// `(primary, secondary)` pairs where the primary lies completely inside the secondary.
    /// Mode `-2`.
    Enclosing,
}

impl InteractionMode {
    /// Mode from its integer code, `None` for unknown codes.
    pub fn from_mode(mode: i32) -> Option<Self> {
        match mode {
            0 => Some(InteractionMode::Interacting),
            1 => Some(InteractionMode::Outside),
            -1 => Some(InteractionMode::Inside),
            -2 => Some(InteractionMode::Enclosing),
            _ => None,
        }
    }

    pub fn mode(&self) -> i32 {
        match self {
            InteractionMode::Interacting => 0,
            InteractionMode::Outside => 1,
            InteractionMode::Inside => -1,
            InteractionMode::Enclosing => -2,
        }
    }
}

/// Records overlap, touch and containment relations between property ids.
///
/// Ids up to and including `last_primary_id` are primaries, the others secondaries. With the
/// default `last_primary_id` of [PropertyId::MAX] every id is a primary and in
/// [InteractionMode::Interacting] all pairs `(a, b)` with `a < b` are recorded.
///
/// The containment and exclusion modes collect candidates during the sweep;
/// [InteractionDetector::finish] must be called afterwards to resolve them.
#[derive(Debug, Clone)]
pub struct InteractionDetector {
    mode: InteractionMode,
    include_touching: bool,
    last_primary_id: PropertyId,
    wcv_n: WrapCounts,
    wcv_s: WrapCounts,
    inside_n: BTreeSet<PropertyId>,
    inside_s: BTreeSet<PropertyId>,
    present: BTreeSet<PropertyId>,
    interactions: BTreeSet<(PropertyId, PropertyId)>,
    candidates: BTreeMap<PropertyId, BTreeSet<PropertyId>>,
    seen: BTreeSet<PropertyId>,
    excluded: BTreeSet<PropertyId>,
}

impl InteractionDetector {
    pub fn new(mode: InteractionMode, include_touching: bool) -> Self {
        Self {
            mode,
            include_touching,
            last_primary_id: PropertyId::MAX,
            wcv_n: WrapCounts::default(),
            wcv_s: WrapCounts::default(),
            inside_n: BTreeSet::new(),
            inside_s: BTreeSet::new(),
            present: BTreeSet::new(),
            interactions: BTreeSet::new(),
            candidates: BTreeMap::new(),
            seen: BTreeSet::new(),
            excluded: BTreeSet::new(),
        }
    }

    /// Ids `<= id` are primaries, the others secondaries.
    pub fn set_last_primary_id(&mut self, id: PropertyId) {
        self.last_primary_id = id;
    }

    #[inline]
    pub fn last_primary_id(&self) -> PropertyId {
        self.last_primary_id
    }

    #[inline]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[inline]
    fn is_primary(&self, id: PropertyId) -> bool {
        id <= self.last_primary_id
    }

    /// Resolve containment and exclusion candidates into recorded relations.
    pub fn finish(&mut self) {
        match self.mode {
            InteractionMode::Interacting => {}
            InteractionMode::Inside => {
                for (&secondary, primaries) in self.candidates.iter() {
                    for &primary in primaries.iter() {
                        self.interactions.insert((primary, secondary));
                    }
                }
            }
            InteractionMode::Enclosing => {
                for (&primary, secondaries) in self.candidates.iter() {
                    for &secondary in secondaries.iter() {
                        self.interactions.insert((primary, secondary));
                    }
                }
            }
            InteractionMode::Outside => {
                for &secondary in self.seen.difference(&self.excluded) {
                    self.interactions.insert((secondary, secondary));
                }
            }
        }
        self.candidates.clear();
        self.seen.clear();
        self.excluded.clear();
    }

    /// Recorded relations in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &(PropertyId, PropertyId)> + '_ {
        self.interactions.iter()
    }

    #[inline]
    pub fn interactions(&self) -> &BTreeSet<(PropertyId, PropertyId)> {
        &self.interactions
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    fn record_pairs(&mut self, ids: &BTreeSet<PropertyId>) {
        let all_primary = self.last_primary_id == PropertyId::MAX;
        for &a in ids.iter() {
            for &b in ids.range((a + 1)..) {
                match (self.is_primary(a), self.is_primary(b)) {
                    (true, false) => {
                        self.interactions.insert((a, b));
                    }
                    (true, true) if all_primary => {
                        self.interactions.insert((a, b));
                    }
                    _ => {}
                }
            }
        }
    }

    /// Account for the area right of the current north cluster in the band above the scanline.
    fn evaluate_area(&mut self, inside: &BTreeSet<PropertyId>) {
        match self.mode {
            InteractionMode::Interacting => self.record_pairs(inside),
            InteractionMode::Outside => {
                let any_primary = inside.iter().any(|&id| self.is_primary(id));
                let secondaries: Vec<PropertyId> = inside
                    .iter()
                    .copied()
                    .filter(|&id| !self.is_primary(id))
                    .collect();
                for id in secondaries {
                    self.seen.insert(id);
                    if any_primary {
                        self.excluded.insert(id);
                    }
                }
            }
            InteractionMode::Inside | InteractionMode::Enclosing => {
                // the inner role is secondary for Inside and primary for Enclosing
                let inner_is_primary = self.mode == InteractionMode::Enclosing;
                let (inner, outer): (BTreeSet<_>, BTreeSet<_>) = inside
                    .iter()
                    .copied()
                    .partition(|&id| self.is_primary(id) == inner_is_primary);
                for id in inner {
                    self.candidates
                        .entry(id)
                        .and_modify(|c| c.retain(|o| outer.contains(o)))
                        .or_insert_with(|| outer.clone());
                }
            }
        }
    }

    /// Account for everything present at the last position, touching included.
    fn evaluate_touch(&mut self, present: &BTreeSet<PropertyId>) {
        match self.mode {
            InteractionMode::Interacting => self.record_pairs(present),
            InteractionMode::Outside => {
                if present.iter().any(|&id| self.is_primary(id)) {
                    let secondaries: Vec<PropertyId> = present
                        .iter()
                        .copied()
                        .filter(|&id| !self.is_primary(id))
                        .collect();
                    self.excluded.extend(secondaries);
                }
            }
            InteractionMode::Inside | InteractionMode::Enclosing => {}
        }
    }

    fn close_group(&mut self) {
        let mut present = std::mem::take(&mut self.present);
        if self.include_touching {
            present.extend(self.inside_n.iter().copied());
            present.extend(self.inside_s.iter().copied());
            self.evaluate_touch(&present);
        }
        present.clear();
        self.present = present;
    }
}

impl Default for InteractionDetector {
    fn default() -> Self {
        Self::new(InteractionMode::Interacting, true)
    }
}

impl EdgeEvaluator for InteractionDetector {
    fn reset(&mut self) {
        self.close_group();
        self.wcv_n.clear();
        self.wcv_s.clear();
        self.inside_n.clear();
        self.inside_s.clear();
    }

    fn reserve(&mut self, n: usize) {
        self.wcv_n.reserve(n);
        self.wcv_s.reserve(n);
    }

    fn begin_group(&mut self) {
        self.close_group();
        self.present.extend(self.inside_n.iter().copied());
        self.present.extend(self.inside_s.iter().copied());
    }

    fn edge(&mut self, north: bool, enter: bool, prop: PropertyId) -> i32 {
        self.present.insert(prop);
        let (wcv, inside) = if north {
            (&mut self.wcv_n, &mut self.inside_n)
        } else {
            (&mut self.wcv_s, &mut self.inside_s)
        };
        let (old, new) = wcv.add(prop, wrap_delta(enter));
        if old == 0 && new != 0 {
            inside.insert(prop);
        } else if old != 0 && new == 0 {
            inside.remove(&prop);
        }
        0
    }

    fn end_cluster(&mut self) {
        // edges starting at a common vertex enclose areas which no group boundary sees
        let inside = std::mem::take(&mut self.inside_n);
        self.evaluate_area(&inside);
        self.inside_n = inside;
    }

    fn is_reset(&self) -> bool {
        self.wcv_n.is_zero() && self.wcv_s.is_zero()
    }

    fn prefer_touch(&self) -> bool {
        self.include_touching
    }
}
