//! Editable root sets.
//!
//! The zeros and the poles of a design each live in a [`RootSet`]: an ordered
//! arena of complex values addressed by stable [`RootId`] handles. An editor
//! holds handles to what it has selected and mutates through them; the engine
//! reads an ordered snapshot when it recomputes the coefficients.

use crate::complex::{Complex, ComplexExt};
use crate::error::{DesignError, Result};

/// While dragging, roots closer than this to the real axis snap onto it and
/// lose their conjugate partner.
pub const SNAP_SIZE: f64 = 0.03;

/// Dragged poles are kept strictly inside the unit circle.
pub const MAX_POLE_MODULUS: f64 = 1.0 - Complex::EPSILON;

/// Stable handle to a root. Handles are never reused within one set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    Zero,
    Pole,
}

#[derive(Debug, Clone, Default)]
pub struct RootSet {
    entries: Vec<(RootId, Complex)>,
    next_id: u32,
}

impl RootSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_roots(roots: &[Complex]) -> Self {
        let mut set = Self::new();
        for &root in roots {
            set.insert(root);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// appends a root, duplicates add multiplicity
    pub fn insert(&mut self, root: Complex) -> RootId {
        let id = RootId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, root));
        id
    }

    pub fn get(&self, id: RootId) -> Option<Complex> {
        self.position(id).map(|i| self.entries[i].1)
    }

    pub fn contains(&self, id: RootId) -> bool {
        self.position(id).is_some()
    }

    pub fn set(&mut self, id: RootId, root: Complex) -> Result<()> {
        *self.get_mut(id)? = root;
        Ok(())
    }

    /// removes a root, keeping the order of the others
    pub fn remove(&mut self, id: RootId) -> Result<Complex> {
        let i = self.position(id).ok_or(DesignError::UnknownRoot(id))?;
        Ok(self.entries.remove(i).1)
    }

    pub fn scale_modulus_to(&mut self, id: RootId, modulus: f64) -> Result<()> {
        self.get_mut(id)?.scale_modulus_to(modulus);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RootId, Complex)> + '_ {
        self.entries.iter().copied()
    }

    /// ordered snapshot of the values
    pub fn values(&self) -> Vec<Complex> {
        self.entries.iter().map(|&(_, root)| root).collect()
    }

    /// another root equal to the conjugate of `id`
    pub fn conjugate_of(&self, id: RootId) -> Option<RootId> {
        let root = self.get(id)?;
        self.entries
            .iter()
            .find(|&&(other, z)| other != id && z.approx_eq(&root.conj()))
            .map(|&(other, _)| other)
    }

    /// first root whose squared distance to `z` is below `radius_squared`
    pub fn hit_test(&self, z: Complex, radius_squared: f64) -> Option<RootId> {
        self.entries
            .iter()
            .find(|(_, root)| (*root - z).norm_sqr() < radius_squared)
            .map(|&(id, _)| id)
    }

    /// distinct roots with how many times each occurs, in first-seen order
    pub fn multiplicities(&self) -> Vec<(Complex, usize)> {
        let mut result: Vec<(Complex, usize)> = Vec::new();
        for &(_, root) in &self.entries {
            match result.iter_mut().find(|(z, _)| z.approx_eq(&root)) {
                Some((_, multiplicity)) => *multiplicity += 1,
                None => result.push((root, 1)),
            }
        }
        result
    }

    /// Moves a root to `target` the way the pole/zero editor drags it.
    ///
    /// Non-real roots keep a conjugate partner: an existing partner follows the
    /// move, a missing one is inserted. A target within [`SNAP_SIZE`] of the real
    /// axis snaps onto it and the partner is removed. Poles are pulled back to
    /// [`MAX_POLE_MODULUS`] so a drag can never make the filter unstable.
    pub fn drag(&mut self, id: RootId, target: Complex, kind: RootKind) -> Result<()> {
        let conjugate = self.conjugate_of(id);
        let needs_conjugate = target.im.abs() > SNAP_SIZE;

        let root = self.get_mut(id)?;
        *root = target;
        if kind == RootKind::Pole && root.norm_sqr() >= MAX_POLE_MODULUS {
            root.scale_modulus_to(MAX_POLE_MODULUS);
        }
        if !needs_conjugate {
            root.im = 0.0;
        }
        let moved = *root;

        match (needs_conjugate, conjugate) {
            (true, Some(partner)) => self.set(partner, moved.conj())?,
            (true, None) => {
                self.insert(moved.conj());
            }
            (false, Some(partner)) => {
                self.remove(partner)?;
            }
            (false, None) => {}
        }
        Ok(())
    }

    fn position(&self, id: RootId) -> Option<usize> {
        self.entries.iter().position(|&(other, _)| other == id)
    }

    fn get_mut(&mut self, id: RootId) -> Result<&mut Complex> {
        self.entries
            .iter_mut()
            .find(|(other, _)| *other == id)
            .map(|(_, root)| root)
            .ok_or(DesignError::UnknownRoot(id))
    }
}
