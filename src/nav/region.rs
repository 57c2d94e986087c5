//! Screen regions and the containment test used for outside-click dismissal.
//!
//! The controller never looks at widgets. It asks a [`Boundary`] whether a
//! pointer position falls inside it; the renderer decides what the boundary
//! of each region is for the current frame and publishes it in a
//! [`RegionMap`].

use ratatui::layout::{Position, Rect};

/// Independent dismissal areas of the navigation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionId {
    /// Navigation bar with its category dropdowns and the search panel.
    Primary,
    /// Account control with its user menu.
    Account,
}

impl RegionId {
    pub const ALL: [RegionId; 2] = [RegionId::Primary, RegionId::Account];
}

/// Anything that can answer "is this point inside me?".
pub trait Boundary {
    fn contains_point(&self, point: Position) -> bool;
}

impl Boundary for Rect {
    fn contains_point(&self, point: Position) -> bool {
        self.contains(point)
    }
}

/// A region drawn as several disjoint rectangles (a bar plus an open
/// dropdown, for instance) contains a point when any part does.
impl<B: Boundary> Boundary for [B] {
    fn contains_point(&self, point: Position) -> bool {
        self.iter().any(|b| b.contains_point(point))
    }
}

impl<B: Boundary> Boundary for Vec<B> {
    fn contains_point(&self, point: Position) -> bool {
        self.as_slice().contains_point(point)
    }
}

/// Current boundary of each region. A region that is not on screen has no
/// entry, and its outside-click rule is skipped.
#[derive(Debug, Clone)]
pub struct RegionMap<B = Rect> {
    primary: Option<B>,
    account: Option<B>,
}

impl<B> Default for RegionMap<B> {
    fn default() -> Self {
        Self {
            primary: None,
            account: None,
        }
    }
}

impl<B: Boundary> RegionMap<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, region: RegionId, boundary: B) -> Self {
        self.set(region, boundary);
        self
    }

    pub fn set(&mut self, region: RegionId, boundary: B) {
        *self.slot_mut(region) = Some(boundary);
    }

    pub fn remove(&mut self, region: RegionId) {
        *self.slot_mut(region) = None;
    }

    pub fn get(&self, region: RegionId) -> Option<&B> {
        match region {
            RegionId::Primary => self.primary.as_ref(),
            RegionId::Account => self.account.as_ref(),
        }
    }

    /// `Some(inside)` when the region is registered, `None` otherwise.
    pub fn contains(&self, region: RegionId, point: Position) -> Option<bool> {
        self.get(region).map(|b| b.contains_point(point))
    }

    fn slot_mut(&mut self, region: RegionId) -> &mut Option<B> {
        match region {
            RegionId::Primary => &mut self.primary,
            RegionId::Account => &mut self.account,
        }
    }
}
