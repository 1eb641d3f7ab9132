use std::fmt;

/// Identifies one of the attractions a visitor can ride.
///
/// Attractions are numbered from 1 and displayed as `AT-<n>`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct AttractionId(pub u32);

/// Identifies a single visitor.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct VisitorId(pub u64);

impl AttractionId {
    /// All attraction ids for a ride with `count` attractions, in order.
    pub fn all(count: u32) -> impl Iterator<Item = AttractionId> {
        (1..=count).map(AttractionId)
    }
}

impl fmt::Display for AttractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AT-{}", self.0)
    }
}

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Visitor {}", self.0)
    }
}
