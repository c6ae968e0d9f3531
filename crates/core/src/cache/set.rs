//! Cache sets and lines.
//!
//! A line is pure bookkeeping: a valid bit, a tag, and the logical time of its
//! last use. A set is a fixed group of `E` lines scanned linearly in way order.

use super::lru;

/// One cache line. Holds no data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Line {
    valid: bool,
    tag: u64,
    last_used: u64,
}

impl Line {
    /// Creates a valid line holding `tag`, last used at `stamp`.
    pub const fn filled(tag: u64, stamp: u64) -> Self {
        Self {
            valid: true,
            tag,
            last_used: stamp,
        }
    }

    /// Whether the line currently holds a block.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Tag of the resident block. Meaningless while the line is invalid.
    #[inline]
    pub const fn tag(&self) -> u64 {
        self.tag
    }

    /// Access-clock value of the last hit or fill; 0 for a never-used line.
    #[inline]
    pub const fn last_used(&self) -> u64 {
        self.last_used
    }

    #[inline]
    const fn holds(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// Where a tag landed inside a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Placement {
    /// The tag was already resident in this way.
    Hit(usize),
    /// The tag was written into a previously invalid way.
    Filled(usize),
    /// The tag replaced the valid line in this way.
    Evicted {
        /// Way that was overwritten.
        way: usize,
        /// Tag that was displaced.
        victim_tag: u64,
    },
}

/// A fixed-size group of `E` lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Set {
    lines: Vec<Line>,
}

impl Set {
    /// Creates a set of `ways` invalid lines.
    pub(crate) fn new(ways: usize) -> Self {
        Self {
            lines: vec![Line::default(); ways],
        }
    }

    /// The lines of this set, in way order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Way holding `tag`, if resident.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|line| line.holds(tag))
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|line| line.valid).count()
    }

    /// Looks up `tag`, filling or evicting on a miss, and stamps the touched line.
    ///
    /// Exactly one line is modified. Lookup wins over fill, fill over eviction;
    /// every scan takes the lowest matching way.
    pub(crate) fn place(&mut self, tag: u64, stamp: u64) -> Placement {
        if let Some(way) = self.find(tag) {
            self.lines[way].last_used = stamp;
            return Placement::Hit(way);
        }

        if let Some(way) = self.lines.iter().position(|line| !line.valid) {
            self.lines[way] = Line::filled(tag, stamp);
            return Placement::Filled(way);
        }

        let way = lru::select_victim(&self.lines);
        let victim_tag = self.lines[way].tag;
        self.lines[way] = Line::filled(tag, stamp);
        Placement::Evicted { way, victim_tag }
    }
}
