use super::bintree::Interval;
use crate::math::Point3;

/// A maximal run of consecutive ring vertices whose `y` ordinates never
/// change direction.
///
/// Horizontal edges join whichever run they are adjacent to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonotoneChain {
    ring: usize,
    start: usize,
    end: usize,
    y_interval: Interval,
}

impl MonotoneChain {
    /// Index of the ring the chain belongs to.
    #[must_use]
    pub fn ring(&self) -> usize {
        self.ring
    }

    /// Index of the first vertex of the chain.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the last vertex of the chain (inclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the Y extent of the chain.
    #[must_use]
    pub fn y_interval(&self) -> &Interval {
        &self.y_interval
    }

    /// The chain's vertices within the ring they were built from.
    #[must_use]
    pub fn points<'a>(&self, ring: &'a [Point3]) -> &'a [Point3] {
        &ring[self.start..=self.end]
    }
}

fn y_direction(a: &Point3, b: &Point3) -> i8 {
    if b.y > a.y {
        1
    } else if b.y < a.y {
        -1
    } else {
        0
    }
}

/// Partitions the edges of `points` into Y-monotone chains.
///
/// Consecutive chains share their boundary vertex. Sequences with fewer
/// than two vertices yield no chains.
#[must_use]
pub fn y_monotone_chains(points: &[Point3], ring: usize) -> Vec<MonotoneChain> {
    let mut chains = Vec::new();
    if points.len() < 2 {
        return chains;
    }
    let last = points.len() - 1;
    let mut start = 0;
    while start < last {
        let mut end = start;
        let mut dir = 0;
        while end < last {
            let d = y_direction(&points[end], &points[end + 1]);
            if dir == 0 {
                dir = d;
            } else if d != 0 && d != dir {
                break;
            }
            end += 1;
        }
        chains.push(MonotoneChain {
            ring,
            start,
            end,
            y_interval: Interval::new(points[start].y, points[end].y),
        });
        start = end;
    }
    chains
}
