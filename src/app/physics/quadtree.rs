use eframe::egui::{Vec2, vec2};

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: usize = 10;

#[derive(Clone, Copy, Debug)]
pub(super) struct Cell {
    pub(super) center: Vec2,
    pub(super) half_extent: f32,
}

impl Cell {
    fn enclosing(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for point in points {
            min = min.min(*point);
            max = max.max(*point);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let span = (max - min).max(vec2(1.0, 1.0));
        Some(Self {
            center: (min + max) * 0.5,
            half_extent: span.x.max(span.y) * 0.5 + 1.0,
        })
    }

    fn quadrant(self, index: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = vec2(
            if index & 1 == 0 { -quarter } else { quarter },
            if index & 2 == 0 { -quarter } else { quarter },
        );
        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_of(self, point: Vec2) -> usize {
        usize::from(point.x >= self.center.x) | (usize::from(point.y >= self.center.y) << 1)
    }

    pub(super) fn gap_sq(self, other: Self) -> f32 {
        let reach = self.half_extent + other.half_extent;
        let dx = ((self.center.x - other.center.x).abs() - reach).max(0.0);
        let dy = ((self.center.y - other.center.y).abs() - reach).max(0.0);
        dx * dx + dy * dy
    }
}

pub(super) struct QuadTree {
    cell: Cell,
    indices: Vec<usize>,
    children: [Option<Box<QuadTree>>; 4],
}

impl QuadTree {
    pub(super) fn build(positions: &[Vec2]) -> Option<Self> {
        let cell = Cell::enclosing(positions)?;
        Some(Self::subdivide(cell, (0..positions.len()).collect(), positions, 0))
    }

    fn subdivide(cell: Cell, indices: Vec<usize>, positions: &[Vec2], depth: usize) -> Self {
        let mut node = Self {
            cell,
            indices,
            children: std::array::from_fn(|_| None),
        };
        if depth >= MAX_DEPTH || node.indices.len() <= LEAF_CAPACITY {
            return node;
        }

        let mut buckets: [Vec<usize>; 4] = std::array::from_fn(|_| Vec::new());
        for &index in &node.indices {
            buckets[cell.quadrant_of(positions[index])].push(index);
        }

        // Coincident points cannot be split; keep them together in one leaf.
        if buckets.iter().filter(|bucket| !bucket.is_empty()).count() <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if !bucket.is_empty() {
                node.children[quadrant] = Some(Box::new(Self::subdivide(
                    cell.quadrant(quadrant),
                    bucket,
                    positions,
                    depth + 1,
                )));
            }
        }
        node.indices.clear();
        node
    }

    fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    fn children(&self) -> impl Iterator<Item = &QuadTree> {
        self.children.iter().filter_map(|child| child.as_deref())
    }

    pub(super) fn candidate_pairs(&self, reach: f32, pairs: &mut Vec<(usize, usize)>) {
        pairs.clear();
        self.pairs_within(self, true, reach * reach, pairs);
        pairs.sort_unstable();
    }

    fn pairs_within(
        &self,
        other: &QuadTree,
        same: bool,
        reach_sq: f32,
        pairs: &mut Vec<(usize, usize)>,
    ) {
        if self.cell.gap_sq(other.cell) > reach_sq {
            return;
        }

        if self.is_leaf() && other.is_leaf() {
            if same {
                for (offset, &a) in self.indices.iter().enumerate() {
                    for &b in &self.indices[offset + 1..] {
                        pairs.push((a.min(b), a.max(b)));
                    }
                }
            } else {
                for &a in &self.indices {
                    for &b in &other.indices {
                        pairs.push((a.min(b), a.max(b)));
                    }
                }
            }
            return;
        }

        if same {
            let children = self.children().collect::<Vec<_>>();
            for (offset, child) in children.iter().enumerate() {
                child.pairs_within(child, true, reach_sq, pairs);
                for sibling in &children[offset + 1..] {
                    child.pairs_within(sibling, false, reach_sq, pairs);
                }
            }
            return;
        }

        let split_self = !self.is_leaf()
            && (other.is_leaf() || self.cell.half_extent >= other.cell.half_extent);
        if split_self {
            for child in self.children() {
                child.pairs_within(other, false, reach_sq, pairs);
            }
        } else {
            for child in other.children() {
                self.pairs_within(child, false, reach_sq, pairs);
            }
        }
    }
}
