// src/bsp/bsp_partition.rs

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::bsp::{NodeId, Point2D, Rectangle, SplitNode, SplitOrientation, LONG_SIDE_THRESHOLD};
use crate::error::{CityError, Result};

/// Size constraints for the generated blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PartitionLimits {
    /// Largest side an undivided block may have.
    pub max_side: f64,
    /// Smallest distance between a street and the edges of the rectangle it splits.
    pub min_side: f64,
}

impl PartitionLimits {
    pub fn new(max_side: f64, min_side: f64) -> Result<Self> {
        if !max_side.is_finite() || !min_side.is_finite() {
            return Err(CityError::invalid(format!(
                "side limits must be finite (max {max_side}, min {min_side})"
            )));
        }
        if min_side <= 0.0 {
            return Err(CityError::invalid(format!(
                "minimum side limit must be positive, got {min_side}"
            )));
        }
        if max_side < min_side {
            return Err(CityError::invalid(format!(
                "maximum side limit {max_side} is smaller than minimum side limit {min_side}"
            )));
        }
        Ok(PartitionLimits { max_side, min_side })
    }

    /// An axis can be cut when it is too long for a block and wide enough to
    /// keep `min_side` on both sides of the street.
    fn can_split(&self, bounds: &Rectangle, orientation: SplitOrientation) -> bool {
        let extent = bounds.extent(orientation);
        extent > self.max_side && extent > 2.0 * self.min_side
    }
}

/// A street as handed to the placement layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StreetSegment {
    pub orientation: SplitOrientation,
    pub start: Point2D,
    pub end: Point2D,
}

impl From<&SplitNode> for StreetSegment {
    fn from(node: &SplitNode) -> Self {
        StreetSegment {
            orientation: node.orientation,
            start: node.segment_start,
            end: node.segment_end,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Smaller,
    Larger,
}

/// A rectangle waiting to be split during construction.
struct Pending {
    parent: Option<(NodeId, Side)>,
    bounds: Rectangle,
}

enum Visit {
    Node(NodeId, Rectangle),
    Block(Rectangle),
}

/// The street layout of a city: a binary space partition of the footprint
/// into blocks.
///
/// Nodes are stored in an arena and referenced by index, so building,
/// walking and dropping the tree never recurses, however unbalanced the
/// random splits make it.
#[derive(Debug, Clone)]
pub struct StreetPartition {
    footprint: Rectangle,
    limits: PartitionLimits,
    nodes: Vec<SplitNode>,
    root: Option<NodeId>,
}

impl StreetPartition {
    /// Partition `footprint` into blocks no larger than `max_side_limit`,
    /// drawing every street at least `min_side_limit` from the edges of the
    /// rectangle it splits.
    pub fn build<R: Rng + ?Sized>(
        footprint: Rectangle,
        max_side_limit: f64,
        min_side_limit: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let limits = PartitionLimits::new(max_side_limit, min_side_limit)?;
        Self::build_with_limits(footprint, limits, rng)
    }

    /// Same as [`StreetPartition::build`] with a reproducible random stream.
    pub fn build_seeded(
        footprint: Rectangle,
        max_side_limit: f64,
        min_side_limit: f64,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::build(footprint, max_side_limit, min_side_limit, &mut rng)
    }

    pub fn build_from_entropy(
        footprint: Rectangle,
        max_side_limit: f64,
        min_side_limit: f64,
    ) -> Result<Self> {
        let mut rng = StdRng::from_os_rng();
        Self::build(footprint, max_side_limit, min_side_limit, &mut rng)
    }

    pub fn build_with_limits<R: Rng + ?Sized>(
        footprint: Rectangle,
        limits: PartitionLimits,
        rng: &mut R,
    ) -> Result<Self> {
        if !footprint.is_well_formed() {
            return Err(CityError::invalid(format!(
                "footprint {:?}-{:?} is not a finite, non-inverted rectangle",
                footprint.min, footprint.max
            )));
        }

        let mut nodes: Vec<SplitNode> = Vec::new();
        let mut root = None;

        // A footprint that cannot hold `min_side` on both sides of a street
        // along either axis stays a single block.
        if footprint.width() < 2.0 * limits.min_side || footprint.depth() < 2.0 * limits.min_side {
            debug!(
                "Footprint {}x{} narrower than twice the minimum side {}, kept as one block",
                footprint.width(),
                footprint.depth(),
                limits.min_side
            );
            return Ok(StreetPartition {
                footprint,
                limits,
                nodes,
                root,
            });
        }

        // Depth-first, smaller side first: a node's whole smaller subtree is
        // drawn before its larger side.
        let mut pending = vec![Pending {
            parent: None,
            bounds: footprint,
        }];
        while let Some(Pending { parent, bounds }) = pending.pop() {
            let Some(node) = Self::split_rectangle(&bounds, &limits, rng) else {
                continue;
            };
            let id = nodes.len();
            let (smaller, larger) = bounds.split(node.orientation, node.coordinate);
            nodes.push(node);

            match parent {
                None => root = Some(id),
                Some((p, Side::Smaller)) => nodes[p].smaller = Some(id),
                Some((p, Side::Larger)) => nodes[p].larger = Some(id),
            }

            pending.push(Pending {
                parent: Some((id, Side::Larger)),
                bounds: larger,
            });
            pending.push(Pending {
                parent: Some((id, Side::Smaller)),
                bounds: smaller,
            });
        }

        debug!(
            "Street partition of {}x{} built: {} streets, {} blocks",
            footprint.width(),
            footprint.depth(),
            nodes.len(),
            nodes.len() + 1
        );

        Ok(StreetPartition {
            footprint,
            limits,
            nodes,
            root,
        })
    }

    /// Creates the street that splits `bounds`, or `None` if `bounds` is a block.
    fn split_rectangle<R: Rng + ?Sized>(
        bounds: &Rectangle,
        limits: &PartitionLimits,
        rng: &mut R,
    ) -> Option<SplitNode> {
        let width = bounds.width();
        let depth = bounds.depth();
        if width <= limits.max_side && depth <= limits.max_side {
            return None;
        }

        let orientation = if width > limits.max_side && depth > limits.max_side {
            let p: f64 = rng.random();
            if (p > LONG_SIDE_THRESHOLD && width >= depth)
                || (p <= LONG_SIDE_THRESHOLD && width < depth)
            {
                SplitOrientation::Horizontal
            } else {
                SplitOrientation::Vertical
            }
        } else if depth > limits.max_side {
            SplitOrientation::Horizontal
        } else {
            SplitOrientation::Vertical
        };

        if !limits.can_split(bounds, orientation) {
            trace!("{}x{} too narrow to split {}, kept as one block", width, depth, orientation.name());
            return None;
        }

        let (start, end) = bounds.range(orientation);
        let low = start + limits.min_side;
        let high = end - limits.min_side;
        if low >= high {
            return None;
        }
        // Open interval: reject the (unlikely) draw of the lower bound.
        let coordinate = loop {
            let c = rng.random_range(low..high);
            if c > low {
                break c;
            }
        };

        trace!("{} street at {:.3} in {}x{}", orientation.name(), coordinate, width, depth);
        Some(SplitNode::new(orientation, coordinate, bounds))
    }

    /// Every block of the city.
    ///
    /// Blocks are listed depth-first: all blocks on a street's smaller side
    /// come before those on its larger side. Callers should only rely on each
    /// block appearing exactly once.
    pub fn blocks(&self) -> Vec<Rectangle> {
        let Some(root) = self.root else {
            return vec![self.footprint];
        };

        let mut blocks = Vec::with_capacity(self.nodes.len() + 1);
        let mut stack = vec![Visit::Node(root, self.footprint)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Block(bounds) => blocks.push(bounds),
                Visit::Node(id, bounds) => {
                    let node = &self.nodes[id];
                    let larger = node.larger_bounds(&bounds);
                    let smaller = node.smaller_bounds(&bounds);
                    stack.push(match node.larger {
                        Some(child) => Visit::Node(child, larger),
                        None => Visit::Block(larger),
                    });
                    stack.push(match node.smaller {
                        Some(child) => Visit::Node(child, smaller),
                        None => Visit::Block(smaller),
                    });
                }
            }
        }
        blocks
    }

    /// Every street, each one listed before the streets that branch off it.
    pub fn street_segments(&self) -> Vec<StreetSegment> {
        self.splits().into_iter().map(|(_, node)| node.into()).collect()
    }

    /// Pre-order walk pairing each street with the rectangle it splits.
    pub fn splits(&self) -> Vec<(Rectangle, &SplitNode)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(NodeId, Rectangle)> = self.root.map(|r| (r, self.footprint)).into_iter().collect();
        while let Some((id, bounds)) = stack.pop() {
            let node = &self.nodes[id];
            if let Some(child) = node.larger {
                stack.push((child, node.larger_bounds(&bounds)));
            }
            if let Some(child) = node.smaller {
                stack.push((child, node.smaller_bounds(&bounds)));
            }
            out.push((bounds, node));
        }
        out
    }

    /// Number of streets on the longest root-to-block path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((id, level)) = stack.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[id];
            stack.extend(node.smaller.into_iter().chain(node.larger).map(|c| (c, level + 1)));
        }
        deepest
    }

    pub fn footprint(&self) -> Rectangle {
        self.footprint
    }

    pub fn limits(&self) -> PartitionLimits {
        self.limits
    }

    pub fn max_side_limit(&self) -> f64 {
        self.limits.max_side
    }

    pub fn min_side_limit(&self) -> f64 {
        self.limits.min_side
    }

    pub fn root(&self) -> Option<&SplitNode> {
        self.root.map(|id| &self.nodes[id])
    }

    pub fn node(&self, id: NodeId) -> Option<&SplitNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[SplitNode] {
        &self.nodes
    }

    /// Number of streets.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the footprint was left as a single block.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
