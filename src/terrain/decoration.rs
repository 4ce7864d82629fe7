//! Decoration tree placed on top of the terrain.
//!
//! Decorations are what the presentation layer dresses the landscape with.
//! The collision layer only cares about the top-level typed objects; the
//! visual sub-parts hanging below them (trunks, roofs, posts) are ignored.

use glam::Vec3;
use log::{debug, warn};
use rand::Rng;

use crate::collider::Collider;
use crate::config::sample_extent;
use crate::terrain::HeightField;

/// Kind tag carried by a decoration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// Tree; collidable for the vehicle only.
    Tree,
    /// Building; blocks vehicle and creatures.
    Building,
    /// Fence segment; blocks vehicle and creatures.
    Fence,
    /// Rock; visual only.
    Rock,
    /// Flower patch; visual only.
    Flower,
}

/// One node of the decoration tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecorationNode {
    /// Kind tag. Untagged nodes act as groups.
    pub kind: Option<DecorationKind>,
    /// World position of the node.
    pub position: Vec3,
    /// Marks a visual-only sub-part of a larger object.
    pub is_part: bool,
    /// Child nodes.
    pub children: Vec<DecorationNode>,
}

impl DecorationNode {
    /// Creates an untagged group holding `children`.
    #[must_use]
    pub const fn group(children: Vec<Self>) -> Self {
        Self {
            kind: None,
            position: Vec3::ZERO,
            is_part: false,
            children,
        }
    }

    /// Creates a typed top-level object at `position`.
    #[must_use]
    pub const fn object(kind: DecorationKind, position: Vec3) -> Self {
        Self {
            kind: Some(kind),
            position,
            is_part: false,
            children: Vec::new(),
        }
    }

    /// Creates a visual-only sub-part at `position`.
    #[must_use]
    pub const fn part(kind: DecorationKind, position: Vec3) -> Self {
        Self {
            kind: Some(kind),
            position,
            is_part: true,
            children: Vec::new(),
        }
    }

    /// Attaches `children` to this node.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }

    /// Counts the nodes in this subtree, including `self`.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// Returns `true` for a childless untagged node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.children.is_empty()
    }
}

/// Walks the decoration tree and returns the colliders it describes.
///
/// Sub-parts are pruned together with their subtrees. Typed nodes end the
/// descent: whatever hangs below a tree or building is decoration for it.
/// Objects with malformed placement are logged and skipped.
#[must_use]
pub fn collect_colliders(root: &DecorationNode) -> Vec<Collider> {
    let mut colliders = Vec::new();
    visit(root, &mut colliders);
    colliders
}

fn visit(node: &DecorationNode, colliders: &mut Vec<Collider>) {
    if node.is_part {
        return;
    }
    match node.kind {
        Some(kind) => match Collider::from_decoration(kind, node.position) {
            Ok(Some(collider)) => colliders.push(collider),
            Ok(None) => {}
            Err(err) => warn!("skipping decoration: {err}"),
        },
        None => {
            if node.children.is_empty() {
                debug!("skipping untagged decoration at {}", node.position);
            }
            for child in &node.children {
                visit(child, colliders);
            }
        }
    }
}

/// Counts of each decoration kind scattered by [`scatter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScatterCounts {
    /// Number of trees.
    pub trees: usize,
    /// Number of buildings.
    pub buildings: usize,
    /// Number of fence segments.
    pub fences: usize,
    /// Number of rocks and flower patches.
    pub scenery: usize,
}

/// Scatters decorations across `[-extent, extent]` on both axes.
///
/// Objects keep clear of a disc of `clear_radius` around the origin so the
/// vehicle starts in open air; the disc is capped at half the extent. Every
/// object rests on the height field.
pub fn scatter<R: Rng>(
    rng: &mut R,
    field: &HeightField,
    counts: ScatterCounts,
    extent: f32,
    clear_radius: f32,
) -> DecorationNode {
    let span = sample_extent(extent);
    let clearing = clear_radius.min(span * 0.5);
    let place = |rng: &mut R| loop {
        let x = rng.gen_range(-span..=span);
        let z = rng.gen_range(-span..=span);
        if x.hypot(z) >= clearing {
            return Vec3::new(x, field.height_at(x, z), z);
        }
    };

    let forest = (0..counts.trees)
        .map(|_| {
            let at = place(rng);
            DecorationNode::object(DecorationKind::Tree, at).with_children(vec![
                DecorationNode::part(DecorationKind::Tree, at + Vec3::Y * 1.5),
                DecorationNode::part(DecorationKind::Tree, at + Vec3::Y * 4.0),
            ])
        })
        .collect();

    let mut village = Vec::with_capacity(counts.buildings + counts.fences);
    for _ in 0..counts.buildings {
        let at = place(rng);
        village.push(
            DecorationNode::object(DecorationKind::Building, at).with_children(vec![
                DecorationNode::part(DecorationKind::Building, at + Vec3::Y * 3.0),
                DecorationNode::part(DecorationKind::Building, at + Vec3::Y * 7.0),
            ]),
        );
    }
    for _ in 0..counts.fences {
        let at = place(rng);
        village.push(DecorationNode::object(DecorationKind::Fence, at));
    }

    let scenery = (0..counts.scenery)
        .map(|i| {
            let kind = if i % 2 == 0 {
                DecorationKind::Rock
            } else {
                DecorationKind::Flower
            };
            DecorationNode::object(kind, place(rng))
        })
        .collect();

    DecorationNode::group(vec![
        DecorationNode::group(forest),
        DecorationNode::group(village),
        DecorationNode::group(scenery),
    ])
}
