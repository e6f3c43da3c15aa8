//! Scene host: the node/material surface the viewer core writes into.
//!
//! The core never owns meshes. It writes transforms, visibility and material
//! opacity through [`SceneHost`], which a renderer implements over its own
//! scene graph. [`SceneGraph`] is a plain in-memory implementation used by
//! the native viewer and by tests.

use crate::transform::Pose;

// ---------------------------------------------------------------------------
// IDs
// ---------------------------------------------------------------------------

/// Handle to a node in a [`SceneHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

// ---------------------------------------------------------------------------
// Materials
// ---------------------------------------------------------------------------

/// The material properties the core touches.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Material name from the asset.
    pub name: String,
    /// Base colour, linear RGB.
    pub color: [f32; 3],
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Whether the renderer should alpha-blend this material.
    pub transparent: bool,
}

impl Material {
    /// Opaque material with the given colour.
    #[must_use]
    pub fn opaque(name: impl Into<String>, color: [f32; 3]) -> Self {
        Self {
            name: name.into(),
            color,
            opacity: 1.0,
            transparent: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Host trait
// ---------------------------------------------------------------------------

/// Transform, visibility and material access on a host scene graph.
pub trait SceneHost {
    /// Write a node's local transform.
    fn set_pose(&mut self, node: NodeId, pose: &Pose);

    /// Read a node's local transform.
    fn pose(&self, node: NodeId) -> Option<Pose>;

    /// Show or hide a node and its subtree.
    fn set_visible(&mut self, node: NodeId, visible: bool);

    /// Visit every material on meshes in the subtree rooted at `node`.
    fn visit_materials(&mut self, node: NodeId, visit: &mut dyn FnMut(&mut Material));

    /// Make every material under `node` transparent with `opacity`.
    fn set_subtree_opacity(&mut self, node: NodeId, opacity: f32) {
        self.visit_materials(node, &mut |material: &mut Material| {
            material.transparent = true;
            material.opacity = opacity;
        });
    }
}

// ---------------------------------------------------------------------------
// In-memory graph
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Node {
    name: String,
    pose: Pose,
    visible: bool,
    children: Vec<NodeId>,
    materials: Vec<Material>,
}

/// Minimal in-memory scene graph.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
}

impl SceneGraph {
    /// Empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group node under `parent` (or as a root).
    pub fn add_node(&mut self, name: &str, parent: Option<NodeId>) -> NodeId {
        self.insert(name, parent, Vec::new())
    }

    /// Add a mesh node carrying `materials`.
    pub fn add_mesh(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        materials: Vec<Material>,
    ) -> NodeId {
        self.insert(name, parent, materials)
    }

    /// First node with `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .and_then(|i| u32::try_from(i).ok())
            .map(NodeId)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether a node is visible.
    #[must_use]
    pub fn is_visible(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|n| n.visible)
    }

    /// Materials directly on a node.
    #[must_use]
    pub fn materials(&self, node: NodeId) -> &[Material] {
        self.get(node)
            .map(|n| n.materials.as_slice())
            .unwrap_or_default()
    }

    /// `node` and all of its descendants, depth first.
    #[must_use]
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(n) = self.get(id) {
                out.push(id);
                stack.extend(n.children.iter().rev().copied());
            }
        }
        out
    }

    fn insert(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        materials: Vec<Material>,
    ) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(Node {
            name: name.to_owned(),
            pose: Pose::default(),
            visible: true,
            children: Vec::new(),
            materials,
        });
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0 as usize)
    }

    fn get_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node.0 as usize)
    }
}

impl SceneHost for SceneGraph {
    fn set_pose(&mut self, node: NodeId, pose: &Pose) {
        if let Some(n) = self.get_mut(node) {
            n.pose = *pose;
        }
    }

    fn pose(&self, node: NodeId) -> Option<Pose> {
        self.get(node).map(|n| n.pose)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(n) = self.get_mut(node) {
            n.visible = visible;
        }
    }

    fn visit_materials(&mut self, node: NodeId, visit: &mut dyn FnMut(&mut Material)) {
        for id in self.subtree(node) {
            if let Some(n) = self.get_mut(id) {
                for material in &mut n.materials {
                    visit(material);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn graph() -> (SceneGraph, NodeId, NodeId) {
        let mut graph = SceneGraph::new();
        let root = graph.add_node("ct_machine", None);
        let body = graph.add_mesh(
            "body",
            Some(root),
            vec![Material::opaque("shell", [0.9, 0.9, 0.9])],
        );
        let _ = graph.add_mesh(
            "ring",
            Some(body),
            vec![
                Material::opaque("ring", [0.2, 0.2, 0.2]),
                Material::opaque("glass", [0.5, 0.6, 0.7]),
            ],
        );
        let other = graph.add_mesh(
            "logo",
            None,
            vec![Material::opaque("logo", [0.5, 0.4, 0.9])],
        );
        (graph, root, other)
    }

    #[test]
    fn subtree_is_depth_first() {
        let (graph, root, _) = graph();
        assert_eq!(graph.subtree(root), vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(graph.find("ring"), Some(NodeId(2)));
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn subtree_opacity_only_touches_subtree() {
        let (mut graph, root, other) = graph();
        graph.set_subtree_opacity(root, 0.25);
        for id in graph.subtree(root) {
            for material in graph.materials(id) {
                assert!(material.transparent);
                assert_eq!(material.opacity, 0.25);
            }
        }
        assert!(!graph.materials(other)[0].transparent);
    }

    #[test]
    fn pose_and_visibility() {
        let (mut graph, root, _) = graph();
        let pose = Pose::new(Vec3::X, Vec3::Y, 2.0);
        graph.set_pose(root, &pose);
        graph.set_visible(root, false);
        assert_eq!(graph.pose(root), Some(pose));
        assert!(!graph.is_visible(root));
        assert_eq!(graph.pose(NodeId(99)), None);
    }
}
