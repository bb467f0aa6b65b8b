//! # Scene Graph
//!
//! Arena that owns every [`Transform`] in a scene and tracks the parent/child
//! links between them. Parents hold an ordered list of child ids, children
//! hold a non-owning id of their parent.
//!
//! Every mutation recomposes eagerly: when a call returns, each node in the
//! affected subtree satisfies `world = parent.world * local`. Reparenting never
//! alters a local pose, only the world matrices below the moved node.
//!
//! Ids are never reused, so a stale [`TransformId`] from a removed subtree
//! reports [`GraphError::UnknownTransform`] instead of aliasing a new node.

use crate::gfx::transform::Transform;
use crate::math::{Matrix4, Vector3};

/// Handle to a node in a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransformId(usize);

impl TransformId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("transform {0:?} not found")]
    UnknownTransform(TransformId),
    #[error("transform {0:?} cannot be its own parent")]
    SelfParent(TransformId),
    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        child: TransformId,
        parent: TransformId,
    },
}

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Clone)]
struct Node {
    transform: Transform,
    parent: Option<TransformId>,
    children: Vec<TransformId>,
}

#[derive(Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: Vec<Option<Node>>,
    live: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parentless node and returns its id.
    pub fn insert(&mut self, mut transform: Transform) -> TransformId {
        transform.set_parent_world(None);
        let id = TransformId(self.nodes.len());
        self.nodes.push(Some(Node {
            transform,
            parent: None,
            children: Vec::new(),
        }));
        self.live += 1;
        id
    }

    /// Adds a new node directly under `parent`.
    pub fn insert_child(
        &mut self,
        parent: TransformId,
        transform: Transform,
    ) -> Result<TransformId> {
        self.node(parent)?;
        let id = self.insert(transform);
        self.set_parent(id, parent)?;
        Ok(id)
    }

    /// Removes `id` and its whole subtree. Returns the number of nodes dropped.
    pub fn remove(&mut self, id: TransformId) -> Result<usize> {
        self.detach(id)?;
        let subtree = self.subtree(id)?;
        for node in &subtree {
            self.nodes[node.0] = None;
        }
        self.live -= subtree.len();
        log::debug!("removed {} transform(s) rooted at {:?}", subtree.len(), id);
        Ok(subtree.len())
    }

    pub fn contains(&self, id: TransformId) -> bool {
        self.node(id).is_ok()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn get(&self, id: TransformId) -> Option<&Transform> {
        self.node(id).ok().map(|n| &n.transform)
    }

    pub fn transform(&self, id: TransformId) -> Result<&Transform> {
        self.node(id).map(|n| &n.transform)
    }

    pub fn world_matrix(&self, id: TransformId) -> Result<Matrix4> {
        self.node(id).map(|n| *n.transform.world_matrix())
    }

    pub fn parent(&self, id: TransformId) -> Result<Option<TransformId>> {
        self.node(id).map(|n| n.parent)
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: TransformId) -> Result<&[TransformId]> {
        self.node(id).map(|n| n.children.as_slice())
    }

    /// Nodes without a parent, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = TransformId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Some(node) if node.parent.is_none() => Some(TransformId(i)),
            _ => None,
        })
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: TransformId) -> Result<Vec<TransformId>> {
        self.node(id)?;
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            let node = self.node(current)?;
            stack.extend(node.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// True when `ancestor` appears on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: TransformId, id: TransformId) -> Result<bool> {
        let mut current = self.node(id)?.parent;
        while let Some(p) = current {
            if p == ancestor {
                return Ok(true);
            }
            current = self.node(p)?.parent;
        }
        Ok(false)
    }

    /// Makes `child` a child of `parent` and recomposes the moved subtree.
    ///
    /// Rejects parenting a node under itself or one of its descendants; the
    /// graph is left unchanged on error.
    pub fn set_parent(&mut self, child: TransformId, parent: TransformId) -> Result<()> {
        self.node(child)?;
        self.node(parent)?;
        if child == parent {
            return Err(GraphError::SelfParent(child));
        }
        if self.is_ancestor(child, parent)? {
            return Err(GraphError::CycleDetected { child, parent });
        }

        if self.node(child)?.parent != Some(parent) {
            self.detach(child)?;
            self.node_mut(parent)?.children.push(child);
            self.node_mut(child)?.parent = Some(parent);
        }

        let parent_world = self.world_matrix(parent)?;
        self.node_mut(child)?
            .transform
            .set_parent_world(Some(parent_world));
        self.cascade(child)?;
        log::debug!("parented {:?} under {:?}", child, parent);
        Ok(())
    }

    /// Same as [`SceneGraph::set_parent`] seen from the parent's side.
    pub fn add_child(&mut self, parent: TransformId, child: TransformId) -> Result<()> {
        self.set_parent(child, parent)
    }

    /// Detaches `id` from its parent; its world matrix falls back to the local
    /// matrix and the subtree below it is refreshed.
    pub fn remove_parent(&mut self, id: TransformId) -> Result<()> {
        self.detach(id)?;
        self.node_mut(id)?.transform.set_parent_world(None);
        self.cascade(id)?;
        log::debug!("detached {:?}", id);
        Ok(())
    }

    pub fn set_position(&mut self, id: TransformId, position: Vector3) -> Result<()> {
        self.update(id, |t| t.set_position(position))
    }

    pub fn set_rotation(&mut self, id: TransformId, rotation: Vector3) -> Result<()> {
        self.update(id, |t| t.set_rotation(rotation))
    }

    pub fn set_scale(&mut self, id: TransformId, scaling: Vector3) -> Result<()> {
        self.update(id, |t| t.set_scale(scaling))
    }

    pub fn set_axis_rotation(
        &mut self,
        id: TransformId,
        axis: Vector3,
        angle_degrees: f32,
    ) -> Result<()> {
        self.update(id, |t| t.set_axis_rotation(axis, angle_degrees))
    }

    pub fn translate(&mut self, id: TransformId, offset: Vector3) -> Result<()> {
        self.update(id, |t| t.translate(offset))
    }

    pub fn rotate(&mut self, id: TransformId, delta: Vector3) -> Result<()> {
        self.update(id, |t| t.rotate(delta))
    }

    /// Replaces the node's world matrix with its inverse. Children are not
    /// refreshed; the next pose change on the node restores the regular matrix.
    pub fn invert(&mut self, id: TransformId) -> Result<bool> {
        Ok(self.node_mut(id)?.transform.invert())
    }

    /// Applies `f` to the node's transform and recomposes its descendants.
    pub fn update<F>(&mut self, id: TransformId, f: F) -> Result<()>
    where
        F: FnOnce(&mut Transform),
    {
        f(&mut self.node_mut(id)?.transform);
        self.cascade(id)
    }

    /// Recomputes every descendant of `id` top-down from its parent's world
    /// matrix.
    fn cascade(&mut self, id: TransformId) -> Result<()> {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let (world, children) = {
                let node = self.node(current)?;
                (*node.transform.world_matrix(), node.children.clone())
            };
            for child in children {
                self.node_mut(child)?.transform.set_parent_world(Some(world));
                stack.push(child);
            }
        }
        Ok(())
    }

    /// Unlinks `id` from its parent's child list without touching matrices.
    fn detach(&mut self, id: TransformId) -> Result<()> {
        if let Some(parent) = self.node_mut(id)?.parent.take() {
            self.node_mut(parent)?.children.retain(|c| *c != id);
        }
        Ok(())
    }

    fn node(&self, id: TransformId) -> Result<&Node> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(GraphError::UnknownTransform(id))
    }

    fn node_mut(&mut self, id: TransformId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(GraphError::UnknownTransform(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posed(x: f32, y: f32, z: f32) -> Transform {
        Transform::from_pose(Vector3::new(x, y, z), Vector3::ZERO, Vector3::ONE)
    }

    #[test]
    fn test_add_child_composes_world() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(Transform::from_pose(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 45.0, 0.0),
            Vector3::splat(2.0),
        ));
        let b = graph.insert(posed(0.0, 1.0, 0.0));
        graph.add_child(a, b).unwrap();

        let a_world = graph.world_matrix(a).unwrap();
        let b_local = *graph.transform(b).unwrap().local_matrix();
        assert_eq!(graph.world_matrix(b).unwrap(), a_world * b_local);
        assert_eq!(graph.parent(b).unwrap(), Some(a));
        assert_eq!(graph.children(a).unwrap(), &[b]);
    }

    #[test]
    fn test_mutating_root_cascades() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(posed(1.0, 0.0, 0.0));
        let b = graph.insert_child(a, posed(0.0, 1.0, 0.0)).unwrap();
        let c = graph.insert_child(b, posed(0.0, 0.0, 1.0)).unwrap();

        graph.set_position(a, Vector3::new(10.0, 0.0, 0.0)).unwrap();
        graph.rotate(a, Vector3::new(0.0, 90.0, 0.0)).unwrap();

        let b_world = graph.world_matrix(b).unwrap();
        let c_world = graph.world_matrix(c).unwrap();
        let b_local = *graph.transform(b).unwrap().local_matrix();
        let c_local = *graph.transform(c).unwrap().local_matrix();
        assert_eq!(b_world, graph.world_matrix(a).unwrap() * b_local);
        assert_eq!(c_world, b_world * c_local);
        // +Z child offset swings onto +X under the 90 degree yaw
        assert!(graph
            .transform(c)
            .unwrap()
            .world_position()
            .approx_eq(Vector3::new(11.0, 1.0, 0.0), 1e-5));
    }

    #[test]
    fn test_reparent_keeps_local_pose() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(posed(5.0, 0.0, 0.0));
        let b = graph.insert(posed(0.0, 5.0, 0.0));
        let c = graph.insert_child(a, posed(1.0, 1.0, 1.0)).unwrap();
        let local = *graph.transform(c).unwrap().local_matrix();

        graph.set_parent(c, b).unwrap();
        assert_eq!(*graph.transform(c).unwrap().local_matrix(), local);
        assert!(graph.children(a).unwrap().is_empty());
        assert_eq!(graph.children(b).unwrap(), &[c]);
        assert_eq!(
            graph.transform(c).unwrap().world_position(),
            Vector3::new(1.0, 6.0, 1.0)
        );
    }

    #[test]
    fn test_remove_parent_falls_back_to_local() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(posed(5.0, 0.0, 0.0));
        let b = graph.insert_child(a, posed(1.0, 0.0, 0.0)).unwrap();
        let c = graph.insert_child(b, posed(1.0, 0.0, 0.0)).unwrap();

        graph.remove_parent(b).unwrap();
        assert_eq!(graph.parent(b).unwrap(), None);
        assert_eq!(
            graph.world_matrix(b).unwrap(),
            *graph.transform(b).unwrap().local_matrix()
        );
        assert_eq!(
            graph.transform(c).unwrap().world_position(),
            Vector3::new(2.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_cycles_are_rejected() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(Transform::new());
        let b = graph.insert_child(a, Transform::new()).unwrap();
        let c = graph.insert_child(b, Transform::new()).unwrap();

        assert_eq!(graph.set_parent(a, a), Err(GraphError::SelfParent(a)));
        assert_eq!(
            graph.set_parent(a, c),
            Err(GraphError::CycleDetected { child: a, parent: c })
        );
        // Unchanged
        assert_eq!(graph.parent(a).unwrap(), None);
        assert_eq!(graph.children(c).unwrap(), &[] as &[TransformId]);
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Transform::new());
        let a = graph.insert_child(root, Transform::new()).unwrap();
        let b = graph.insert_child(a, Transform::new()).unwrap();
        let other = graph.insert_child(root, Transform::new()).unwrap();

        assert_eq!(graph.remove(a).unwrap(), 2);
        assert!(!graph.contains(a));
        assert!(!graph.contains(b));
        assert_eq!(graph.children(root).unwrap(), &[other]);
        assert_eq!(graph.len(), 2);
        assert_eq!(
            graph.set_position(b, Vector3::ONE),
            Err(GraphError::UnknownTransform(b))
        );

        // Ids are not reused
        let fresh = graph.insert(Transform::new());
        assert_ne!(fresh, a);
        assert_ne!(fresh, b);
    }

    #[test]
    fn test_len_tracks_inserts_and_removals() {
        let mut graph = SceneGraph::new();
        assert!(graph.is_empty());
        let root = graph.insert(Transform::new());
        let a = graph.insert_child(root, Transform::new()).unwrap();
        graph.insert_child(a, Transform::new()).unwrap();
        graph.insert(Transform::new());
        assert_eq!(graph.len(), 4);

        assert_eq!(graph.remove(a).unwrap(), 2);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.remove(a), Err(GraphError::UnknownTransform(a)));
        assert_eq!(graph.len(), 2);

        graph.insert_child(root, Transform::new()).unwrap();
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.remove(root).unwrap(), 2);
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.len(), graph.roots().count());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Transform::new());
        let ids: Vec<_> = (0..4)
            .map(|_| graph.insert_child(root, Transform::new()).unwrap())
            .collect();
        assert_eq!(graph.children(root).unwrap(), ids.as_slice());
        assert_eq!(graph.subtree(root).unwrap().len(), 5);
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec![root]);
    }

    #[test]
    fn test_reparent_to_same_parent_is_stable() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(Transform::new());
        let a = graph.insert_child(root, Transform::new()).unwrap();
        let b = graph.insert_child(root, Transform::new()).unwrap();
        graph.add_child(root, a).unwrap();
        assert_eq!(graph.children(root).unwrap(), &[a, b]);
    }
}
