use rainhouse_base::Guid;
use rainhouse_rain::RainBuffer;
use rainhouse_wall::WallMesh;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tunable::Tunable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    Group,
    Wall,
    Rain,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ParameterValue {
    Integer(i64),
    Number(f64),
    Bool(bool),
}

pub type ParameterSet = BTreeMap<String, ParameterValue>;

/// Placement relative to the parent node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    /// Rotation about the vertical axis, in radians.
    pub rotation_y: f64,
}

impl Transform {
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            position: [x, y, z],
            rotation_y: 0.0,
        }
    }

    pub fn rotated_y(mut self, radians: f64) -> Self {
        self.rotation_y = radians;
        self
    }
}

#[derive(Clone, Debug)]
pub enum NodePayload {
    Wall(WallMesh),
    Rain(RainBuffer),
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub guid: Guid,
    pub name: String,
    pub category: NodeCategory,
    pub transform: Transform,
    pub parameters: ParameterSet,
    pub tunables: BTreeMap<String, Tunable>,
    pub payload: Option<NodePayload>,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            guid: Guid::new(),
            name: name.into(),
            category,
            transform: Transform::default(),
            parameters: ParameterSet::new(),
            tunables: BTreeMap::new(),
            payload: None,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeCategory::Group)
    }

    pub fn wall(name: impl Into<String>, mesh: WallMesh, transform: Transform) -> Self {
        let mut node = Self::new(name, NodeCategory::Wall);
        node.transform = transform;
        node.payload = Some(NodePayload::Wall(mesh));
        node
    }

    pub fn rain(name: impl Into<String>, buffer: RainBuffer) -> Self {
        let mut node = Self::new(name, NodeCategory::Rain);
        node.payload = Some(NodePayload::Rain(buffer));
        node
    }

    pub fn insert_parameter(&mut self, key: impl Into<String>, value: ParameterValue) {
        self.parameters.insert(key.into(), value);
    }

    pub fn insert_tunable(&mut self, key: impl Into<String>, tunable: Tunable) {
        self.tunables.insert(key.into(), tunable);
    }

    pub fn tunable(&self, key: &str) -> Option<&Tunable> {
        self.tunables.get(key)
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Depth-first, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        self.iter().find(|node| node.name == name)
    }

    pub fn find_by_guid(&self, guid: Guid) -> Option<&SceneNode> {
        self.iter().find(|node| node.guid == guid)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(name))
    }

    pub fn wall_mesh(&self) -> Option<&WallMesh> {
        match &self.payload {
            Some(NodePayload::Wall(mesh)) => Some(mesh),
            _ => None,
        }
    }

    /// First rain node in depth-first order.
    pub fn rain_node(&self) -> Option<&SceneNode> {
        self.iter()
            .find(|node| matches!(node.payload, Some(NodePayload::Rain(_))))
    }

    pub fn rain_node_mut(&mut self) -> Option<&mut SceneNode> {
        if matches!(self.payload, Some(NodePayload::Rain(_))) {
            return Some(self);
        }
        self.children.iter_mut().find_map(SceneNode::rain_node_mut)
    }

    pub fn rain_buffer_mut(&mut self) -> Option<&mut RainBuffer> {
        match &mut self.rain_node_mut()?.payload {
            Some(NodePayload::Rain(buffer)) => Some(buffer),
            _ => None,
        }
    }

    pub fn walls(&self) -> impl Iterator<Item = (&SceneNode, &WallMesh)> {
        self.iter()
            .filter_map(|node| node.wall_mesh().map(|mesh| (node, mesh)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> SceneNode {
        let mut root = SceneNode::group("scene");
        let mut house = SceneNode::group("house");
        house.add_child(SceneNode::group("porch"));
        root.add_child(house);
        root.add_child(SceneNode::group("yard"));
        root
    }

    #[test]
    fn iter_is_depth_first() {
        let root = tree();
        let names: Vec<_> = root.iter().map(|node| node.name.as_str()).collect();
        assert_eq!(names, ["scene", "house", "porch", "yard"]);
    }

    #[test]
    fn lookup_by_name_and_guid() {
        let mut root = tree();
        let guid = root.find("porch").map(|node| node.guid).expect("porch exists");
        assert_eq!(root.find_by_guid(guid).map(|n| n.name.as_str()), Some("porch"));

        let yard = root.find_mut("yard").expect("yard exists");
        yard.insert_parameter("Visible", ParameterValue::Bool(false));
        assert!(matches!(
            root.find("yard").and_then(|n| n.parameters.get("Visible")),
            Some(ParameterValue::Bool(false))
        ));
        assert!(root.find("garage").is_none());
    }

    #[test]
    fn rain_lookup_finds_nested_node() -> rainhouse_rain::Result<()> {
        let mut root = tree();
        let buffer = RainBuffer::from_positions(vec![0.0, 1.0, 2.0])?;
        root.children[1].add_child(SceneNode::rain("rain", buffer));

        assert_eq!(root.rain_node().map(|n| n.name.as_str()), Some("rain"));
        assert_eq!(root.rain_buffer_mut().map(|b| b.len()), Some(1));
        Ok(())
    }
}
