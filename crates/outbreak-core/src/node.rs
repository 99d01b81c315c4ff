//! The node data model: categories, infection states, and nodes.

use std::fmt;

use crate::geometry::Position;
use crate::id::NodeId;

/// Device category of a node. Closed set, fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Handheld device.
    Phone,
    /// Desktop or laptop.
    Computer,
    /// Embedded / connected appliance.
    Iot,
    /// Datacenter or backend host.
    Server,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Phone,
        Category::Computer,
        Category::Iot,
        Category::Server,
    ];

    /// The coarse class used for partial-similarity bonuses.
    pub fn class(self) -> CategoryClass {
        match self {
            Self::Phone | Self::Iot => CategoryClass::Light,
            Self::Computer | Self::Server => CategoryClass::Heavy,
        }
    }

    /// Lower-case name used in tables and logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Computer => "computer",
            Self::Iot => "iot",
            Self::Server => "server",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse grouping of [`Category`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CategoryClass {
    /// Phones and IoT devices.
    Light,
    /// Computers and servers.
    Heavy,
}

/// Infection state of a node.
///
/// The update rule only ever performs `Secure -> Infected`; `Infected` is
/// terminal. `Vulnerable` is part of the schema so later rules can target
/// it, but nothing currently assigns or reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// Not compromised.
    #[default]
    Secure,
    /// Reserved intermediate state.
    Vulnerable,
    /// Compromised. Never reverts.
    Infected,
}

impl NodeState {
    /// Stable numeric code, used for state hashing.
    pub fn code(self) -> u8 {
        match self {
            Self::Secure => 0,
            Self::Vulnerable => 1,
            Self::Infected => 2,
        }
    }
}

/// A simulated device.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Dense index, equal to the node's slot in the node list.
    pub id: NodeId,
    /// Location in the shared plane.
    pub position: Position,
    /// Device category.
    pub category: Category,
    /// Current infection state.
    pub state: NodeState,
}

impl Node {
    /// A new, secure node.
    pub fn new(id: NodeId, position: Position, category: Category) -> Self {
        Self {
            id,
            position,
            category,
            state: NodeState::Secure,
        }
    }

    /// `true` if the node is infected.
    #[inline]
    pub fn is_infected(&self) -> bool {
        self.state == NodeState::Infected
    }

    /// `true` if the node is secure.
    #[inline]
    pub fn is_secure(&self) -> bool {
        self.state == NodeState::Secure
    }

    /// Distance between two nodes' positions.
    #[inline]
    pub fn distance(&self, other: &Node) -> f64 {
        self.position.distance(&other.position)
    }
}
