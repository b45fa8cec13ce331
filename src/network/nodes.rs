/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

//! Nodes of the flow network and of its residual network.

use super::edges::{EdgeId, ResidualEdgeId};
use crate::FlowNum;

use std::fmt;

/// Node of the flow network.
///
/// This is basically a newtype of the node index.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// The role of a node in the allocation network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind<F> {
    /// The source of the max-flow problem resolving the node demands.
    SuperSource,
    /// The source feeding the officers up to their maximal workload.
    Source,
    Sink,
    Officer { officer: usize, preferences: Vec<bool> },
    /// A shift slot of an organisation on a given day.
    Shift { org: usize, day: usize, slot: usize, req: F },
    /// One node per officer and day, so that an officer works at most one
    /// shift per day.
    Allocation { officer: usize, day: usize },
}

impl<F> NodeKind<F> {
    /// Return `true` for the two sources and the sink.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeKind::SuperSource | NodeKind::Source | NodeKind::Sink)
    }
}

/// Data of a node in the flow network.
#[derive(Clone, Debug)]
pub struct Node<F> {
    kind: NodeKind<F>,
    pub(crate) demand: F,
    edges: Vec<EdgeId>,
}

impl<F> Node<F>
where
    F: FlowNum,
{
    pub(crate) fn new(kind: NodeKind<F>) -> Self {
        Node {
            kind,
            demand: F::zero(),
            edges: vec![],
        }
    }

    pub fn kind(&self) -> &NodeKind<F> {
        &self.kind
    }

    /// The imbalance introduced by lower bounds on incident edges.
    pub fn demand(&self) -> F {
        self.demand
    }

    /// The outgoing edges in insertion order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub(crate) fn add_edge(&mut self, e: EdgeId) {
        self.edges.push(e)
    }
}

/// Node of the residual network.
///
/// Mirrors a node of the flow network and carries the bookkeeping of the
/// augmenting path search.
#[derive(Clone, Debug)]
pub struct ResidualNode {
    pub(crate) node: NodeId,
    pub(crate) visited: bool,
    pub(crate) edge_taken: Option<ResidualEdgeId>,
    pub(crate) edges: Vec<ResidualEdgeId>,
}

impl ResidualNode {
    pub(crate) fn new(node: NodeId) -> Self {
        ResidualNode {
            node,
            visited: false,
            edge_taken: None,
            edges: vec![],
        }
    }

    /// The corresponding node of the flow network.
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// The residual edge used by the last search to reach this node.
    pub fn edge_taken(&self) -> Option<ResidualEdgeId> {
        self.edge_taken
    }

    pub fn edges(&self) -> &[ResidualEdgeId] {
        &self.edges
    }

    pub(crate) fn reset(&mut self) {
        self.visited = false;
        self.edge_taken = None;
    }
}
