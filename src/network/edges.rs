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

//! Edges of the flow network and of its residual network.

use super::NodeId;
use crate::FlowNum;

use std::fmt;

/// Edge of the flow network.
///
/// This is basically a newtype of the edge index.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Edge of the residual network.
///
/// Residual edges are always created in pairs: the forward edge has an even
/// index, its backward complement the next odd index.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct ResidualEdgeId(pub(crate) usize);

impl ResidualEdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ResidualEdgeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}{}", if (self.0 & 1) == 0 { "+" } else { "-" }, self.0 >> 1)
    }
}

/// A directed edge with lower and upper flow bounds.
#[derive(Clone, Debug)]
pub struct FlowEdge<F> {
    start: NodeId,
    end: NodeId,
    lower: F,
    upper: F,
    flow: F,
}

impl<F> FlowEdge<F>
where
    F: FlowNum,
{
    pub(crate) fn new(start: NodeId, end: NodeId, lower: F, upper: F) -> Self {
        debug_assert!(!lower.is_negative() && lower <= upper);
        FlowEdge {
            start,
            end,
            lower,
            upper,
            flow: F::zero(),
        }
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    pub fn lower(&self) -> F {
        self.lower
    }

    pub fn upper(&self) -> F {
        self.upper
    }

    pub fn flow(&self) -> F {
        self.flow
    }

    /// The amount of flow that can still be pushed along this edge.
    pub fn residual_capacity(&self) -> F {
        self.upper - self.flow
    }

    /// Change the flow on this edge by `df`.
    ///
    /// # Panics
    ///
    /// Panics if the new flow leaves the interval `[0, upper]`. This can
    /// only happen because of a broken augmentation.
    pub(crate) fn add_flow(&mut self, df: F) {
        self.flow += df;
        assert!(
            !self.flow.is_negative() && self.flow <= self.upper,
            "flow {:?} on edge {} -> {} violates bounds [0, {:?}]",
            self.flow,
            self.start,
            self.end,
            self.upper
        );
    }
}

/// Direction of a residual edge relative to its flow edge.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EdgeKind {
    /// Same direction as the flow edge, value is the residual capacity.
    Forward,
    /// Opposite direction, value is the current flow.
    Backward,
}

/// An edge of the residual network.
#[derive(Clone, Debug)]
pub struct ResidualEdge<F> {
    pub(crate) start: NodeId,
    pub(crate) end: NodeId,
    pub(crate) value: F,
    pub(crate) kind: EdgeKind,
    pub(crate) edge: EdgeId,
    pub(crate) complement: ResidualEdgeId,
}

impl<F> ResidualEdge<F>
where
    F: FlowNum,
{
    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    /// The amount of flow this edge can carry in the residual network.
    pub fn value(&self) -> F {
        self.value
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// The flow edge this residual edge originates from.
    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    /// The paired edge in opposite direction.
    pub fn complement(&self) -> ResidualEdgeId {
        self.complement
    }
}
