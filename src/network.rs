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

//! The layered flow network of the allocation problem.
//!
//! The network consists of the following layers
//!
//! ```text
//! ff_source -> source -> officers -> allocation slots -> shifts -> sink
//!     \_________________^
//! ```
//!
//! Each officer has one allocation node per day, which is connected to the
//! shifts of all preferred organisations on that day. Every edge out of an
//! allocation node has capacity 1, hence an officer works at most one shift
//! per day.
//!
//! The minimal number of shifts is modelled as lower bound on the edges
//! `source -> officer`. The lower bounds are eliminated by the usual
//! transformation: the demand of each node is supplied by an edge from the
//! additional source `ff_source`, and the max flow problem is solved from
//! `ff_source` to `sink`.
//!
//! # Example
//!
//! ```
//! use rs_roster::network::FlowNetwork;
//! use rs_roster::DAYS;
//!
//! let net = FlowNetwork::<i64>::new(&[vec![true]], &[vec![1, 0, 0]], 0, 30).unwrap();
//!
//! // ff_source, source, sink, 1 officer, 90 shifts and 30 allocation nodes
//! assert_eq!(net.size(), 3 + 1 + 3 * DAYS + DAYS);
//! assert_eq!(net.total_required(), 30);
//! assert_eq!(net.edge(net.shift_sink_edge(0, 4, 0)).upper(), 1);
//! ```

mod edges;
mod nodes;

pub use self::edges::{EdgeId, EdgeKind, FlowEdge, ResidualEdge, ResidualEdgeId};
pub use self::nodes::{Node, NodeId, NodeKind, ResidualNode};

use crate::error::{Error, Result};
use crate::num::traits::NumCast;
use crate::{FlowNum, DAYS, SHIFTS_PER_DAY};

use log::debug;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// A shift whose requirement is not met by the computed flow.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Shortfall<F> {
    pub org: usize,
    pub day: usize,
    pub slot: usize,
    /// The number of officers required on this shift.
    pub required: F,
    /// The number of officers actually assigned.
    pub assigned: F,
}

/// The flow network of an allocation problem.
pub struct FlowNetwork<F> {
    nodes: Vec<Node<F>>,
    edges: Vec<FlowEdge<F>>,
    ff_source: NodeId,
    source: NodeId,
    sink: NodeId,
    officers: Vec<NodeId>,
    // indexed by (org * DAYS + day) * SHIFTS_PER_DAY + slot
    shifts: Vec<NodeId>,
    // the edges shift -> sink, parallel to `shifts`
    sink_edges: Vec<EdgeId>,
    // indexed by officer * DAYS + day
    allocations: Vec<NodeId>,
    total_required: F,
}

fn cast<F: FlowNum>(x: u32, what: &'static str) -> Result<F> {
    <F as NumCast>::from(x).ok_or(Error::Overflow { what })
}

/// Check the dimensions and bounds of an allocation problem.
pub(crate) fn validate(
    preferences: &[Vec<bool>],
    officers_per_org: &[Vec<u32>],
    min_shifts: u32,
    max_shifts: u32,
) -> Result<()> {
    if preferences.is_empty() {
        return Err(Error::NoOfficers);
    }
    if officers_per_org.is_empty() {
        return Err(Error::NoOrganisations);
    }
    let norgs = officers_per_org.len();
    if let Some((officer, prefs)) = preferences.iter().enumerate().find(|(_, p)| p.len() != norgs) {
        return Err(Error::PreferenceLength {
            officer,
            expected: norgs,
            found: prefs.len(),
        });
    }
    if let Some((org, reqs)) = officers_per_org
        .iter()
        .enumerate()
        .find(|(_, r)| r.len() != SHIFTS_PER_DAY)
    {
        return Err(Error::RequirementLength {
            org,
            expected: SHIFTS_PER_DAY,
            found: reqs.len(),
        });
    }
    if max_shifts < min_shifts {
        return Err(Error::ShiftBounds {
            min: min_shifts,
            max: max_shifts,
        });
    }
    Ok(())
}

impl<F> FlowNetwork<F>
where
    F: FlowNum,
{
    /// Build the flow network of an allocation problem.
    ///
    /// - `preferences`: one row per officer with one flag per organisation
    /// - `officers_per_org`: one row per organisation with the number of
    ///   officers required on each of the shift slots, the same on every day
    /// - `min_shifts`, `max_shifts`: bounds on the number of shifts of each
    ///   officer
    ///
    /// All flows are zero afterwards.
    pub fn new(
        preferences: &[Vec<bool>],
        officers_per_org: &[Vec<u32>],
        min_shifts: u32,
        max_shifts: u32,
    ) -> Result<Self> {
        validate(preferences, officers_per_org, min_shifts, max_shifts)?;

        let nofficers = preferences.len();
        let norgs = officers_per_org.len();
        let nshifts = norgs * DAYS * SHIFTS_PER_DAY;
        let nallocs = nofficers * DAYS;

        let mut net = FlowNetwork {
            nodes: Vec::with_capacity(3 + nofficers + nshifts + nallocs),
            edges: vec![],
            ff_source: NodeId(0),
            source: NodeId(0),
            sink: NodeId(0),
            officers: Vec::with_capacity(nofficers),
            shifts: Vec::with_capacity(nshifts),
            sink_edges: Vec::with_capacity(nshifts),
            allocations: Vec::with_capacity(nallocs),
            total_required: F::zero(),
        };

        net.ff_source = net.add_node(NodeKind::SuperSource);
        net.source = net.add_node(NodeKind::Source);
        net.sink = net.add_node(NodeKind::Sink);

        for (officer, prefs) in preferences.iter().enumerate() {
            let u = net.add_node(NodeKind::Officer {
                officer,
                preferences: prefs.clone(),
            });
            net.officers.push(u);
        }

        for (org, reqs) in officers_per_org.iter().enumerate() {
            for day in 0..DAYS {
                for (slot, &req) in reqs.iter().enumerate() {
                    let req = cast(req, "shift requirement")?;
                    let u = net.add_node(NodeKind::Shift { org, day, slot, req });
                    net.shifts.push(u);
                }
            }
        }

        let one = F::one();
        for (officer, prefs) in preferences.iter().enumerate() {
            let o = net.officers[officer];
            for day in 0..DAYS {
                let a = net.add_node(NodeKind::Allocation { officer, day });
                net.allocations.push(a);
                net.add_edge(o, a, one);
                for org in (0..norgs).filter(|&org| prefs[org]) {
                    for slot in 0..SHIFTS_PER_DAY {
                        let s = net.shift(org, day, slot);
                        net.add_edge(a, s, one);
                    }
                }
            }
        }

        let mut total_required = F::zero();
        for i in 0..net.shifts.len() {
            let s = net.shifts[i];
            let req = match net.nodes[s.0].kind() {
                NodeKind::Shift { req, .. } => *req,
                _ => unreachable!("shift layer contains only shift nodes"),
            };
            let e = net.add_edge(s, net.sink, req);
            net.sink_edges.push(e);
            total_required = total_required
                .checked_add(&req)
                .ok_or(Error::Overflow { what: "total requirement" })?;
        }
        net.total_required = total_required;

        let (source, ff_source) = (net.source, net.ff_source);
        net.nodes[source.0].demand -= total_required;

        let min = cast::<F>(min_shifts, "minimal number of shifts")?;
        let free = cast::<F>(max_shifts - min_shifts, "number of optional shifts")?;
        for i in 0..nofficers {
            let o = net.officers[i];
            net.add_edge(source, o, free);
            net.nodes[o.0].demand -= min;
            let demand = &mut net.nodes[source.0].demand;
            *demand = demand
                .checked_sub(&min)
                .ok_or(Error::Overflow { what: "demand of the source" })?;
            let supply = net.nodes[o.0].demand.abs();
            net.add_edge(ff_source, o, supply);
        }

        let supply = F::zero()
            .checked_sub(&net.nodes[source.0].demand)
            .ok_or(Error::Overflow { what: "demand of the source" })?;
        net.add_edge(ff_source, source, supply);

        debug!(
            "Flow network with {} nodes and {} edges, total requirement {:?}",
            net.size(),
            net.num_edges(),
            net.total_required
        );

        Ok(net)
    }

    fn add_node(&mut self, kind: NodeKind<F>) -> NodeId {
        self.nodes.push(Node::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    fn add_edge(&mut self, u: NodeId, v: NodeId, upper: F) -> EdgeId {
        let e = EdgeId(self.edges.len());
        self.edges.push(FlowEdge::new(u, v, F::zero(), upper));
        self.nodes[u.0].add_edge(e);
        e
    }

    /// The source of the max-flow problem.
    pub fn ff_source(&self) -> NodeId {
        self.ff_source
    }

    /// The source feeding the optional shifts of the officers.
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    /// Return the number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn num_officers(&self) -> usize {
        self.officers.len()
    }

    pub fn num_orgs(&self) -> usize {
        self.shifts.len() / (DAYS * SHIFTS_PER_DAY)
    }

    /// The sum of all shift requirements.
    pub fn total_required(&self) -> F {
        self.total_required
    }

    pub fn node(&self, u: NodeId) -> &Node<F> {
        &self.nodes[u.0]
    }

    pub fn edge(&self, e: EdgeId) -> &FlowEdge<F> {
        &self.edges[e.0]
    }

    pub(crate) fn edge_mut(&mut self, e: EdgeId) -> &mut FlowEdge<F> {
        &mut self.edges[e.0]
    }

    pub fn officer(&self, officer: usize) -> NodeId {
        self.officers[officer]
    }

    pub fn shift(&self, org: usize, day: usize, slot: usize) -> NodeId {
        self.shifts[(org * DAYS + day) * SHIFTS_PER_DAY + slot]
    }

    /// The edge from a shift node to the sink.
    pub fn shift_sink_edge(&self, org: usize, day: usize, slot: usize) -> EdgeId {
        self.sink_edges[(org * DAYS + day) * SHIFTS_PER_DAY + slot]
    }

    pub fn allocation(&self, officer: usize, day: usize) -> NodeId {
        self.allocations[officer * DAYS + day]
    }

    /// Iterator over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Iterator over all edges.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edges.len()).map(EdgeId)
    }

    /// Return the nodes layer by layer.
    ///
    /// The order is `ff_source`, `source`, officers, allocation nodes,
    /// shifts and finally `sink`.
    pub fn layers(&self) -> impl Iterator<Item = NodeId> + '_ {
        vec![self.ff_source, self.source]
            .into_iter()
            .chain(self.officers.iter().cloned())
            .chain(self.allocations.iter().cloned())
            .chain(self.shifts.iter().cloned())
            .chain(Some(self.sink))
    }

    /// Return the amount of flow entering `u` minus the amount leaving it.
    pub fn excess(&self, u: NodeId) -> F {
        let inflow = self
            .edges
            .iter()
            .filter(|e| e.end() == u)
            .fold(F::zero(), |acc, e| acc + e.flow());
        let outflow = self.nodes[u.0]
            .edges()
            .iter()
            .fold(F::zero(), |acc, &e| acc + self.edges[e.0].flow());
        inflow - outflow
    }

    /// Return `true` if flow is conserved at every node except the sources
    /// and the sink.
    pub fn is_conserving(&self) -> bool {
        let mut excess = vec![F::zero(); self.nodes.len()];
        for e in &self.edges {
            excess[e.start().0] -= e.flow();
            excess[e.end().0] += e.flow();
        }
        self.nodes()
            .filter(|&u| !self.nodes[u.0].kind().is_terminal())
            .all(|u| excess[u.0].is_zero())
    }

    /// Return `true` if `0 <= flow <= upper` holds on every edge.
    pub fn within_bounds(&self) -> bool {
        self.edges
            .iter()
            .all(|e| !e.flow().is_negative() && e.flow() <= e.upper())
    }

    /// Return the first shift whose sink edge is not saturated.
    ///
    /// Shifts are checked ordered by organisation, day and slot.
    pub fn first_shortfall(&self) -> Option<Shortfall<F>> {
        self.shifts.iter().zip(&self.sink_edges).find_map(|(&s, &e)| {
            let edge = &self.edges[e.0];
            match *self.nodes[s.0].kind() {
                NodeKind::Shift { org, day, slot, req } if edge.flow() != req => Some(Shortfall {
                    org,
                    day,
                    slot,
                    required: req,
                    assigned: edge.flow(),
                }),
                _ => None,
            }
        })
    }
}
