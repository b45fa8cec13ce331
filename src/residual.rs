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

//! The residual network of a flow network.
//!
//! Each edge `e = (u,v)` of the flow network yields two residual edges:
//! the forward edge `(u,v)` with value `upper(e) - flow(e)` and the backward
//! edge `(v,u)` with value `flow(e)`. Both edges are complements of each
//! other, the forward edge has index `2k` and the backward edge `2k+1`.
//!
//! The residual nodes have the same indices as the nodes of the flow
//! network. The residual network does not own the flow network, the flow
//! values are kept in sync by [`ResidualNetwork::sync`].

use crate::network::{EdgeId, EdgeKind, FlowNetwork, NodeId, ResidualEdge, ResidualEdgeId, ResidualNode};
use crate::FlowNum;

use std::cmp::min;

/// The residual network of a [`FlowNetwork`].
pub struct ResidualNetwork<F> {
    nodes: Vec<ResidualNode>,
    edges: Vec<ResidualEdge<F>>,
    // forward residual edge of each flow edge
    forward: Vec<ResidualEdgeId>,
}

impl<F> ResidualNetwork<F>
where
    F: FlowNum,
{
    /// Build the residual network for the current flow of `net`.
    ///
    /// The residual edges are created layer by layer (see
    /// [`FlowNetwork::layers`]), the outgoing edges of each node in insertion
    /// order.
    pub fn new(net: &FlowNetwork<F>) -> Self {
        let mut res = ResidualNetwork {
            nodes: net.nodes().map(ResidualNode::new).collect(),
            edges: Vec::with_capacity(2 * net.num_edges()),
            forward: vec![ResidualEdgeId(usize::max_value()); net.num_edges()],
        };

        for u in net.layers() {
            for &e in net.node(u).edges() {
                let edge = net.edge(e);
                let fwd = ResidualEdgeId(res.edges.len());
                let bwd = ResidualEdgeId(fwd.0 + 1);
                res.edges.push(ResidualEdge {
                    start: edge.start(),
                    end: edge.end(),
                    value: edge.residual_capacity(),
                    kind: EdgeKind::Forward,
                    edge: e,
                    complement: bwd,
                });
                res.edges.push(ResidualEdge {
                    start: edge.end(),
                    end: edge.start(),
                    value: edge.flow(),
                    kind: EdgeKind::Backward,
                    edge: e,
                    complement: fwd,
                });
                res.nodes[edge.start().index()].edges.push(fwd);
                res.nodes[edge.end().index()].edges.push(bwd);
                res.forward[e.index()] = fwd;
            }
        }

        res
    }

    /// Return the number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, u: NodeId) -> &ResidualNode {
        &self.nodes[u.index()]
    }

    pub(crate) fn node_mut(&mut self, u: NodeId) -> &mut ResidualNode {
        &mut self.nodes[u.index()]
    }

    pub fn edge(&self, e: ResidualEdgeId) -> &ResidualEdge<F> {
        &self.edges[e.0]
    }

    /// Iterator over all residual edges.
    pub fn edges(&self) -> impl Iterator<Item = ResidualEdgeId> + '_ {
        (0..self.edges.len()).map(ResidualEdgeId)
    }

    pub fn complement(&self, e: ResidualEdgeId) -> ResidualEdgeId {
        self.edges[e.0].complement
    }

    /// The forward residual edge of a flow edge.
    pub fn forward(&self, e: EdgeId) -> ResidualEdgeId {
        self.forward[e.index()]
    }

    /// Clear the search data of all nodes.
    pub fn reset(&mut self) {
        for u in self.nodes.iter_mut() {
            u.reset();
        }
    }

    /// Return the edges of the last search path from `src` to `snk`.
    ///
    /// The path is followed backwards from `snk` using the recorded
    /// incoming edges, so the edges are returned in reverse order. The
    /// iterator stops early if some node on the way has not been reached.
    pub fn path(&self, src: NodeId, snk: NodeId) -> impl Iterator<Item = ResidualEdgeId> + '_ {
        let mut v = snk;
        std::iter::from_fn(move || {
            if v == src {
                return None;
            }
            let e = self.nodes[v.index()].edge_taken?;
            v = self.edges[e.0].start;
            Some(e)
        })
    }

    /// Return the minimal value along the last search path.
    ///
    /// Returns `None` if `snk` has not been reached.
    pub fn bottleneck(&self, src: NodeId, snk: NodeId) -> Option<F> {
        if src != snk && self.nodes[snk.index()].edge_taken.is_none() {
            return None;
        }
        self.path(src, snk).map(|e| self.edges[e.0].value).fold(None, |df, x| {
            Some(match df {
                Some(df) => min(df, x),
                None => x,
            })
        })
    }

    /// Recompute the values of both residual edges of flow edge `e`.
    pub fn sync(&mut self, net: &FlowNetwork<F>, e: EdgeId) {
        let edge = net.edge(e);
        let fwd = self.forward[e.index()];
        let bwd = self.edges[fwd.0].complement;
        self.edges[fwd.0].value = edge.residual_capacity();
        self.edges[bwd.0].value = edge.flow();
    }
}

#[cfg(test)]
mod tests {
    use super::ResidualNetwork;
    use crate::network::{EdgeKind, FlowNetwork};

    fn network() -> FlowNetwork<i32> {
        let prefs = vec![vec![true, false], vec![true, true]];
        let reqs = vec![vec![1, 0, 1], vec![0, 2, 0]];
        FlowNetwork::new(&prefs, &reqs, 1, 20).unwrap()
    }

    #[test]
    fn test_pairs() {
        let net = network();
        let res = ResidualNetwork::new(&net);

        assert_eq!(res.size(), net.size());
        assert_eq!(res.num_edges(), 2 * net.num_edges());

        for e in res.edges() {
            let c = res.complement(e);
            assert_ne!(e, c);
            assert_eq!(res.complement(c), e);
            assert_eq!(c.index(), e.index() ^ 1);
            assert_eq!(res.edge(e).edge(), res.edge(c).edge());
            assert_eq!(res.edge(e).start(), res.edge(c).end());
            assert_eq!(res.edge(e).end(), res.edge(c).start());

            let edge = net.edge(res.edge(e).edge());
            assert_eq!(res.edge(e).value() + res.edge(c).value(), edge.upper());
            match res.edge(e).kind() {
                EdgeKind::Forward => {
                    assert_eq!(res.edge(e).value(), edge.upper());
                    assert_eq!(res.edge(e).start(), edge.start());
                    assert_eq!(res.forward(res.edge(e).edge()), e);
                }
                EdgeKind::Backward => assert_eq!(res.edge(e).value(), 0),
            }
        }
    }

    #[test]
    fn test_node_edges() {
        let net = network();
        let res = ResidualNetwork::new(&net);

        for u in net.nodes() {
            let r = res.node(u);
            assert_eq!(r.node(), u);
            assert!(!r.is_visited());
            assert!(r.edge_taken().is_none());
            assert!(r.edges().iter().all(|&e| res.edge(e).start() == u));
        }

        // the super source only has forward edges, in insertion order
        let ff = net.ff_source();
        let ends: Vec<_> = res.node(ff).edges().iter().map(|&e| res.edge(e).end()).collect();
        let expected: Vec<_> = net.node(ff).edges().iter().map(|&e| net.edge(e).end()).collect();
        assert_eq!(ends, expected);

        // an officer gets the backward edges of source and ff_source first
        let o = net.officer(1);
        let kinds: Vec<_> = res.node(o).edges().iter().map(|&e| res.edge(e).kind()).collect();
        assert_eq!(&kinds[..2], &[EdgeKind::Backward, EdgeKind::Backward]);
        assert!(kinds[2..].iter().all(|&k| k == EdgeKind::Forward));
        assert_eq!(res.edge(res.node(o).edges()[0]).end(), ff);
        assert_eq!(res.edge(res.node(o).edges()[1]).end(), net.source());

        // the sink only has backward edges
        assert!(res
            .node(net.sink())
            .edges()
            .iter()
            .all(|&e| res.edge(e).kind() == EdgeKind::Backward));
    }

    #[test]
    fn test_no_path_without_search() {
        let net = network();
        let res = ResidualNetwork::new(&net);
        assert_eq!(res.bottleneck(net.ff_source(), net.sink()), None);
        assert_eq!(res.path(net.ff_source(), net.sink()).count(), 0);
    }
}
