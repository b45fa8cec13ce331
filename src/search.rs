/*
 * Copyright (c) 2017, 2018, 2020, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Breadth-first-search for augmenting paths.

use crate::collections::ItemQueue;
use crate::network::NodeId;
use crate::residual::ResidualNetwork;
use crate::FlowNum;

/// Search an augmenting path from `src` to `snk`.
///
/// The search visits the nodes in breadth-first order and only uses
/// residual edges with positive value. The outgoing edges of a node are
/// scanned in the order they have been added to the residual network. Every
/// newly reached node records the edge used to reach it, so the path can be
/// recovered by [`ResidualNetwork::path`].
///
/// All visited flags and recorded edges of a previous search are cleared
/// before the search starts. The queue is cleared as well, it must be able to
/// hold every node of the network.
///
/// Returns `true` if `snk` has been reached.
///
/// # Panics
///
/// Panics if the queue runs out of space.
pub fn augmenting_path<F, Q>(res: &mut ResidualNetwork<F>, src: NodeId, snk: NodeId, mut queue: Q) -> bool
where
    F: FlowNum,
    Q: ItemQueue<NodeId>,
{
    assert_ne!(src, snk, "Source and sink node must not be equal");

    res.reset();
    queue.clear();

    res.node_mut(src).visited = true;
    if queue.push(src).is_err() {
        panic!("search queue has no capacity");
    }

    while let Some(u) = queue.pop() {
        for i in 0..res.node(u).edges().len() {
            let e = res.node(u).edges()[i];
            let (v, value) = {
                let edge = res.edge(e);
                (edge.end(), edge.value())
            };
            if res.node(v).is_visited() || value <= F::zero() {
                continue;
            }
            let node = res.node_mut(v);
            node.visited = true;
            node.edge_taken = Some(e);
            if v == snk {
                queue.clear();
                return true;
            }
            if queue.push(v).is_err() {
                panic!("search queue overflow, a node has been queued twice");
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::augmenting_path;
    use crate::collections::RingQueue;
    use crate::network::FlowNetwork;
    use crate::residual::ResidualNetwork;
    use crate::DAYS;

    use std::collections::VecDeque;

    #[test]
    fn test_shortest_path() {
        let net = FlowNetwork::<i64>::new(&[vec![true]], &[vec![0, 1, 0]], 0, 30).unwrap();
        let mut res = ResidualNetwork::new(&net);
        let (src, snk) = (net.ff_source(), net.sink());

        assert!(augmenting_path(&mut res, src, snk, RingQueue::with_capacity(net.size())));

        // ff_source -> source -> officer -> allocation -> shift -> sink
        let path: Vec<_> = res.path(src, snk).map(|e| res.edge(e).end()).collect();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], snk);
        assert_eq!(path[1], net.shift(0, 0, 1));
        assert_eq!(path[2], net.allocation(0, 0));
        assert_eq!(path[3], net.officer(0));
        assert_eq!(path[4], net.source());
        assert_eq!(res.bottleneck(src, snk), Some(1));
    }

    #[test]
    fn test_no_path() {
        let net = FlowNetwork::<i64>::new(&[vec![true]], &[vec![1, 0, 0]], 0, 0).unwrap();
        let mut res = ResidualNetwork::new(&net);
        let (src, snk) = (net.ff_source(), net.sink());

        assert!(!augmenting_path(&mut res, src, snk, VecDeque::new()));
        assert!(!res.node(snk).is_visited());
        assert!(res.node(net.source()).is_visited());
        assert!(!res.node(net.officer(0)).is_visited());
        assert_eq!(res.bottleneck(src, snk), None);
    }

    #[test]
    fn test_search_resets() {
        let net = FlowNetwork::<i64>::new(&[vec![true]], &[vec![1, 0, 0]], 0, 30).unwrap();
        let mut res = ResidualNetwork::new(&net);
        let (src, snk) = (net.ff_source(), net.sink());
        let mut queue = RingQueue::with_capacity(net.size());

        assert!(augmenting_path(&mut res, src, snk, &mut queue));
        assert!(augmenting_path(&mut res, src, snk, &mut queue));
        assert!(res.node(src).is_visited());
        assert!(res.node(src).edge_taken().is_none());
        // all allocation nodes are queued before the first shift is scanned
        assert!(res.node(net.allocation(0, DAYS - 1)).is_visited());
        let e = res.node(snk).edge_taken().unwrap();
        assert_eq!(res.edge(e).start(), net.shift(0, 0, 0));
    }
}
