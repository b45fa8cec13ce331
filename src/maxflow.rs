/*
 * Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! The max flow algorithm of Ford and Fulkerson on the allocation network.
//!
//! Augmenting paths are found by breadth-first-search, hence this is the
//! variant of Edmonds and Karp.
//!
//! # Example
//!
//! ```
//! use rs_roster::maxflow::ford_fulkerson;
//! use rs_roster::network::FlowNetwork;
//!
//! let prefs = vec![vec![true, false], vec![false, true]];
//! let reqs = vec![vec![1, 0, 0], vec![0, 0, 1]];
//! let mut net = FlowNetwork::<i64>::new(&prefs, &reqs, 0, 30).unwrap();
//!
//! let value = ford_fulkerson(&mut net);
//!
//! assert_eq!(value, 60);
//! assert!(net.is_conserving());
//! assert!(net.first_shortfall().is_none());
//! ```

use crate::collections::RingQueue;
use crate::network::{EdgeKind, FlowNetwork, NodeId};
use crate::residual::ResidualNetwork;
use crate::search::augmenting_path;
use crate::FlowNum;

use log::{debug, trace};

/// Max-flow algorithm of Ford and Fulkerson.
///
/// The residual network is built once when the algorithm is created. Each
/// augmentation updates the flow of the network and the values of the
/// residual network in place.
pub struct FordFulkerson<'a, F> {
    net: &'a mut FlowNetwork<F>,
    res: ResidualNetwork<F>,
    queue: RingQueue<NodeId>,
    value: F,
    augmentations: usize,
}

impl<'a, F> FordFulkerson<'a, F>
where
    F: FlowNum,
{
    /// Create a new instance for the current flow of `net`.
    pub fn new(net: &'a mut FlowNetwork<F>) -> Self {
        let res = ResidualNetwork::new(net);
        let queue = RingQueue::with_capacity(net.size());
        FordFulkerson {
            net,
            res,
            queue,
            value: F::zero(),
            augmentations: 0,
        }
    }

    /// Return the underlying network.
    pub fn as_network(&self) -> &FlowNetwork<F> {
        &*self.net
    }

    pub fn residual(&self) -> &ResidualNetwork<F> {
        &self.res
    }

    /// Return the amount of flow pushed from `ff_source` so far.
    pub fn value(&self) -> F {
        self.value
    }

    /// Return the number of augmenting paths found so far.
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    /// Search one augmenting path and push the maximal amount along it.
    ///
    /// Returns `false` if there is no augmenting path, i.e. the flow is
    /// maximal.
    pub fn augment(&mut self) -> bool {
        let src = self.net.ff_source();
        let snk = self.net.sink();

        if !augmenting_path(&mut self.res, src, snk, &mut self.queue) {
            return false;
        }

        let df = match self.res.bottleneck(src, snk) {
            Some(df) => df,
            None => unreachable!("sink reached without a recorded path"),
        };
        debug_assert!(df > F::zero());

        let mut len = 0;
        let mut v = snk;
        while v != src {
            let e = match self.res.node(v).edge_taken() {
                Some(e) => e,
                None => unreachable!("node {} on the path has no incoming edge", v),
            };
            let (edge, kind, u) = {
                let redge = self.res.edge(e);
                (redge.edge(), redge.kind(), redge.start())
            };
            match kind {
                EdgeKind::Forward => self.net.edge_mut(edge).add_flow(df),
                EdgeKind::Backward => self.net.edge_mut(edge).add_flow(-df),
            }
            self.res.sync(&*self.net, edge);
            len += 1;
            v = u;
        }

        self.res.reset();
        self.value += df;
        self.augmentations += 1;
        trace!("Augmentation {}: pushed {:?} along {} edges", self.augmentations, df, len);

        true
    }

    /// Augment until the flow is maximal and return its value.
    pub fn run(&mut self) -> F {
        while self.augment() {}
        debug!(
            "Maximal flow {:?} after {} augmentations",
            self.value, self.augmentations
        );
        self.value
    }
}

/// Compute a maximal flow from `ff_source` to `sink` of `net`.
///
/// The flow is stored in the network, the function returns its value.
pub fn ford_fulkerson<F>(net: &mut FlowNetwork<F>) -> F
where
    F: FlowNum,
{
    FordFulkerson::new(net).run()
}

#[cfg(test)]
mod tests {
    use super::{ford_fulkerson, FordFulkerson};
    use crate::network::FlowNetwork;
    use crate::DAYS;

    fn symmetric<F: crate::FlowNum>(ff: &FordFulkerson<F>) -> bool {
        let res = ff.residual();
        let net = ff.as_network();
        res.edges().all(|e| {
            let c = res.complement(e);
            res.edge(e).value() + res.edge(c).value() == net.edge(res.edge(e).edge()).upper()
        })
    }

    #[test]
    fn test_invariants_during_augmentation() {
        let prefs = vec![vec![true, true], vec![true, false], vec![false, true]];
        let reqs = vec![vec![1, 1, 0], vec![0, 0, 1]];
        let mut net = FlowNetwork::<i64>::new(&prefs, &reqs, 5, 30).unwrap();
        let total = net.total_required();

        let mut ff = FordFulkerson::new(&mut net);
        let mut last = 0;
        while ff.augment() {
            assert!(ff.value() > last);
            last = ff.value();
            assert!(ff.as_network().is_conserving());
            assert!(ff.as_network().within_bounds());
            assert!(symmetric(&ff));
            assert!(ff.as_network().nodes().all(|u| !ff.residual().node(u).is_visited()));
        }
        assert_eq!(ff.value(), total);
        assert!(ff.augmentations() as i64 <= total);
        assert!(!ff.augment());
        assert!(ff.as_network().first_shortfall().is_none());
    }

    #[test]
    fn test_value_is_sink_inflow() {
        let prefs = vec![vec![true], vec![true]];
        let reqs = vec![vec![2, 1, 0]];
        let mut net = FlowNetwork::<i32>::new(&prefs, &reqs, 0, 30).unwrap();
        let value = ford_fulkerson(&mut net);

        // two officers can work at most two shifts per day
        assert_eq!(value, 2 * DAYS as i32);
        assert_eq!(net.excess(net.sink()), value);
        assert_eq!(-net.excess(net.ff_source()), value);
        assert!(net.first_shortfall().is_some());
    }

    #[test]
    fn test_max_shifts_limit() {
        let prefs = vec![vec![true]];
        let reqs = vec![vec![1, 0, 0]];
        let mut net = FlowNetwork::<i64>::new(&prefs, &reqs, 0, 10).unwrap();
        assert_eq!(ford_fulkerson(&mut net), 10);
        let short = net.first_shortfall().unwrap();
        assert_eq!((short.org, short.day, short.slot), (0, 10, 0));
    }

    #[test]
    fn test_empty_requirement() {
        let prefs = vec![vec![true]];
        let reqs = vec![vec![0, 0, 0]];
        let mut net = FlowNetwork::<i64>::new(&prefs, &reqs, 0, 30).unwrap();
        assert_eq!(ford_fulkerson(&mut net), 0);
        assert!(net.first_shortfall().is_none());
    }
}
