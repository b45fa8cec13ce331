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

//! Allocation of officers to the shifts of organisations.
//!
//! # Example
//!
//! ```
//! use rs_roster::allocation::{allocate, Outcome, Problem};
//! use rs_roster::DAYS;
//!
//! let problem = Problem {
//!     preferences: vec![vec![true, false, false], vec![false, true, false], vec![false, false, true]],
//!     officers_per_org: vec![vec![1, 0, 0], vec![0, 1, 0], vec![0, 0, 1]],
//!     min_shifts: 0,
//!     max_shifts: 30,
//! };
//!
//! match allocate(&problem).unwrap() {
//!     Outcome::Feasible(alloc) => {
//!         for officer in 0..3 {
//!             assert!((0..DAYS).all(|day| alloc.shift_on(officer, day) == Some((officer, officer))));
//!         }
//!     }
//!     Outcome::Infeasible(_) => unreachable!(),
//! }
//! ```

use crate::error::Result;
use crate::maxflow::ford_fulkerson;
use crate::network::{self, FlowNetwork, NodeKind, Shortfall};
use crate::{FlowNum, DAYS, SHIFTS_PER_DAY};

use log::debug;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// An allocation problem.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Problem {
    /// One row per officer with one flag per organisation.
    pub preferences: Vec<Vec<bool>>,
    /// One row per organisation with the number of officers required on each
    /// shift slot. The requirement is the same on every day.
    pub officers_per_org: Vec<Vec<u32>>,
    /// Minimal number of shifts of each officer.
    pub min_shifts: u32,
    /// Maximal number of shifts of each officer.
    pub max_shifts: u32,
}

impl Problem {
    /// Check the dimensions and the shift bounds.
    pub fn validate(&self) -> Result<()> {
        network::validate(
            &self.preferences,
            &self.officers_per_org,
            self.min_shifts,
            self.max_shifts,
        )
    }

    pub fn num_officers(&self) -> usize {
        self.preferences.len()
    }

    pub fn num_orgs(&self) -> usize {
        self.officers_per_org.len()
    }

    /// Build the flow network of this problem.
    pub fn network<F>(&self) -> Result<FlowNetwork<F>>
    where
        F: FlowNum,
    {
        FlowNetwork::new(
            &self.preferences,
            &self.officers_per_org,
            self.min_shifts,
            self.max_shifts,
        )
    }
}

/// The result of an allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// All shift requirements are met.
    Feasible(Allocation),
    /// Some shift requirement cannot be met, this is the first one.
    Infeasible(Shortfall<i64>),
}

impl Outcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Outcome::Feasible(_))
    }

    /// Return the allocation if the problem is feasible.
    pub fn allocation(&self) -> Option<&Allocation> {
        match self {
            Outcome::Feasible(alloc) => Some(alloc),
            Outcome::Infeasible(_) => None,
        }
    }
}

/// An assignment of officers to shifts.
///
/// Conceptually this is a table indexed by officer, organisation, day and
/// shift slot. It is stored as the chosen shift `(org, slot)` for each
/// officer and day, because an officer works at most one shift per day.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Allocation {
    norgs: usize,
    // indexed by officer * DAYS + day
    shifts: Vec<Option<(usize, usize)>>,
}

impl Allocation {
    /// Read the allocation from the flow on the edges out of the allocation
    /// nodes.
    pub fn from_network<F>(net: &FlowNetwork<F>) -> Self
    where
        F: FlowNum,
    {
        let mut shifts = vec![None; net.num_officers() * DAYS];
        for officer in 0..net.num_officers() {
            for day in 0..DAYS {
                let a = net.allocation(officer, day);
                for &e in net.node(a).edges() {
                    let edge = net.edge(e);
                    if edge.flow().is_zero() {
                        continue;
                    }
                    if let NodeKind::Shift { org, slot, .. } = *net.node(edge.end()).kind() {
                        debug_assert!(shifts[officer * DAYS + day].is_none());
                        shifts[officer * DAYS + day] = Some((org, slot));
                    }
                }
            }
        }
        Allocation {
            norgs: net.num_orgs(),
            shifts,
        }
    }

    pub fn num_officers(&self) -> usize {
        self.shifts.len() / DAYS
    }

    pub fn num_orgs(&self) -> usize {
        self.norgs
    }

    /// Return the shift `(org, slot)` of `officer` on `day`, if any.
    pub fn shift_on(&self, officer: usize, day: usize) -> Option<(usize, usize)> {
        assert!(day < DAYS, "day {} out of range", day);
        self.shifts[officer * DAYS + day]
    }

    /// Return `true` if `officer` works shift `slot` of `org` on `day`.
    pub fn is_assigned(&self, officer: usize, org: usize, day: usize, slot: usize) -> bool {
        self.shift_on(officer, day) == Some((org, slot))
    }

    /// Return the number of shifts assigned to `officer`.
    pub fn shifts_worked(&self, officer: usize) -> usize {
        self.shifts[officer * DAYS..(officer + 1) * DAYS]
            .iter()
            .filter(|s| s.is_some())
            .count()
    }

    /// Return the number of officers assigned to a shift.
    pub fn staffing(&self, org: usize, day: usize, slot: usize) -> usize {
        (0..self.num_officers())
            .filter(|&officer| self.is_assigned(officer, org, day, slot))
            .count()
    }

    /// Return the allocation as table `[officer][org][day][slot]` of 0/1
    /// entries.
    pub fn to_table(&self) -> Vec<Vec<Vec<[u8; SHIFTS_PER_DAY]>>> {
        (0..self.num_officers())
            .map(|officer| {
                (0..self.norgs)
                    .map(|org| {
                        (0..DAYS)
                            .map(|day| {
                                let mut row = [0; SHIFTS_PER_DAY];
                                if let Some((o, slot)) = self.shift_on(officer, day) {
                                    if o == org {
                                        row[slot] = 1;
                                    }
                                }
                                row
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }
}

/// Allocate officers to shifts.
///
/// Returns an error if the problem is malformed. Otherwise the outcome is
/// either a feasible allocation meeting every shift requirement or the first
/// shift whose requirement cannot be met.
pub fn allocate(problem: &Problem) -> Result<Outcome> {
    let mut net = problem.network::<i64>()?;
    let value = ford_fulkerson(&mut net);

    if let Some(short) = net.first_shortfall() {
        debug!(
            "Allocation infeasible: flow {} of {}, organisation {} day {} slot {} has {} of {} officers",
            value,
            net.total_required(),
            short.org,
            short.day,
            short.slot,
            short.assigned,
            short.required
        );
        return Ok(Outcome::Infeasible(short));
    }

    debug!("Allocation feasible with {} assigned shifts", value);
    Ok(Outcome::Feasible(Allocation::from_network(&net)))
}

#[cfg(test)]
mod tests {
    use super::{allocate, Allocation, Outcome, Problem};
    use crate::error::Error;
    use crate::maxflow::ford_fulkerson;
    use crate::{DAYS, SHIFTS_PER_DAY};

    #[test]
    fn test_validate() {
        let mut p = Problem {
            preferences: vec![vec![true, false]],
            officers_per_org: vec![vec![1, 0, 0], vec![0, 0, 0]],
            min_shifts: 0,
            max_shifts: 30,
        };
        assert_eq!(p.validate(), Ok(()));

        p.preferences[0].push(true);
        assert_eq!(
            p.validate(),
            Err(Error::PreferenceLength {
                officer: 0,
                expected: 2,
                found: 3
            })
        );
        p.preferences[0].pop();

        p.officers_per_org[1].pop();
        assert_eq!(
            p.validate(),
            Err(Error::RequirementLength {
                org: 1,
                expected: SHIFTS_PER_DAY,
                found: 2
            })
        );
        p.officers_per_org[1].push(0);

        p.min_shifts = 31;
        assert_eq!(p.validate(), Err(Error::ShiftBounds { min: 31, max: 30 }));
        assert_eq!(allocate(&p), Err(Error::ShiftBounds { min: 31, max: 30 }));
        p.min_shifts = 0;

        p.officers_per_org.clear();
        assert_eq!(p.validate(), Err(Error::NoOrganisations));
        p.preferences.clear();
        assert_eq!(p.validate(), Err(Error::NoOfficers));
    }

    #[test]
    fn test_table() {
        let p = Problem {
            preferences: vec![vec![false, true]],
            officers_per_org: vec![vec![0, 0, 0], vec![0, 0, 1]],
            min_shifts: 0,
            max_shifts: 30,
        };
        let mut net = p.network::<i64>().unwrap();
        ford_fulkerson(&mut net);
        let alloc = Allocation::from_network(&net);

        assert_eq!(alloc.num_officers(), 1);
        assert_eq!(alloc.num_orgs(), 2);
        assert_eq!(alloc.shifts_worked(0), DAYS);
        assert_eq!(alloc.staffing(1, 3, 2), 1);

        let table = alloc.to_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].len(), 2);
        assert!(table[0][0].iter().all(|row| *row == [0, 0, 0]));
        assert!(table[0][1].iter().all(|row| *row == [0, 0, 1]));
    }

    #[test]
    fn test_outcome() {
        let p = Problem {
            preferences: vec![vec![true]],
            officers_per_org: vec![vec![0, 2, 0]],
            min_shifts: 0,
            max_shifts: 30,
        };
        let outcome = allocate(&p).unwrap();
        assert!(!outcome.is_feasible());
        assert!(outcome.allocation().is_none());
        match outcome {
            Outcome::Infeasible(short) => {
                assert_eq!((short.org, short.day, short.slot), (0, 0, 1));
                assert_eq!((short.required, short.assigned), (2, 1));
            }
            Outcome::Feasible(_) => unreachable!(),
        }
    }
}
