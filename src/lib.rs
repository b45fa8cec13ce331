// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

#![forbid(unsafe_code)]

//! Allocation of security officers to the shifts of several organisations.
//!
//! The allocation problem is modelled as a flow problem with lower bounds on
//! a layered network (see [`network`]). A maximal flow is computed by the
//! algorithm of Ford and Fulkerson ([`maxflow`]), and the problem is feasible
//! if and only if this flow saturates the requirement of every shift.

mod num {
    pub use num_traits as traits;
}

use std::fmt::Debug;

/// Number of days of an allocation period.
pub const DAYS: usize = 30;

/// Number of shift slots per day.
pub const SHIFTS_PER_DAY: usize = 3;

/// Numeric type of capacities, flows and demands.
pub trait FlowNum: num::traits::PrimInt + num::traits::Signed + num::traits::NumAssign + Debug {}

impl<T> FlowNum for T where T: num::traits::PrimInt + num::traits::Signed + num::traits::NumAssign + Debug {}

pub mod error;
pub use self::error::{Error, Result};

pub mod collections;

// # Data structures

pub mod network;
pub use self::network::FlowNetwork;

pub mod residual;
pub use self::residual::ResidualNetwork;

// # Algorithms

pub mod maxflow;
pub mod search;

pub mod allocation;
pub use self::allocation::{allocate, Allocation, Outcome, Problem};
