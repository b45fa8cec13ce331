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

//! Errors raised while validating an allocation problem.

use thiserror::Error;

/// Error for malformed allocation problems.
///
/// Note that an infeasible problem is *not* an error, see
/// [`Outcome`][crate::allocation::Outcome].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("the problem contains no officers")]
    NoOfficers,

    #[error("the problem contains no organisations")]
    NoOrganisations,

    #[error("officer {officer} has {found} preference flags, expected {expected}")]
    PreferenceLength {
        officer: usize,
        expected: usize,
        found: usize,
    },

    #[error("organisation {org} has {found} shift requirements, expected {expected}")]
    RequirementLength { org: usize, expected: usize, found: usize },

    #[error("maximal number of shifts {max} is smaller than minimal number {min}")]
    ShiftBounds { min: u32, max: u32 },

    #[error("{what} exceeds the range of the flow type")]
    Overflow { what: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
