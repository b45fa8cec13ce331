/*
 * Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

use log::info;
use time::OffsetDateTime;

use rustop::opts;

use rs_roster::{allocate, Outcome, Problem, DAYS};

use std::error::Error;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Allocate officers to shifts.";
        opt num:usize=1, desc:"Number of times the allocation is repeated.";
        opt table:bool, desc:"Print the allocation table.";
        param file:String, desc:"Problem file in JSON format";
    }
    .parse_or_exit();

    let tstart = OffsetDateTime::now_utc();
    let problem: Problem = serde_json::from_reader(BufReader::new(File::open(&args.file)?))?;
    problem.validate()?;
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());
    println!("  number of officers: {}", problem.num_officers());
    println!("  number of organisations: {}", problem.num_orgs());
    println!("  shifts per officer: {}..{}", problem.min_shifts, problem.max_shifts);

    let tstart = OffsetDateTime::now_utc();
    let mut outcome = allocate(&problem)?;
    for _ in 1..args.num {
        outcome = allocate(&problem)?;
    }
    let tend = OffsetDateTime::now_utc();
    println!("Time: {}", (tend - tstart).as_seconds_f64());

    match outcome {
        Outcome::Feasible(alloc) => {
            info!("Found a feasible allocation");
            for officer in 0..alloc.num_officers() {
                println!("officer {}: {} shifts", officer, alloc.shifts_worked(officer));
            }
            if args.table {
                for officer in 0..alloc.num_officers() {
                    let days: Vec<String> = (0..DAYS)
                        .map(|day| match alloc.shift_on(officer, day) {
                            Some((org, slot)) => format!("{}/{}", org, slot),
                            None => "-".to_string(),
                        })
                        .collect();
                    println!("{:>4}: {}", officer, days.join(" "));
                }
            }
        }
        Outcome::Infeasible(short) => {
            info!("No feasible allocation");
            println!(
                "infeasible: organisation {} day {} slot {} gets {} of {} officers",
                short.org, short.day, short.slot, short.assigned, short.required
            );
        }
    }

    Ok(())
}
