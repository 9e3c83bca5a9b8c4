// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This is the demonstration command line front end of the solver. It reads
//! a small plain-text instance, solves it with the requested method and
//! prints the optimal tour along with (optionally) the full step trace.
//!
//! The instance format is line oriented: `#` starts a comment, the first
//! meaningful line is the number of cities, the next n lines are the rows of
//! the distance matrix (`inf` marks an unreachable pair) and an optional
//! final line gives the city labels.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    time::{Duration, Instant},
};

use clap::{Parser, ValueEnum};
use tspbb::{solve, Instance, Method, Report, SolverConfigBuilder};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum CliMethod {
    /// Branch and bound with cost-matrix reduction.
    Bnb,
    /// Exhaustive enumeration of all permutations (tiny instances only).
    Brute,
}
impl From<CliMethod> for Method {
    fn from(method: CliMethod) -> Self {
        match method {
            CliMethod::Bnb => Method::BranchAndBound,
            CliMethod::Brute => Method::BruteForce,
        }
    }
}

/// Solves a TSP instance and displays how the answer was reached.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the instance that needs to be solved.
    instance: String,
    /// The solving method.
    #[clap(short, long, value_enum, default_value_t = CliMethod::Bnb)]
    method: CliMethod,
    /// Stop after this many node expansions.
    #[clap(short, long)]
    nodes: Option<usize>,
    /// Stop after this many seconds.
    #[clap(short, long)]
    duration: Option<u64>,
    /// Dump the step trace as JSON instead of the plain text report.
    #[clap(short, long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let instance = read_instance(&args.instance);
    let config = SolverConfigBuilder::default()
        .node_budget(args.nodes)
        .time_budget(args.duration.map(Duration::from_secs))
        .build()
        .unwrap();

    let start = Instant::now();
    let report = solve(&instance, args.method.into(), &config).unwrap();
    let duration = Instant::now() - start;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        print_report(&args.instance, &instance, &report, duration);
    }
}

fn print_report(name: &str, instance: &Instance, report: &Report, duration: Duration) {
    println!("instance : {name}");
    println!("method   : {}", report.completion.method);
    println!("status   : {}", status(report));
    match &report.completion.best {
        Some(best) => {
            println!("cost     : {}", best.cost);
            println!("tour     : {}", instance.render_route(&best.route));
        }
        None => {
            println!("cost     : none");
            println!("tour     : none");
        }
    }
    println!("duration : {}", duration.as_secs_f32());
    println!("steps    : {}", report.steps.len());
}

fn status(report: &Report) -> &'static str {
    match (report.completion.is_exact, report.completion.best.is_some()) {
        (true, true) => "optimal",
        (true, false) => "infeasible",
        (false, true) => "incomplete (best so far)",
        (false, false) => "incomplete (no tour found)",
    }
}

fn read_instance(path: &str) -> Instance {
    let file = File::open(path).expect("cannot open instance file");
    let mut lines = BufReader::new(file)
        .lines()
        .map(|line| line.unwrap())
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let n: usize = lines
        .next()
        .expect("missing city count")
        .split_whitespace()
        .next()
        .unwrap()
        .parse()
        .expect("the first line must hold the number of cities");

    let mut distances = Vec::with_capacity(n);
    for _ in 0..n {
        let row: Vec<f64> = lines
            .next()
            .expect("missing matrix row")
            .split_whitespace()
            .map(|token| {
                if token.eq_ignore_ascii_case("inf") {
                    f64::INFINITY
                } else {
                    token.parse().expect("matrix entries must be numbers or 'inf'")
                }
            })
            .collect();
        distances.push(row);
    }

    let labels = match lines.next() {
        Some(line) => line.split_whitespace().map(|s| s.to_string()).collect(),
        None => (0..n).map(|i| format!("C{}", i + 1)).collect(),
    };

    Instance::new(labels, distances).expect("invalid instance")
}
