/**
 * RateSim
 * Copyright (C) 2026 RateSim developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::env;
use std::error::Error;

use getopts::Options;
use tracing_subscriber::EnvFilter;

use ratesim::diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
use ratesim::filters::{AverageBaseline, CollaborativeFilter, FilterKind};
use ratesim::io;
use ratesim::stats::ObservationStats;

fn main() {

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("t", "trainingfile", "Training file name (required). The input consists of \
        observed ratings. The input file must contain an entity, counterpart, rating and \
        timestamp per line, separated by tabs.", "PATH");
    opts.optopt("e", "testfile", "Held out ratings file name (optional). Used for the error \
        report of the average filter.", "PATH");
    opts.optopt("f", "filter", "Filter to run (optional, defaults to item-cosine). One of: \
        average, item-cosine, user-euclidean, user-pearson, item-adjusted-cosine, \
        slope-one.", "NAME");
    opts.optopt("o", "outputfile", "Output file name (optional, output will be written to stdout \
        by default).", "PATH");
    opts.optflag("v", "verbose", "Log every pair comparison to stderr.");
    opts.optflag("h", "help", "Print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(failure) => {
            let hint = failure.to_string();
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if matches.opt_present("h") {
        return print_usage_and_exit(&program, opts, None);
    }

    if !matches.opt_present("t") {
        return print_usage_and_exit(
            &program,
            opts,
            Some("Please specify a trainingfile via --trainingfile."),
        );
    }

    let training_path = matches.opt_str("t").unwrap();
    let test_path = matches.opt_str("e");
    let output_path = matches.opt_str("o");
    let verbose = matches.opt_present("v");

    let filter_name = matches.opt_str("f").unwrap_or_else(|| "item-cosine".to_string());
    let kind = match filter_name.parse::<FilterKind>() {
        Ok(kind) => kind,
        Err(failure) => {
            let hint = format!("Problem with option 'f': {}", failure);
            return print_usage_and_exit(&program, opts, Some(&hint))
        },
    };

    if verbose {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ratesim=trace"));

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    run_filter(&training_path, test_path, kind, output_path, verbose).unwrap();
}

fn print_usage_and_exit(
    program: &str,
    opts: Options,
    hint: Option<&str>
) {

    if let Some(hint) = hint {
        eprintln!("\n{}\n", hint);
    }

    let brief = format!("Usage: {} [options]", program);
    eprint!("{}", opts.usage(&brief));
}

fn run_filter(
    training_path: &str,
    test_path: Option<String>,
    kind: FilterKind,
    output_path: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn Error>> {

    println!("Reading {} to compute data statistics (pass 1/2)", training_path);

    let mut reader = io::csv_reader(training_path)?;
    let observations = io::observations_from_csv(&mut reader)?;
    let stats = ObservationStats::from(&observations);

    println!(
        "Found {} observations from {} entities over {} counterparts.",
        stats.num_observations(),
        stats.num_entities(),
        stats.num_counterparts(),
    );

    println!("Reading {} to run the {} filter (pass 2/2)", training_path, kind);

    let training_lines = io::read_lines(training_path)?;

    if kind == FilterKind::Average {
        let mut filter = AverageBaseline::new();
        filter.load_training(&training_lines)?;

        // the baseline ignores the identity it predicts for
        println!("Historical average rating: {:.4}", filter.predict(0, 0)?);

        if let Some(test_path) = test_path {
            let test_lines = io::read_lines(&test_path)?;
            filter.load_test(&test_lines)?;

            println!("RMSE against {}: {:.4}", test_path, filter.evaluate()?);
        }

        return Ok(());
    }

    let diagnostics: Box<dyn Diagnostics> = if verbose {
        Box::new(TracingDiagnostics)
    } else {
        Box::new(NoopDiagnostics)
    };

    let mut filter = kind.create_with(diagnostics);
    filter.load_training(&training_lines)?;

    if let Some(test_path) = test_path {
        let test_lines = io::read_lines(&test_path)?;
        filter.load_test(&test_lines)?;
    }

    match filter.score_similarities() {
        Ok(Some(table)) => {
            println!("Writing {} pair similarities...", table.len());
            io::write_similarities(table, output_path)?;
        }
        Ok(None) => println!("The {} filter does not compute pair similarities.", kind),
        Err(failure) => return Err(failure.into()),
    }

    Ok(())
}
