use std::env;
use std::process;

use ratesim::filters::{AverageBaseline, CollaborativeFilter};
use ratesim::io;
use ratesim::stats::ObservationStats;

fn main() {

    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: {} TRAINING_FILE TEST_FILE", args[0]);
        process::exit(2);
    }

    let training_path = &args[1];
    let test_path = &args[2];

    println!("Reading {} to compute data statistics (pass 1/2)", training_path);

    let mut reader = io::csv_reader(training_path).unwrap();
    let observations = io::observations_from_csv(&mut reader).unwrap();
    let stats = ObservationStats::from(&observations);

    println!(
        "Found {} observations from {} entities over {} counterparts.",
        stats.num_observations(),
        stats.num_entities(),
        stats.num_counterparts(),
    );

    println!("Scoring the average baseline against {} (pass 2/2)", test_path);

    let mut filter = AverageBaseline::new();
    filter.load_training(&io::read_lines(training_path).unwrap()).unwrap();
    filter.load_test(&io::read_lines(test_path).unwrap()).unwrap();

    println!("Historical average rating: {:.4}", filter.predict(0, 0).unwrap());
    println!("RMSE: {:.4}", filter.evaluate().unwrap());
}
