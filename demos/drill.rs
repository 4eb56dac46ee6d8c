use matrix_drill::{check, Expected, Generator, Mode, Problem, Submission};
use std::io::{BufRead, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let mode: Mode = match args.next() {
        Some(name) => name.parse()?,
        None => Mode::Random,
    };
    let mut generator = match args.next() {
        Some(seed) => Generator::seeded(seed.parse()?),
        None => Generator::from_entropy(),
    };

    let problem = generator.generate(mode);
    describe(&problem);

    let stdin = std::io::stdin();
    let mut lines = BufReader::new(stdin.lock()).lines();

    let submission = match problem.answer_dimensions() {
        None => {
            let line = lines.next().transpose()?.unwrap_or_default();
            Submission::Value(line)
        },
        Some((rows, columns)) => {
            println!("Enter {} rows of {} values", rows, columns);
            let mut cells = Vec::new();

            for _ in 0..rows {
                let line = lines.next().transpose()?.unwrap_or_default();
                let mut row: Vec<String> =
                    line.split_whitespace().map(String::from).collect();
                row.resize(columns, String::new());
                cells.push(row);
            }

            Submission::Cells(matrix_drill::Matrix::from_rows(cells))
        },
    };

    let correctness = check(&problem, &submission);

    if correctness.all_correct() {
        println!("All correct!");
    } else {
        println!("Not quite. The answer was:");
        match problem.expected() {
            Expected::Integer(value) => println!("  {}", value),
            Expected::Integers(answer) => println!("  {}", answer),
            Expected::Rationals(answer) => println!("  {}", answer),
        }
    }

    Ok(())
}

fn describe(problem: &Problem) {
    match problem {
        Problem::Entry {
            matrix, row, column, ..
        } => println!("What is the ({}, {}) entry of {}?", row, column, matrix),
        Problem::Add { left, right, .. } => println!("{} + {}", left, right),
        Problem::Subtract { left, right, .. } => {
            println!("{} - {}", left, right)
        },
        Problem::ScalarMultiply { scalar, matrix, .. } => {
            println!("{} * {}", scalar, matrix)
        },
        Problem::Multiply { left, right, .. } => println!("{} {}", left, right),
        Problem::Determinant { matrix, .. } => println!("det {}", matrix),
        Problem::Inverse { matrix, .. } => println!("inverse of {}", matrix),
        Problem::RowOperation {
            matrix, operation, ..
        } => println!("Apply {} to {}", operation, matrix),
    }
}
