//! Stream stdin through a byte-mode engine and print the raw report.
//!
//! Run: `head -c 1000000 /dev/urandom | cargo run --example analyze_stdin`

use std::io::Read;

use entstat_core::{StatsEngine, SymbolMode};

fn main() {
    let mut engine = StatsEngine::new(SymbolMode::Byte);
    let mut stdin = std::io::stdin().lock();
    let mut buf = [0u8; 8192];

    loop {
        match stdin.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => engine.ingest(&buf[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                eprintln!("read error: {e}");
                std::process::exit(1);
            }
        }
    }

    let report = engine.finalize();
    println!("Symbols:            {}", report.symbol_count);
    println!("Entropy:            {:.6} bits/byte", report.entropy);
    println!(
        "Chi-square:         {:.2} (p = {:.4})",
        report.chi_square, report.chi_square_tail_probability
    );
    println!("Mean:               {:.4}", report.mean);
    match report.monte_carlo_pi {
        Some(pi) => println!("Monte Carlo pi:     {pi:.9}"),
        None => println!("Monte Carlo pi:     undefined"),
    }
    match report.serial_correlation {
        Some(r) => println!("Serial correlation: {r:.6}"),
        None => println!("Serial correlation: undefined"),
    }
}
