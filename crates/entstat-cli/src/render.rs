//! Report presentation: classic text, terse CSV and JSON.

use std::io::{self, Write};

use entstat_core::{Report, SymbolMode};

/// Selected output layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Terse,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Terse => "terse",
            Self::Json => "json",
        }
    }
}

/// Write `report` in the chosen format. `counts` adds the per-symbol
/// occurrence table (ignored for JSON, which always carries it).
pub fn write_report(
    out: &mut impl Write,
    report: &Report,
    format: OutputFormat,
    counts: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            if counts {
                text_counts(out, report)?;
            }
            text(out, report)
        }
        OutputFormat::Terse => terse(out, report, counts),
        OutputFormat::Json => json(out, report),
    }
}

/// Phrase for how often a random stream would exceed the chi-square value.
pub fn exceed_phrase(p: f64) -> String {
    if p < 0.0001 {
        "less than 0.01 percent".to_string()
    } else if p > 0.9999 {
        "more than 99.99 percent".to_string()
    } else {
        format!("{:.2} percent", p * 100.0)
    }
}

fn text(out: &mut impl Write, r: &Report) -> io::Result<()> {
    let unit = r.mode.label();
    writeln!(out, "Entropy = {:.6} bits per {unit}.", r.entropy)?;
    writeln!(out)?;
    writeln!(out, "Optimum compression would reduce the size")?;
    writeln!(
        out,
        "of this {} {unit} file by {:.0} percent.",
        r.symbol_count,
        r.optimum_compression_percent()
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Chi square distribution for {} samples is {:.2}, and randomly",
        r.symbol_count, r.chi_square
    )?;
    writeln!(
        out,
        "would exceed this value {} of the times.",
        exceed_phrase(r.chi_square_tail_probability)
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Arithmetic mean value of data {unit}s is {:.4} ({:.1} = random).",
        r.mean,
        r.mode.expected_mean()
    )?;
    match (r.monte_carlo_pi, r.monte_carlo_error_percent()) {
        (Some(pi), Some(err)) => writeln!(
            out,
            "Monte Carlo value for Pi is {pi:.9} (error {err:.2} percent)."
        )?,
        _ => writeln!(out, "Monte Carlo value for Pi is undefined (too few bytes).")?,
    }
    match r.serial_correlation {
        Some(scc) => writeln!(
            out,
            "Serial correlation coefficient is {scc:.6} (totally uncorrelated = 0.0)."
        ),
        None => writeln!(
            out,
            "Serial correlation coefficient is undefined (all values equal!)."
        ),
    }
}

fn text_counts(out: &mut impl Write, r: &Report) -> io::Result<()> {
    match r.mode {
        SymbolMode::Byte => writeln!(out, "Value Char Occurrences Fraction")?,
        SymbolMode::Bit => writeln!(out, "Value Occurrences Fraction")?,
    }
    for (value, &count) in r.occurrences.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let fraction = r.fraction(value).unwrap_or(0.0);
        match r.mode {
            SymbolMode::Byte => {
                let ch = printable(value as u8);
                writeln!(out, "{value:>5}   {ch}   {count:>10}   {fraction:.6}")?;
            }
            SymbolMode::Bit => writeln!(out, "{value:>5}   {count:>10}   {fraction:.6}")?,
        }
    }
    writeln!(out, "\nTotal:    {:>10}   {:.6}\n", r.symbol_count, 1.0)
}

fn printable(byte: u8) -> char {
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        ' '
    }
}

fn optional(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.6}")).unwrap_or_default()
}

fn terse(out: &mut impl Write, r: &Report, counts: bool) -> io::Result<()> {
    let unit = r.mode.label();
    writeln!(
        out,
        "0,File-{unit}s,Entropy,Chi-square,Mean,Monte-Carlo-Pi,Serial-Correlation"
    )?;
    writeln!(
        out,
        "1,{},{:.6},{:.6},{:.6},{},{}",
        r.symbol_count,
        r.entropy,
        r.chi_square,
        r.mean,
        optional(r.monte_carlo_pi),
        optional(r.serial_correlation)
    )?;
    if counts {
        writeln!(out, "2,Value,Occurrences,Fraction")?;
        for (value, &count) in r.occurrences.iter().enumerate() {
            if count > 0 {
                let fraction = r.fraction(value).unwrap_or(0.0);
                writeln!(out, "3,{value},{count},{fraction:.6}")?;
            }
        }
    }
    Ok(())
}

fn json(out: &mut impl Write, r: &Report) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, r)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use entstat_core::StatsEngine;

    fn report(mode: SymbolMode, data: &[u8]) -> Report {
        let mut engine = StatsEngine::new(mode);
        engine.ingest(data);
        engine.finalize()
    }

    fn render(r: &Report, format: OutputFormat, counts: bool) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, r, format, counts).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn exceed_phrase_bands() {
        assert_eq!(exceed_phrase(0.00001), "less than 0.01 percent");
        assert_eq!(exceed_phrase(0.99999), "more than 99.99 percent");
        assert_eq!(exceed_phrase(0.418), "41.80 percent");
    }

    #[test]
    fn text_report_for_uniform_bytes() {
        let data: Vec<u8> = (0..=255).collect();
        let out = render(&report(SymbolMode::Byte, &data), OutputFormat::Text, false);
        assert!(out.starts_with("Entropy = 8.000000 bits per byte."));
        assert!(out.contains("of this 256 byte file by 0 percent."));
        assert!(out.contains("Chi square distribution for 256 samples is 0.00, and randomly"));
        assert!(out.contains("would exceed this value more than 99.99 percent of the times."));
        assert!(out.contains("Arithmetic mean value of data bytes is 127.5000 (127.5 = random)."));
        assert!(out.contains("Monte Carlo value for Pi is "));
        assert!(out.contains("(totally uncorrelated = 0.0)."));
    }

    #[test]
    fn text_report_marks_undefined_values() {
        let out = render(&report(SymbolMode::Bit, &[0xFF]), OutputFormat::Text, false);
        assert!(out.contains("bits per bit."));
        assert!(out.contains("(0.5 = random)"));
        assert!(out.contains("Monte Carlo value for Pi is undefined (too few bytes)."));
        assert!(out.contains("Serial correlation coefficient is undefined (all values equal!)."));
    }

    #[test]
    fn text_counts_lists_only_present_symbols() {
        let out = render(&report(SymbolMode::Byte, b"aab"), OutputFormat::Text, true);
        let table: Vec<&str> = out.lines().take_while(|l| !l.is_empty()).collect();
        assert_eq!(table[0], "Value Char Occurrences Fraction");
        assert_eq!(table.len(), 3);
        assert!(table[1].starts_with("   97   a "));
        assert!(table[1].ends_with("0.666667"));
        assert!(table[2].starts_with("   98   b "));
    }

    #[test]
    fn terse_rows() {
        let out = render(&report(SymbolMode::Bit, &[0x0F]), OutputFormat::Terse, true);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines[0],
            "0,File-bits,Entropy,Chi-square,Mean,Monte-Carlo-Pi,Serial-Correlation"
        );
        assert!(lines[1].starts_with("1,8,1.000000,0.000000,0.500000,,"));
        assert_eq!(lines[2], "2,Value,Occurrences,Fraction");
        assert_eq!(lines[3], "3,0,4,0.500000");
        assert_eq!(lines[4], "3,1,4,0.500000");
    }

    #[test]
    fn json_round_trips_fields() {
        let out = render(&report(SymbolMode::Byte, &[0u8; 12]), OutputFormat::Json, false);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["mode"], "byte");
        assert_eq!(v["symbol_count"], 12);
        assert_eq!(v["monte_carlo_pi"], 4.0);
        assert!(v["serial_correlation"].is_null());
        assert_eq!(v["occurrences"].as_array().unwrap().len(), 256);
    }
}
