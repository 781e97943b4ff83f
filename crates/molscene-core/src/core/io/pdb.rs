use crate::core::models::atom::Atom;
use crate::core::models::model::StructuralModel;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("Missing required record: {0}")]
    MissingRecord(&'static str),
}

/// One skipped record with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub line: usize,
    pub reason: String,
}

/// Diagnostics accumulated while parsing a file.
///
/// The parser rejects individual malformed atom records rather than the whole
/// file; every rejection lands here so callers can surface it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub skipped: Vec<SkippedRecord>,
}

// Column slicing clamps to the line length so that short lines read as empty
// fields rather than panicking or erroring early.
fn field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("").trim()
}

fn parse_int(line: &str, start: usize, end: usize) -> Result<isize, String> {
    let value = field(line, start, end);
    value.parse().map_err(|_| {
        format!(
            "invalid integer in columns {}-{} (value: '{}')",
            start + 1,
            end,
            value
        )
    })
}

fn parse_float(line: &str, start: usize, end: usize) -> Result<f64, String> {
    let value = field(line, start, end);
    let parsed: f64 = value.parse().map_err(|_| {
        format!(
            "invalid float in columns {}-{} (value: '{}')",
            start + 1,
            end,
            value
        )
    })?;
    if !parsed.is_finite() {
        return Err(format!(
            "non-finite float in columns {}-{} (value: '{}')",
            start + 1,
            end,
            value
        ));
    }
    Ok(parsed)
}

// Element symbol from the dedicated columns, falling back to the first
// alphabetic character of the atom name when they are blank.
fn resolve_element(line: &str) -> Result<String, String> {
    let symbol = field(line, 76, 78).to_ascii_lowercase();
    if !symbol.is_empty() {
        return Ok(symbol);
    }
    let name = field(line, 12, 16).to_ascii_lowercase();
    name.chars()
        .find(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_string())
        .ok_or_else(|| format!("cannot determine element from atom name '{}'", name))
}

fn parse_atom_record(line: &str) -> Result<Atom, String> {
    let serial = parse_int(line, 6, 11)?;
    if serial < 1 {
        return Err(format!("atom serial must be positive (value: {})", serial));
    }
    let x = parse_float(line, 30, 37)?;
    let y = parse_float(line, 38, 45)?;
    let z = parse_float(line, 46, 53)?;
    let residue_number = parse_int(line, 23, 27)?;
    let chain_id = field(line, 21, 22).chars().next().unwrap_or('A');
    let residue_name = field(line, 17, 20);
    let name = field(line, 12, 16);
    let element = resolve_element(line)?;

    Ok(Atom::new(
        serial as usize,
        name,
        &element,
        residue_number,
        residue_name,
        chain_id,
        Point3::new(x, y, z),
    ))
}

/// Reads a structure from a buffered reader.
///
/// Record types are dispatched on the leading characters of each line:
/// `ATOM`/`HETATM` records become atoms, `CONECT` records accumulate
/// explicit connectivity pairs, everything else is ignored. A record whose
/// required fields do not parse (or whose serial repeats an earlier one) is
/// skipped and recorded in the [`ParseReport`]; the file as a whole fails
/// only on I/O errors or when no atom survives.
///
/// The returned model has no bonds installed yet; bond derivation is the
/// inference engine's job.
pub fn read_from(reader: &mut impl BufRead) -> Result<(StructuralModel, ParseReport), PdbError> {
    let mut model = StructuralModel::new();
    let mut report = ParseReport::default();
    let mut conect: Vec<(usize, usize)> = Vec::new();

    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line_number = index + 1;

        if line.starts_with("ATOM") || line.starts_with("HETATM") {
            match parse_atom_record(&line) {
                Ok(atom) => {
                    if model.find_atom_by_serial(atom.serial).is_some() {
                        skip(
                            &mut report,
                            line_number,
                            format!("duplicate atom serial: {}", atom.serial),
                        );
                        continue;
                    }
                    let _ = model.add_atom(atom);
                }
                Err(reason) => skip(&mut report, line_number, reason),
            }
        } else if line.starts_with("CONECT") {
            match parse_int(&line, 6, 11) {
                Ok(serial) if serial > 0 => {
                    let serial = serial as usize;
                    for start in [11usize, 16, 21, 26] {
                        let partner = field(&line, start, start + 5);
                        if let Ok(p) = partner.parse::<usize>() {
                            if p != 0 && p != serial {
                                conect.push((serial.min(p), serial.max(p)));
                            }
                        }
                    }
                }
                Ok(serial) => skip(
                    &mut report,
                    line_number,
                    format!("connect serial must be positive (value: {})", serial),
                ),
                Err(reason) => skip(&mut report, line_number, reason),
            }
        }
    }

    conect.sort_unstable();
    conect.dedup();
    model.set_explicit_pairs(conect);

    if model.atom_count() == 0 {
        return Err(PdbError::MissingRecord("ATOM/HETATM records"));
    }
    Ok((model, report))
}

fn skip(report: &mut ParseReport, line: usize, reason: String) {
    tracing::warn!(line, %reason, "skipping malformed record");
    report.skipped.push(SkippedRecord { line, reason });
}

/// Parses a structure from in-memory text. See [`read_from`].
pub fn parse(text: &str) -> Result<(StructuralModel, ParseReport), PdbError> {
    read_from(&mut text.as_bytes())
}

/// Parses a structure, rejecting the whole file on the first malformed
/// record instead of skipping it.
pub fn parse_strict(text: &str) -> Result<StructuralModel, PdbError> {
    let (model, report) = parse(text)?;
    if let Some(record) = report.skipped.into_iter().next() {
        return Err(PdbError::MalformedRecord {
            line: record.line,
            reason: record.reason,
        });
    }
    Ok(model)
}

/// Reads a structure from a file path. See [`read_from`].
pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<(StructuralModel, ParseReport), PdbError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    read_from(&mut reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Formats an ATOM/HETATM line with every field in the exact columns the
    // parser reads: serial [6,11), name [12,16), residue name [17,20), chain
    // at 21, residue number [23,27) via right-justified [22,26), coordinates
    // [30,37)/[38,45)/[46,53), element [76,78).
    fn atom_line(
        record: &str,
        serial: usize,
        name: &str,
        res_name: &str,
        chain: char,
        res_num: isize,
        x: f64,
        y: f64,
        z: f64,
        element: &str,
    ) -> String {
        format!(
            "{:<6}{:>5} {:<4} {:<3} {}{:>4}    {:>7.3} {:>7.3} {:>7.3}  1.00  0.00           {:>2}",
            record, serial, name, res_name, chain, res_num, x, y, z, element
        )
    }

    fn simple_atom(serial: usize, res_num: isize, chain: char, x: f64, element: &str) -> String {
        atom_line("ATOM", serial, "CA", "ALA", chain, res_num, x, 0.0, 0.0, element)
    }

    mod atom_records {
        use super::*;

        #[test]
        fn parses_all_fixed_columns() {
            let line = atom_line("ATOM", 42, "N1", "DRG", 'D', 285, 16.23, -9.906, 7.916, "N");
            let (model, report) = parse(&line).unwrap();

            assert!(report.skipped.is_empty());
            assert_eq!(model.atom_count(), 1);
            let (_, atom) = model.atoms_iter().next().unwrap();
            assert_eq!(atom.serial, 42);
            assert_eq!(atom.name, "N1");
            assert_eq!(atom.residue_name, "DRG");
            assert_eq!(atom.chain_id, 'D');
            assert_eq!(atom.residue_number, 285);
            assert_eq!(atom.element, "n");
            assert!((atom.position.x - 16.23).abs() < 1e-9);
            assert!((atom.position.y + 9.906).abs() < 1e-9);
            assert!((atom.position.z - 7.916).abs() < 1e-9);
        }

        #[test]
        fn hetatm_records_are_parsed_like_atom_records() {
            let line = atom_line("HETATM", 7, "O", "HOH", 'W', 201, 1.0, 2.0, 3.0, "O");
            let (model, _) = parse(&line).unwrap();
            let (_, atom) = model.atoms_iter().next().unwrap();
            assert_eq!(atom.serial, 7);
            assert_eq!(atom.residue_name, "HOH");
            assert_eq!(atom.chain_id, 'W');
        }

        #[test]
        fn two_character_element_symbols_are_kept_whole() {
            let line = atom_line("ATOM", 1, "CL1", "LIG", 'A', 1, 0.0, 0.0, 0.0, "Cl");
            let (model, _) = parse(&line).unwrap();
            let (_, atom) = model.atoms_iter().next().unwrap();
            assert_eq!(atom.element, "cl");
        }

        #[test]
        fn blank_element_columns_fall_back_to_the_atom_name() {
            // Short line: element columns missing entirely.
            let line = format!(
                "{:<6}{:>5} {:<4} {:<3} {}{:>4}    {:>7.3} {:>7.3} {:>7.3}",
                "ATOM", 1, "HD21", "ASN", 'A', 12, 1.0, 2.0, 3.0
            );
            let (model, _) = parse(&line).unwrap();
            let (_, atom) = model.atoms_iter().next().unwrap();
            assert_eq!(atom.element, "h");
        }

        #[test]
        fn name_fallback_skips_leading_digits() {
            let line = format!(
                "{:<6}{:>5} {:<4} {:<3} {}{:>4}    {:>7.3} {:>7.3} {:>7.3}",
                "ATOM", 1, "1HA", "GLY", 'A', 3, 0.0, 0.0, 0.0
            );
            let (model, _) = parse(&line).unwrap();
            let (_, atom) = model.atoms_iter().next().unwrap();
            assert_eq!(atom.element, "h");
        }

        #[test]
        fn blank_chain_column_defaults_to_a() {
            let line = format!(
                "{:<6}{:>5} {:<4} {:<3}  {:>4}    {:>7.3} {:>7.3} {:>7.3}",
                "ATOM", 1, "CA", "ALA", 5, 0.0, 0.0, 0.0
            );
            let (model, _) = parse(&line).unwrap();
            let (_, atom) = model.atoms_iter().next().unwrap();
            assert_eq!(atom.chain_id, 'A');
        }

        #[test]
        fn residues_and_chains_accumulate_across_records() {
            let text = [
                simple_atom(1, 10, 'D', 0.0, "C"),
                simple_atom(2, 11, 'A', 2.0, "C"),
                simple_atom(3, 10, 'D', 4.0, "C"),
            ]
            .join("\n");
            let (model, _) = parse(&text).unwrap();

            assert_eq!(model.chain_ids(), &['D', 'A']);
            let residues: Vec<isize> = model.residue_numbers().iter().copied().collect();
            assert_eq!(residues, vec![10, 11]);
        }

        #[test]
        fn non_record_lines_are_ignored() {
            let text = format!(
                "REMARK generated for testing\nTITLE test\n{}\nEND",
                simple_atom(1, 1, 'A', 0.0, "C")
            );
            let (model, report) = parse(&text).unwrap();
            assert_eq!(model.atom_count(), 1);
            assert!(report.skipped.is_empty());
        }
    }

    mod strictness_policy {
        use super::*;

        #[test]
        fn malformed_coordinates_reject_the_atom_and_collect_the_error() {
            let mut bad = simple_atom(2, 1, 'A', 0.0, "C");
            bad.replace_range(30..37, "  x.xxx");
            let text = format!("{}\n{}", simple_atom(1, 1, 'A', 0.0, "C"), bad);

            let (model, report) = parse(&text).unwrap();
            assert_eq!(model.atom_count(), 1);
            assert_eq!(report.skipped.len(), 1);
            assert_eq!(report.skipped[0].line, 2);
            assert!(report.skipped[0].reason.contains("invalid float"));
        }

        #[test]
        fn nan_coordinates_are_rejected_not_tolerated() {
            let mut bad = simple_atom(2, 1, 'A', 0.0, "C");
            bad.replace_range(30..37, "    NaN");
            let text = format!("{}\n{}", simple_atom(1, 1, 'A', 0.0, "C"), bad);

            let (model, report) = parse(&text).unwrap();
            assert_eq!(model.atom_count(), 1);
            assert!(report.skipped[0].reason.contains("non-finite"));
        }

        #[test]
        fn duplicate_serials_reject_the_later_record() {
            let text = format!(
                "{}\n{}",
                simple_atom(1, 1, 'A', 0.0, "C"),
                simple_atom(1, 2, 'A', 5.0, "N")
            );
            let (model, report) = parse(&text).unwrap();
            assert_eq!(model.atom_count(), 1);
            assert_eq!(report.skipped.len(), 1);
            assert!(report.skipped[0].reason.contains("duplicate atom serial"));
        }

        #[test]
        fn strict_parsing_rejects_the_file_on_the_first_bad_record() {
            let mut bad = simple_atom(2, 1, 'A', 0.0, "C");
            bad.replace_range(30..37, "  x.xxx");
            let text = format!("{}\n{}", simple_atom(1, 1, 'A', 0.0, "C"), bad);

            let err = parse_strict(&text).unwrap_err();
            assert!(matches!(err, PdbError::MalformedRecord { line: 2, .. }));
            assert!(parse_strict(&simple_atom(1, 1, 'A', 0.0, "C")).is_ok());
        }

        #[test]
        fn a_file_with_no_atoms_fails_wholesale() {
            let err = parse("REMARK nothing here\n").unwrap_err();
            assert!(matches!(err, PdbError::MissingRecord(_)));
        }

        #[test]
        fn a_file_where_every_atom_is_malformed_fails_wholesale() {
            let mut bad = simple_atom(1, 1, 'A', 0.0, "C");
            bad.replace_range(6..11, "  abc");
            let err = parse(&bad).unwrap_err();
            assert!(matches!(err, PdbError::MissingRecord(_)));
        }
    }

    mod conect_records {
        use super::*;

        fn conect_line(serial: usize, partners: &[usize]) -> String {
            let mut line = format!("CONECT{:>5}", serial);
            for p in partners {
                line.push_str(&format!("{:>5}", p));
            }
            line
        }

        #[test]
        fn partner_fields_pair_with_the_line_serial() {
            let text = format!(
                "{}\n{}\n{}\n{}",
                simple_atom(1, 1, 'A', 0.0, "C"),
                simple_atom(2, 1, 'A', 1.5, "C"),
                simple_atom(3, 1, 'A', 3.0, "C"),
                conect_line(1, &[2, 3])
            );
            let (model, _) = parse(&text).unwrap();
            assert_eq!(model.explicit_pairs(), &[(1, 2), (1, 3)]);
        }

        #[test]
        fn reciprocal_records_are_deduplicated() {
            let text = format!(
                "{}\n{}\n{}\n{}",
                simple_atom(1, 1, 'A', 0.0, "C"),
                simple_atom(2, 1, 'A', 1.5, "C"),
                conect_line(1, &[2]),
                conect_line(2, &[1])
            );
            let (model, _) = parse(&text).unwrap();
            assert_eq!(model.explicit_pairs(), &[(1, 2)]);
        }

        #[test]
        fn up_to_four_partners_are_read() {
            let atoms: Vec<String> = (1..=5)
                .map(|i| simple_atom(i, 1, 'A', i as f64, "C"))
                .collect();
            let text = format!("{}\n{}", atoms.join("\n"), conect_line(3, &[1, 2, 4, 5]));
            let (model, _) = parse(&text).unwrap();
            assert_eq!(model.explicit_pairs(), &[(1, 3), (2, 3), (3, 4), (3, 5)]);
        }

        #[test]
        fn blank_and_self_partners_are_ignored() {
            let text = format!(
                "{}\n{}\n{}",
                simple_atom(1, 1, 'A', 0.0, "C"),
                simple_atom(2, 1, 'A', 1.5, "C"),
                conect_line(1, &[2, 1])
            );
            let (model, _) = parse(&text).unwrap();
            assert_eq!(model.explicit_pairs(), &[(1, 2)]);
        }
    }

    mod path_reading {
        use super::*;
        use std::io::Write;

        #[test]
        fn read_from_path_parses_a_file_on_disk() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("structure.pdb");
            let mut file = File::create(&path).unwrap();
            writeln!(file, "{}", simple_atom(1, 1, 'A', 0.0, "C")).unwrap();
            writeln!(file, "{}", simple_atom(2, 1, 'A', 1.53, "C")).unwrap();
            drop(file);

            let (model, report) = read_from_path(&path).unwrap();
            assert_eq!(model.atom_count(), 2);
            assert!(report.skipped.is_empty());
        }

        #[test]
        fn read_from_path_propagates_io_errors() {
            let result = read_from_path("/definitely/not/a/real/path.pdb");
            assert!(matches!(result, Err(PdbError::Io(_))));
        }
    }
}
