// Mappers: Convert the whole-text input contract into domain models
// This keeps parsing isolated from business logic

use crate::domain::models::{Child, Country, Factory, ProblemInstance};
use crate::domain::solver_service::MalformedInstanceError;

type Result<T> = std::result::Result<T, MalformedInstanceError>;

/// Parse a complete instance from its text form: a header `n m t`, then `n`
/// factory records `id country stock`, `m` country records
/// `id max_export min_delivery` and `t` child records `id country f1 f2 …`.
///
/// Blank lines are skipped. Negative capacities are clamped to zero; a wish
/// for a factory id outside `1..=n` is dropped silently. Anything else that
/// deviates from the contract is a [`MalformedInstanceError`].
pub fn parse_instance(input: &str) -> Result<ProblemInstance> {
    let rows: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let (&(header_line, header), records) =
        rows.split_first().ok_or(MalformedInstanceError::EmptyInput)?;

    let counts = parse_fields(header_line, header)?;
    if counts.len() != 3 {
        return Err(MalformedInstanceError::WrongFieldCount {
            line: header_line,
            expected: 3,
            found: counts.len(),
        });
    }
    for &count in &counts {
        if count < 0 {
            return Err(MalformedInstanceError::NegativeCount(count));
        }
    }
    let (n, m, t) = (counts[0] as usize, counts[1] as usize, counts[2] as usize);

    let expected = n + m + t;
    if records.len() < expected {
        return Err(MalformedInstanceError::TruncatedInput {
            expected: expected + 1,
            found: records.len() + 1,
        });
    }

    let mut factories = Vec::with_capacity(n);
    for &(line, text) in &records[..n] {
        factories.push(parse_factory(line, text, n, m)?);
    }

    let mut countries = Vec::with_capacity(m);
    for &(line, text) in &records[n..n + m] {
        countries.push(parse_country(line, text, m)?);
    }

    let mut children = Vec::with_capacity(t);
    for &(line, text) in &records[n + m..n + m + t] {
        children.push(parse_child(line, text, n, m, t)?);
    }

    ProblemInstance::new(factories, countries, children)
}

fn parse_fields(line: usize, text: &str) -> Result<Vec<i64>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| MalformedInstanceError::InvalidInteger {
                    line,
                    token: token.to_string(),
                })
        })
        .collect()
}

fn parse_factory(line: usize, text: &str, n: usize, m: usize) -> Result<Factory> {
    let fields = parse_record(line, text, 3)?;
    let id = checked_id("factory", fields[0], n)?;
    let country = checked_country("factory", id, fields[1], m)?;
    Ok(Factory::new(id, country, clamp_capacity(fields[2])))
}

fn parse_country(line: usize, text: &str, m: usize) -> Result<Country> {
    let fields = parse_record(line, text, 3)?;
    let id = checked_id("country", fields[0], m)?;
    Ok(Country::new(
        id,
        clamp_capacity(fields[1]),
        clamp_capacity(fields[2]),
    ))
}

fn parse_child(line: usize, text: &str, n: usize, m: usize, t: usize) -> Result<Child> {
    let fields = parse_fields(line, text)?;
    if fields.len() < 2 {
        return Err(MalformedInstanceError::WrongFieldCount {
            line,
            expected: 2,
            found: fields.len(),
        });
    }
    let id = checked_id("child", fields[0], t)?;
    let country = checked_country("child", id, fields[1], m)?;
    // an id that names no declared factory can never be satisfiable
    let wishlist = fields[2..]
        .iter()
        .filter(|&&f| f >= 1 && f <= n as i64)
        .map(|&f| f as u32)
        .collect();
    Ok(Child::new(id, country, wishlist))
}

fn parse_record(line: usize, text: &str, expected: usize) -> Result<Vec<i64>> {
    let fields = parse_fields(line, text)?;
    if fields.len() != expected {
        return Err(MalformedInstanceError::WrongFieldCount {
            line,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

fn checked_id(kind: &'static str, id: i64, max: usize) -> Result<u32> {
    if id < 1 || id > max as i64 {
        return Err(MalformedInstanceError::IdOutOfRange { kind, id, max });
    }
    Ok(id as u32)
}

fn checked_country(kind: &'static str, id: u32, country: i64, m: usize) -> Result<u32> {
    if country < 1 || country > m as i64 {
        return Err(MalformedInstanceError::UnknownCountry {
            kind,
            id,
            country,
            max: m,
        });
    }
    Ok(country as u32)
}

fn clamp_capacity(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_complete_instance() {
        let instance = parse_instance(
            "2 1 2\n\
             1 1 5\n\
             2 1 0\n\
             1 10 0\n\
             1 1 1 2\n\
             2 1 2\n",
        )
        .unwrap();
        assert_eq!(instance.num_factories(), 2);
        assert_eq!(instance.num_countries(), 1);
        assert_eq!(instance.num_children(), 2);
        // factory 2 holds no stock, so only factory 1 survives sanitization
        assert_eq!(instance.options(0), &[1]);
        assert_eq!(instance.options(1), &[]);
    }

    #[test]
    fn skips_blank_lines() {
        let instance = parse_instance("1 1 1\n\n1 1 5\n\n1 10 0\n1 1 1\n").unwrap();
        assert_eq!(instance.num_children(), 1);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            parse_instance("   \n  "),
            Err(MalformedInstanceError::EmptyInput)
        ));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let err = parse_instance("1 1 1\n1 1 five\n1 10 0\n1 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            MalformedInstanceError::InvalidInteger { line: 2, .. }
        ));
    }

    #[test]
    fn rejects_truncated_input() {
        let err = parse_instance("1 1 2\n1 1 5\n1 10 0\n1 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            MalformedInstanceError::TruncatedInput { expected: 5, found: 4 }
        ));
    }

    #[test]
    fn rejects_out_of_range_record_ids() {
        let err = parse_instance("1 1 1\n2 1 5\n1 10 0\n1 1 1\n").unwrap_err();
        assert!(matches!(
            err,
            MalformedInstanceError::IdOutOfRange { kind: "factory", id: 2, max: 1 }
        ));
    }

    #[test]
    fn rejects_duplicate_records() {
        let err = parse_instance("2 1 0\n1 1 5\n1 1 5\n1 10 0\n").unwrap_err();
        assert!(matches!(
            err,
            MalformedInstanceError::DuplicateRecord { kind: "factory", id: 1 }
        ));
    }

    #[test]
    fn clamps_negative_capacities() {
        let instance = parse_instance("1 1 1\n1 1 -3\n1 -2 -1\n1 1 1\n").unwrap();
        assert_eq!(instance.factory(1).stock, 0);
        assert_eq!(instance.country(1).max_export, 0);
        assert_eq!(instance.country(1).min_delivery, 0);
    }

    #[test]
    fn drops_unknown_wishlist_ids_silently() {
        let instance = parse_instance("1 1 1\n1 1 5\n1 10 0\n1 1 7 -2 1 0\n").unwrap();
        assert_eq!(instance.children()[0].wishlist, vec![1]);
    }

    #[test]
    fn allows_degenerate_counts() {
        assert_eq!(parse_instance("0 1 0\n1 10 0\n").unwrap().num_factories(), 0);
        assert_eq!(parse_instance("1 1 0\n1 1 5\n1 10 0\n").unwrap().num_children(), 0);
    }
}
