//! Instance file loader.
//!
//! # Format
//!
//! ```text
//! nb_tasks nb_resources
//! capacity_0 .. capacity_{R-1}
//! pt_0 w_0 pt_1 w_1 .. pt_{R-1} w_{R-1}     (one line per task)
//! k succ_1 .. succ_k                         (one line per task)
//! ```
//!
//! Blank lines are ignored. A `(0, 0)` pair marks a resource the task
//! cannot run on.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::{InstanceError, InstanceResult};
use crate::models::{Instance, RawInstance};
use crate::validation::ValidationError;

/// Reads and builds an instance from a file.
pub fn read_instance(path: impl AsRef<Path>) -> InstanceResult<Instance> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    debug!("read {} bytes from {}", text.len(), path.display());
    parse_instance(&text)
}

/// Parses and builds an instance from its textual form.
pub fn parse_instance(text: &str) -> InstanceResult<Instance> {
    Instance::from_raw(parse_raw(text)?)
}

/// Parses the textual form without validating it.
///
/// Token-count problems on a line are reported as `MalformedInstance`
/// dimension mismatches; unreadable tokens and missing lines as `Parse`.
pub fn parse_raw(text: &str) -> InstanceResult<RawInstance> {
    let mut lines = Lines::new(text);

    let (line, header) = lines.next_ints("header `nb_tasks nb_resources`")?;
    if header.len() != 2 {
        return Err(InstanceError::parse(
            line,
            format!("expected `nb_tasks nb_resources`, found {} values", header.len()),
        ));
    }
    let nb_tasks = to_count(line, "nb_tasks", header[0])?;
    let nb_resources = to_count(line, "nb_resources", header[1])?;

    let mut errors = Vec::new();

    let (_, capacities) = lines.next_ints("resource capacities")?;
    if capacities.len() != nb_resources {
        errors.push(ValidationError::dimension(
            "resource capacities",
            nb_resources,
            capacities.len(),
        ));
    }

    // Counts come from untrusted input; vectors grow with the lines read.
    let pair_values = nb_resources.saturating_mul(2);
    let mut task_data = Vec::new();
    for task in 0..nb_tasks {
        let (_, row) = lines.next_ints(&format!("processing data for task {task}"))?;
        if row.len() != pair_values {
            errors.push(ValidationError::dimension(
                &format!("values on the processing line of task {task}"),
                pair_values,
                row.len(),
            ));
        }
        task_data.push(row.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect());
    }

    let mut successors = Vec::new();
    for task in 0..nb_tasks {
        let (line, row) = lines.next_ints(&format!("successors of task {task}"))?;
        let Some((&count, ids)) = row.split_first() else {
            return Err(InstanceError::parse(line, "empty successor line"));
        };
        if count < 0 || count as usize != ids.len() {
            errors.push(ValidationError::dimension(
                &format!("successor ids for task {task}"),
                count.max(0) as usize,
                ids.len(),
            ));
        }
        successors.push(ids.to_vec());
    }

    let trailing = lines.remaining();
    if trailing > 0 {
        warn!("ignoring {trailing} trailing line(s) after the successor block");
    }

    if !errors.is_empty() {
        return Err(InstanceError::MalformedInstance(errors));
    }

    Ok(RawInstance {
        nb_tasks,
        nb_resources,
        capacities,
        task_data,
        successors,
    })
}

fn to_count(line: usize, what: &str, value: i64) -> InstanceResult<usize> {
    usize::try_from(value)
        .map_err(|_| InstanceError::parse(line, format!("{what} must be non-negative, got {value}")))
}

/// Non-blank lines with their 1-based line numbers.
struct Lines<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    last_line: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: Box::new(
                text.lines()
                    .enumerate()
                    .map(|(i, l)| (i + 1, l.trim()))
                    .filter(|(_, l)| !l.is_empty()),
            ),
            last_line: 0,
        }
    }

    fn next_ints(&mut self, expected: &str) -> InstanceResult<(usize, Vec<i64>)> {
        let Some((line, content)) = self.inner.next() else {
            return Err(InstanceError::parse(
                self.last_line + 1,
                format!("unexpected end of input, expected {expected}"),
            ));
        };
        self.last_line = line;
        let values = content
            .split_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| {
                    InstanceError::parse(line, format!("invalid integer `{token}` in {expected}"))
                })
            })
            .collect::<InstanceResult<Vec<_>>>()?;
        Ok((line, values))
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    const SAMPLE: &str = "\
3 2
5 3

3 3 0 0
2 4 6 1
0 0 1 2

1 1
1 2
0
";

    #[test]
    fn test_parse_sample() {
        let inst = parse_instance(SAMPLE).unwrap();
        assert_eq!(inst.num_tasks(), 3);
        assert_eq!(inst.num_resources(), 2);
        assert_eq!(inst.capacity(1), Some(3));
        assert_eq!(inst.eligibility(0).len(), 1);
        assert_eq!(inst.eligibility(1).len(), 2);
        assert_eq!(inst.processing_time(2, 1), Some(1));
        assert_eq!(inst.successors(0), &[1]);
        assert_eq!(inst.successors(1), &[2]);
        assert!(inst.successors(2).is_empty());
    }

    #[test]
    fn test_parse_raw_keeps_zero_pairs() {
        let raw = parse_raw(SAMPLE).unwrap();
        assert_eq!(raw.task_data[0], vec![(3, 3), (0, 0)]);
        assert_eq!(raw.successors[2], Vec::<i64>::new());
    }

    #[test]
    fn test_invalid_token() {
        let err = parse_raw("1 1\n5\n3 x\n0\n").unwrap_err();
        match err {
            InstanceError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("`x`"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_lines() {
        let err = parse_raw("2 1\n5\n3 1\n").unwrap_err();
        assert!(matches!(err, InstanceError::Parse { .. }));
    }

    #[test]
    fn test_capacity_count_mismatch() {
        let err = parse_raw("1 2\n5\n3 1 0 0\n0\n").unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::DimensionMismatch
        );
    }

    #[test]
    fn test_successor_count_mismatch() {
        let err = parse_raw("2 1\n5\n3 1\n2 1\n2 1\n0\n").unwrap_err();
        assert!(err
            .validation_errors()
            .iter()
            .any(|e| e.message.contains("successor ids for task 0")));
    }

    #[test]
    fn test_out_of_range_successor() {
        let err = parse_instance("1 1\n5\n3 1\n1 4\n").unwrap_err();
        assert!(err
            .validation_errors()
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidSuccessor));
    }

    #[test]
    fn test_negative_header() {
        assert!(matches!(
            parse_raw("-1 1\n").unwrap_err(),
            InstanceError::Parse { line: 1, .. }
        ));
    }

    #[test]
    fn test_huge_task_count_reports_missing_lines() {
        match parse_instance("1000000000000000000 1\n5\n").unwrap_err() {
            InstanceError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("task 0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_huge_resource_count_is_malformed() {
        let err = parse_raw("1 9223372036854775807\n5\n3 1\n0\n").unwrap_err();
        let errors = err.validation_errors();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::DimensionMismatch));
    }

    #[test]
    fn test_trailing_lines_ignored() {
        let text = format!("{SAMPLE}\n42\n");
        assert!(parse_instance(&text).is_ok());
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_instance("/nonexistent/instance.txt").unwrap_err();
        assert!(matches!(err, InstanceError::Io(_)));
    }
}
