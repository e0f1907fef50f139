//! Edge-list file loading.
//!
//! One edge per line: two whitespace-separated integer node ids. The file
//! lists both ordered pairs of every undirected edge, so each line becomes a
//! single adjacency entry. Blank lines are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pathmeet_core::{Graph, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read edge list: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected two node ids, found {found:?}")]
    Malformed { line: usize, found: String },
}

/// Graph shipped with the bench: `1-2-3-4, 3-5, 4-5, 1-6-7, 8-9`.
pub const SAMPLE: &str = include_str!("../data/edgelist.txt");

pub fn read_edge_list(path: &Path) -> Result<Graph, LoadError> {
    let file = File::open(path)?;
    parse_edge_list(BufReader::new(file))
}

pub fn parse_edge_list<R: BufRead>(reader: R) -> Result<Graph, LoadError> {
    let mut graph = Graph::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let (from, to) = match (tokens.next(), tokens.next(), tokens.next()) {
            (None, _, _) => continue,
            (Some(a), Some(b), None) => (parse_id(a), parse_id(b)),
            _ => (None, None),
        };
        match (from, to) {
            (Some(from), Some(to)) => graph.add_arc(from, to),
            _ => {
                return Err(LoadError::Malformed {
                    line: idx + 1,
                    found: line,
                })
            }
        }
    }

    Ok(graph)
}

fn parse_id(token: &str) -> Option<NodeId> {
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_sample_matches_expected_adjacency() {
        let g = parse_edge_list(Cursor::new(SAMPLE)).unwrap();
        let expected: [(NodeId, &[NodeId]); 9] = [
            (1, &[2, 6]),
            (2, &[1, 3]),
            (3, &[2, 4, 5]),
            (4, &[3, 5]),
            (5, &[3, 4]),
            (6, &[1, 7]),
            (7, &[6]),
            (8, &[9]),
            (9, &[8]),
        ];
        assert_eq!(g.node_count(), 9);
        for (id, neighbors) in expected {
            let mut actual = g.neighbors(id).to_vec();
            actual.sort();
            assert_eq!(actual, neighbors, "node {}", id);
        }
    }

    #[test]
    fn test_blank_lines_and_spacing() {
        let g = parse_edge_list(Cursor::new("1 2\n\n   \n2\t 1\n")).unwrap();
        assert_eq!(g.neighbors(1), &[2]);
        assert_eq!(g.neighbors(2), &[1]);
    }

    #[test]
    fn test_malformed_line_reports_number() {
        for bad in ["1 2\n3\n", "1 2\n3 x\n", "1 2\n3 4 5\n", "1 2\n-3 4\n"] {
            match parse_edge_list(Cursor::new(bad)) {
                Err(LoadError::Malformed { line, .. }) => assert_eq!(line, 2, "{:?}", bad),
                other => panic!("expected malformed error for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "10 20\n20 10\n").unwrap();
        let g = read_edge_list(file.path()).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = read_edge_list(Path::new("/nonexistent/edges.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
