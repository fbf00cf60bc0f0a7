//! Reads the pipe-delimited input files into the core's record sets.
//!
//! The core parses lines; this module owns the disk I/O and attaches
//! the file path to any parse error.

use costar_graph::{Membership, NameTable};
use std::fs;
use std::path::Path;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Loads an `id|name` file into a [`NameTable`].
pub fn load_name_table(path: &Path) -> Result<NameTable> {
    let text = read(path)?;
    NameTable::from_lines(text.lines().map(strip_cr))
        .map_err(|e| format!("{}: {}", path.display(), e).into())
}

/// Loads a `groupId|entityId` file into membership records.
pub fn load_memberships(path: &Path) -> Result<Vec<Membership>> {
    let text = read(path)?;
    Membership::from_lines(text.lines().map(strip_cr))
        .map_err(|e| format!("{}: {}", path.display(), e).into())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e).into())
}

/// CRLF inputs are common for these files.
fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_name_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1|Alice\r\n2|Bob\n").unwrap();

        let table = load_name_table(file.path()).unwrap();
        assert_eq!(table.resolve("1"), Some("Alice"));
        assert_eq!(table.resolve("2"), Some("Bob"));
    }

    #[test]
    fn test_load_memberships() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "m1|1\nm1|2\n").unwrap();

        let records = load_memberships(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].group_id, "m1");
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "no separator here\n").unwrap();

        let err = load_name_table(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_name_table(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("not/here.txt"));
    }
}
