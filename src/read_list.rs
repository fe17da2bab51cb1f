use crate::types::{HashSet, HashSetExt};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load read ids, one per line. Blank lines and `#` comments are skipped;
/// only the first whitespace-separated field of a line is used.
pub fn load_read_ids(path: &Path) -> std::io::Result<HashSet<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut ids = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(id) = line.split_whitespace().next() {
            ids.insert(id.to_string());
        }
    }
    Ok(ids)
}
