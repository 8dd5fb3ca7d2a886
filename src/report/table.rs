//! Table rendering for the persisted snapshot.
//!
//! One row per tracked file: abbreviated digest, then the path.

use std::path::Path;

use crate::store::Snapshot;

const DIGEST_WIDTH: usize = 16;

pub fn render(snapshot: &Snapshot, location: &Path) -> String {
    if snapshot.is_empty() {
        return format!("No files tracked in {}.\n", location.display());
    }

    let mut output = format!(
        "{} files tracked in {}\n",
        snapshot.len(),
        location.display()
    );
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for (path, digest) in snapshot.iter() {
        output.push_str(&format!(
            "  {:width$}  {path}\n",
            truncate(digest.as_str(), DIGEST_WIDTH),
            width = DIGEST_WIDTH
        ));
    }

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::digest::Digest;

    #[test]
    fn empty_snapshot() {
        assert_eq!(
            render(&Snapshot::empty(), Path::new("hashes.json")),
            "No files tracked in hashes.json.\n"
        );
    }

    #[test]
    fn rows_are_sorted_with_short_digests() {
        let snapshot: Snapshot = [
            ("/b", "bbbbbbbbbbbbbbbbbbbbbbbb"),
            ("/a", "aaaa"),
        ]
        .into_iter()
        .map(|(p, d)| (p.to_string(), Digest::from(d.to_string())))
        .collect();

        let text = render(&snapshot, Path::new("hashes.json"));
        let rows: Vec<_> = text.lines().skip(2).collect();
        assert_eq!(rows, vec!["  aaaa              /a", "  bbbbbbbbbbbbb...  /b"]);
    }
}
