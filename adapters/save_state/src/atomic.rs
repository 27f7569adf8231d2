use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use tempfile::NamedTempFile;

/// Stages `text` in the target's directory and renames it over `path`.
///
/// The previous file stays in place until the rename succeeds, so readers see
/// either the old slot or the new one.
pub(crate) fn write_text(path: &Path, text: &str) -> io::Result<()> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(directory)?;

    let mut staged = NamedTempFile::new_in(directory)?;
    staged.write_all(text.as_bytes())?;
    staged.as_file().sync_all()?;
    let _ = staged.persist(path).map_err(|error| error.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(directory: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(directory)
            .expect("dir lists")
            .map(|entry| {
                entry
                    .expect("entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    #[test]
    fn replaces_existing_file_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("slot.txt");
        fs::write(&path, "old").expect("seed file");

        write_text(&path, "new").expect("write succeeds");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "new");
        assert_eq!(entries(dir.path()), vec!["slot.txt"]);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("slot.txt");

        write_text(&path, "data").expect("write succeeds");

        assert_eq!(fs::read_to_string(&path).expect("read back"), "data");
    }

    #[test]
    fn failed_replace_keeps_the_existing_entry() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("slot");
        fs::create_dir(&path).expect("blocking directory");
        fs::write(path.join("keep.txt"), "kept").expect("seed file");

        assert!(write_text(&path, "new").is_err());

        assert_eq!(
            fs::read_to_string(path.join("keep.txt")).expect("entry survives"),
            "kept"
        );
        assert_eq!(entries(dir.path()), vec!["slot"]);
    }
}
