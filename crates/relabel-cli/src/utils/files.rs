use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const PDB_EXTENSION: &str = "pdb";

/// Resolves the structures to process: the path itself if it is a file,
/// otherwise every `*.pdb` directly inside it, sorted by name.
pub fn collect_pdb_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry_path = entry?.path();
        let is_pdb = entry_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(PDB_EXTENSION));
        if is_pdb && entry_path.is_file() {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output path for `input` inside `output_dir`, keeping the file name.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => output_dir.join(name),
        None => output_dir.join(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_listing_keeps_only_pdb_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.pdb", "a.PDB", "notes.txt", "c.cif"] {
            fs::write(dir.path().join(name), "END\n").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdb")).unwrap();

        let files = collect_pdb_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PDB", "b.pdb"]);
    }

    #[test]
    fn single_file_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.pdb");
        fs::write(&path, "END\n").unwrap();
        assert_eq!(collect_pdb_files(&path).unwrap(), vec![path]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_pdb_files(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn output_keeps_file_name() {
        assert_eq!(
            output_path_for(Path::new("models/1_run_model.pdb"), Path::new("out")),
            PathBuf::from("out/1_run_model.pdb")
        );
    }
}
