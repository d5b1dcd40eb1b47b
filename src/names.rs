//! Output file naming
//!
//! Compressing `name.ext` produces `name.ext.huf`.
//! Decompressing `name.ext.huf` produces `name_unc.ext`.

use std::path::{Path,PathBuf};
use crate::Error;

pub const EXTENSION: &str = "huf";

/// name of the compressed file, `.huf` is appended to whatever is there
pub fn compressed_name(path: &Path) -> PathBuf {
    let mut ans = path.as_os_str().to_os_string();
    ans.push(".");
    ans.push(EXTENSION);
    PathBuf::from(ans)
}

/// Name of the decompressed file.  The `.huf` extension is removed and `_unc`
/// is inserted ahead of the remaining extension, if any.  A leading dot does
/// not start an extension, so `.txt.huf` becomes `.txt_unc`.
pub fn expanded_name(path: &Path) -> Result<PathBuf,Error> {
    if path.extension().and_then(|x| x.to_str()) != Some(EXTENSION) {
        return Err(Error::UnexpectedExtension(path.display().to_string()));
    }
    let inner = path.with_extension("");
    let stem = match inner.file_stem() {
        Some(s) => s,
        None => return Err(Error::UnexpectedExtension(path.display().to_string()))
    };
    let mut fname = stem.to_os_string();
    fname.push("_unc");
    if let Some(ext) = inner.extension() {
        fname.push(".");
        fname.push(ext);
    }
    Ok(inner.with_file_name(fname))
}

#[test]
fn naming_convention() {
    assert_eq!(compressed_name(Path::new("example.txt")),PathBuf::from("example.txt.huf"));
    assert_eq!(expanded_name(Path::new("example.txt.huf")).unwrap(),PathBuf::from("example_unc.txt"));
    assert_eq!(expanded_name(Path::new("dir/a.b.txt.huf")).unwrap(),Path::new("dir").join("a.b_unc.txt"));
    assert_eq!(expanded_name(Path::new("example.huf")).unwrap(),PathBuf::from("example_unc"));
    // dot files have no extension
    assert_eq!(expanded_name(Path::new(".txt.huf")).unwrap(),PathBuf::from(".txt_unc"));
    assert_eq!(expanded_name(Path::new(".cfg.txt.huf")).unwrap(),PathBuf::from(".cfg_unc.txt"));
}

#[test]
fn wrong_extension() {
    assert!(matches!(expanded_name(Path::new("example.txt")),Err(Error::UnexpectedExtension(_))));
    assert!(matches!(expanded_name(Path::new(".huf")),Err(Error::UnexpectedExtension(_))));
}
