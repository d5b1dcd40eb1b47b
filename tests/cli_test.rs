use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command; // Run programs
use tempfile;
type STDRESULT = Result<(),Box<dyn std::error::Error>>;

const SAM: &str = "I am Sam. Sam I am. I do not like this Sam I am.\n";

// Write the test data into the temporary directory with the given file name.
fn make_input(temp_dir: &tempfile::TempDir,name: &str,dat: &[u8]) -> Result<PathBuf,Box<dyn std::error::Error>> {
    let path = temp_dir.path().join(name);
    std::fs::write(&path,dat)?;
    Ok(path)
}

#[test]
fn default_names_round_trip() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = make_input(&temp_dir,"sam.txt",SAM.as_bytes())?;
    Command::cargo_bin("huffcoder")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .assert()
        .success()
        .stderr(predicate::str::contains("compressed 49 into"));
    let cmp_path = temp_dir.path().join("sam.txt.huf");
    assert!(cmp_path.exists());
    Command::cargo_bin("huffcoder")?
        .arg("decompress")
        .arg("-i").arg(&cmp_path)
        .assert()
        .success();
    let out_path = temp_dir.path().join("sam_unc.txt");
    assert_eq!(std::fs::read(out_path)?,SAM.as_bytes().to_vec());
    Ok(())
}

#[test]
fn explicit_names_round_trip() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let dat: Vec<u8> = (0..=255).chain(0..=127).collect();
    let in_path = make_input(&temp_dir,"binary",&dat)?;
    let cmp_path = temp_dir.path().join("packed");
    let out_path = temp_dir.path().join("unpacked");
    Command::cargo_bin("huffcoder")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("-o").arg(&cmp_path)
        .assert()
        .success();
    Command::cargo_bin("huffcoder")?
        .arg("expand")
        .arg("-i").arg(&cmp_path)
        .arg("-o").arg(&out_path)
        .assert()
        .success();
    assert_eq!(std::fs::read(out_path)?,dat);
    Ok(())
}

#[test]
fn print_bits() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = make_input(&temp_dir,"ab.txt","ab\n".as_bytes())?;
    Command::cargo_bin("huffcoder")?
        .arg("compress")
        .arg("-i").arg(&in_path)
        .arg("--bits")
        .assert()
        .success()
        .stdout(predicate::str::diff("01100011\n"));
    let compressed = std::fs::read(temp_dir.path().join("ab.txt.huf"))?;
    assert_eq!(compressed.len(),46);
    assert_eq!(compressed[45],0x63);
    Ok(())
}

#[test]
fn needs_huf_extension() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = make_input(&temp_dir,"sam.txt",SAM.as_bytes())?;
    Command::cargo_bin("huffcoder")?
        .arg("decompress")
        .arg("-i").arg(&in_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("UnexpectedExtension"));
    Ok(())
}

#[test]
fn rejects_plain_file() -> STDRESULT {
    let temp_dir = tempfile::tempdir()?;
    let in_path = make_input(&temp_dir,"sam.txt.huf",SAM.as_bytes())?;
    Command::cargo_bin("huffcoder")?
        .arg("decompress")
        .arg("-i").arg(&in_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("MalformedHeader"));
    Ok(())
}
