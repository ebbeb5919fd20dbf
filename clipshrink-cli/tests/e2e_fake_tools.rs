// End-to-end run against stand-in shell scripts for ffprobe and HandBrakeCLI.
// Kept in its own test binary with a single test so no other test thread
// forks while the scripts are being written.
#![cfg(unix)]

use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const FAKE_FFPROBE: &str = "#!/bin/sh\necho '30000/1001'\n";

// Writes a short output wherever -o points and records its arguments.
const FAKE_HANDBRAKE: &str = r#"#!/bin/sh
echo "$@" >> "$(dirname "$0")/handbrake_calls.log"
out=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    *) shift ;;
  esac
done
if [ -n "$out" ]; then
  printf 'encoded' > "$out"
fi
exit 0
"#;

fn write_script(dir: &Path, name: &str, body: &str) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir.join(name);
    fs::write(&path, body)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

#[test]
fn test_encode_with_fake_tools() -> Result<(), Box<dyn Error>> {
    let tools = tempdir()?;
    let ffprobe = write_script(tools.path(), "ffprobe", FAKE_FFPROBE)?;
    let handbrake = write_script(tools.path(), "HandBrakeCLI", FAKE_HANDBRAKE)?;

    let footage = tempdir()?;
    let root = footage.path();
    fs::write(root.join("clip.mp4"), vec![b'x'; 100])?;
    fs::create_dir(root.join("day2"))?;
    fs::write(root.join("day2").join("beach.MTS"), vec![b'x'; 100])?;

    let run = || {
        let mut cmd = Command::cargo_bin("clipshrink").expect("Failed to find clipshrink binary");
        cmd.arg("encode")
            .arg(root)
            .arg("--handbrake")
            .arg(&handbrake)
            .arg("--ffprobe")
            .arg(&ffprobe);
        cmd
    };

    run()
        .assert()
        .success()
        .stdout(contains("HB clip.mp4"))
        .stdout(contains("saved 93.00%"))
        .stdout(contains("Processing complete."));

    assert_eq!(fs::read(root.join("HB clip.mp4"))?, b"encoded");
    assert!(root.join("staging").join("clip.mp4").exists());
    assert!(root.join("day2").join("HB beach.MTS").exists());
    assert!(root.join("day2").join("staging").join("beach.MTS").exists());

    let calls = fs::read_to_string(tools.path().join("handbrake_calls.log"))?;
    let encode_calls: Vec<&str> = calls.lines().filter(|line| line.contains("-i ")).collect();
    assert_eq!(encode_calls.len(), 2);
    for call in encode_calls {
        assert!(call.contains("-e x264 -q 22 --cfr -r 29.97"), "call: {call}");
    }

    // Everything is already done, so the second run finds nothing
    run()
        .assert()
        .success()
        .stdout(contains("No video files found"));

    // JSON mode on fresh footage
    let more = tempdir()?;
    fs::write(more.path().join("clip.mp4"), vec![b'x'; 100])?;
    let mut cmd = Command::cargo_bin("clipshrink").expect("Failed to find clipshrink binary");
    cmd.arg("encode")
        .arg(more.path())
        .arg("--json")
        .arg("--handbrake")
        .arg(&handbrake)
        .arg("--ffprobe")
        .arg(&ffprobe)
        .assert()
        .success()
        .stdout(contains("\"type\":\"file_completed\""))
        .stdout(contains("\"type\":\"run_complete\""));

    Ok(())
}
