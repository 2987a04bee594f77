//! CLI end-to-end tests
//!
//! Tests for the partforge command-line interface. Anything that needs
//! ffmpeg or ffprobe runs against stub scripts on a private PATH, so
//! the suite passes on machines without the real tools.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the partforge binary
#[allow(deprecated)]
fn partforge_cmd() -> Command {
    Command::cargo_bin("partforge").unwrap()
}

/// Write one executable stub script into `dir`.
#[cfg(unix)]
fn write_stub(dir: &Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Write stub ffprobe/ffmpeg scripts into `dir`.
///
/// The ffprobe stub reports a fixed 30 second, 1 Mbps file. The ffmpeg
/// stub does nothing except touch `$PARTFORGE_MARKER` when that
/// variable is set, which lets tests assert it was never invoked.
#[cfg(unix)]
fn stub_tools(dir: &Path) {
    let probe_json = r#"{"format":{"duration":"30.0","bit_rate":"1000000"},"streams":[{"bit_rate":"800000"},{"bit_rate":"200000"}]}"#;
    write_stub(dir, "ffprobe", &format!("#!/bin/sh\necho '{probe_json}'\n"));
    write_stub(
        dir,
        "ffmpeg",
        "#!/bin/sh\n[ -n \"$PARTFORGE_MARKER\" ] && touch \"$PARTFORGE_MARKER\"\nexit 0\n",
    );
}

/// PATH value with `dir` prepended, so the stubs win the lookup.
#[cfg(unix)]
fn stubbed_path(dir: &Path) -> std::ffi::OsString {
    let mut paths = vec![dir.to_path_buf()];
    if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(paths).unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = partforge_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = partforge_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("partforge"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_flag() {
    let mut cmd = partforge_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("partforge"));
}

#[test]
fn test_cli_split_help() {
    let mut cmd = partforge_cmd();
    cmd.args(["split", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Split a single file"))
        .stdout(predicate::str::contains("--size-limit"));
}

#[test]
fn test_cli_batch_help() {
    let mut cmd = partforge_cmd();
    cmd.args(["batch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Split every video"))
        .stdout(predicate::str::contains("--skip-existing"));
}

#[test]
fn test_cli_probe_help() {
    let mut cmd = partforge_cmd();
    cmd.args(["probe", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Probe a media file"));
}

#[test]
fn test_cli_check_tools_command() {
    let mut cmd = partforge_cmd();
    cmd.arg("check-tools").assert().success().stdout(
        predicate::str::contains("ffmpeg")
            .or(predicate::str::contains("ffprobe"))
            .or(predicate::str::contains("tools")),
    );
}

#[test]
fn test_cli_split_nonexistent_file() {
    let mut cmd = partforge_cmd();
    cmd.args(["split", "/nonexistent/path/movie.mkv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_batch_nonexistent_folder() {
    let mut cmd = partforge_cmd();
    cmd.args(["batch", "/nonexistent/path/videos"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_probe_nonexistent_file() {
    let mut cmd = partforge_cmd();
    cmd.args(["probe", "/nonexistent/path/movie.mkv"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[cfg(unix)]
#[test]
fn test_cli_split_simulate_shows_preview() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    let input = temp.path().join("movie.mkv");
    fs::write(&input, b"not really a video").unwrap();

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args(["split", input.to_str().unwrap(), "--simulate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== Preview =="))
        .stdout(predicate::str::contains("Duration: 30.00 s"))
        .stdout(predicate::str::contains("Mode: stream copy"))
        .stdout(predicate::str::contains("Simulation only."));
}

#[cfg(unix)]
#[test]
fn test_cli_split_reencode_preview_uses_target_bitrates() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    let input = temp.path().join("movie.mkv");
    fs::write(&input, b"not really a video").unwrap();

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args([
            "split",
            input.to_str().unwrap(),
            "--simulate",
            "--reencode",
            "--video-bitrate",
            "1m",
            "--audio-bitrate",
            "128k",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Mode: re-encode (v=1000000 bps, a=128000 bps)",
        ));
}

#[cfg(unix)]
#[test]
fn test_cli_split_rejects_bad_size() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    let input = temp.path().join("movie.mkv");
    fs::write(&input, b"not really a video").unwrap();

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args([
            "split",
            input.to_str().unwrap(),
            "--size-limit",
            "12parsecs",
            "--simulate",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid size"));
}

#[cfg(unix)]
#[test]
fn test_cli_split_exit_code_2_when_duration_unknown() {
    let temp = tempdir().unwrap();
    // ffprobe runs fine but the container carries no duration.
    write_stub(
        temp.path(),
        "ffprobe",
        "#!/bin/sh\necho '{\"format\":{},\"streams\":[]}'\n",
    );
    write_stub(temp.path(), "ffmpeg", "#!/bin/sh\nexit 0\n");
    let input = temp.path().join("movie.mkv");
    fs::write(&input, b"not really a video").unwrap();

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args(["split", input.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("duration"));
}

#[cfg(unix)]
#[test]
fn test_cli_split_exit_code_3_when_copy_cut_fails() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    write_stub(
        temp.path(),
        "ffmpeg",
        "#!/bin/sh\necho 'muxer exploded' >&2\nexit 1\n",
    );
    let input = temp.path().join("movie.mkv");
    fs::write(&input, b"not really a video").unwrap();
    let outdir = temp.path().join("out");

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args([
            "split",
            input.to_str().unwrap(),
            "--outdir",
            outdir.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("stream copy cut failed"));
}

#[cfg(unix)]
#[test]
fn test_cli_split_exit_code_4_when_reencode_cut_fails() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    write_stub(
        temp.path(),
        "ffmpeg",
        "#!/bin/sh\necho 'encoder exploded' >&2\nexit 1\n",
    );
    let input = temp.path().join("movie.mkv");
    fs::write(&input, b"not really a video").unwrap();
    let outdir = temp.path().join("out");

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args([
            "split",
            input.to_str().unwrap(),
            "--reencode",
            "--outdir",
            outdir.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("re-encode cut failed"));
}

#[cfg(unix)]
#[test]
fn test_cli_probe_text_output() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    let input = temp.path().join("movie.mkv");
    fs::write(&input, b"not really a video").unwrap();

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args(["probe", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Duration: 30.00 s"))
        .stdout(predicate::str::contains("Bitrate: 1000000 bps"));
}

#[cfg(unix)]
#[test]
fn test_cli_probe_json_output() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    let input = temp.path().join("movie.mkv");
    fs::write(&input, b"not really a video").unwrap();

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args(["probe", "--json", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"duration\""))
        .stdout(predicate::str::contains("\"bitrate\""));
}

#[cfg(unix)]
#[test]
fn test_cli_batch_skip_existing_never_invokes_ffmpeg() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    let root = temp.path().join("videos");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.mp4"), b"not really a video").unwrap();
    let outroot = temp.path().join("out");
    fs::create_dir(&outroot).unwrap();
    fs::write(outroot.join("a_part01.mp4"), b"from an earlier run").unwrap();
    let marker = temp.path().join("ffmpeg_ran");

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .env("PARTFORGE_MARKER", &marker)
        .args([
            "batch",
            root.to_str().unwrap(),
            "--outroot",
            outroot.to_str().unwrap(),
            "--skip-existing",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skip (exists):"))
        .stdout(predicate::str::contains("a.mp4"))
        .stdout(predicate::str::contains("0 split, 1 skipped, 0 failed"));

    assert!(!marker.exists());
}

#[cfg(unix)]
#[test]
fn test_cli_batch_empty_folder() {
    let temp = tempdir().unwrap();
    stub_tools(temp.path());
    let root = temp.path().join("videos");
    fs::create_dir(&root).unwrap();

    let mut cmd = partforge_cmd();
    cmd.env("PATH", stubbed_path(temp.path()))
        .args(["batch", root.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No videos found."));
}
