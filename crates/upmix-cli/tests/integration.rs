//! Integration tests for upmix-cli.
//!
//! Tests cover the CLI binary invocation and end-to-end file processing.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to get the path to the `upmix` binary built by cargo.
fn upmix_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_upmix"))
}

fn write_test_wav(path: &Path, channels: u16, frames: usize) -> Vec<f32> {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 44100,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let samples: Vec<f32> = (0..frames * usize::from(channels))
        .map(|i| (i as f32 * 0.01).sin() * 0.5)
        .collect();

    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for &s in &samples {
        writer.write_sample(s).unwrap();
    }
    writer.finalize().unwrap();
    samples
}

fn read_test_wav(path: &Path) -> (hound::WavSpec, Vec<f32>) {
    let mut reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<f32>().map(Result::unwrap).collect();
    (spec, samples)
}

fn run_ok(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to run upmix");
    assert!(
        output.status.success(),
        "upmix failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// CLI binary tests -- general
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let stdout = run_ok(upmix_bin().arg("--help"));
    assert!(stdout.contains("process"));
    assert!(stdout.contains("layouts"));
    assert!(stdout.contains("presets"));
}

#[test]
fn cli_version_works() {
    let stdout = run_ok(upmix_bin().arg("--version"));
    assert!(stdout.contains("upmix"));
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `upmix layouts`
// ---------------------------------------------------------------------------

#[test]
fn cli_layouts_lists_all_setups() {
    let stdout = run_ok(upmix_bin().arg("layouts"));
    assert!(stdout.contains("Available Layouts"));
    for name in ["Stereo", "5.1 Surround", "7.1 Panorama", "16.1"] {
        assert!(stdout.contains(name), "layouts should list '{name}'");
    }
}

#[test]
fn cli_layouts_wiring_marks_aliases() {
    let stdout = run_ok(upmix_bin().args(["layouts", "16.1", "--wiring"]));
    assert!(stdout.contains("Slot"));
    assert!(stdout.contains("(aliased)"));
}

#[test]
fn cli_layouts_unknown_fails() {
    let output = upmix_bin().args(["layouts", "22.2"]).output().unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `upmix process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_stereo_to_five_one() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_test_wav(&input, 2, 5000);

    run_ok(upmix_bin().args([
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--block-frames",
        "1024",
        "--chunk-frames",
        "300",
    ]));

    let (spec, samples) = read_test_wav(&output);
    assert_eq!(spec.channels, 6);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(samples.len(), 5000 * 6);
    assert!(samples.iter().all(|s| s.is_finite()));
    assert!(samples.iter().any(|&s| s != 0.0));
}

#[test]
fn cli_process_layout_and_preset() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_test_wav(&input, 2, 2048);

    run_ok(upmix_bin().args([
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--preset",
        "focused",
        "--layout",
        "7.1",
        "--block-frames",
        "512",
        "--bit-depth",
        "16",
    ]));

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().channels, 8);
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.duration(), 2048);
}

#[test]
fn cli_process_mono_passes_through() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("mono.wav");
    let output = dir.path().join("out.wav");
    let original = write_test_wav(&input, 1, 1000);

    let stdout = run_ok(upmix_bin().args([
        "process",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--block-frames",
        "256",
    ]));
    assert!(stdout.contains("not stereo"));

    let (spec, samples) = read_test_wav(&output);
    assert_eq!(spec.channels, 1);
    assert_eq!(samples, original);
}

#[test]
fn cli_process_unknown_layout_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    write_test_wav(&input, 2, 100);

    let output = upmix_bin()
        .args([
            "process",
            input.to_str().unwrap(),
            dir.path().join("out.wav").to_str().unwrap(),
            "--layout",
            "22.2",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown layout"));
}

#[test]
fn cli_process_nonexistent_input_fails() {
    let output = upmix_bin()
        .args(["process", "/nonexistent/input.wav", "/tmp/upmix-out.wav"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// CLI binary tests -- `upmix presets`
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_list_shows_factory() {
    let stdout = run_ok(upmix_bin().args(["presets", "list"]));
    for name in ["Default", "Wide", "Focused", "Cinema"] {
        assert!(stdout.contains(name), "missing factory preset {name}");
    }
}

#[test]
fn cli_presets_show_renders_labels() {
    let stdout = run_ok(upmix_bin().args(["presets", "show", "default"]));
    assert!(stdout.contains("5.1 Surround"));
    assert!(stdout.contains("(90)"));
    assert!(stdout.contains("(40Hz)"));
    assert!(stdout.contains("circular_wrap"));
    assert!(stdout.contains("90.00 deg"));
}

#[test]
fn cli_presets_export_writes_blob() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("cinema.bin");
    run_ok(upmix_bin().args(["presets", "export", "cinema", "--out", out.to_str().unwrap()]));

    let blob = std::fs::read(&out).unwrap();
    assert_eq!(&blob[..4], b"UPMX");
    // Header and scalars, plus one flag per 7.1 channel.
    assert_eq!(blob.len(), 46 + 4 * 8);
}

#[cfg(unix)]
#[test]
fn cli_presets_save_then_show() {
    let home = TempDir::new().unwrap();
    let with_home = |cmd: &mut Command| {
        cmd.env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path().join(".config"));
    };

    let mut save = upmix_bin();
    save.args(["presets", "save", "mine", "--from", "cinema", "--layout", "5.1"]);
    with_home(&mut save);
    run_ok(&mut save);

    let mut show = upmix_bin();
    show.args(["presets", "show", "mine"]);
    with_home(&mut show);
    let stdout = run_ok(&mut show);
    assert!(stdout.contains("5.1 Surround"));
    assert!(stdout.contains("Redirect bass: yes"));

    let mut again = upmix_bin();
    again.args(["presets", "save", "mine"]);
    with_home(&mut again);
    assert!(!again.output().unwrap().status.success());
}
