//! Runs the `tilecast` binary and checks the files it writes.

use std::path::Path;
use std::process::Command;

use pretty_assertions::assert_eq;

fn tilecast() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tilecast"))
}

fn read_png_size(path: &Path) -> (u32, u32) {
    let decoder = png::Decoder::new(std::io::BufReader::new(std::fs::File::open(path).unwrap()));
    let reader = decoder.read_info().unwrap();
    let info = reader.info();
    (info.width, info.height)
}

#[test]
fn renders_demo_layout() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("frame.png");
    let status = tilecast()
        .args(["--display-size", "40x30", "--seed", "1", "--template", "nested", "-o"])
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(read_png_size(&output), (40, 30));
}

#[test]
fn config_file_and_layout_file() {
    let dir = tempfile::tempdir().unwrap();
    let layout = dir.path().join("map.txt");
    std::fs::write(&layout, "1111\n1..1\n1..2\n1111\n").unwrap();
    let config = dir.path().join("settings.json");
    std::fs::write(
        &config,
        serde_json::json!({
            "renderer": "columns",
            "display_size": [16, 12],
            "layout": layout,
        })
        .to_string(),
    )
    .unwrap();
    let output = dir.path().join("frame.png");

    let status = tilecast()
        .arg("--config")
        .arg(&config)
        .args(["--display-size", "20x10", "-o"])
        .arg(&output)
        .status()
        .unwrap();
    assert!(status.success());
    // The command line overrides the file.
    assert_eq!(read_png_size(&output), (20, 10));
}

#[test]
fn invalid_layout_fails_with_message() {
    let dir = tempfile::tempdir().unwrap();
    let layout = dir.path().join("map.txt");
    std::fs::write(&layout, "1?\n11\n").unwrap();
    let output = dir.path().join("frame.png");

    let result = tilecast()
        .arg("--layout")
        .arg(&layout)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(
        stderr.contains("line 1, column 2: '?' is not a cell"),
        "stderr was: {stderr}"
    );
    assert!(!output.exists());
}
