use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn snipmark_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("snipmark").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", temp.path())
        .env("HOME", temp.path())
        .env_remove("RUST_LOG");
    cmd
}

/// Writes a 200x150 white screenshot and returns its path.
fn write_screenshot(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("screen.png");
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 200, 150).unwrap();
    {
        let ctx = cairo::Context::new(&surface).unwrap();
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().unwrap();
    }
    let mut file = File::create(&path).unwrap();
    surface.write_to_png(&mut file).unwrap();
    path
}

fn read_png(path: &Path) -> cairo::ImageSurface {
    let mut file = File::open(path).unwrap();
    cairo::ImageSurface::create_from_png(&mut file).unwrap()
}

fn pixel(surface: &cairo::ImageSurface, x: i32, y: i32) -> u32 {
    let offset = (y * surface.stride() + x * 4) as usize;
    let mut value = 0;
    surface
        .with_data(|data| {
            value = u32::from_ne_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ]);
        })
        .unwrap();
    value
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    snipmark_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Screen capture and annotation tool"));
}

#[test]
fn region_and_save_writes_cropped_png() {
    let temp = TempDir::new().unwrap();
    let screenshot = write_screenshot(&temp);
    let output = temp.path().join("out.png");

    snipmark_cmd(&temp)
        .arg("--screenshot")
        .arg(&screenshot)
        .args(["--region", "20,20,50,40", "--save"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));

    let saved = read_png(&output);
    assert_eq!((saved.width(), saved.height()), (50, 40));
    assert_eq!(pixel(&saved, 25, 20), 0xFFFF_FFFF);
}

#[test]
fn too_small_region_cancels_selection() {
    let temp = TempDir::new().unwrap();
    let screenshot = write_screenshot(&temp);
    let output = temp.path().join("never.png");

    snipmark_cmd(&temp)
        .arg("--screenshot")
        .arg(&screenshot)
        .args(["--region", "20,20,4,40", "--save"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selection cancelled"));

    assert!(!output.exists());
}

#[test]
fn script_annotations_are_saved() {
    let temp = TempDir::new().unwrap();
    let screenshot = write_screenshot(&temp);
    let script = temp.path().join("events.toml");
    std::fs::write(
        &script,
        r#"
        [[events]]
        type = "set_tool"
        tool = "rectangle"

        [[events]]
        type = "pointer_down"
        x = 30
        y = 30

        [[events]]
        type = "pointer_move"
        x = 60
        y = 50

        [[events]]
        type = "pointer_up"
        x = 80
        y = 70
        "#,
    )
    .unwrap();
    let output = temp.path().join("annotated.png");

    snipmark_cmd(&temp)
        .arg("--screenshot")
        .arg(&screenshot)
        .args(["--region", "20,20,100,80", "--script"])
        .arg(&script)
        .arg("--save")
        .arg(&output)
        .assert()
        .success();

    let saved = read_png(&output);
    // Left edge of the rectangle, layer-local (10, 20)
    assert_eq!(pixel(&saved, 10, 20), 0xFFFF_0000);
    // Interior stays untouched
    assert_eq!(pixel(&saved, 30, 30), 0xFFFF_FFFF);
}

#[test]
fn save_format_follows_extension() {
    let temp = TempDir::new().unwrap();
    let screenshot = write_screenshot(&temp);
    let output = temp.path().join("out.bmp");

    snipmark_cmd(&temp)
        .arg("--screenshot")
        .arg(&screenshot)
        .args(["--region", "0,0,30,30", "--save"])
        .arg(&output)
        .assert()
        .success();

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(&bytes[0..2], b"BM");
}

#[test]
fn escape_in_script_closes_session_without_saving() {
    let temp = TempDir::new().unwrap();
    let screenshot = write_screenshot(&temp);
    let script = temp.path().join("escape.toml");
    std::fs::write(
        &script,
        r#"
        [[events]]
        type = "key"
        key = "Escape"
        "#,
    )
    .unwrap();
    let output = temp.path().join("never.png");

    snipmark_cmd(&temp)
        .arg("--screenshot")
        .arg(&screenshot)
        .args(["--region", "10,10,40,40", "--script"])
        .arg(&script)
        .arg("--save")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Session closed"));

    assert!(!output.exists());
}

#[test]
fn preview_renders_full_screen() {
    let temp = TempDir::new().unwrap();
    let screenshot = write_screenshot(&temp);
    let preview = temp.path().join("preview.png");

    snipmark_cmd(&temp)
        .arg("--screenshot")
        .arg(&screenshot)
        .args(["--region", "20,20,50,40", "--preview"])
        .arg(&preview)
        .assert()
        .success()
        .stdout(predicate::str::contains("Session closed"));

    let rendered = read_png(&preview);
    assert_eq!((rendered.width(), rendered.height()), (200, 150));
}

#[test]
fn missing_screenshot_fails() {
    let temp = TempDir::new().unwrap();
    snipmark_cmd(&temp)
        .args(["--screenshot", "/nonexistent/screen.png", "--region", "0,0,10,10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to capture the screen"));
}

#[test]
fn malformed_region_is_rejected() {
    let temp = TempDir::new().unwrap();
    snipmark_cmd(&temp)
        .args(["--region", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y,W,H"));
}

#[test]
fn invalid_script_fails() {
    let temp = TempDir::new().unwrap();
    let screenshot = write_screenshot(&temp);
    let script = temp.path().join("bad.toml");
    std::fs::write(&script, "[[events]]\ntype = \"teleport\"\n").unwrap();

    snipmark_cmd(&temp)
        .arg("--screenshot")
        .arg(&screenshot)
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load event script"));
}
