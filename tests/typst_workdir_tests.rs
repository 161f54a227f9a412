//! Concurrent Typst renders against a stand-in `typst` script.
//!
//! Kept in its own test binary: the script is written and then executed,
//! and a concurrent fork from another test could hold it open for writing.
#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::time::Duration;

use invoice_layout::config::PdfSettings;
use invoice_layout::invoice::{Align, TextStyle};
use invoice_layout::{DocumentRenderer, DrawInstruction, TypstRenderer};
use tempfile::TempDir;

// Arguments: compile --root <dir> <template> <output>. The slow copy keeps
// the first render running while the second one starts and finishes.
// Outputs named `fail.pdf` make the compile fail after reporting its dir.
const FAKE_TYPST: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "typst 0.0.0"
  exit 0
fi
case "$5" in
  *fail.pdf)
    echo "$3" >&2
    exit 2
    ;;
esac
sleep 0.5
cat "$4" > "$5" || exit 1
echo "$3" >> "$5"
"#;

// A single test: the script is written once, before anything forks.
#[test]
fn test_typst_work_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let script = temp_dir.path().join("typst");
    std::fs::write(&script, FAKE_TYPST).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let renderer = TypstRenderer::new(&PdfSettings {
        typst: script.display().to_string(),
        ..PdfSettings::default()
    });
    let instructions = [DrawInstruction::text(
        "VENTURE FUTURE",
        TextStyle::regular(12.0),
        Align::Center,
    )];

    // concurrent renders use separate work dirs
    let outputs = [
        temp_dir.path().join("first.pdf"),
        temp_dir.path().join("second.pdf"),
    ];
    std::thread::scope(|s| {
        let first = s.spawn(|| renderer.render(&instructions, &outputs[0]));
        std::thread::sleep(Duration::from_millis(100));
        let second = s.spawn(|| renderer.render(&instructions, &outputs[1]));
        second.join().unwrap().unwrap();
        first.join().unwrap().unwrap();
    });

    let work_dirs: Vec<String> = outputs
        .iter()
        .map(|path| {
            let content = std::fs::read_to_string(path).unwrap();
            assert!(content.contains(r#"#let data = json("layout.json")"#));
            content.lines().last().unwrap().to_string()
        })
        .collect();

    assert_ne!(work_dirs[0], work_dirs[1]);
    for dir in &work_dirs {
        assert!(dir.contains("invoice-layout-"), "{dir}");
        assert!(!Path::new(dir).exists(), "{dir} was left behind");
    }

    // a failed compile still removes its work dir
    let err = renderer
        .render(&instructions, &temp_dir.path().join("fail.pdf"))
        .unwrap_err();
    let message = err.to_string();
    let work_dir = message
        .trim()
        .strip_prefix("Failed to generate PDF: ")
        .unwrap_or_else(|| panic!("unexpected error: {message}"));
    assert!(work_dir.contains("invoice-layout-"), "{message}");
    assert!(!Path::new(work_dir).exists(), "{work_dir} was left behind");
}
