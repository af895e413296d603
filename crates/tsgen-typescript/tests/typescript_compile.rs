use std::fs;
use std::process::Command;

use tsgen_core::parse;
use tsgen_typescript::generate_types;

const CHANNEL: &str = include_str!("../../tsgen-core/tests/fixtures/channel-swagger2.json");

#[test]
#[ignore] // Requires Node.js + TypeScript installed
fn generated_typescript_compiles() {
    let doc = parse::from_json(CHANNEL).unwrap();
    let content = generate_types(&doc).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("types.ts");
    fs::write(&file, content).unwrap();

    let output = Command::new("npx")
        .args(["tsc", "--noEmit", "--strict", "types.ts"])
        .current_dir(tmp.path())
        .output()
        .expect("failed to run tsc");

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!(
            "TypeScript compilation failed:\nstdout: {}\nstderr: {}",
            stdout, stderr
        );
    }
}
