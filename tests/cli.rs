use std::error::Error;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn scytale_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scytale"))
}

fn run(args: &[&str]) -> Result<Output, Box<dyn Error>> {
    Ok(scytale_command().args(args).output()?)
}

fn shift_text(text: &str, shift: u8) -> String {
    text.chars()
        .map(|c| match c {
            'a'..='z' => (b'a' + (c as u8 - b'a' + shift) % 26) as char,
            'A'..='Z' => (b'A' + (c as u8 - b'A' + shift) % 26) as char,
            _ => c,
        })
        .collect()
}

#[test]
fn encode_prints_transformed_text() -> Result<(), Box<dyn Error>> {
    let output = run(&["encode", "--pipeline", "shift:3", "Hello, Decorator!"])?;
    assert!(
        output.status.success(),
        "encode failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8(output.stdout)?.trim_end(),
        "Khoor, Ghfrudwru!"
    );

    let wrapped = run(&["encode", "--pipeline", "shift:3,reverse", "Hello, Decorator!"])?;
    assert_eq!(
        String::from_utf8(wrapped.stdout)?.trim_end(),
        "!urwdurfhG ,roohK"
    );

    Ok(())
}

#[test]
fn encode_reads_stdin() -> Result<(), Box<dyn Error>> {
    let mut child = scytale_command()
        .args(["encode", "--pipeline", "shift:13"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child
        .stdin
        .as_mut()
        .ok_or("child stdin missing")?
        .write_all(b"Attack at dawn\n")?;
    let output = child.wait_with_output()?;

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?.trim_end(), "Nggnpx ng qnja");
    Ok(())
}

#[test]
fn mask_round_trip_via_files() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("payload.bin");
    let masked = dir.path().join("masked.bin");
    let restored = dir.path().join("restored.bin");

    let payload: Vec<u8> = (0..=255).collect();
    fs::write(&input, &payload)?;

    let first = run(&[
        "mask",
        input.to_str().unwrap(),
        masked.to_str().unwrap(),
        "--key",
        "0x5a",
    ])?;
    assert!(
        first.status.success(),
        "mask failed: {}",
        String::from_utf8_lossy(&first.stderr)
    );
    assert!(String::from_utf8(first.stdout)?.contains("Masked 256 bytes"));
    assert_ne!(fs::read(&masked)?, payload);

    let second = run(&[
        "mask",
        masked.to_str().unwrap(),
        restored.to_str().unwrap(),
        "--key",
        "0x5a",
    ])?;
    assert!(second.status.success());
    assert_eq!(fs::read(&restored)?, payload, "second mask must restore");

    Ok(())
}

#[test]
fn mask_generates_and_reports_key() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("payload.bin");
    let masked = dir.path().join("masked.bin");
    let restored = dir.path().join("restored.bin");

    fs::write(&input, b"no key was given for this payload")?;

    let first = run(&["mask", input.to_str().unwrap(), masked.to_str().unwrap()])?;
    assert!(
        first.status.success(),
        "mask failed: {}",
        String::from_utf8_lossy(&first.stderr)
    );
    let stdout = String::from_utf8(first.stdout)?;
    let key_line = stdout
        .lines()
        .find(|line| line.starts_with("Generated mask key:"))
        .ok_or("generated key not reported")?;
    let key = key_line.rsplit(' ').next().ok_or("key token missing")?;
    assert!(key.starts_with("0x"), "key should print as hex: {}", key);

    let second = run(&[
        "mask",
        masked.to_str().unwrap(),
        restored.to_str().unwrap(),
        "--key",
        key,
    ])?;
    assert!(second.status.success());
    assert_eq!(fs::read(&restored)?, fs::read(&input)?);

    Ok(())
}

#[test]
fn pipeline_file_drives_both_commands() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let text_pipeline = dir.path().join("text.json");
    let byte_pipeline = dir.path().join("bytes.json");
    let input = dir.path().join("input.bin");
    let output = dir.path().join("output.bin");

    fs::write(
        &text_pipeline,
        r#"[{"stage":"shift","shift":3},{"stage":"reverse"}]"#,
    )?;
    fs::write(
        &byte_pipeline,
        r#"[{"stage":"mask","mask":90},{"stage":"reverse"}]"#,
    )?;
    fs::write(&input, b"abc")?;

    let encode = run(&[
        "encode",
        "--pipeline-file",
        text_pipeline.to_str().unwrap(),
        "Hello, Decorator!",
    ])?;
    assert!(
        encode.status.success(),
        "encode failed: {}",
        String::from_utf8_lossy(&encode.stderr)
    );
    assert_eq!(
        String::from_utf8(encode.stdout)?.trim_end(),
        "!urwdurfhG ,roohK"
    );

    let mask = run(&[
        "mask",
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--pipeline-file",
        byte_pipeline.to_str().unwrap(),
    ])?;
    assert!(mask.status.success());
    // reverse(xor([a b c], 0x5a)) = [c^5a, b^5a, a^5a]
    assert_eq!(fs::read(&output)?, vec![b'c' ^ 0x5a, b'b' ^ 0x5a, b'a' ^ 0x5a]);

    Ok(())
}

#[test]
fn analyze_names_planted_shift() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let cipher_file = dir.path().join("cipher.txt");

    let plain = "The quick brown fox jumps over the lazy dog while the patient \
        watchmaker repairs a delicate silver mechanism. Ordinary English prose \
        carries enough letter-frequency signal to settle on a single answer.";
    fs::write(&cipher_file, shift_text(plain, 7))?;

    let output = run(&["analyze", cipher_file.to_str().unwrap()])?;
    assert!(
        output.status.success(),
        "analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report = String::from_utf8(output.stdout)?;
    assert!(report.contains("Likely shift: 7"), "report was: {}", report);
    assert!(report.contains("Decode with: shift:19"));

    Ok(())
}

#[test]
fn construction_errors_reach_stderr() -> Result<(), Box<dyn Error>> {
    // Wrapper in head position is caught at composition, not at parse
    let wrapper_first = run(&["encode", "--pipeline", "reverse", "abc"])?;
    assert!(!wrapper_first.status.success());
    assert!(
        String::from_utf8_lossy(&wrapper_first.stderr).contains("must start with a leaf"),
        "stderr: {}",
        String::from_utf8_lossy(&wrapper_first.stderr)
    );

    // Bad descriptor text is caught by the argument parser
    let unknown = run(&["encode", "--pipeline", "rot13:1", "abc"])?;
    assert!(!unknown.status.success());
    assert!(String::from_utf8_lossy(&unknown.stderr).contains("Unknown stage kind"));

    let empty = run(&["encode", "--pipeline", "", "abc"])?;
    assert!(!empty.status.success());
    assert!(String::from_utf8_lossy(&empty.stderr).contains("Empty pipeline"));

    // Text leaf cannot drive the byte command
    let dir = tempdir()?;
    let input = dir.path().join("input.bin");
    fs::write(&input, b"bytes")?;
    let mismatch = run(&[
        "mask",
        input.to_str().unwrap(),
        dir.path().join("out.bin").to_str().unwrap(),
        "--pipeline",
        "shift:3",
    ])?;
    assert!(!mismatch.status.success());
    assert!(String::from_utf8_lossy(&mismatch.stderr).contains("does not operate"));

    Ok(())
}

#[test]
fn version_and_help() -> Result<(), Box<dyn Error>> {
    let version = run(&["-V"])?;
    assert!(version.status.success());
    assert!(String::from_utf8(version.stdout)?.starts_with("scytale "));

    let help = run(&[])?;
    assert!(help.status.success());
    let stdout = String::from_utf8(help.stdout)?;
    assert!(stdout.contains("Usage"));
    assert!(stdout.contains("encode"));
    assert!(stdout.contains("mask"));
    assert!(stdout.contains("analyze"));

    Ok(())
}

#[test]
fn missing_input_file_fails_cleanly() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let output = run(&[
        "mask",
        dir.path().join("absent.bin").to_str().unwrap(),
        dir.path().join("out.bin").to_str().unwrap(),
        "--key",
        "1",
    ])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));

    Ok(())
}
