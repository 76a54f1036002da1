use std::fs;
use std::path::PathBuf;
use std::process::Output;

use tempfile::TempDir;

fn seqtool(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_seqtool"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run seqtool")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "seqtool failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

/// Writes a YAML config with the given `(name, short_opts)` subcommands.
fn write_config(dir: &TempDir, subcommands: &[(&str, &str)]) -> PathBuf {
    let entries: Vec<String> = subcommands
        .iter()
        .map(|(name, short_opts)| format!("  - name: {name}\n    short_opts: \"{short_opts}\""))
        .collect();
    let yaml = format!(
        "version: \"1.0\"\nsubcommands:\n{}\n",
        entries.join("\n")
    );
    let path = dir.path().join("seqtool.yml");
    fs::write(&path, yaml).expect("failed to write config");
    path
}

// ---------------------------------------------------------------------------
// Built-in subcommands
// ---------------------------------------------------------------------------

#[test]
fn view_resolves_output_format_and_verbosity() {
    let output = seqtool(&[
        "view",
        "-O",
        "cram,version=3.0",
        "--output-fmt-option",
        "nthreads=4",
        "--verbose",
        "--verbose",
        "in.bam",
    ]);
    let json = stdout_json(&output);

    assert_eq!(json["subcommand"], "view");
    assert_eq!(json["inputs"], serde_json::json!(["in.bam"]));
    assert_eq!(json["settings"]["output"]["format"], "cram");
    assert_eq!(
        json["settings"]["output"]["options"],
        serde_json::json!([
            {"key": "version", "value": "3.0"},
            {"key": "nthreads", "value": "4"},
        ])
    );
    assert!(json["settings"]["input"]["format"].is_null());
    assert_eq!(json["settings"]["verbosity"], 2);
}

#[test]
fn view_rejects_disabled_input_fmt() {
    let output = seqtool(&["view", "--input-fmt", "bam"]);
    assert!(!output.status.success());
}

#[test]
fn sort_disables_verbose() {
    let output = seqtool(&["sort", "--verbose"]);
    assert!(!output.status.success());

    let output = seqtool(&["sort", "-O", "bam"]);
    assert_eq!(stdout_json(&output)["settings"]["output"]["format"], "bam");
}

#[test]
fn bad_format_exits_with_error_message() {
    let output = seqtool(&["view", "-O", "fastq"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: view: unknown format 'fastq'"), "{stderr}");
}

#[test]
fn unknown_format_option_is_reported() {
    let output = seqtool(&["view", "--input-fmt-option", "threads=2"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown format option 'threads'"), "{stderr}");
}

#[test]
fn yaml_output() {
    let output = seqtool(&["index", "--yaml", "--input-fmt-option", "no_ref"]);
    assert!(output.status.success());
    let value: serde_yaml::Value =
        serde_yaml::from_slice(&output.stdout).expect("stdout is not YAML");
    let option = &value["settings"]["input"]["options"][0];
    assert_eq!(option["key"].as_str(), Some("no_ref"));
    assert_eq!(option["value"].as_str(), Some("1"));
}

#[test]
fn unknown_subcommand() {
    let output = seqtool(&["mpileup"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown subcommand 'mpileup'"), "{stderr}");
    assert!(stderr.contains("view, sort, index, flagstat"), "{stderr}");
}

// ---------------------------------------------------------------------------
// Usage
// ---------------------------------------------------------------------------

#[test]
fn usage_lists_enabled_options_only() {
    let output = seqtool(&["usage", "sort"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.starts_with("Usage: seqtool sort [options] [INPUT]...\n"));
    assert!(stdout.contains("      --input-fmt-option OPT[=VAL]\n"));
    assert!(stdout.contains("  -O, --output-fmt FORMAT[,OPT[=VAL]]...\n"));
    assert!(stdout.contains("      --output-fmt-option OPT[=VAL]\n"));
    assert!(!stdout.contains("--input-fmt FORMAT"));
    assert!(!stdout.contains("--verbose"));
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_prints_builtin_subcommands() {
    let output = seqtool(&["config"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["view", "sort", "index", "flagstat"] {
        assert!(stdout.contains(&format!("name: {name}")), "{stdout}");
    }
}

#[test]
fn custom_config_assigns_short_options() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &[("depth", "iIoOv")]);
    let config = config.to_str().unwrap();

    let output = seqtool(&[
        "--config", config, "depth", "-i", "sam", "-I", "level=2", "-o", "bam", "-vvv",
    ]);
    let json = stdout_json(&output);
    assert_eq!(json["settings"]["input"]["format"], "sam");
    assert_eq!(json["settings"]["input"]["options"][0]["key"], "level");
    assert_eq!(json["settings"]["output"]["format"], "bam");
    assert_eq!(json["settings"]["verbosity"], 3);

    let output = seqtool(&["--config", config, "view"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn custom_config_with_reserved_short_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &[("depth", "h....")]);

    let output = seqtool(&["--config", config.to_str().unwrap(), "config"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("subcommand 'depth': short option -h is reserved"), "{stderr}");
}

#[test]
fn custom_config_with_duplicate_short_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &[("depth", "x.x..")]);

    let output = seqtool(&["--config", config.to_str().unwrap(), "depth"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("short option -x assigned more than once"), "{stderr}");
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yml");
    let output = seqtool(&["--config", path.to_str().unwrap(), "config"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "{stderr}");
}

#[test]
fn custom_config_with_builtin_subcommand_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &[("config", "..O.."), ("usage", "....v")]);

    let output = seqtool(&["--config", config.to_str().unwrap(), "config"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: subcommand name is reserved: config"), "{stderr}");
}
