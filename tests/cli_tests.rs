use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    vocab: PathBuf,
    frequencies: PathBuf,
    trigrams: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let vocab = dir.path().join("vocab.tsv");
        let frequencies = dir.path().join("freq.tsv");
        let trigrams = dir.path().join("tri.tsv");

        let mut f = File::create(&vocab).unwrap();
        writeln!(f, "a\tapple").unwrap();
        writeln!(f, "a\tant").unwrap();
        writeln!(f, "ab\table").unwrap();
        // Only usable when key groups are configured.
        writeln!(f, "bee").unwrap();

        let mut f = File::create(&frequencies).unwrap();
        writeln!(f, "apple\t50").unwrap();
        writeln!(f, "ant\t30").unwrap();
        writeln!(f, "able\t10").unwrap();
        writeln!(f, "bee\t5").unwrap();

        let mut f = File::create(&trigrams).unwrap();
        writeln!(f, "i saw ant\t4").unwrap();
        writeln!(f, "i saw apple\t2").unwrap();

        Self {
            dir,
            vocab,
            frequencies,
            trigrams,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dwellword"));
        cmd.arg("--vocab")
            .arg(&self.vocab)
            .arg("--frequencies")
            .arg(&self.frequencies)
            .arg("--trigrams")
            .arg(&self.trigrams);
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().expect("Failed to run dwellword")
    }

    fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to start dwellword");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        child.wait_with_output().unwrap()
    }
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn code_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|l| l.starts_with("Code: "))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_suggest_ranks_by_context() {
    let ctx = TestContext::new();
    let output = ctx.run(&["suggest", "a", "-x", "i", "saw"]);
    assert!(output.status.success(), "{}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert_eq!(code_lines(&stdout), ["Code: [a]   Context: i saw"]);
    let ant = stdout.find("ant").unwrap();
    let apple = stdout.find("apple").unwrap();
    assert!(ant < apple, "context should put 'ant' first:\n{}", stdout);
}

#[test]
fn test_suggest_encodes_typed_letters() {
    let ctx = TestContext::new();
    let output = ctx.run(&["--key-groups", "ab,e,l", "suggest", "Bee", "--encode"]);
    assert!(output.status.success(), "{}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert_eq!(code_lines(&stdout), ["Code: [aee]   Context: (none)"]);
    assert!(stdout.contains("bee"));
    assert!(!stdout.contains("No suggestions."));
}

#[test]
fn test_session_key_commands() {
    let ctx = TestContext::new();
    let input = "a\n:2\n:9\nab\n<\n.\na\n:1\n..\nexit\n";
    let output = ctx.run_with_input(&["session"], input);
    assert!(output.status.success(), "{}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert_eq!(
        code_lines(&stdout),
        [
            "Code: [a]   Context: (none)",
            "Code: []   Context: ant",
            "Code: []   Context: ant",
            "Code: [ab]   Context: ant",
            "Code: [a]   Context: ant",
            "Code: []   Context: ant",
            "Code: [a]   Context: ant",
            "Code: []   Context: ant apple",
            "Code: []   Context: (none)",
        ]
    );
    assert!(stdout.contains("Confirmed: 'ant'"));
    assert!(stdout.contains("Confirmed: 'apple'"));
}

#[test]
fn test_session_rejects_out_of_range_pick() {
    let ctx = TestContext::new();
    let output = ctx.run_with_input(&["session"], "a\n:9\n:0\nexit\n");
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(!stdout.contains("Confirmed"));
    // Nothing was confirmed, so the pending input survives.
    assert_eq!(code_lines(&stdout).last().unwrap(), "Code: [a]   Context: (none)");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("No suggestion at ':9'"));
    assert!(stderr.contains("No suggestion at ':0'"));
}

#[test]
fn test_replay_skips_comments_and_blank_context() {
    let ctx = TestContext::new();
    let queries = ctx.dir.path().join("queries.tsv");
    let mut f = File::create(&queries).unwrap();
    writeln!(f, "# warm-up queries").unwrap();
    writeln!(f).unwrap();
    writeln!(f, "a").unwrap();
    writeln!(f, "a\ti saw").unwrap();
    writeln!(f, "zz\t   ").unwrap();
    writeln!(f, "   # indented comment").unwrap();

    let output = ctx.run(&["replay", "--show", queries.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert_eq!(
        code_lines(&stdout),
        [
            "Code: [a]   Context: (none)",
            "Code: [a]   Context: i saw",
            "Code: [zz]   Context: (none)",
        ]
    );
    assert_eq!(stdout.matches("No suggestions.").count(), 1);
    assert!(stderr_of(&output).contains("Replaying 3 queries"));
}

#[test]
fn test_missing_data_exits_with_error() {
    let ctx = TestContext::new();
    let output = Command::new(env!("CARGO_BIN_EXE_dwellword"))
        .arg("--vocab")
        .arg(ctx.dir.path().join("absent.tsv"))
        .arg("--frequencies")
        .arg(&ctx.frequencies)
        .arg("--trigrams")
        .arg(&ctx.trigrams)
        .args(["suggest", "a"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
