use assert_cmd::Command;
use std::path::Path;

/// `mdnote` with a clean environment, pointed at `db`.
pub fn mdnote_cmd(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mdnote").unwrap();
    cmd.env_remove("MDNOTE_DB_PATH");
    cmd.env_remove("MDNOTE_LOG_LEVEL");
    cmd.arg("--db").arg(db);
    cmd
}

/// Creates an article and returns its id.
pub fn create(db: &Path, title: &str, content: &str) -> i64 {
    let output = mdnote_cmd(db)
        .args(["create", "--title", title, "--content", content])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout)
        .unwrap()
        .trim()
        .parse()
        .unwrap()
}
