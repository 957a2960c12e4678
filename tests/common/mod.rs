use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn resolve_bin_path() -> PathBuf {
    if let Some(path) = option_env!("CARGO_BIN_EXE_clean-binaries") {
        return PathBuf::from(path);
    }

    let exe_name = if cfg!(windows) {
        "clean-binaries.exe"
    } else {
        "clean-binaries"
    };
    let fallback = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .and_then(|deps| deps.parent().map(PathBuf::from))
        .map(|debug_dir| debug_dir.join(exe_name));

    match fallback {
        Some(path) if path.exists() => path,
        _ => panic!("unable to resolve clean-binaries binary path for integration test"),
    }
}

/// Scratch project root with an isolated HOME.
pub struct Workspace {
    pub root: tempfile::TempDir,
    pub home: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create workspace root"),
            home: tempfile::tempdir().expect("create isolated HOME"),
        }
    }

    /// Create `build/Debug/` under the root and return it.
    pub fn debug_dir(&self) -> PathBuf {
        let dir = self.root.path().join("build").join("Debug");
        fs::create_dir_all(&dir).expect("create build/Debug");
        dir
    }

    pub fn touch(&self, name: &str) -> PathBuf {
        let path = self.debug_dir().join(name);
        fs::write(&path, b"artifact").expect("write fixture file");
        path
    }

    pub fn run(&self, case_name: &str, args: &[&str]) -> CmdResult {
        self.run_with_env(case_name, args, &[])
    }

    pub fn run_with_env(&self, case_name: &str, args: &[&str], env: &[(&str, &str)]) -> CmdResult {
        run_cli_case(case_name, self.root.path(), self.home.path(), args, env)
    }
}

pub fn run_cli_case(
    case_name: &str,
    cwd: &Path,
    home: &Path,
    args: &[&str],
    env: &[(&str, &str)],
) -> CmdResult {
    let root = std::env::temp_dir().join("clean-binaries-test-logs");
    fs::create_dir_all(&root).expect("create temp test log dir");

    let log_path = root.join(format!("{}-{}.log", sanitize(case_name), now_millis()));
    let bin_path = resolve_bin_path();

    let mut command = Command::new(&bin_path);
    command
        .args(args)
        .current_dir(cwd)
        .env("HOME", home)
        .env("RUST_BACKTRACE", "1");
    for name in [
        "CB_DRY_RUN",
        "CB_PATTERN",
        "CB_LOG_PATH",
        "CB_LOG_MAX_SIZE_BYTES",
        "CB_LOG_MAX_ROTATED_FILES",
        "CB_OUTPUT_FORMAT",
    ] {
        command.env_remove(name);
    }
    command.envs(env.iter().copied());

    let output = command.output().expect("execute clean-binaries command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let mut log_content = String::new();
    log_content.push_str(&format!("case={case_name}\n"));
    log_content.push_str(&format!("bin={}\n", bin_path.display()));
    log_content.push_str(&format!("cwd={}\n", cwd.display()));
    log_content.push_str(&format!("args={args:?}\n"));
    log_content.push_str(&format!("status={}\n", output.status));
    log_content.push_str("----- stdout -----\n");
    log_content.push_str(&stdout);
    log_content.push('\n');
    log_content.push_str("----- stderr -----\n");
    log_content.push_str(&stderr);
    log_content.push('\n');
    fs::write(&log_path, log_content).expect("write test log");

    CmdResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}
