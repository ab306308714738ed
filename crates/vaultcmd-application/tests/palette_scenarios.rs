//! End-to-end palette behavior with recording fakes and the real shell.
#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use vaultcmd_application::{CommandPalette, InvocationOptions, InvocationOutcome};
use vaultcmd_core::chain::ChainState;
use vaultcmd_core::command::{CommandEntry, CommandSettings};
use vaultcmd_core::error::{Result, VaultCmdError};
use vaultcmd_core::notify::{Notice, NotificationSink};
use vaultcmd_core::process::{ProcessLauncher, ProcessOutput};
use vaultcmd_core::vault::{FixedVaultRoot, VaultRootResolver};
use vaultcmd_infrastructure::{FsVaultRootResolver, ShellProcessLauncher};

#[derive(Default)]
struct RecordingSink(Mutex<Vec<Notice>>);

impl RecordingSink {
    fn notices(&self) -> Vec<Notice> {
        self.0.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notice: Notice) {
        self.0.lock().unwrap().push(notice);
    }
}

/// Wraps a launcher and records every command with its working directory.
struct RecordingLauncher<L> {
    inner: L,
    launched: Mutex<Vec<(String, Option<PathBuf>)>>,
}

impl<L> RecordingLauncher<L> {
    fn new(inner: L) -> Self {
        Self {
            inner,
            launched: Mutex::new(Vec::new()),
        }
    }

    fn commands(&self) -> Vec<String> {
        self.launched
            .lock()
            .unwrap()
            .iter()
            .map(|(c, _)| c.clone())
            .collect()
    }

    fn working_dirs(&self) -> Vec<Option<PathBuf>> {
        self.launched
            .lock()
            .unwrap()
            .iter()
            .map(|(_, wd)| wd.clone())
            .collect()
    }
}

#[async_trait]
impl<L: ProcessLauncher> ProcessLauncher for RecordingLauncher<L> {
    async fn launch(&self, command: &str, working_dir: Option<&Path>) -> Result<ProcessOutput> {
        self.launched
            .lock()
            .unwrap()
            .push((command.to_string(), working_dir.map(Path::to_path_buf)));
        self.inner.launch(command, working_dir).await
    }
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

struct UnresolvableVault;

impl VaultRootResolver for UnresolvableVault {
    fn vault_root(&self) -> Result<PathBuf> {
        Err(VaultCmdError::config("No vault root configured"))
    }
}

struct Harness {
    palette: CommandPalette,
    launcher: Arc<RecordingLauncher<ShellProcessLauncher>>,
    sink: Arc<RecordingSink>,
    vault: TempDir,
}

fn harness(entries: Vec<CommandEntry>) -> Harness {
    let vault = TempDir::new().unwrap();
    let launcher = Arc::new(RecordingLauncher::new(ShellProcessLauncher::new()));
    let sink = Arc::new(RecordingSink::default());
    let mut palette = CommandPalette::new(
        launcher.clone(),
        sink.clone(),
        Arc::new(FsVaultRootResolver::new(Some(vault.path().to_path_buf()))),
    );
    palette.register(&CommandSettings {
        commands: entries,
        vault_root: None,
    });
    Harness {
        palette,
        launcher,
        sink,
        vault,
    }
}

#[tokio::test]
async fn scenario_a_single_command_runs_once_silently() {
    let h = harness(vec![CommandEntry::new("say a", "echo A")]);

    let outcome = h
        .palette
        .invoke("say-a", InvocationOptions::default())
        .await
        .unwrap();

    assert!(outcome.report().unwrap().succeeded());
    assert_eq!(h.launcher.commands(), vec!["echo A"]);
    assert!(h.sink.notices().is_empty());
}

#[tokio::test]
async fn scenario_b_failure_halts_and_notifies_once() {
    let h = harness(vec![CommandEntry::new("abc", "echo A\nfalse\necho C")]);

    let outcome = h
        .palette
        .invoke("abc", InvocationOptions::default())
        .await
        .unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.state, ChainState::Failed { step: 1 });
    assert_eq!(h.launcher.commands(), vec!["echo A", "false"]);

    let notices = h.sink.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].is_error());
    assert!(notices[0].message.starts_with("Command failed: false"));
}

#[tokio::test]
async fn scenario_c_all_steps_succeed_without_notices() {
    let h = harness(vec![CommandEntry::new("noop", "exit 0\nexit 0")]);

    let outcome = h
        .palette
        .invoke("noop", InvocationOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.report().unwrap().state, ChainState::Succeeded);
    assert_eq!(h.launcher.commands(), vec!["exit 0", "exit 0"]);
    assert!(h.sink.notices().is_empty());
}

#[tokio::test]
async fn scenario_d_empty_body_is_undefined() {
    let h = harness(vec![]);

    let outcome = h
        .palette
        .execute_command("", InvocationOptions::default())
        .await
        .unwrap();

    assert!(matches!(outcome, InvocationOutcome::Undefined));
    assert!(h.launcher.commands().is_empty());
    assert_eq!(h.sink.notices(), vec![Notice::error("Undefined git command")]);
}

#[tokio::test]
async fn empty_entries_are_not_registered() {
    let h = harness(vec![
        CommandEntry::default(),
        CommandEntry::new("no body", ""),
        CommandEntry::new("", "echo orphan"),
    ]);

    assert!(h.palette.commands().is_empty());
    let err = h
        .palette
        .invoke("no-body", InvocationOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(h.launcher.commands().is_empty());
}

#[tokio::test]
async fn steps_run_in_the_vault_root() {
    let h = harness(vec![CommandEntry::new("touch", "touch created.md\nls")]);

    h.palette
        .invoke("touch", InvocationOptions::default())
        .await
        .unwrap();

    assert!(h.vault.path().join("created.md").exists());
    let root = h.vault.path().canonicalize().unwrap();
    assert!(h
        .launcher
        .working_dirs()
        .iter()
        .all(|wd| wd.as_deref() == Some(root.as_path())));
}

#[tokio::test]
async fn unresolvable_vault_runs_without_working_dir() {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let launcher = Arc::new(RecordingLauncher::new(ShellProcessLauncher::new()));
    let sink = Arc::new(RecordingSink::default());
    let palette = CommandPalette::new(launcher.clone(), sink.clone(), Arc::new(UnresolvableVault));

    let outcome = palette
        .execute_command("echo A", InvocationOptions::default())
        .await
        .unwrap();

    assert!(outcome.report().unwrap().succeeded());
    assert_eq!(launcher.working_dirs(), vec![None]);
    assert!(sink.notices().is_empty());

    let logged = log.contents();
    assert!(logged.contains("WARN"));
    assert!(logged.contains("Could not resolve vault root"));
    assert!(logged.contains("No vault root configured"));
}

#[tokio::test]
async fn success_messages_and_output_notices() {
    let vault = TempDir::new().unwrap();
    let launcher = Arc::new(RecordingLauncher::new(ShellProcessLauncher::new()));
    let sink = Arc::new(RecordingSink::default());
    let palette = CommandPalette::new(
        launcher.clone(),
        sink.clone(),
        Arc::new(FixedVaultRoot(vault.path().to_path_buf())),
    );

    palette
        .execute_command(
            "echo first // First done\necho second",
            InvocationOptions { show_output: true },
        )
        .await
        .unwrap();

    assert_eq!(launcher.commands(), vec!["echo first", "echo second"]);
    assert_eq!(
        sink.notices(),
        vec![Notice::info("First done"), Notice::info("second")]
    );
}
