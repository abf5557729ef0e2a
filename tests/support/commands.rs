//! Command helper methods for Test.

use super::{Test, MANIFEST_FILE, UNREACHABLE_VAULT};
use assert_cmd::Command;
use std::process::Output;

/// Environment bindings that would leak into the binary from the caller.
const BOUND_ENV: &[&str] = &[
    "VAULT_HANDLER_VAULT_ADDR",
    "VAULT_HANDLER_VAULT_TOKEN",
    "VAULT_HANDLER_VAULT_ROLE_ID",
    "VAULT_HANDLER_VAULT_SECRET_ID",
    "VAULT_HANDLER_DRY_RUN",
    "VAULT_HANDLER_INPUT_DIR",
    "VAULT_HANDLER_OUTPUT_DIR",
    "VAULT_HANDLER_DOT_ENV",
    "VAULT_HANDLER_KUBE_CONFIG",
    "VAULT_HANDLER_CONTEXT",
    "VAULT_HANDLER_NAMESPACE",
    "VAULT_HANDLER_IN_CLUSTER",
    "VAULT_HANDLER_LOG",
];

impl Test {
    /// Create a vault-handler command with a clean environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - No `VAULT_HANDLER_*` bindings inherited from the caller
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("vault-handler").expect("failed to find vault-handler binary");
        for var in BOUND_ENV {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// A command pointed at an unreachable Vault with a token.
    pub fn vault_cmd(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--vault-addr", UNREACHABLE_VAULT, "--vault-token", "s.test"]);
        cmd
    }

    /// Shortcut for `vault-handler upload` on the test manifest.
    pub fn upload(&self, extra: &[&str]) -> Output {
        self.vault_cmd()
            .arg("upload")
            .args(extra)
            .arg(MANIFEST_FILE)
            .output()
            .expect("failed to run vault-handler upload")
    }

    /// Shortcut for `vault-handler download` on the test manifest.
    pub fn download(&self, extra: &[&str]) -> Output {
        self.vault_cmd()
            .arg("download")
            .args(extra)
            .arg(MANIFEST_FILE)
            .output()
            .expect("failed to run vault-handler download")
    }

    /// Shortcut for `vault-handler copy` on the test manifest.
    pub fn copy(&self, extra: &[&str]) -> Output {
        self.vault_cmd()
            .arg("copy")
            .args(extra)
            .arg(MANIFEST_FILE)
            .output()
            .expect("failed to run vault-handler copy")
    }
}
