//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables the binary reads that must not leak in from the test host.
const HOST_ENV: &[&str] = &[
    "VAULT_ADDR",
    "VAULT_ROLE_ID",
    "VAULT_SECRET_ID",
    "VAULT_TOKEN",
    "VAULTPROBE_CONFIG",
    "VAULTPROBE_LOG",
    "NO_COLOR",
];

impl Test {
    /// Create a vaultprobe command isolated from the host environment.
    ///
    /// Returns a Command configured with:
    /// - HOME and XDG_CONFIG_HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - NO_COLOR set so output is plain text
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("vaultprobe").expect("failed to find vaultprobe binary");
        for var in HOST_ENV {
            cmd.env_remove(var);
        }
        cmd.env("HOME", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `vaultprobe check --env <env> --mount <mount> --path <path>`.
    pub fn check_env(&self, env: &str, mount: &str, path: &str) -> Output {
        self.cmd()
            .args(["check", "--env", env, "--mount", mount, "--path", path])
            .output()
            .expect("failed to run vaultprobe check")
    }

    /// Shortcut for `vaultprobe check` with an explicit identity pair.
    pub fn check_identity(
        &self,
        addr: &str,
        role_id: &str,
        secret_id: &str,
        mount: &str,
        path: &str,
    ) -> Output {
        self.cmd()
            .args([
                "check",
                "--addr",
                addr,
                "--role-id",
                role_id,
                "--secret-id",
                secret_id,
                "--mount",
                mount,
                "--path",
                path,
            ])
            .output()
            .expect("failed to run vaultprobe check")
    }

    /// Shortcut for `vaultprobe resolve --env <env>`.
    pub fn resolve(&self, env: &str) -> Output {
        self.cmd()
            .args(["resolve", "--env", env])
            .output()
            .expect("failed to run vaultprobe resolve")
    }
}
