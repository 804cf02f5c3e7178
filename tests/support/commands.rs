//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a scopespread command running inside the test directory.
    ///
    /// Colors and inherited log settings are switched off so output is
    /// stable.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("scopespread").expect("failed to find scopespread binary");
        cmd.current_dir(self.dir.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SCOPESPREAD_LOG");
        cmd.env_remove("SCOPESPREAD_CONFIG");
        cmd
    }

    /// Shortcut for `scopespread spread --snapshot space.json --yes`.
    pub fn spread(&self) -> Output {
        self.cmd()
            .args(["spread", "--snapshot", "space.json", "--yes"])
            .output()
            .expect("failed to run scopespread spread")
    }

    /// Shortcut for `scopespread plan --snapshot space.json`.
    pub fn plan(&self) -> Output {
        self.cmd()
            .args(["plan", "--snapshot", "space.json"])
            .output()
            .expect("failed to run scopespread plan")
    }

    /// Shortcut for `scopespread check --snapshot space.json`.
    pub fn check(&self) -> Output {
        self.cmd()
            .args(["check", "--snapshot", "space.json"])
            .output()
            .expect("failed to run scopespread check")
    }
}
