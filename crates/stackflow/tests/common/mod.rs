use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const STG_LEADER: &str = r#"
stack "leader" {
    env "stg"
    controllers 3
    names "alpha" "bravo" "charlie" "delta" "echo"
    members "data/members.json"
}
"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_stack_kdl(&self, content: &str) {
        let path = self.root.path().join("stack.kdl");
        fs::write(path, content).unwrap();
    }

    pub fn write_members(&self, content: &str) {
        let dir = self.root.path().join("data");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("members.json"), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// 環境変数を固定したコマンドを作成
    #[allow(deprecated)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("stackflow").unwrap();
        cmd.current_dir(self.path())
            .env_remove("STACKFLOW_CONFIG_PATH")
            .env_remove("STACKFLOW_ENV")
            .env_remove("RUST_LOG")
            .env("ARM_SUBSCRIPTION_ID", "sub-123")
            .env("ARM_TENANT_ID", "tenant-1")
            .env("ARM_CLIENT_ID", "client-1")
            .env("ARM_CLIENT_SECRET", "s3cret");
        cmd
    }
}
