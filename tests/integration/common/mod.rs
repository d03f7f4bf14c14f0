#![allow(dead_code)]

use std::{fs, path::Path};

use tempfile::TempDir;

/// Environment variable the stub tools append their invocations to.
pub const CALLS_ENV: &str = "PROVG_CALLS";

/// Environment variable holding the stub wrapper's one-shot state file.
pub const STATE_ENV: &str = "PROVG_STATE";

/// Temp-directory layout for driving the built binary end to end.
pub struct ProvisionFixture {
    pub root: TempDir,
}

impl ProvisionFixture {
    /// Creates the wrapper-tool tree, destination folder, script folder,
    /// stub `sc`, and an empty calls log.
    pub fn new(wrapper_body: &str) -> Self {
        let root = TempDir::new().expect("failed to create tempdir");
        let fixture = Self { root };

        for subdir in ["win64", "win32"] {
            let dir = fixture.tool_folder().join(subdir);
            fs::create_dir_all(&dir).unwrap();
            write_executable(&dir.join("nssm.exe"), wrapper_body);
        }

        fs::create_dir_all(fixture.dest_folder()).unwrap();
        fs::create_dir_all(fixture.scripts_folder()).unwrap();
        fs::create_dir_all(fixture.system_dir()).unwrap();
        fs::create_dir_all(fixture.bin_dir()).unwrap();
        fs::write(fixture.calls_log(), "").unwrap();

        write_executable(
            &fixture.bin_dir().join("sc"),
            "#!/bin/sh\necho \"sc $*\" >> \"$PROVG_CALLS\"\nexit 0\n",
        );

        fixture
    }

    pub fn tool_folder(&self) -> std::path::PathBuf {
        self.root.path().join("nssm")
    }

    pub fn dest_folder(&self) -> std::path::PathBuf {
        self.root.path().join("deployed")
    }

    pub fn scripts_folder(&self) -> std::path::PathBuf {
        self.root.path().join("scripts")
    }

    pub fn system_dir(&self) -> std::path::PathBuf {
        self.root.path().join("system32")
    }

    pub fn bin_dir(&self) -> std::path::PathBuf {
        self.root.path().join("bin")
    }

    pub fn calls_log(&self) -> std::path::PathBuf {
        self.root.path().join("calls.log")
    }

    pub fn state_file(&self) -> std::path::PathBuf {
        self.root.path().join("wrapper.state")
    }

    pub fn config_path(&self) -> std::path::PathBuf {
        self.root.path().join("config.json")
    }

    /// Writes a script file for a service and returns its path.
    pub fn add_script(&self, name: &str) -> std::path::PathBuf {
        let path = self.scripts_folder().join(format!("{name}.bat"));
        fs::write(&path, "@echo off\r\n").unwrap();
        path
    }

    /// Writes `config.json` declaring the given (name, script path) pairs.
    pub fn write_config(&self, services: &[(&str, &Path)]) {
        let entries: Vec<String> = services
            .iter()
            .map(|(name, script)| {
                format!(
                    r#"{{ "service_name": "{}", "source_bat_path": "{}" }}"#,
                    name,
                    script.display()
                )
            })
            .collect();

        let body = format!(
            r#"{{
  "nssm_folder": "{}",
  "dest_folder": "{}",
  "services": [{}]
}}"#,
            self.tool_folder().display(),
            self.dest_folder().display(),
            entries.join(", ")
        );

        fs::write(self.config_path(), body).unwrap();
    }

    /// `PATH` with the stub `sc` in front.
    pub fn path_env(&self) -> String {
        format!(
            "{}:{}",
            self.bin_dir().display(),
            std::env::var("PATH").unwrap_or_default()
        )
    }

    /// Calls recorded by the stub tools, one invocation per line.
    pub fn recorded_calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_log())
            .unwrap_or_default()
            .lines()
            .map(|line| line.to_string())
            .collect()
    }
}

/// Stub wrapper that knows no service: every status query exits non-zero.
pub const WRAPPER_ALWAYS_ABSENT: &str = r#"#!/bin/sh
echo "nssm $*" >> "$PROVG_CALLS"
case "$1" in
  status) exit 3 ;;
esac
exit 0
"#;

/// Stub wrapper that reports RUNNING on the first status query and absent
/// afterwards, standing in for a re-provisioned live service.
pub const WRAPPER_RUNNING_ONCE: &str = r#"#!/bin/sh
echo "nssm $*" >> "$PROVG_CALLS"
if [ "$1" = "status" ]; then
  if [ -f "$PROVG_STATE" ]; then
    exit 3
  fi
  : > "$PROVG_STATE"
  echo "SERVICE_RUNNING"
  exit 0
fi
exit 0
"#;

/// Writes `body` to `path` and marks it executable.
pub fn write_executable(path: &Path, body: &str) {
    fs::write(path, body).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
