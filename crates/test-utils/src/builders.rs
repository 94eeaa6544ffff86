#![allow(dead_code)]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use hostkit::fs::mock::MockFileSystem;
use hostkit::process::ProcessTable;

/// Builder for a fake `/proc` tree on a `MockFileSystem`.
pub struct ProcTreeBuilder {
    root: PathBuf,
    fs: MockFileSystem,
}

impl ProcTreeBuilder {
    pub fn new(root: &str) -> Self {
        let fs = MockFileSystem::new();
        fs.add_dir(root);
        Self {
            root: PathBuf::from(root),
            fs,
        }
    }

    /// Add a process whose `cmdline` holds `args` NUL-separated and
    /// NUL-terminated, as the kernel writes it.
    pub fn with_process(self, pid: u32, args: &[&str]) -> Self {
        let mut cmdline = Vec::new();
        for arg in args {
            cmdline.extend_from_slice(arg.as_bytes());
            cmdline.push(0);
        }
        self.fs
            .add_file(self.root.join(pid.to_string()).join("cmdline"), cmdline);
        self
    }

    /// Add a process directory whose `cmdline` cannot be read.
    pub fn with_unreadable_process(self, pid: u32) -> Self {
        self.fs.add_unreadable(
            self.root.join(pid.to_string()).join("cmdline"),
            io::ErrorKind::PermissionDenied,
        );
        self
    }

    /// Add a process directory without a `cmdline`, like one that exited
    /// between the directory listing and the read.
    pub fn with_vanished_process(self, pid: u32) -> Self {
        self.fs.add_dir(self.root.join(pid.to_string()));
        self
    }

    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.fs.add_file(self.root.join(name), content.as_bytes().to_vec());
        self
    }

    pub fn filesystem(&self) -> MockFileSystem {
        self.fs.clone()
    }

    pub fn build(self) -> ProcessTable {
        ProcessTable::new(Arc::new(self.fs), self.root)
    }
}
