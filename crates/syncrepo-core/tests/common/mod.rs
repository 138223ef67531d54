//! In-memory gateway shared by the core integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use syncrepo_git::{Blob, Gateway};

pub const HEAD: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
pub const REMOTE: &str = "https://example.test/template.git";

#[derive(Debug, Clone)]
enum Entry {
    Content(Vec<u8>),
    /// Listed but `read_blob` reports NotFound
    Unreadable,
    /// Listed but `read_blob` fails with a backend error
    Broken,
}

#[derive(Debug)]
struct State {
    /// Full template paths in listing order
    files: Vec<(String, Entry)>,
    head: Option<String>,
    repository: bool,
    dirty: bool,
    fail_fetch: bool,
    calls: Vec<String>,
}

/// Deterministic [`Gateway`] that records every call.
#[derive(Debug)]
pub struct FakeGateway {
    state: Mutex<State>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGateway {
    /// Clean repository, empty template, head at [`HEAD`].
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                files: Vec::new(),
                head: Some(HEAD.to_string()),
                repository: true,
                dirty: false,
                fail_fetch: false,
                calls: Vec::new(),
            }),
        }
    }

    fn push(self, path: &str, entry: Entry) -> Self {
        self.state.lock().unwrap().files.push((path.to_string(), entry));
        self
    }

    pub fn with_file(self, path: &str, content: impl AsRef<[u8]>) -> Self {
        self.push(path, Entry::Content(content.as_ref().to_vec()))
    }

    pub fn with_unreadable(self, path: &str) -> Self {
        self.push(path, Entry::Unreadable)
    }

    pub fn with_broken(self, path: &str) -> Self {
        self.push(path, Entry::Broken)
    }

    pub fn dirty(self) -> Self {
        self.state.lock().unwrap().dirty = true;
        self
    }

    pub fn not_a_repository(self) -> Self {
        self.state.lock().unwrap().repository = false;
        self
    }

    pub fn without_head(self) -> Self {
        self.state.lock().unwrap().head = None;
        self
    }

    pub fn failing_fetch(self) -> Self {
        self.state.lock().unwrap().fail_fetch = true;
        self
    }

    /// Replace the content of a template file between runs.
    pub fn set_file(&self, path: &str, content: impl AsRef<[u8]>) {
        let mut state = self.state.lock().unwrap();
        let entry = Entry::Content(content.as_ref().to_vec());
        match state.files.iter_mut().find(|(p, _)| p == path) {
            Some(existing) => existing.1 = entry,
            None => state.files.push((path.to_string(), entry)),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls that reach the template remote or its objects.
    pub fn backend_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("is_repository") && !c.starts_with("is_dirty"))
            .collect()
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }
}

fn failure(args: &[&str]) -> syncrepo_git::Error {
    syncrepo_git::Error::CommandFailed {
        args: args.iter().map(|a| a.to_string()).collect(),
        code: 1,
        stderr: "error: simulated failure".into(),
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn resolve_remote_head(&self, url: &str, branch: &str) -> syncrepo_git::Result<String> {
        self.record(format!("resolve_remote_head {} {}", url, branch));
        self.state
            .lock()
            .unwrap()
            .head
            .clone()
            .ok_or_else(|| syncrepo_git::Error::RemoteResolution {
                remote: url.to_string(),
                branch: branch.to_string(),
            })
    }

    async fn fetch_ref(&self, url: &str, refspec: &str) -> syncrepo_git::Result<()> {
        self.record(format!("fetch_ref {} {}", url, refspec));
        if self.state.lock().unwrap().fail_fetch {
            return Err(failure(&["fetch", url, refspec]));
        }
        Ok(())
    }

    async fn list_tree(
        &self,
        reference: &str,
        prefix: Option<&str>,
    ) -> syncrepo_git::Result<Vec<String>> {
        self.record(format!("list_tree {} {}", reference, prefix.unwrap_or("")));
        let state = self.state.lock().unwrap();
        let files = state.files.iter().map(|(path, _)| path.as_str());
        Ok(match prefix {
            Some(prefix) => {
                let scope = format!("{}/", prefix.trim_matches('/'));
                files
                    .filter_map(|p| p.strip_prefix(scope.as_str()))
                    .map(str::to_string)
                    .collect()
            }
            None => files.map(str::to_string).collect(),
        })
    }

    async fn read_blob(&self, reference: &str, path: &str) -> Blob {
        self.record(format!("read_blob {} {}", reference, path));
        let state = self.state.lock().unwrap();
        match state.files.iter().find(|(p, _)| p == path) {
            Some((_, Entry::Content(bytes))) => Blob::Found(bytes.clone()),
            Some((_, Entry::Broken)) => Blob::Failed(failure(&["cat-file", "blob", path])),
            Some((_, Entry::Unreadable)) | None => Blob::NotFound,
        }
    }

    async fn is_repository(&self, _root: &Path) -> bool {
        self.record("is_repository".into());
        self.state.lock().unwrap().repository
    }

    async fn is_dirty(&self, _root: &Path) -> bool {
        self.record("is_dirty".into());
        self.state.lock().unwrap().dirty
    }
}
