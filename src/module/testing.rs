//! In-memory fetcher for pipeline tests

use crate::error::{StageError, StageResult};
use crate::fetch::{BundleReader, Fetcher};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

/// Serves a generated bundle per reference and counts calls.
///
/// The bundle's buildpack id is the reference with any `file:/` prefix
/// removed, version `1.1.0`.
#[derive(Default)]
pub struct FakeFetcher {
    calls: Mutex<HashMap<String, usize>>,
    failing: Vec<String>,
    raw: HashMap<String, Vec<u8>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make fetches of `reference` fail
    pub fn failing(mut self, reference: &str) -> Self {
        self.failing.push(reference.to_string());
        self
    }

    /// Serve `bytes` verbatim for `reference`
    pub fn raw(mut self, reference: &str, bytes: Vec<u8>) -> Self {
        self.raw.insert(reference.to_string(), bytes);
        self
    }

    pub fn calls(&self, reference: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(reference)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn bundle(id: &str) -> Vec<u8> {
        let descriptor = format!(
            "api = \"0.3\"\n\n[buildpack]\nid = \"{id}\"\nversion = \"1.1.0\"\n\n[[stacks]]\nid = \"some.stack.id\"\n"
        );

        let mut builder = tar::Builder::new(Vec::new());
        append(&mut builder, "buildpack.toml", 0o644, descriptor.as_bytes());
        let mut dir = tar::Header::new_gnu();
        dir.set_entry_type(tar::EntryType::Directory);
        dir.set_mode(0o755);
        dir.set_size(0);
        builder.append_data(&mut dir, "bin", std::io::empty()).unwrap();
        append(&mut builder, "bin/build", 0o755, b"build-contents");
        append(&mut builder, "bin/detect", 0o755, b"detect-contents");
        builder.into_inner().unwrap()
    }
}

fn append(builder: &mut tar::Builder<Vec<u8>>, path: &str, mode: u32, data: &[u8]) {
    let mut header = tar::Header::new_gnu();
    header.set_entry_type(tar::EntryType::Regular);
    header.set_mode(mode);
    header.set_size(data.len() as u64);
    builder.append_data(&mut header, path, data).unwrap();
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, reference: &str) -> StageResult<BundleReader> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(reference.to_string())
            .or_default() += 1;

        if self.failing.iter().any(|r| r == reference) {
            return Err(StageError::fetch(reference, "connection reset"));
        }
        if let Some(bytes) = self.raw.get(reference) {
            return Ok(Box::new(Cursor::new(bytes.clone())));
        }

        let id = reference.replace("file:/", "");
        Ok(Box::new(Cursor::new(Self::bundle(&id))))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
