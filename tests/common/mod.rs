#![allow(dead_code)]

use push_transfer::domain::ports::Storage;
use push_transfer::{Result, UploadReceipt, UploadTarget};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, Mutex};

pub const PICTURES: &str = "SampleTransfers/Images/pictures";

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(repo: &Path, args: &[&str]) {
    let status = Command::new("git")
        .arg("-C")
        .arg(repo)
        .args([
            "-c",
            "user.name=Fixture",
            "-c",
            "user.email=fixture@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .status()
        .expect("spawn git");
    assert!(status.success(), "git {:?} failed", args);
}

fn write(repo: &Path, rel: &str, content: &[u8]) {
    let path = repo.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Builds a two-commit repository on `master` under `root/origin` and
/// returns its `file://` URL.
pub fn fixture_repo(root: &Path) -> String {
    let repo = root.join("origin");
    fs::create_dir_all(&repo).unwrap();
    git(&repo, &["init", "--quiet"]);
    git(&repo, &["symbolic-ref", "HEAD", "refs/heads/master"]);
    git(&repo, &["config", "uploadpack.allowFilter", "true"]);
    git(&repo, &["config", "uploadpack.allowAnySHA1InWant", "true"]);

    write(&repo, "README.md", b"# sample data\n");
    write(&repo, &format!("{}/a.jpg", PICTURES), b"first version");
    git(&repo, &["add", "-A"]);
    git(&repo, &["commit", "--quiet", "-m", "initial"]);

    write(&repo, &format!("{}/a.jpg", PICTURES), b"second version");
    write(&repo, &format!("{}/nested/b.png", PICTURES), b"\x89PNG fixture");
    write(&repo, "SampleTransfers/Docs/readme.txt", b"not requested");
    write(&repo, "other/c.txt", b"unrelated");
    git(&repo, &["add", "-A"]);
    git(&repo, &["commit", "--quiet", "-m", "more samples"]);

    format!("file://{}", repo.display())
}

/// Storage double that keeps the last uploaded object in memory.
#[derive(Clone, Default)]
pub struct RecordingStorage {
    pub uploads: Arc<Mutex<Vec<(UploadTarget, Vec<u8>)>>>,
}

impl RecordingStorage {
    pub fn last(&self) -> Option<(UploadTarget, Vec<u8>)> {
        self.uploads.lock().unwrap().last().cloned()
    }
}

impl Storage for RecordingStorage {
    async fn put_file(&self, target: &UploadTarget, path: &Path) -> Result<UploadReceipt> {
        let data = fs::read(path)?;
        let bytes = data.len() as u64;
        self.uploads.lock().unwrap().push((target.clone(), data));
        Ok(UploadReceipt {
            bucket: target.bucket.clone(),
            key: target.key.clone(),
            bytes,
            e_tag: None,
        })
    }
}

pub fn zip_entry_names(data: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
    let mut names: Vec<String> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    names.sort();
    names
}

pub fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).unwrap().next().is_none()
}

pub fn top_level_entries(path: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(path)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.file_name().unwrap() != ".git")
        .collect();
    entries.sort();
    entries
}
