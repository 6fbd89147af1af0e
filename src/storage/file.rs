//! JSONL file storage for instances
//!
//! Instances are kept in memory keyed by `"<ClassName>.<id>"` and persisted
//! to a single file with one JSON object per line.
//! Uses file locking for concurrent access safety.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Storage;
use crate::domain::{ClassName, Instance};

/// Store for instances backed by a JSONL file
pub struct FileStorage {
    path: PathBuf,
    objects: BTreeMap<String, Instance>,
}

impl FileStorage {
    /// Opens the store at the given path, loading any persisted instances
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut storage = Self {
            path: path.into(),
            objects: BTreeMap::new(),
        };
        storage.reload()?;
        Ok(storage)
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory objects with the persisted ones
    pub fn reload(&mut self) -> Result<()> {
        self.objects = self.read_all()?;
        tracing::info!(
            path = %self.path.display(),
            count = self.objects.len(),
            "Loaded storage"
        );
        Ok(())
    }

    fn read_all(&self) -> Result<BTreeMap<String, Instance>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open storage file: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on storage file")?;

        let reader = BufReader::new(&file);
        let mut objects = BTreeMap::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let instance: Instance = serde_json::from_str(&line)
                .with_context(|| format!("Failed to parse instance at line {}", line_num + 1))?;

            objects.insert(instance.key(), instance);
        }

        Ok(objects)
    }

    fn write_all(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        // Write to temp file first
        let temp_path = self.path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on storage file")?;

            let mut writer = BufWriter::new(&file);

            for instance in self.objects.values() {
                let line =
                    serde_json::to_string(instance).context("Failed to serialize instance")?;
                writeln!(writer, "{}", line).context("Failed to write instance")?;
            }

            writer.flush().context("Failed to flush storage file")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        tracing::info!(
            path = %self.path.display(),
            count = self.objects.len(),
            "Saved storage"
        );
        Ok(())
    }
}

impl Storage for FileStorage {
    fn all(&self, class: Option<ClassName>) -> Vec<&Instance> {
        match class {
            None => self.objects.values().collect(),
            Some(class) => self
                .objects
                .iter()
                .filter(|(key, _)| key.split('.').next() == Some(class.as_str()))
                .map(|(_, instance)| instance)
                .collect(),
        }
    }

    fn get(&self, key: &str) -> Option<&Instance> {
        self.objects.get(key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut Instance> {
        self.objects.get_mut(key)
    }

    fn insert(&mut self, instance: Instance) {
        self.objects.insert(instance.key(), instance);
    }

    fn remove(&mut self, key: &str) -> Option<Instance> {
        self.objects.remove(key)
    }

    fn save(&self) -> Result<()> {
        self.write_all()
    }
}
