use super::{drop_deleted, merge_upserts, RemoteStore};
use crate::error::{QueryDeckError, Result};
use crate::model::{Query, Scope};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed remote store: `<root>/<user>/<instance>.json`.
pub struct FileRemote {
    root: PathBuf,
}

impl FileRemote {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, user_id: &str) -> Result<PathBuf> {
        Ok(self.root.join(path_component(user_id)?))
    }

    fn instance_file(&self, scope: &Scope) -> Result<PathBuf> {
        let name = format!("{}.json", path_component(&scope.instance_id)?);
        Ok(self.user_dir(&scope.user_id)?.join(name))
    }

    fn read_queries(&self, path: &Path) -> Result<Vec<Query>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_queries(&self, path: &Path, queries: &[Query]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(queries)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Ids become file names, so they must be a single plain path segment.
fn path_component(id: &str) -> Result<&str> {
    let valid = !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.contains('\0');
    if valid {
        Ok(id)
    } else {
        Err(QueryDeckError::Remote(format!(
            "'{}' cannot be used as a store identifier",
            id
        )))
    }
}

impl RemoteStore for FileRemote {
    fn fetch_queries(&self, scope: &Scope) -> Result<Vec<Query>> {
        self.read_queries(&self.instance_file(scope)?)
    }

    fn fetch_user_resources(&self, user_id: &str, resource: &str) -> Result<Value> {
        let path = self
            .user_dir(user_id)?
            .join("resources")
            .join(format!("{}.json", path_component(resource)?));
        if !path.exists() {
            return Ok(Value::Null);
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn upsert_queries(&mut self, scope: &Scope, queries: &[Query]) -> Result<()> {
        let path = self.instance_file(scope)?;
        let mut stored = self.read_queries(&path)?;
        merge_upserts(&mut stored, queries);
        self.write_queries(&path, &stored)
    }

    fn delete_queries(&mut self, scope: &Scope, queries: &[Query]) -> Result<()> {
        let path = self.instance_file(scope)?;
        if !path.exists() {
            return Ok(());
        }
        let mut stored = self.read_queries(&path)?;
        drop_deleted(&mut stored, queries);
        self.write_queries(&path, &stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> Scope {
        Scope::new("alice", "db-main")
    }

    #[test]
    fn empty_root_has_no_queries() {
        let dir = tempfile::tempdir().unwrap();
        let remote = FileRemote::new(dir.path());
        assert!(remote.fetch_queries(&scope()).unwrap().is_empty());
        assert_eq!(
            remote.fetch_user_resources("alice", "billing").unwrap(),
            Value::Null
        );
    }

    #[test]
    fn upsert_then_fetch_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = FileRemote::new(dir.path());
        let a = Query::new("A", "select 1");
        let b = Query::new("B", "select 2");
        remote.upsert_queries(&scope(), &[a.clone(), b.clone()]).unwrap();

        let mut a2 = a.clone();
        a2.name = "A2".into();
        remote.upsert_queries(&scope(), &[a2.clone()]).unwrap();

        assert_eq!(remote.fetch_queries(&scope()).unwrap(), vec![a2, b]);
        assert!(dir.path().join("alice").join("db-main.json").exists());
    }

    #[test]
    fn delete_removes_only_given_queries() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = FileRemote::new(dir.path());
        let a = Query::new("A", "");
        let b = Query::new("B", "");
        remote.upsert_queries(&scope(), &[a.clone(), b.clone()]).unwrap();

        remote.delete_queries(&scope(), &[a]).unwrap();
        assert_eq!(remote.fetch_queries(&scope()).unwrap(), vec![b]);
    }

    #[test]
    fn delete_on_missing_instance_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut remote = FileRemote::new(dir.path());
        remote
            .delete_queries(&scope(), &[Query::new("A", "")])
            .unwrap();
        assert!(!dir.path().join("alice").exists());
    }

    #[test]
    fn rejects_path_like_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let remote = FileRemote::new(dir.path());
        let err = remote
            .fetch_queries(&Scope::new("../etc", "x"))
            .unwrap_err();
        assert!(matches!(err, QueryDeckError::Remote(_)));
    }

    #[test]
    fn reads_user_resources() {
        let dir = tempfile::tempdir().unwrap();
        let resources = dir.path().join("alice").join("resources");
        fs::create_dir_all(&resources).unwrap();
        fs::write(resources.join("billing.json"), r#"{"plan":"pro"}"#).unwrap();

        let remote = FileRemote::new(dir.path());
        let value = remote.fetch_user_resources("alice", "billing").unwrap();
        assert_eq!(value["plan"], "pro");
    }
}
