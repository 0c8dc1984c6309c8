//! In-memory store used by unit tests to observe which operations ran.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;

use super::ClassStore;
use crate::error::{AppError, Result};
use crate::models::{
    ClassSnapshot, CreateHomework, CreateMaterial, CreateNews, CreateStudent, UpdateHomework, UpdateMaterial,
    UpdateNews, UpdateStudent,
};

pub(crate) const SECRET: &str = "6745Q-";

pub(crate) struct MemoryStore {
    snapshot: ClassSnapshot,
    next_id: AtomicI64,
    fail_fetch: bool,
    fail_writes: AtomicBool,
    fail_verify: AtomicBool,
    calls: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub(crate) fn new(snapshot: ClassSnapshot) -> Self {
        Self {
            snapshot,
            next_id: AtomicI64::new(100),
            fail_fetch: false,
            fail_writes: AtomicBool::new(false),
            fail_verify: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            fail_fetch: true,
            ..Self::new(ClassSnapshot::default())
        }
    }

    pub(crate) fn with_next_id(self, id: i64) -> Self {
        self.next_id.store(id, Ordering::SeqCst);
        self
    }

    pub(crate) fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_fail_verify(&self, fail: bool) {
        self.fail_verify.store(fail, Ordering::SeqCst);
    }

    /// Operations recorded so far, e.g. `"add_news"` or `"verify_password"`.
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded operations other than password checks.
    pub(crate) fn writes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c != "verify_password" && c != "fetch_all")
            .collect()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn write(&self, call: &str, operation: &'static str) -> Result<()> {
        self.record(call);
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(AppError::request(operation, StatusCode::INTERNAL_SERVER_ERROR))
        } else {
            Ok(())
        }
    }

    fn create(&self, call: &str, operation: &'static str) -> Result<i64> {
        self.write(call, operation)?;
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ClassStore for MemoryStore {
    async fn fetch_all(&self) -> Result<ClassSnapshot> {
        self.record("fetch_all");
        if self.fail_fetch {
            return Err(AppError::request("fetch data", StatusCode::BAD_GATEWAY));
        }
        Ok(self.snapshot.clone())
    }

    async fn update_photo(&self, _photo_url: Option<&str>) -> Result<()> {
        self.write("update_photo", "update photo")
    }

    async fn add_news(&self, _data: &CreateNews) -> Result<i64> {
        self.create("add_news", "add news")
    }

    async fn update_news(&self, data: &UpdateNews) -> Result<()> {
        self.write(&format!("update_news:{}", data.id), "update news")
    }

    async fn delete_news(&self, id: i64) -> Result<()> {
        self.write(&format!("delete_news:{id}"), "delete news")
    }

    async fn add_student(&self, _data: &CreateStudent) -> Result<i64> {
        self.create("add_student", "add student")
    }

    async fn update_student(&self, data: &UpdateStudent) -> Result<()> {
        self.write(&format!("update_student:{}", data.id), "update student")
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        self.write(&format!("delete_student:{id}"), "delete student")
    }

    async fn add_homework(&self, _data: &CreateHomework) -> Result<i64> {
        self.create("add_homework", "add homework")
    }

    async fn update_homework(&self, data: &UpdateHomework) -> Result<()> {
        self.write(&format!("update_homework:{}", data.id), "update homework")
    }

    async fn delete_homework(&self, id: i64) -> Result<()> {
        self.write(&format!("delete_homework:{id}"), "delete homework")
    }

    async fn add_material(&self, _data: &CreateMaterial) -> Result<i64> {
        self.create("add_material", "add material")
    }

    async fn update_material(&self, data: &UpdateMaterial) -> Result<()> {
        self.write(&format!("update_material:{}", data.id), "update material")
    }

    async fn delete_material(&self, id: i64) -> Result<()> {
        self.write(&format!("delete_material:{id}"), "delete material")
    }

    async fn verify_password(&self, candidate: &str) -> Result<bool> {
        self.record("verify_password");
        if self.fail_verify.load(Ordering::SeqCst) {
            return Err(AppError::request("verify password", StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(candidate == SECRET)
    }
}
