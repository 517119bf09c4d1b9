use std::sync::{Arc, Mutex};

use crate::domain::AppError;
use crate::ports::CrontabPort;

/// In-memory scheduler used by unit tests.
///
/// Clones share the same stored text, so a test can keep a handle on the
/// store while the manager owns its own copy of the fake.
#[derive(Clone, Default)]
pub struct FakeCrontab {
    stored: Arc<Mutex<String>>,
    fail_writes: Arc<Mutex<bool>>,
    writes: Arc<Mutex<usize>>,
}

impl FakeCrontab {
    pub fn with_content(content: &str) -> Self {
        let fake = Self::default();
        *fake.stored.lock().unwrap() = content.to_string();
        fake
    }

    pub fn stored(&self) -> String {
        self.stored.lock().unwrap().clone()
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap() = fail;
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

impl CrontabPort for FakeCrontab {
    fn read(&self) -> Result<String, AppError> {
        Ok(self.stored())
    }

    fn write(&self, content: &str) -> Result<(), AppError> {
        if *self.fail_writes.lock().unwrap() {
            return Err(AppError::Crontab {
                command: "fake crontab".to_string(),
                details: "write refused".to_string(),
            });
        }
        *self.stored.lock().unwrap() = content.to_string();
        *self.writes.lock().unwrap() += 1;
        Ok(())
    }
}
