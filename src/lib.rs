//! crontag: manage a user's crontab as structured, tagged entries.
//!
//! The library reads the crontab the scheduler command currently holds,
//! lets callers add, replace, and remove individual jobs, and writes the
//! result back while leaving everything it does not own byte-for-byte
//! untouched. Jobs defined in a descriptor file can be enabled or disabled
//! as a group, idempotently, via a deterministic identity tag embedded as a
//! trailing comment.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use adapters::CrontabCommandAdapter;
use services::CrontabManager;

pub use domain::{AppError, CronEntry, CrontabSettings, GroupDescriptor, ManagerConfig};
pub use ports::CrontabPort;

fn manager_for(settings: &CrontabSettings) -> CrontabManager<CrontabCommandAdapter> {
    let adapter = CrontabCommandAdapter::new(settings.command.clone(), settings.user.clone());
    CrontabManager::new(adapter)
}

/// Print-ready text of the account's current crontab.
pub fn list(settings: &CrontabSettings) -> Result<String, AppError> {
    manager_for(settings).list_jobs()
}

/// Parse a raw cron line and persist it into the crontab.
///
/// Returns the rendered line (without its identity tag) for display.
pub fn add_line(settings: &CrontabSettings, line: &str) -> Result<String, AppError> {
    let mut manager = manager_for(settings);
    let job = manager.new_job(Some(line))?;
    let rendered = job.render(false);
    manager.add(job, None);
    manager.save(true)?;
    Ok(rendered)
}

/// Enable or update every job of a descriptor file as one group.
///
/// Returns the number of jobs materialized.
pub fn enable(settings: &CrontabSettings, descriptor: &Path) -> Result<usize, AppError> {
    let mut manager = manager_for(settings);
    let count = manager.enable_or_update(descriptor)?;
    manager.save(true)?;
    Ok(count)
}

/// Disable every job of a descriptor file, leaving other groups and
/// unmanaged lines untouched.
///
/// Returns the number of jobs removed from management.
pub fn disable(settings: &CrontabSettings, descriptor: &Path) -> Result<usize, AppError> {
    let mut manager = manager_for(settings);
    let count = manager.disable(descriptor)?;
    manager.save(true)?;
    Ok(count)
}

/// Erase the whole crontab with a full-replace save of an empty batch.
pub fn erase(settings: &CrontabSettings) -> Result<(), AppError> {
    let mut manager = manager_for(settings);
    manager.clean_manager();
    manager.save(false)
}
