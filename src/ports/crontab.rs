use crate::domain::AppError;

/// Seam to the system scheduler command.
///
/// The manager never spawns processes itself; every read and write of the
/// stored crontab goes through this port so tests can substitute an
/// in-memory scheduler.
pub trait CrontabPort {
    /// Read the full text the scheduler currently holds. An account without
    /// a crontab yet reads as the empty string.
    fn read(&self) -> Result<String, AppError>;

    /// Replace the stored crontab with `content` in one shot.
    fn write(&self, content: &str) -> Result<(), AppError>;
}
