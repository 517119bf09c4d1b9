mod crontab;

pub use crontab::CrontabPort;
