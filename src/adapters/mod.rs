mod crontab_command;

pub use crontab_command::CrontabCommandAdapter;
