mod fake_crontab;

pub(crate) use fake_crontab::FakeCrontab;
