//! Cron entry model: one schedule line parsed into structured fields.

use sha2::{Digest, Sha256};

use crate::domain::AppError;

/// Bare utility names expanded to their canonical absolute paths at parse
/// time. Rendering never re-expands.
const KNOWN_COMMANDS: &[(&str, &str)] = &[("w", "/usr/bin/w"), ("uptime", "/usr/bin/uptime")];

/// Length of a rendered identity tag.
const TAG_LEN: usize = 6;

/// One crontab schedule line: five schedule fields, a command, and an
/// optional trailing comment.
///
/// The default value is a blank builder skeleton: every field empty,
/// [`CronEntry::render`] producing the empty string. Schedule fields left
/// empty on a non-blank entry fall back to `*` when rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CronEntry {
    pub minute: String,
    pub hour: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
    pub command: String,
    pub comment: Option<String>,
}

impl CronEntry {
    /// Parse a raw crontab or descriptor line.
    ///
    /// The line must carry at least six whitespace-separated tokens: five
    /// schedule fields plus the remainder as command. Internal spacing of
    /// the command is preserved; text after the first `#` of the remainder
    /// becomes the comment.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let mut rest = raw.trim();
        let mut fields = [""; 5];
        for field in &mut fields {
            let (token, tail) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| parse_error(raw, "expected five schedule fields and a command"))?;
            *field = token;
            rest = tail.trim_start();
        }

        for field in &fields {
            if !is_schedule_token(field) {
                return Err(parse_error(raw, &format!("invalid schedule field '{field}'")));
            }
        }

        let (command, comment) = match rest.split_once('#') {
            Some((head, note)) => {
                let note = note.trim();
                (head.trim_end(), (!note.is_empty()).then(|| note.to_string()))
            }
            None => (rest, None),
        };
        if command.is_empty() {
            return Err(parse_error(raw, "empty command"));
        }

        Ok(Self {
            minute: fields[0].to_string(),
            hour: fields[1].to_string(),
            day_of_month: fields[2].to_string(),
            month: fields[3].to_string(),
            day_of_week: fields[4].to_string(),
            command: expand_command(command),
            comment,
        })
    }

    /// Whether this entry is still the blank skeleton.
    pub fn is_blank(&self) -> bool {
        self.command.is_empty()
    }

    /// Render the canonical tab-separated line.
    ///
    /// With `with_tag`, the identity tag is appended in comment position so
    /// the scheduler ignores it: after the user comment when one exists, as
    /// the sole comment otherwise.
    pub fn render(&self, with_tag: bool) -> String {
        if self.is_blank() {
            return String::new();
        }
        let mut line = self.schedule_core();
        if let Some(comment) = &self.comment {
            line.push_str(" # ");
            line.push_str(comment);
        }
        if with_tag {
            if self.comment.is_none() {
                line.push_str(" #");
            }
            line.push(' ');
            line.push_str(&self.identity_tag());
        }
        line
    }

    /// Deterministic identity signature over the schedule fields and the
    /// command. Comment and tag never participate, so the same logical job
    /// keeps its tag across comment edits and repeated renders.
    pub fn identity_tag(&self) -> String {
        let digest = Sha256::digest(self.schedule_core().as_bytes());
        let mut value = 0u64;
        for byte in &digest[..8] {
            value = value << 8 | u64::from(*byte);
        }
        let mut tag = String::with_capacity(TAG_LEN);
        let mut digits = [0u8; TAG_LEN];
        for slot in digits.iter_mut().rev() {
            *slot = (value % 36) as u8;
            value /= 36;
        }
        for digit in digits {
            tag.push(if digit < 10 { (b'0' + digit) as char } else { (b'a' + digit - 10) as char });
        }
        tag
    }

    fn schedule_core(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            field_or_star(&self.minute),
            field_or_star(&self.hour),
            field_or_star(&self.day_of_month),
            field_or_star(&self.month),
            field_or_star(&self.day_of_week),
            self.command,
        )
    }
}

/// Extract the trailing identity tag of a rendered crontab line, if any.
///
/// A tag is the last whitespace-separated token of the comment portion and
/// is exactly [`TAG_LEN`] base-36 characters. Callers compare the result
/// against known tags, never against free text.
pub fn line_identity_tag(line: &str) -> Option<&str> {
    let hash = line.find('#')?;
    let candidate = line[hash + 1..].split_whitespace().next_back()?;
    (candidate.len() == TAG_LEN
        && candidate.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()))
    .then_some(candidate)
}

fn parse_error(raw: &str, details: &str) -> AppError {
    AppError::Parse { line: raw.trim().to_string(), details: details.to_string() }
}

/// Minimal shape check: digits, `*`, lists, ranges, and steps only.
fn is_schedule_token(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| c.is_ascii_digit() || matches!(c, '*' | ',' | '-' | '/'))
}

fn field_or_star(field: &str) -> &str {
    if field.is_empty() { "*" } else { field }
}

fn expand_command(command: &str) -> String {
    let (head, tail) = match command.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, Some(tail)),
        None => (command, None),
    };
    let head = KNOWN_COMMANDS
        .iter()
        .find(|(name, _)| *name == head)
        .map(|(_, path)| *path)
        .unwrap_or(head);
    match tail {
        Some(tail) => format!("{head} {tail}"),
        None => head.to_string(),
    }
}
