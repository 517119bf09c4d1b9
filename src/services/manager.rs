//! The crontab manager: pending entries reconciled against the text the
//! scheduler last reported.
//!
//! The manager owns two pieces of state. `source` is the verbatim text the
//! scheduler held at the last read or write; it is the ground truth for
//! "what already exists" and the base every merge diffs against. `pending`
//! is the ordered batch of entries queued since then, plus the identity
//! tags queued for removal. A save reconciles the two and pushes the result
//! through the [`CrontabPort`].

use std::path::Path;

use crate::domain::{AppError, CronEntry, GroupDescriptor, line_identity_tag};
use crate::ports::CrontabPort;

/// A queued entry and the descriptor group it came from, if any.
#[derive(Debug, Clone)]
struct PendingEntry {
    entry: CronEntry,
    group: Option<String>,
}

/// Structured editor for one account's crontab.
///
/// One manager per target account; state mutation is unsynchronized by
/// design, so an instance must not be shared across concurrent callers.
pub struct CrontabManager<C: CrontabPort> {
    crontab: C,
    pending: Vec<PendingEntry>,
    removed_tags: Vec<String>,
    source: Option<String>,
}

impl<C: CrontabPort> CrontabManager<C> {
    pub fn new(crontab: C) -> Self {
        Self { crontab, pending: Vec::new(), removed_tags: Vec::new(), source: None }
    }

    /// Entry factory. `None` yields a blank builder skeleton; `Some` parses
    /// the raw line.
    pub fn new_job(&self, raw: Option<&str>) -> Result<CronEntry, AppError> {
        match raw {
            Some(line) => CronEntry::parse(line),
            None => Ok(CronEntry::default()),
        }
    }

    /// Queue `entry`, optionally as a member of a descriptor group. Group
    /// membership never affects rendering; it only feeds the group toggle
    /// protocol.
    pub fn add(&mut self, entry: CronEntry, group: Option<&str>) {
        self.pending.push(PendingEntry { entry, group: group.map(str::to_string) });
    }

    /// Swap `old` for `new` among pending entries, position and group
    /// preserved. When `old` is not pending, `new` is queued at the end and
    /// `old`'s line in the stored text is marked for removal at the next
    /// save.
    pub fn replace(&mut self, old: &CronEntry, new: CronEntry) {
        let old_tag = old.identity_tag();
        match self.pending.iter().position(|p| p.entry.identity_tag() == old_tag) {
            Some(index) => self.pending[index].entry = new,
            None => {
                self.removed_tags.push(old_tag);
                self.pending.push(PendingEntry { entry: new, group: None });
            }
        }
    }

    /// The best-known full crontab text: the stored text merged with any
    /// unsaved pending work. Reading never mutates persisted state, so
    /// consecutive calls return identical text.
    pub fn list_jobs(&mut self) -> Result<String, AppError> {
        self.merged_text()
    }

    /// Reconcile pending work and write the result through the scheduler
    /// port, then make it the new source text.
    ///
    /// With `merge`, stored lines are preserved: a line whose identity tag
    /// matches a pending entry is replaced in place, lines queued for
    /// removal are dropped, and the rest of the pending batch is appended.
    /// Without `merge`, the written text is rebuilt from the pending batch
    /// alone. A port failure aborts the save with all state unchanged.
    pub fn save(&mut self, merge: bool) -> Result<(), AppError> {
        let text = if merge { self.merged_text()? } else { render_batch(&self.pending) };
        self.crontab.write(&text)?;
        self.source = Some(text);
        self.pending.clear();
        self.removed_tags.clear();
        Ok(())
    }

    /// Drop all pending work, including queued removals. The stored text
    /// stays authoritative, ready for a fresh batch.
    pub fn clean_manager(&mut self) {
        self.pending.clear();
        self.removed_tags.clear();
    }

    /// Queue every line of the descriptor file, tagged with the group
    /// identifier derived from its path. Returns the number of entries
    /// queued. Lines already present in the stored text are updated in
    /// place at the next save.
    pub fn enable_or_update(&mut self, path: &Path) -> Result<usize, AppError> {
        let descriptor = GroupDescriptor::load(path)?;
        let (group, entries) = descriptor.into_parts();
        let count = entries.len();
        for entry in entries {
            self.add(entry, Some(&group));
        }
        Ok(count)
    }

    /// Queue for removal every line the descriptor currently produces, and
    /// drop any matching pending work. Returns the number of entries
    /// scheduled for removal. Other groups and unmanaged content are never
    /// touched.
    pub fn disable(&mut self, path: &Path) -> Result<usize, AppError> {
        let descriptor = GroupDescriptor::load(path)?;
        self.pending.retain(|p| p.group.as_deref() != Some(descriptor.group()));
        for entry in descriptor.entries() {
            let tag = entry.identity_tag();
            self.pending.retain(|p| p.entry.identity_tag() != tag);
            self.removed_tags.push(tag);
        }
        Ok(descriptor.entries().len())
    }

    fn merged_text(&mut self) -> Result<String, AppError> {
        if self.source.is_none() {
            self.source = Some(self.crontab.read()?);
        }
        let source = self.source.as_deref().unwrap_or_default();
        Ok(merge(source, &self.pending, &self.removed_tags))
    }
}

/// Splice the pending batch into `source`.
///
/// Lines the manager does not own pass through verbatim and in position. A
/// re-added entry wins over a queued removal of the same tag, so a
/// disable/enable cycle within one batch updates in place.
fn merge(source: &str, pending: &[PendingEntry], removed_tags: &[String]) -> String {
    let mut consumed = vec![false; pending.len()];
    let mut lines: Vec<String> = Vec::new();

    for line in source.lines() {
        if let Some(tag) = line_identity_tag(line) {
            let matched = pending
                .iter()
                .enumerate()
                .find(|(i, p)| !consumed[*i] && p.entry.identity_tag() == tag);
            if let Some((index, p)) = matched {
                consumed[index] = true;
                lines.push(p.entry.render(true));
                continue;
            }
            if removed_tags.iter().any(|t| t == tag) {
                continue;
            }
        }
        lines.push(line.to_string());
    }

    for (index, p) in pending.iter().enumerate() {
        if !consumed[index] {
            lines.push(p.entry.render(true));
        }
    }

    terminate(lines.join("\n"))
}

fn render_batch(pending: &[PendingEntry]) -> String {
    terminate(pending.iter().map(|p| p.entry.render(true)).collect::<Vec<_>>().join("\n"))
}

fn terminate(mut text: String) -> String {
    if !text.is_empty() {
        text.push('\n');
    }
    text
}
