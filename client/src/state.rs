use libris_core::record::{Record, RecordId};
use libris_core::Book;

use crate::draft::Draft;

/// Display mode for a single list row. At most one row is `Editing` at any
/// time; the transitions below maintain that invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum RowMode {
    Viewing,
    Editing { draft: Draft },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub record: Record,
    pub mode: RowMode,
}

/// The client's entire transient state: the list mirror, the create draft,
/// and the form error. Mutated only through the transition methods, so every
/// state change flows through one place.
#[derive(Debug, Default)]
pub struct AppState {
    rows: Vec<Row>,
    create_draft: Draft,
    form_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self { Self::default() }

    pub fn rows(&self) -> &[Row] { &self.rows }

    pub fn create_draft(&self) -> &Draft { &self.create_draft }

    pub fn form_error(&self) -> Option<&str> { self.form_error.as_deref() }

    pub fn set_error(&mut self, message: impl Into<String>) { self.form_error = Some(message.into()); }

    pub fn record(&self, id: RecordId) -> Option<&Record> { self.rows.iter().find(|r| r.record.id == id).map(|r| &r.record) }

    /// The id of the row currently in edit mode, if any.
    pub fn editing_id(&self) -> Option<RecordId> {
        self.rows.iter().find(|r| matches!(r.mode, RowMode::Editing { .. })).map(|r| r.record.id)
    }

    pub fn editing_draft(&self) -> Option<&Draft> {
        self.rows.iter().find_map(|r| match &r.mode {
            RowMode::Editing { draft } => Some(draft),
            RowMode::Viewing => None,
        })
    }

    /// Wholesale refresh of the list mirror. Any edit in progress is dropped.
    pub fn load(&mut self, records: Vec<Record>) {
        self.rows = records.into_iter().map(|record| Row { record, mode: RowMode::Viewing }).collect();
        self.form_error = None;
    }

    /// viewing -> editing. The draft starts from the row's current displayed
    /// values; any other editing row reverts to viewing.
    pub fn begin_edit(&mut self, id: RecordId) -> bool {
        if self.record(id).is_none() {
            return false;
        }
        for row in &mut self.rows {
            row.mode = if row.record.id == id {
                RowMode::Editing { draft: Draft::from_record(&row.record) }
            } else {
                RowMode::Viewing
            };
        }
        self.form_error = None;
        true
    }

    /// editing -> viewing without a request; the edit draft is discarded.
    pub fn cancel_edit(&mut self) {
        for row in &mut self.rows {
            row.mode = RowMode::Viewing;
        }
    }

    /// Any user edit of a draft clears the form error.
    pub fn edit_create_draft(&mut self, edit: impl FnOnce(&mut Draft)) {
        edit(&mut self.create_draft);
        self.form_error = None;
    }

    /// Edit the draft of the row in edit mode, if there is one.
    pub fn edit_row_draft(&mut self, edit: impl FnOnce(&mut Draft)) -> bool {
        let draft = self.rows.iter_mut().find_map(|r| match &mut r.mode {
            RowMode::Editing { draft } => Some(draft),
            RowMode::Viewing => None,
        });
        match draft {
            Some(draft) => {
                edit(draft);
                self.form_error = None;
                true
            }
            None => false,
        }
    }

    /// Create-side submission gate. On a validation failure the error message
    /// is set, the draft is kept, and the caller must not issue a request.
    pub fn take_create_submission(&mut self) -> Option<Book> {
        match self.create_draft.validate() {
            Ok(book) => Some(book),
            Err(err) => {
                self.form_error = Some(err.to_string());
                None
            }
        }
    }

    /// Edit-side submission gate, same contract as the create side. Yields
    /// the target id along with the typed book; stays in editing on failure.
    pub fn take_edit_submission(&mut self) -> Option<(RecordId, Book)> {
        let (id, validated) = self.rows.iter().find_map(|r| match &r.mode {
            RowMode::Editing { draft } => Some((r.record.id, draft.validate())),
            RowMode::Viewing => None,
        })?;
        match validated {
            Ok(book) => Some((id, book)),
            Err(err) => {
                self.form_error = Some(err.to_string());
                None
            }
        }
    }

    /// A successful create appends to the mirror's end and resets the form.
    pub fn apply_created(&mut self, record: Record) {
        self.rows.push(Row { record, mode: RowMode::Viewing });
        self.create_draft.clear();
        self.form_error = None;
    }

    /// A successful update replaces the matching row's record in place and
    /// leaves every other row untouched.
    pub fn apply_updated(&mut self, record: Record) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.record.id == record.id) {
            row.record = record;
            row.mode = RowMode::Viewing;
        }
        self.form_error = None;
    }

    /// A successful delete removes exactly the matching row.
    pub fn apply_removed(&mut self, id: RecordId) {
        self.rows.retain(|r| r.record.id != id);
        self.form_error = None;
    }
}
