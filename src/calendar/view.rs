//! UI state of a calendar view: selected date, completion filters, and the add/edit modals

use chrono::NaiveDate;

use crate::calendar::cells::{build_cells, DayCell};
use crate::calendar::{CompletionFilter, Granularity};
use crate::draft::TodoDraft;
use crate::error::ValidationError;
use crate::item::{DateRange, TodoId};
use crate::schedule;
use crate::todo::{Todo, TodoFields, TodoPatch};

/// An open edit modal
#[derive(Clone, Debug, PartialEq)]
pub struct EditSession {
    id: TodoId,
    original: Todo,
    draft: TodoDraft,
    delete_armed: bool,
}

impl EditSession {
    pub fn id(&self) -> &TodoId { &self.id }
    pub fn draft(&self) -> &TodoDraft { &self.draft }
    /// Whether the next press on "delete" actually deletes
    pub fn is_delete_armed(&self) -> bool { self.delete_armed }
}

/// The modal shown over the view. Only one can be open at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum Modal {
    Closed,
    Adding(TodoDraft),
    Editing(EditSession),
}

/// Outcome of a press on the "delete" button of the edit modal
#[derive(Clone, Debug, PartialEq)]
pub enum DeleteAction {
    /// First press: the button now asks for a confirmation
    Armed,
    /// Second press: this todo must be deleted. The modal is closed.
    Confirmed(TodoId),
    /// No edit modal is open
    Ignored,
}

/// What a submitted modal asks the store to do
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(TodoFields),
    Update(TodoId, TodoPatch),
}

/// Why a view refused a transition
#[derive(Clone, Debug, PartialEq)]
pub enum ViewError {
    /// The view has been created read-only
    ReadOnly,
    /// Nothing to submit
    NoModal,
    /// The form content is invalid. The modal stays open.
    Invalid(ValidationError),
}

impl std::fmt::Display for ViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewError::ReadOnly => write!(f, "this view is read-only"),
            ViewError::NoModal => write!(f, "no modal is open"),
            ViewError::Invalid(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ViewError {}

impl From<ValidationError> for ViewError {
    fn from(err: ValidationError) -> Self {
        ViewError::Invalid(err)
    }
}


/// A daily, weekly or monthly view.
///
/// The view holds no todo: every query is given the shared list.
#[derive(Clone, Debug)]
pub struct CalendarView {
    granularity: Granularity,
    editable: bool,
    selected_date: NaiveDate,
    filter: CompletionFilter,
    modal: Modal,
}

impl CalendarView {
    pub fn new(granularity: Granularity, selected_date: NaiveDate, editable: bool) -> Self {
        Self {
            granularity,
            editable,
            selected_date,
            filter: CompletionFilter::default(),
            modal: Modal::Closed,
        }
    }

    pub fn granularity(&self) -> Granularity  { self.granularity }
    pub fn is_editable(&self) -> bool         { self.editable }
    pub fn selected_date(&self) -> NaiveDate  { self.selected_date }
    pub fn filter(&self) -> CompletionFilter  { self.filter }
    pub fn modal(&self) -> &Modal             { &self.modal }

    /// The list behind a modal does not react while the modal is open
    pub fn is_background_active(&self) -> bool {
        self.modal == Modal::Closed
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn next(&mut self) {
        self.selected_date = crate::calendar::shift(self.granularity, self.selected_date, 1);
    }

    pub fn previous(&mut self) {
        self.selected_date = crate::calendar::shift(self.granularity, self.selected_date, -1);
    }

    pub fn toggle_show_completed(&mut self) {
        self.filter.toggle(CompletionFilter::SHOW_COMPLETED);
    }

    pub fn toggle_show_incomplete(&mut self) {
        self.filter.toggle(CompletionFilter::SHOW_INCOMPLETE);
    }

    fn ensure_editable(&self) -> Result<(), ViewError> {
        if self.editable {
            Ok(())
        } else {
            Err(ViewError::ReadOnly)
        }
    }

    /// Open the add modal on the selected date
    pub fn open_add(&mut self) -> Result<(), ViewError> {
        self.open_add_on(self.selected_date)
    }

    /// Open the add modal on a given date (e.g. a click on an empty cell)
    pub fn open_add_on(&mut self, date: NaiveDate) -> Result<(), ViewError> {
        self.ensure_editable()?;
        log::debug!("Opening the add modal on {}", date);
        self.modal = Modal::Adding(TodoDraft::on(date));
        Ok(())
    }

    pub fn open_edit(&mut self, todo: &Todo) -> Result<(), ViewError> {
        self.ensure_editable()?;
        log::debug!("Opening the edit modal for {}", todo.id());
        self.modal = Modal::Editing(EditSession {
            id: todo.id().clone(),
            original: todo.clone(),
            draft: TodoDraft::from_todo(todo),
            delete_armed: false,
        });
        Ok(())
    }

    /// Close whatever modal is open, discarding its content
    pub fn close(&mut self) {
        self.modal = Modal::Closed;
    }

    /// The form of the open modal
    pub fn draft_mut(&mut self) -> Option<&mut TodoDraft> {
        match &mut self.modal {
            Modal::Closed => None,
            Modal::Adding(draft) => Some(draft),
            Modal::Editing(session) => Some(&mut session.draft),
        }
    }

    /// Press the "delete" button of the edit modal. It takes two presses to delete.
    pub fn press_delete(&mut self) -> DeleteAction {
        let session = match &mut self.modal {
            Modal::Editing(session) => session,
            _ => return DeleteAction::Ignored,
        };
        if session.delete_armed == false {
            session.delete_armed = true;
            return DeleteAction::Armed;
        }

        let id = session.id.clone();
        self.modal = Modal::Closed;
        DeleteAction::Confirmed(id)
    }

    /// Validate the open modal.
    ///
    /// On success the modal is closed and the change to apply is returned.
    /// Edits only carry the fields that actually changed.
    pub fn submit(&mut self) -> Result<Submission, ViewError> {
        let submission = match &self.modal {
            Modal::Closed => return Err(ViewError::NoModal),
            Modal::Adding(draft) => Submission::Create(draft.validate()?),
            Modal::Editing(session) => {
                let fields = session.draft.validate()?;
                let original = &session.original;
                let patch = TodoPatch {
                    title: Some(fields.title).filter(|t| t != original.title()),
                    dates: Some(fields.dates).filter(|d| *d != original.dates()),
                    schedule: Some(fields.schedule).filter(|s| *s != original.schedule()),
                    completed: Some(fields.completed).filter(|c| *c != original.completed()),
                };
                Submission::Update(session.id.clone(), patch)
            },
        };
        self.modal = Modal::Closed;
        Ok(submission)
    }

    /// Drag-and-drop of `todo` on `date`.
    ///
    /// Returns the new dates, or `None` when nothing changes (or when the view is read-only).
    pub fn drop_on(&self, todo: &Todo, date: NaiveDate) -> Option<DateRange> {
        if self.editable == false || self.is_background_active() == false {
            return None;
        }
        match schedule::reschedule(todo, date) {
            Ok(range) if range != todo.dates() => Some(range),
            Ok(_) => None,
            Err(err) => {
                log::warn!("Unable to drop {} on {}: {}", todo.id(), date, err);
                None
            },
        }
    }

    /// Dates shown by this view
    pub fn dates(&self) -> Vec<NaiveDate> {
        crate::calendar::period_dates(self.granularity, self.selected_date)
    }

    /// The todos this view lists: within the shown dates, and allowed by the completion filter
    pub fn visible<'a>(&self, todos: &'a [Todo]) -> Vec<&'a Todo> {
        let dates = self.dates();
        let (first, last) = match (dates.first(), dates.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Vec::new(),
        };
        todos.iter()
            .filter(|todo| self.filter.allows(todo))
            .filter(|todo| todo.start_date() <= last && todo.end_date() >= first)
            .collect()
    }

    /// One cell per shown date
    pub fn cells<'a>(&self, todos: &'a [Todo]) -> Vec<DayCell<'a>> {
        let visible = self.visible(todos);
        let granularity = self.granularity;
        let reference = self.selected_date;
        build_cells(&visible, &self.dates(), |date| crate::calendar::in_period(granularity, reference, date))
    }
}
