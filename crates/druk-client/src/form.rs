use druk_core::{Draft, EntitySchema, Error, Record, Result, Value};

/// Whether the open form creates a new record or amends an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Create,
    Update { id: i64 },
}

/// A validated draft ready to hand to the mutation gateway: exactly one
/// network call per submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub flow: Flow,
    pub draft: Draft,
}

/// Controller behind the CRUD form: owns the draft being edited, applies
/// field edits with immutable-update discipline, and gates submission on
/// the schema's required fields.
///
/// The controller performs no network I/O itself. [`submit`](Self::submit)
/// returns a [`Submission`] for the caller to forward to the gateway, and
/// marks the form in-flight so a second submit is rejected until the caller
/// reports the outcome via [`succeed`](Self::succeed) or
/// [`fail`](Self::fail).
#[derive(Debug)]
pub struct FormController {
    schema: EntitySchema,
    flow: Flow,
    draft: Draft,
    in_flight: bool,
    open: bool,
}

impl FormController {
    /// Open a create-flow form with every field at its initial value.
    pub fn create(schema: &EntitySchema) -> Self {
        Self {
            schema: schema.clone(),
            flow: Flow::Create,
            draft: Draft::empty(schema),
            in_flight: false,
            open: true,
        }
    }

    /// Open an update-flow form pre-populated from an existing record.
    pub fn edit(schema: &EntitySchema, record: &Record) -> Self {
        Self {
            schema: schema.clone(),
            flow: Flow::Update { id: record.id },
            draft: Draft::from_record(record),
            in_flight: false,
            open: true,
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// True while a submission is pending; the submit affordance is
    /// disabled in this state.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// False once the form has been cancelled or a submission confirmed.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Apply one field edit. The previous draft is replaced, not mutated:
    /// anyone still holding it sees the old values.
    pub fn edit_field(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.draft = self.draft.with(field, value);
    }

    /// Validate and promote the draft to a submission.
    ///
    /// Rejects with `Validation { field }` if a required field is empty —
    /// in that case no gateway call must be made — and with
    /// `SubmitInFlight` while a previous submission is unresolved.
    pub fn submit(&mut self) -> Result<Submission> {
        if self.in_flight {
            return Err(Error::SubmitInFlight);
        }
        self.draft.check_required(&self.schema)?;
        self.in_flight = true;
        Ok(Submission {
            flow: self.flow,
            draft: self.draft.clone(),
        })
    }

    /// The mutation was confirmed; the form closes and the draft is done.
    pub fn succeed(&mut self) {
        self.in_flight = false;
        self.open = false;
    }

    /// The mutation failed; the draft stays open for retry or cancel.
    pub fn fail(&mut self) {
        self.in_flight = false;
    }

    /// Discard the draft.
    pub fn cancel(&mut self) {
        self.open = false;
    }
}
