//! Editable state of a filter bar.
//!
//! The form knows nothing about paging or sorting. Every apply returns the
//! [`FilterChange`] it emits; deciding whether that change is a duplicate is
//! up to the consumer.

use std::fmt;

use contracts::shared::filter::{FilterState, FilterValue, StubFilterStructure};

/// What caused a filter emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    Set,
    Reset,
    Search,
    Field(String),
}

impl fmt::Display for ChangeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeSource::Set => f.write_str("set"),
            ChangeSource::Reset => f.write_str("reset"),
            ChangeSource::Search => f.write_str("search"),
            ChangeSource::Field(name) => write!(f, "field({name})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChange {
    pub source: ChangeSource,
    pub value: FilterState,
}

/// Something a list view takes its filter from: a current value, and a
/// [`FilterChange`] handed back by every mutation.
pub trait FilterSource {
    fn filter_value(&self) -> &FilterState;
    fn apply_filter(&mut self, values: &FilterState) -> FilterChange;
    fn clear_filter(&mut self) -> FilterChange;
}

/// Identifies one search edit; only the latest ticket may fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone)]
pub struct FilterFormController {
    stub: StubFilterStructure,
    search_field: Option<String>,
    value: FilterState,
    pristine: bool,
    search_ticket: u64,
    /// Search value carried by the last emission
    last_search: FilterValue,
}

impl FilterFormController {
    pub fn new(stub: StubFilterStructure) -> Self {
        let value = stub.empty_state();
        Self {
            stub,
            search_field: None,
            value,
            pristine: true,
            search_ticket: 0,
            last_search: FilterValue::Null,
        }
    }

    /// Declares which scalar field is the debounced free-text search.
    pub fn with_search_field(mut self, name: impl Into<String>) -> Self {
        self.search_field = Some(name.into());
        self
    }

    pub fn stub(&self) -> &StubFilterStructure {
        &self.stub
    }

    /// Current form value: every declared field (possibly empty) plus pass-through keys.
    pub fn value(&self) -> &FilterState {
        &self.value
    }

    pub fn field(&self, name: &str) -> Option<&FilterValue> {
        self.value.get(name)
    }

    pub fn is_pristine(&self) -> bool {
        self.pristine
    }

    /// Number of fields with a value, for the filter panel badge
    pub fn active_count(&self) -> usize {
        self.value.active_count()
    }

    /// Overwrites the form with `values` on top of the empty stub.
    pub fn set_filter(&mut self, values: &FilterState) -> FilterChange {
        self.value = self.stub.empty_state().merged(values);
        self.emit(ChangeSource::Set)
    }

    /// Like [`set_filter`](Self::set_filter), but also marks the form pristine again.
    pub fn reset_filter(&mut self, values: &FilterState) -> FilterChange {
        self.value = self.stub.empty_state().merged(values);
        self.pristine = true;
        self.emit(ChangeSource::Reset)
    }

    pub fn clear_filters(&mut self) -> FilterChange {
        self.reset_filter(&FilterState::new())
    }

    /// Single-field edit applied immediately (enum pickers, id selectors).
    pub fn patch_field(&mut self, name: &str, value: FilterValue) -> FilterChange {
        self.value.set(name, value);
        self.pristine = false;
        self.emit(ChangeSource::Field(name.to_string()))
    }

    /// Stores a keystroke in the search field without emitting.
    ///
    /// The caller arms an idle timer and hands the ticket back to
    /// [`search_idle`](Self::search_idle) when it fires.
    pub fn edit_search(&mut self, text: &str) -> SearchTicket {
        self.search_ticket += 1;
        match &self.search_field {
            Some(name) => {
                let value = if text.trim().is_empty() {
                    FilterValue::Null
                } else {
                    FilterValue::scalar(text)
                };
                self.value.set(name.clone(), value);
                self.pristine = false;
            }
            None => log::debug!("filter form: search edit ignored, no search field declared"),
        }
        SearchTicket(self.search_ticket)
    }

    /// Emits once the search field has been idle, if the text actually changed.
    pub fn search_idle(&mut self, ticket: SearchTicket) -> Option<FilterChange> {
        if ticket.0 != self.search_ticket {
            return None;
        }
        let current = self.search_value()?;
        if current == self.last_search {
            return None;
        }
        Some(self.emit(ChangeSource::Search))
    }

    fn search_value(&self) -> Option<FilterValue> {
        let name = self.search_field.as_deref()?;
        Some(self.value.get(name).cloned().unwrap_or(FilterValue::Null))
    }

    fn emit(&mut self, source: ChangeSource) -> FilterChange {
        if let Some(search) = self.search_value() {
            self.last_search = search;
        }
        log::debug!("Filter source: {source}");
        FilterChange {
            source,
            value: self.value.clone(),
        }
    }
}

impl FilterSource for FilterFormController {
    fn filter_value(&self) -> &FilterState {
        self.value()
    }

    fn apply_filter(&mut self, values: &FilterState) -> FilterChange {
        self.set_filter(values)
    }

    fn clear_filter(&mut self) -> FilterChange {
        self.clear_filters()
    }
}
