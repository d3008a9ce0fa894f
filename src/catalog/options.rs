//! Option groups and choices attached to catalog items.

use crate::ids::{ChoiceId, OptionGroupId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How many choices an option group accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionType {
    /// Exactly one choice at a time (e.g. size).
    Single,
    /// Several choices, optionally capped by `max_select` (e.g. toppings).
    Multiple,
}

impl SelectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionType::Single => "single",
            SelectionType::Multiple => "multiple",
        }
    }
}

/// One selectable choice inside an option group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    pub id: ChoiceId,
    pub name: String,
    /// Price adjustment when selected; negative deltas are allowed.
    pub price_delta: Money,
    pub available: bool,
    /// Pre-selected when the item sheet opens.
    pub is_default: bool,
}

impl Choice {
    pub fn new(name: impl Into<String>, price_delta: Money) -> Self {
        Self {
            id: ChoiceId::generate(),
            name: name.into(),
            price_delta,
            available: true,
            is_default: false,
        }
    }

    pub fn default_choice(name: impl Into<String>, price_delta: Money) -> Self {
        let mut choice = Self::new(name, price_delta);
        choice.is_default = true;
        choice
    }
}

/// A named set of priced choices, e.g. "Size" or "Extra Toppings".
///
/// A `Single` group resolves to at most one selected choice; a `Multiple`
/// group keeps at most `max_select` choices, dropping the oldest selection
/// when the cap is exceeded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionGroup {
    pub id: OptionGroupId,
    pub name: String,
    pub selection_type: SelectionType,
    /// Whether at least one choice must be selected.
    pub required: bool,
    /// Cap on selected choices; `Multiple` groups only.
    pub max_select: Option<usize>,
    pub choices: Vec<Choice>,
}

impl OptionGroup {
    /// A single-select group.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            id: OptionGroupId::generate(),
            name: name.into(),
            selection_type: SelectionType::Single,
            required: false,
            max_select: None,
            choices: Vec::new(),
        }
    }

    /// A multi-select group.
    pub fn multiple(name: impl Into<String>) -> Self {
        Self {
            id: OptionGroupId::generate(),
            name: name.into(),
            selection_type: SelectionType::Multiple,
            required: false,
            max_select: None,
            choices: Vec::new(),
        }
    }

    pub fn with_required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_max_select(mut self, cap: usize) -> Self {
        self.max_select = Some(cap);
        self
    }

    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Look up a choice by id.
    pub fn choice(&self, id: &ChoiceId) -> Option<&Choice> {
        self.choices.iter().find(|c| &c.id == id)
    }
}
