//! Run configuration listing: selection state, value projection and the
//! class flags a view needs to style each entry.
//!
//! Nothing here touches a view. [`ConfigSet::reduce`] is the only way to
//! change selection state and it returns a new set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::format::format_fixed;
use crate::error::{ChartError, ChartResult};

/// Computed text at or beyond this many characters is truncated.
pub const CONFIG_PRINT_LEN: usize = 20;

const NESTING_PREFIX: &str = "--- ";
const NUMBER_DECIMALS: usize = 6;

/// Selection of one configuration entry in a comparison view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected,
    Favourite,
}

impl SelectionState {
    /// Next state on tap: unselected -> selected -> favourite -> unselected.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Unselected => Self::Selected,
            Self::Selected => Self::Favourite,
            Self::Favourite => Self::Unselected,
        }
    }

    #[must_use]
    pub fn is_selected(self) -> bool {
        self != Self::Unselected
    }
}

/// Computed value of a configuration as reported by the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<ConfigValue>),
}

/// Display form of a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderedValue {
    Scalar(String),
    /// Long text: `shown` is the visible prefix, `full` the hover text.
    Truncated { shown: String, full: String },
    OptionList(Vec<String>),
}

impl ConfigValue {
    fn to_plain_string(&self) -> String {
        match self {
            Self::Null => "None".to_owned(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_fixed(*value, NUMBER_DECIMALS),
            Self::Text(text) => text.clone(),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(Self::to_plain_string).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

/// Projects a computed value into its display form.
#[must_use]
pub fn render_config_value(value: &ConfigValue) -> RenderedValue {
    let ConfigValue::Text(text) = value else {
        return RenderedValue::Scalar(value.to_plain_string());
    };

    let text = text.replacen('\n', "", 1);
    if text.chars().count() < CONFIG_PRINT_LEN {
        return RenderedValue::Scalar(text);
    }

    let mut shown: String = text.chars().take(CONFIG_PRINT_LEN).collect();
    shown.push('…');
    RenderedValue::Truncated { shown, full: text }
}

/// Alternative options of a configuration; only text options are listed.
#[must_use]
pub fn render_other_options(options: &[ConfigValue]) -> Option<RenderedValue> {
    let names: Vec<String> = options
        .iter()
        .filter_map(|option| match option {
            ConfigValue::Text(name) => Some(name.clone()),
            _ => None,
        })
        .collect();
    (!names.is_empty()).then_some(RenderedValue::OptionList(names))
}

/// One configuration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigEntry {
    /// Dotted path, e.g. `optimizer.learning_rate`.
    pub key: String,
    pub name: String,
    pub computed: ConfigValue,
    /// Name of the picked option, when the value came from an option.
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub other_options: Vec<ConfigValue>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_meta: bool,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub is_only_option: bool,
    #[serde(default)]
    pub is_hyperparam: bool,
    #[serde(default)]
    pub is_explicitly_specified: bool,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub selection: SelectionState,
}

/// Style flags of a rendered configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigClass {
    Ignored,
    Custom,
    OnlyOption,
    Picked,
    Hyperparam,
    Specified,
    NotHyperparam,
    Favourite,
    Selected,
}

/// Everything a view needs to draw one configuration entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigItemView {
    pub key: String,
    pub display_key: String,
    pub computed: RenderedValue,
    pub option: Option<String>,
    pub other_options: Option<RenderedValue>,
    pub classes: SmallVec<[ConfigClass; 4]>,
}

/// Input to [`ConfigSet::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Tap(String),
    ClearAll,
}

/// Configurations of one run, ordered by key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigSet {
    entries: IndexMap<String, ConfigEntry>,
}

impl ConfigSet {
    #[must_use]
    pub fn new(mut entries: Vec<ConfigEntry>) -> Self {
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.key.clone(), entry))
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigEntry> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys of selected entries, in key order.
    #[must_use]
    pub fn selected_keys(&self) -> Vec<&str> {
        self.iter()
            .filter(|entry| entry.selection.is_selected())
            .map(|entry| entry.key.as_str())
            .collect()
    }

    /// Applies a selection event, returning the next state.
    pub fn reduce(mut self, event: SelectionEvent) -> ChartResult<Self> {
        match event {
            SelectionEvent::Tap(key) => {
                let entry = self.entries.get_mut(&key).ok_or_else(|| {
                    ChartError::InvalidData(format!("unknown config key `{key}`"))
                })?;
                entry.selection = entry.selection.toggle();
                trace!(key = %key, selection = ?entry.selection, "config selection toggled");
            }
            SelectionEvent::ClearAll => {
                for entry in self.entries.values_mut() {
                    entry.selection = SelectionState::Unselected;
                }
            }
        }
        Ok(self)
    }

    /// Entries to list.
    ///
    /// The full view lists everything. The summary view lists the selected
    /// entries, or when nothing is selected the hyperparameters and
    /// explicitly specified entries that are not ignored.
    #[must_use]
    pub fn visible(&self, is_summary: bool) -> Vec<&ConfigEntry> {
        if !is_summary {
            return self.iter().collect();
        }

        let selected: Vec<&ConfigEntry> = self
            .iter()
            .filter(|entry| entry.selection.is_selected())
            .collect();
        if !selected.is_empty() {
            return selected;
        }

        self.iter()
            .filter(|entry| {
                entry.order >= 0 && (entry.is_explicitly_specified || entry.is_hyperparam)
            })
            .collect()
    }

    /// Display projection of the visible entries; meta entries are skipped.
    #[must_use]
    pub fn item_views(&self, is_summary: bool) -> Vec<ConfigItemView> {
        self.visible(is_summary)
            .into_iter()
            .filter_map(|entry| self.item_view(entry, is_summary))
            .collect()
    }

    fn is_parent_default(&self, key: &str) -> bool {
        key.match_indices('.').any(|(idx, _)| {
            self.entries
                .get(&key[..idx])
                .is_some_and(|parent| parent.is_default)
        })
    }

    /// Display projection of one entry, `None` for meta entries.
    #[must_use]
    pub fn item_view(&self, entry: &ConfigEntry, is_summary: bool) -> Option<ConfigItemView> {
        if entry.is_meta {
            return None;
        }

        let depth = entry.key.matches('.').count();
        let display_key = if is_summary {
            entry.key.clone()
        } else {
            format!("{}{}", NESTING_PREFIX.repeat(depth), entry.name)
        };
        let parent_default = self.is_parent_default(&entry.key);

        let mut classes = SmallVec::new();
        if entry.order < 0 {
            classes.push(ConfigClass::Ignored);
        }

        let option = if entry.is_custom {
            classes.push(if parent_default {
                ConfigClass::OnlyOption
            } else {
                ConfigClass::Custom
            });
            None
        } else {
            classes.push(if parent_default || entry.is_only_option {
                ConfigClass::OnlyOption
            } else {
                ConfigClass::Picked
            });
            entry.value.clone()
        };

        classes.push(if entry.is_hyperparam {
            ConfigClass::Hyperparam
        } else if entry.is_explicitly_specified {
            ConfigClass::Specified
        } else {
            ConfigClass::NotHyperparam
        });

        if !is_summary {
            match entry.selection {
                SelectionState::Favourite => classes.push(ConfigClass::Favourite),
                SelectionState::Selected => classes.push(ConfigClass::Selected),
                SelectionState::Unselected => {}
            }
        }

        Some(ConfigItemView {
            key: entry.key.clone(),
            display_key,
            computed: render_config_value(&entry.computed),
            option,
            other_options: if is_summary {
                None
            } else {
                render_other_options(&entry.other_options)
            },
            classes,
        })
    }
}
