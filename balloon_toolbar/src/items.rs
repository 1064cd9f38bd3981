// Copyright 2025 the Balloon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toolbar item model and configuration normalization.
//!
//! The toolbar widget itself (button rendering, templates, locale) is an
//! external collaborator. This module carries only what the visibility logic
//! needs to know about the items: the command each one triggers and whether
//! it publishes an enablement flag, plus the normalizer that turns the
//! user-facing configuration list into a canonical item-spec sequence.

use alloc::string::String;
use alloc::vec::Vec;

/// Configuration token that stands for a visual separator between items.
pub const SEPARATOR_TOKEN: &str = "|";

/// A toolbar item as seen by the visibility logic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolbarItem {
    /// Identifier of the command this item triggers.
    pub command: String,
    /// The item's enablement flag, when it publishes one.
    ///
    /// `None` means the item has no such flag (separators, dropdown anchors,
    /// other non-toggleable widgets) and counts as enabled for the purposes
    /// of the all-disabled guard.
    pub enabled: Option<bool>,
}

impl ToolbarItem {
    /// An item without an enablement flag.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            enabled: None,
        }
    }

    /// An item with a definite enablement state.
    pub fn with_enabled(command: impl Into<String>, enabled: bool) -> Self {
        Self {
            command: command.into(),
            enabled: Some(enabled),
        }
    }
}

/// One entry of the canonical toolbar configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemSpec {
    /// A command item, to be resolved by the host's component factory.
    Command(String),
    /// A visual separator.
    Separator,
}

/// Normalize a user-supplied configuration list into item specs.
///
/// Command identifiers pass through in order; the [`SEPARATOR_TOKEN`] becomes
/// [`ItemSpec::Separator`]. Unrecognized command identifiers are not
/// validated here: resolving them is the component factory's job, and so are
/// its errors.
pub fn normalize_config<'a, I>(entries: I) -> Vec<ItemSpec>
where
    I: IntoIterator<Item = &'a str>,
{
    entries
        .into_iter()
        .map(|entry| {
            if entry == SEPARATOR_TOKEN {
                ItemSpec::Separator
            } else {
                ItemSpec::Command(String::from(entry))
            }
        })
        .collect()
}

/// Whether every item is in a definite disabled state.
///
/// An item only counts as disabled when it publishes an enablement flag and
/// that flag is `false`; unflagged items count as enabled. An empty list is
/// vacuously all-disabled, so a toolbar with nothing to offer never appears.
pub fn all_disabled(items: &[ToolbarItem]) -> bool {
    items.iter().all(|item| item.enabled == Some(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn normalize_maps_commands_and_separators_in_order() {
        let specs = normalize_config(["bold", "italic", "|", "link"]);
        assert_eq!(
            specs,
            vec![
                ItemSpec::Command(String::from("bold")),
                ItemSpec::Command(String::from("italic")),
                ItemSpec::Separator,
                ItemSpec::Command(String::from("link")),
            ]
        );
    }

    #[test]
    fn normalize_of_empty_config_is_empty() {
        assert!(normalize_config([]).is_empty());
    }

    #[test]
    fn all_flagged_false_is_disabled() {
        let items = vec![
            ToolbarItem::with_enabled("bold", false),
            ToolbarItem::with_enabled("italic", false),
        ];
        assert!(all_disabled(&items));
    }

    #[test]
    fn unflagged_item_counts_as_enabled() {
        let items = vec![
            ToolbarItem::with_enabled("bold", false),
            ToolbarItem::new("dropdown"),
        ];
        assert!(!all_disabled(&items));
    }

    #[test]
    fn any_enabled_flag_defeats_the_guard() {
        let items = vec![
            ToolbarItem::with_enabled("bold", false),
            ToolbarItem::with_enabled("italic", true),
        ];
        assert!(!all_disabled(&items));
    }

    #[test]
    fn empty_list_is_vacuously_disabled() {
        assert!(all_disabled(&[]));
    }
}
