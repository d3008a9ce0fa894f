//! Option selections snapshotted onto cart lines.

use crate::catalog::{MerchantItem, SelectionType};
use crate::error::MarketError;
use crate::ids::{ChoiceId, OptionGroupId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// An option choice captured by value at add-to-cart time.
///
/// Names and the price delta are copied so later catalog edits never
/// reprice lines already in a cart, or lines snapshotted into orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedOption {
    pub group_id: OptionGroupId,
    pub choice_id: ChoiceId,
    pub group_name: String,
    pub choice_name: String,
    pub price_delta: Money,
}

/// Resolve requested `(group, choice)` pairs against an item's option groups.
///
/// Selections are processed in request order, per group: a `Single` group
/// keeps only the most recent selection, and a `Multiple` group keeps at
/// most `max_select` selections, dropping the oldest when the cap is
/// exceeded. Unknown or unavailable choices are skipped. Fails when a
/// required group ends up with no selection.
pub fn resolve_selections(
    item: &MerchantItem,
    requested: &[(OptionGroupId, ChoiceId)],
) -> Result<Vec<SelectedOption>, MarketError> {
    let mut resolved = Vec::new();

    for group in &item.option_groups {
        let mut picked: Vec<&ChoiceId> = Vec::new();
        for (group_id, choice_id) in requested {
            if group_id != &group.id {
                continue;
            }
            let Some(choice) = group.choice(choice_id) else {
                continue;
            };
            if !choice.available || picked.contains(&&choice.id) {
                continue;
            }
            match group.selection_type {
                SelectionType::Single => {
                    picked.clear();
                    picked.push(&choice.id);
                }
                SelectionType::Multiple => {
                    picked.push(&choice.id);
                    if let Some(cap) = group.max_select {
                        if picked.len() > cap {
                            picked.remove(0);
                        }
                    }
                }
            }
        }

        if group.required && picked.is_empty() {
            return Err(MarketError::RequiredOptionMissing(group.name.clone()));
        }

        for choice_id in picked {
            let choice = group
                .choice(choice_id)
                .ok_or_else(|| MarketError::RequiredOptionMissing(group.name.clone()))?;
            resolved.push(SelectedOption {
                group_id: group.id.clone(),
                choice_id: choice.id.clone(),
                group_name: group.name.clone(),
                choice_name: choice.name.clone(),
                price_delta: choice.price_delta,
            });
        }
    }

    Ok(resolved)
}

/// Total price delta across a set of selections.
pub fn options_delta(options: &[SelectedOption]) -> Money {
    options.iter().map(|o| o.price_delta).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Choice, OptionGroup};
    use crate::ids::MerchantId;

    fn pizza() -> MerchantItem {
        MerchantItem::new(MerchantId::new("mer-1"), "Margherita", Money::from_cents(1299))
            .with_option_group(
                OptionGroup::single("Size")
                    .with_required()
                    .with_choice(Choice::default_choice("Regular", Money::ZERO))
                    .with_choice(Choice::new("Large", Money::from_cents(600))),
            )
            .with_option_group(
                OptionGroup::multiple("Extras")
                    .with_max_select(1)
                    .with_choice(Choice::new("Basil", Money::from_cents(150)))
                    .with_choice(Choice::new("Olives", Money::from_cents(175))),
            )
    }

    fn choice_id(item: &MerchantItem, group: usize, choice: usize) -> (OptionGroupId, ChoiceId) {
        let g = &item.option_groups[group];
        (g.id.clone(), g.choices[choice].id.clone())
    }

    #[test]
    fn test_resolves_names_and_deltas_by_value() {
        let item = pizza();
        let selections = [choice_id(&item, 0, 1), choice_id(&item, 1, 0)];
        let resolved = resolve_selections(&item, &selections).unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].group_name, "Size");
        assert_eq!(resolved[0].choice_name, "Large");
        assert_eq!(options_delta(&resolved).cents(), 750);
    }

    #[test]
    fn test_single_group_keeps_latest_selection() {
        let item = pizza();
        let selections = [choice_id(&item, 0, 0), choice_id(&item, 0, 1)];
        let resolved = resolve_selections(&item, &selections).unwrap();

        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].choice_name, "Large");
    }

    #[test]
    fn test_multiple_group_evicts_oldest_over_cap() {
        let item = pizza();
        // Extras is capped at 1: Olives pushes Basil out.
        let selections = [
            choice_id(&item, 0, 0),
            choice_id(&item, 1, 0),
            choice_id(&item, 1, 1),
        ];
        let resolved = resolve_selections(&item, &selections).unwrap();

        let extras: Vec<_> = resolved.iter().filter(|o| o.group_name == "Extras").collect();
        assert_eq!(extras.len(), 1);
        assert_eq!(extras[0].choice_name, "Olives");
    }

    #[test]
    fn test_missing_required_group_is_rejected() {
        let item = pizza();
        let selections = [choice_id(&item, 1, 0)];
        let err = resolve_selections(&item, &selections).unwrap_err();
        assert_eq!(err, MarketError::RequiredOptionMissing("Size".to_string()));
    }

    #[test]
    fn test_unknown_and_unavailable_choices_are_skipped() {
        let mut item = pizza();
        item.option_groups[1].choices[0].available = false;
        let selections = [
            choice_id(&item, 0, 0),
            choice_id(&item, 1, 0),
            (item.option_groups[1].id.clone(), ChoiceId::new("missing")),
        ];
        let resolved = resolve_selections(&item, &selections).unwrap();
        assert!(resolved.iter().all(|o| o.group_name != "Extras"));
    }

    #[test]
    fn test_item_without_groups_resolves_empty() {
        let plain = MerchantItem::new(MerchantId::new("mer-1"), "Soda", Money::from_cents(250));
        assert!(resolve_selections(&plain, &[]).unwrap().is_empty());
    }
}
