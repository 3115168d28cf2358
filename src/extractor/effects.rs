use super::required;
use crate::error::LayoutError;
use crate::layout::{DocumentPath, FieldMap};
use crate::rule::{Operand, RuleFunction};
use tracing::warn;

/// Builds the `fulfilled` effects declared by the maps of one pick-list value.
///
/// Per map, a declared `visible` flag becomes a `show`/`hide` of the map's
/// target, then every dependent value becomes an `allow` on its field.
pub(super) fn dependent_effects(
    maps: &[FieldMap],
    value_path: &DocumentPath,
) -> Result<Vec<RuleFunction>, LayoutError> {
    let mut effects = Vec::new();

    for (mi, map) in maps.iter().enumerate() {
        let map_path = value_path.key("maps").index(mi);

        if let Some(visible) = map.visible {
            match visibility_target(map) {
                Some(target) => {
                    let func = if visible { "show" } else { "hide" };
                    effects.push(RuleFunction::new(func, vec![target.into()]));
                }
                None => warn!(
                    path = %map_path,
                    "map declares visibility without an api_name or id; ignoring"
                ),
            }
        }

        let dependents_path = map_path.key("pick_list_values");
        for (di, dependent) in map.pick_list_values.iter().flatten().enumerate() {
            let dependent_path = dependents_path.index(di);
            let api_name = required(
                dependent.api_name.as_ref().or(map.api_name.as_ref()),
                &dependent_path,
                "api_name",
            )?;
            let actual_value =
                required(dependent.actual_value.as_ref(), &dependent_path, "actual_value")?;
            effects.push(RuleFunction::allow(api_name, actual_value));
        }
    }

    Ok(effects)
}

fn visibility_target(map: &FieldMap) -> Option<Operand> {
    map.api_name
        .as_ref()
        .map(Operand::field)
        .or_else(|| map.id.as_ref().map(Operand::section))
}
