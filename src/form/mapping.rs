use crate::layout::{FieldMap, PickListValue};
use crate::rule::{Operand, RuleArgument, RuleFunction};
use tracing::warn;

/// Converts rule effects into the same map form a pick-list value declares.
///
/// `show`/`hide` become visibility maps on their `field` or `section` target.
/// Consecutive `allow` effects on one field are grouped into a single map, so
/// the field ends up restricted to all of the allowed values.
pub(super) fn effect_maps(effects: &[RuleFunction]) -> Vec<FieldMap> {
    let mut maps: Vec<FieldMap> = Vec::new();

    for effect in effects {
        match effect.func.as_str() {
            "show" | "hide" => match visibility_map(effect, effect.func == "show") {
                Some(map) => maps.push(map),
                None => warn!(func = %effect.func, "effect has no target; ignoring"),
            },
            "allow" => {
                let field = operand_key(effect, 0, |o| &o.field);
                let value = operand_key(effect, 1, |o| &o.value);
                let (Some(field), Some(value)) = (field, value) else {
                    warn!("allow effect needs a field and a value; ignoring");
                    continue;
                };
                let dependent = PickListValue {
                    actual_value: Some(value.to_string()),
                    ..Default::default()
                };
                let grouped = maps
                    .last_mut()
                    .filter(|last| last.api_name.as_deref() == Some(field))
                    .and_then(|last| last.pick_list_values.as_mut());
                match grouped {
                    Some(values) => values.push(dependent),
                    None => maps.push(FieldMap {
                        api_name: Some(field.to_string()),
                        pick_list_values: Some(vec![dependent]),
                        ..Default::default()
                    }),
                }
            }
            other => warn!(func = %other, "unsupported rule effect; ignoring"),
        }
    }

    maps
}

fn visibility_map(effect: &RuleFunction, visible: bool) -> Option<FieldMap> {
    if let Some(field) = operand_key(effect, 0, |o| &o.field) {
        return Some(FieldMap {
            api_name: Some(field.to_string()),
            visible: Some(visible),
            ..Default::default()
        });
    }
    operand_key(effect, 0, |o| &o.section).map(|section| FieldMap {
        id: Some(section.to_string()),
        visible: Some(visible),
        ..Default::default()
    })
}

fn operand_key<'a>(
    effect: &'a RuleFunction,
    index: usize,
    key: impl Fn(&'a Operand) -> &'a Option<String>,
) -> Option<&'a str> {
    match effect.args.get(index)? {
        RuleArgument::Operand(operand) => key(operand).as_deref(),
        RuleArgument::Function(_) => None,
    }
}
