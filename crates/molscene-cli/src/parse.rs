use crate::error::{CliError, Result};
use molscene::scene::config::ChainAliases;
use molscene::scene::selection::{ChainTarget, DistanceTarget, SelectionPredicate};

/// Parses a selection expression into a typed predicate.
///
/// Supported forms: `all`, `backbone`, `residue:<n>`, `chain:<letter|name>`,
/// `within:<radius>:residue:<n>`, `within:<radius>:chain:<letter|name>`.
/// Chain names go through the alias table.
pub fn parse_selection(expr: &str, aliases: &ChainAliases) -> Result<SelectionPredicate> {
    let trimmed = expr.trim();
    if trimmed.eq_ignore_ascii_case("all") {
        return Ok(SelectionPredicate::All);
    }
    if trimmed.eq_ignore_ascii_case("backbone") {
        return Ok(SelectionPredicate::Chain(ChainTarget::Backbone));
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    match parts.as_slice() {
        ["residue", number] => Ok(SelectionPredicate::Residue(parse_residue(number)?)),
        ["chain", value] => {
            if value.eq_ignore_ascii_case("backbone") {
                Ok(SelectionPredicate::Chain(ChainTarget::Backbone))
            } else {
                Ok(SelectionPredicate::Chain(ChainTarget::Id(resolve_chain(
                    value, aliases,
                )?)))
            }
        }
        ["within", radius, "residue", number] => Ok(SelectionPredicate::WithinDistance {
            radius: parse_radius(radius)?,
            target: DistanceTarget::Residue(parse_residue(number)?),
        }),
        ["within", radius, "chain", value] => Ok(SelectionPredicate::WithinDistance {
            radius: parse_radius(radius)?,
            target: DistanceTarget::Chain(resolve_chain(value, aliases)?),
        }),
        _ => Err(CliError::Argument(format!(
            "unrecognized selection expression '{}'",
            expr
        ))),
    }
}

fn parse_residue(value: &str) -> Result<isize> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Argument(format!("invalid residue number '{}'", value)))
}

fn parse_radius(value: &str) -> Result<f64> {
    let radius: f64 = value
        .trim()
        .parse()
        .map_err(|_| CliError::Argument(format!("invalid radius '{}'", value)))?;
    if !radius.is_finite() || radius < 0.0 {
        return Err(CliError::Argument(format!(
            "radius must be non-negative (got '{}')",
            value
        )));
    }
    Ok(radius)
}

fn resolve_chain(value: &str, aliases: &ChainAliases) -> Result<char> {
    aliases
        .resolve(value)
        .ok_or_else(|| CliError::Argument(format!("unknown chain or alias '{}'", value)))
}
