use crate::cli::RenderArgs;
use crate::error::{CliError, Result};
use crate::parse::parse_selection;
use molscene::core::models::model::StructuralModel;
use molscene::scene::compositor::{Entity, InstanceColor, RenderInstance};
use molscene::scene::config::ChainAliases;
use molscene::scene::representation::{ColoringRule, RepresentationPatch, Style};
use molscene::session::{LoadOptions, Session};
use serde_json::json;
use tracing::info;

pub fn run(args: RenderArgs) -> Result<()> {
    let aliases = match &args.aliases {
        Some(path) => ChainAliases::from_path(path)?,
        None => ChainAliases::default(),
    };

    let text = std::fs::read_to_string(&args.input)?;
    let mut session = Session::new();
    session.load_structure_with(
        &text,
        LoadOptions {
            use_explicit_bonds: args.explicit_bonds,
        },
    )?;

    let patch = build_patch(&args, &aliases)?;
    if patch != RepresentationPatch::default() {
        let base = session
            .representations()
            .next()
            .map(|r| r.id)
            .ok_or_else(|| CliError::Argument("no representation to configure".to_string()))?;
        session.update_representation(base, patch)?;
    }

    let instances = session.compute_instances().to_vec();
    let visible = instances.iter().filter(|i| i.visible).count();
    info!(total = instances.len(), visible, "composited scene");

    let model = session.model().ok_or(molscene::session::SessionError::NoModelLoaded)?;
    if args.json {
        for instance in &instances {
            println!("{}", instance_row(model, instance));
        }
    } else {
        print_table(model, &instances);
    }
    Ok(())
}

fn build_patch(args: &RenderArgs, aliases: &ChainAliases) -> Result<RepresentationPatch> {
    let style = args
        .style
        .as_deref()
        .map(|s| {
            s.parse::<Style>()
                .map_err(|e| CliError::Argument(format!("{} ('{}')", e, s)))
        })
        .transpose()?;
    let coloring = args
        .color
        .as_deref()
        .map(|c| {
            c.parse::<ColoringRule>()
                .map_err(|e| CliError::Argument(format!("{} ('{}')", e, c)))
        })
        .transpose()?;
    let predicate = args
        .select
        .as_deref()
        .map(|expr| parse_selection(expr, aliases))
        .transpose()?;
    Ok(RepresentationPatch {
        style,
        coloring,
        predicate,
    })
}

fn entity_fields(model: &StructuralModel, entity: Entity) -> (&'static str, Vec<usize>) {
    match entity {
        Entity::Atom(atom_id) => (
            "atom",
            model.atom(atom_id).map(|a| vec![a.serial]).unwrap_or_default(),
        ),
        Entity::Bond(bond_id) => (
            "bond",
            model
                .bond(bond_id)
                .and_then(|b| {
                    let a1 = model.atom(b.atom1)?;
                    let a2 = model.atom(b.atom2)?;
                    Some(vec![a1.serial, a2.serial])
                })
                .unwrap_or_default(),
        ),
    }
}

fn color_value(color: InstanceColor) -> serde_json::Value {
    match color {
        InstanceColor::Uniform(c) => json!([c.r, c.g, c.b]),
        InstanceColor::PerEndpoint(c1, c2) => {
            json!([[c1.r, c1.g, c1.b], [c2.r, c2.g, c2.b]])
        }
    }
}

fn instance_row(model: &StructuralModel, instance: &RenderInstance) -> serde_json::Value {
    let (kind, serials) = entity_fields(model, instance.entity);
    json!({
        "entity": kind,
        "serials": serials,
        "style": instance.style.to_string(),
        "visible": instance.visible,
        "color": color_value(instance.color),
        "position": [
            instance.transform.position.x,
            instance.transform.position.y,
            instance.transform.position.z,
        ],
        "scale": [
            instance.transform.scale.x,
            instance.transform.scale.y,
            instance.transform.scale.z,
        ],
    })
}

fn entity_label(model: &StructuralModel, entity: Entity) -> String {
    match entity {
        Entity::Atom(atom_id) => model
            .atom(atom_id)
            .map(|a| a.label())
            .unwrap_or_default(),
        Entity::Bond(bond_id) => model
            .bond(bond_id)
            .and_then(|b| {
                let a1 = model.atom(b.atom1)?;
                let a2 = model.atom(b.atom2)?;
                Some(format!("{}--{}", a1.label(), a2.label()))
            })
            .unwrap_or_default(),
    }
}

fn print_table(model: &StructuralModel, instances: &[RenderInstance]) {
    println!(
        "{:<6} {:<12} {:<28} {:<15} {:<8} color",
        "kind", "serials", "label", "style", "visible"
    );
    for instance in instances {
        let (kind, serials) = entity_fields(model, instance.entity);
        let serials = serials
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join("-");
        let color = match instance.color {
            InstanceColor::Uniform(c) => format!("({},{},{})", c.r, c.g, c.b),
            InstanceColor::PerEndpoint(c1, c2) => format!(
                "({},{},{})/({},{},{})",
                c1.r, c1.g, c1.b, c2.r, c2.g, c2.b
            ),
        };
        println!(
            "{:<6} {:<12} {:<28} {:<15} {:<8} {}",
            kind,
            serials,
            entity_label(model, instance.entity),
            instance.style.to_string(),
            instance.visible,
            color
        );
    }
}
