use crate::cli::InfoArgs;
use crate::error::Result;
use molscene::core::bonding;
use molscene::core::io::pdb;
use molscene::core::models::topology::BondOrder;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    info!("reading structure from {}", args.input.display());
    let (mut model, report) = pdb::read_from_path(&args.input)?;
    let bonds = bonding::infer(&model, args.explicit_bonds);
    model.set_bonds(bonds);

    let mut singles = 0usize;
    let mut doubles = 0usize;
    let mut triples = 0usize;
    for (_, bond) in model.bonds_iter() {
        match bond.order {
            BondOrder::Single => singles += 1,
            BondOrder::Double => doubles += 1,
            BondOrder::Triple => triples += 1,
        }
    }

    println!("structure : {}", args.input.display());
    println!("atoms     : {}", model.atom_count());
    println!(
        "bonds     : {} ({} single, {} double, {} triple)",
        model.bond_count(),
        singles,
        doubles,
        triples
    );
    println!(
        "chains    : {}",
        model
            .chain_ids()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("residues  : {}", model.residue_numbers().len());
    if let (Some(first), Some(last)) = (
        model.residue_numbers().iter().next(),
        model.residue_numbers().iter().next_back(),
    ) {
        println!("res range : {}..{}", first, last);
    }
    println!(
        "connects  : {} explicit pair(s) in file",
        model.explicit_pairs().len()
    );
    if !report.skipped.is_empty() {
        println!("skipped   : {} malformed record(s)", report.skipped.len());
        for record in &report.skipped {
            println!("  line {}: {}", record.line, record.reason);
        }
    }
    Ok(())
}
