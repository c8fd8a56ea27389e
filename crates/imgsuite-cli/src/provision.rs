use imgsuite::provision::{known_datasets, Dataset, Provisioner};

use crate::{commands::provision::*, Error, Result};

pub fn handle_provision(args: ProvisionArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle provision subcommand").entered();

    let config = args.config.build();
    let datasets = select_datasets(known_datasets(config.version()), &args.datasets)?;

    let report = Provisioner::new(&config).provision(&datasets);
    for (name, outcome) in &report {
        println!("{name}: {outcome}");
    }

    let missing = report.iter().filter(|(_, o)| !o.is_available()).count();
    if missing > 0 {
        tracing::info!(missing, "Tests requiring missing datasets will be skipped");
    }
    Ok(())
}

/// Picks the named datasets out of `known`, in the order requested. No names selects all.
pub(crate) fn select_datasets(known: Vec<Dataset>, names: &[String]) -> Result<Vec<Dataset>> {
    if names.is_empty() {
        return Ok(known);
    }

    names
        .iter()
        .map(|name| {
            known
                .iter()
                .find(|d| d.name == *name)
                .cloned()
                .ok_or_else(|| Error::UnknownDataset(name.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known() -> Vec<Dataset> {
        known_datasets(imgsuite::config::Version::new(3, 1))
    }

    #[test]
    fn select_all_by_default() {
        assert_eq!(select_datasets(known(), &[]).unwrap(), known());
    }

    #[test]
    fn select_in_requested_order() {
        let names = ["libtiffpic".to_owned(), "fits-images".to_owned()];
        let selected = select_datasets(known(), &names).unwrap();
        let selected: Vec<_> = selected.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(selected, ["libtiffpic", "fits-images"]);
    }

    #[test]
    fn unknown_dataset() {
        let names = ["nope".to_owned()];
        let err = select_datasets(known(), &names).unwrap_err();
        assert!(matches!(err, Error::UnknownDataset(name) if name == "nope"));
    }
}
