use imgsuite::registrar::{known_batches, Registrar};

use crate::{commands::register::*, manifest, Result};

pub fn handle_register(args: RegisterArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle register subcommand").entered();

    let config = args.config.build();
    let mut manifest = manifest::open(args.manifest.as_deref())?;
    let outcomes = Registrar::new(&config).register_all(&known_batches(), &mut manifest);

    let registered: usize = outcomes.iter().map(|o| o.registered().len()).sum();
    tracing::info!(registered, batches = outcomes.len(), "Registered tests");
    manifest::finish(manifest)
}
