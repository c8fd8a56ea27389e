use crate::{commands::configure::*, manifest, Result};

pub fn handle_configure(args: ConfigureArgs) -> Result<()> {
    let _guard = tracing::trace_span!("Handle configure subcommand").entered();

    let config = args.config.build();
    let mut manifest = manifest::open(args.manifest.as_deref())?;
    let report = imgsuite::configure(&config, &mut manifest);
    for (name, outcome) in &report.datasets {
        tracing::debug!(dataset = %name, %outcome);
    }
    manifest::finish(manifest)
}
