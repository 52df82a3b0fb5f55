use crate::app::{AppContext, Result};

/// Aggregate every source and write the gallery page once.
///
/// Returns the number of photos on the page.
pub async fn generate(ctx: &AppContext) -> Result<usize> {
    let gallery = ctx.aggregator.aggregate().await?;
    let output = &ctx.config.page.output;

    ctx.renderer.write_to_path(&gallery, output)?;

    println!(
        "Generated {} successfully with {} photos",
        output.display(),
        gallery.len()
    );
    Ok(gallery.len())
}
