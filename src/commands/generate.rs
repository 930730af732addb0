//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::Folio;

/// Generate the static site into the public directory
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();

    tracing::info!(
        "Loaded {} posts and {} projects",
        folio.content.blog.len(),
        folio.content.projects.len()
    );

    let generator = Generator::new(folio)?;
    let pages = generator.generate()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} pages to {:?} in {:.2}s",
        pages,
        folio.public_dir,
        duration.as_secs_f64()
    );

    Ok(())
}
