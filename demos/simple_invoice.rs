use invoice_gen::resolver::CandidatePaths;
use invoice_gen::themes::Theme;
use invoice_gen::{render_invoice, samples, OutputDir, RenderError};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn run() -> Result<(), RenderError> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let fonts = CandidatePaths::new()
        .beside(manifest_dir.join("demos"), "arial.ttf", "arialbd.ttf")
        .with_system_fallbacks();
    let output = OutputDir::create(manifest_dir.join("test_invoices"))?;

    for (record, filename) in [
        (samples::simple_sample(), "simple_invoice_01.pdf"),
        (samples::simple_stress(), "simple_invoice_stress_test.pdf"),
    ] {
        let path = render_invoice(Theme::Simple, &record, &fonts, &output, filename)?;
        println!("[OK] Simple invoice generated: {}", path.display());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
