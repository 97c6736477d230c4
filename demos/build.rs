fn main() -> anyhow::Result<()> {
    buildergen_build::generate_builders()
        .scan_path("src")
        .run()?
        .ensure_clean()?;
    Ok(())
}
