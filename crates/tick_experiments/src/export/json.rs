use tick_blackjack::TableReport;

pub(crate) fn export_to_json_impl(
    reports: &[TableReport],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(file, reports)?;
    Ok(())
}
