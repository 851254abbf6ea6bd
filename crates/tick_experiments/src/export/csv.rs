use tick_blackjack::TableReport;

pub(crate) fn export_to_csv_impl(
    reports: &[TableReport],
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record([
        "seed",
        "rounds_played",
        "ticks",
        "events_dispatched",
        "cards_dealt",
        "splits",
        "hits",
        "dealer_busts",
        "dealer_blackjacks",
        "shoes_used",
        "player_id",
        "player_name",
        "hands",
        "blackjacks",
        "wins",
        "pushes",
        "losses",
        "busts",
        "net_units",
    ])?;

    for report in reports {
        let seed = report.seed.map(|s| s.to_string()).unwrap_or_default();
        for player in &report.players {
            wtr.write_record([
                &seed,
                &report.rounds_played.to_string(),
                &report.ticks.to_string(),
                &report.events_dispatched.to_string(),
                &report.cards_dealt.to_string(),
                &report.splits.to_string(),
                &report.hits.to_string(),
                &report.dealer_busts.to_string(),
                &report.dealer_blackjacks.to_string(),
                &report.shoes_used.to_string(),
                &player.id.to_string(),
                &player.name,
                &player.hands.to_string(),
                &player.blackjacks.to_string(),
                &player.wins.to_string(),
                &player.pushes.to_string(),
                &player.losses.to_string(),
                &player.busts.to_string(),
                &player.net_units.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
