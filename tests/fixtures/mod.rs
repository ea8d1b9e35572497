//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use surface_elo::ingest::{CsvRecordSource, RawMatchRow, StaticRecordSource};
use surface_elo::MatchRecord;

/// A few 2023 Grand Slam finals in the ATP file layout, deliberately out of order
pub const ATP_2023_CSV: &str = "\
tourney_id,tourney_name,surface,draw_size,tourney_level,tourney_date,match_num,winner_id,winner_name,loser_id,loser_name,score
2023-540,Wimbledon,Grass,128,G,20230703,701,207989,Carlos Alcaraz,104925,Novak Djokovic,1-6 7-6(6) 6-1 3-6 6-4
2023-580,Australian Open,Hard,128,G,20230116,701,104925,Novak Djokovic,106401,Stefanos Tsitsipas,6-3 7-6(4) 7-6(5)
2023-520,Roland Garros,Clay,128,G,20230529,701,104925,Novak Djokovic,134770,Casper Ruud,7-6(1) 6-3 7-5
2023-560,US Open,Hard,128,G,20230828,701,104925,Novak Djokovic,106421,Daniil Medvedev,6-3 7-6(5) 6-3
2023-999,Unknown,,32,A,20230901,1,1,Jannik Sinner,2,,W/O
";

/// Live results appended after the historical file; repeats the US Open final
pub const ATP_LIVE_CSV: &str = "\
tourney_id,tourney_name,surface,tourney_date,winner_name,loser_name
2023-560,US Open,HARD,20230828,Novak Djokovic,Daniil Medvedev
2024-580,Australian Open,Hard,20240115,Jannik Sinner,Daniil Medvedev
";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn record(on: NaiveDate, partition: &str, winner: &str, loser: &str) -> MatchRecord {
    MatchRecord::new(on, partition, winner, loser).unwrap()
}

pub fn historical_source() -> CsvRecordSource {
    CsvRecordSource::from_bytes("atp_matches_2023", ATP_2023_CSV)
}

pub fn live_source() -> CsvRecordSource {
    CsvRecordSource::from_bytes("atp_matches_live", ATP_LIVE_CSV)
}

/// A season of results spread over three surfaces
pub fn season(records: usize) -> Vec<MatchRecord> {
    let players = [
        "Carlos Alcaraz",
        "Novak Djokovic",
        "Jannik Sinner",
        "Daniil Medvedev",
        "Alexander Zverev",
        "Holger Rune",
    ];
    let surfaces = ["hard", "clay", "grass"];
    let start = date(2023, 1, 1);

    (0..records)
        .map(|i| {
            let winner = i % players.len();
            // Offset 1..=5 so every pairing comes up and nobody plays themselves
            let loser = (winner + 1 + (i / players.len()) % (players.len() - 1)) % players.len();
            record(
                start + chrono::Duration::days((i / 3) as i64),
                surfaces[(i / 5) % surfaces.len()],
                players[winner],
                players[loser],
            )
        })
        .collect()
}

pub fn static_source(name: &str, rows: &[(&str, &str, &str, &str)]) -> StaticRecordSource {
    StaticRecordSource::new(
        name,
        rows.iter()
            .map(|(d, s, w, l)| RawMatchRow::new(d, s, w, l))
            .collect(),
    )
}
