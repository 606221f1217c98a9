//! Reports over a parsed ledger.

use picks_ledger::adapter::outbound::ledger::CsvLedger;
use picks_ledger::application::analytics::{
    accuracy, lie_index, rank_patterns, recommendations, top_split, Band, PatternQuery, Tally,
    TOP_PICKS,
};
use picks_ledger::domain::{Confidence, Market, Pick};
use picks_ledger::testkit::domain::day;

const HEADER: &str =
    "date,league,match,kickoff_utc,market,confidence,model_btts,model_o25,match_id,final_score,result";

/// One ledger line on 2025-03-08.
fn row(id: u32, kickoff: &str, btts: u8, o25: u8, score: &str, result: &str) -> String {
    let market = if btts >= o25 { "BTTS" } else { "O2.5" };
    let promise = btts.max(o25);
    let confidence = match promise {
        70.. => "STRONG",
        60..=69 => "MEDIUM",
        _ => "PASS",
    };
    let league = if id % 2 == 0 {
        "Switzerland Super League"
    } else {
        "Austria Bundesliga"
    };
    format!(
        "2025-03-08,{league},\"Home {id}, FC vs Away {id}\",{kickoff},{market},{confidence},{btts},{o25},{id},{score},{result}"
    )
}

fn ledger(rows: &[String]) -> Vec<Pick> {
    let content = format!("{HEADER}\n{}\n", rows.join("\n"));
    CsvLedger::parse(content.as_bytes()).unwrap()
}

#[test]
fn accuracy_three_wins_two_losses() {
    let picks = ledger(&[
        row(1, "12:00", 72, 50, "1-1", "W"),
        row(2, "12:00", 72, 50, "2-1", "W"),
        row(3, "12:00", 40, 65, "3-0", "W"),
        row(4, "12:00", 72, 50, "1-0", "L"),
        row(5, "12:00", 40, 65, "1-0", "L"),
        row(6, "12:00", 72, 50, "", "pending"),
    ]);
    let report = accuracy(&picks, None).unwrap();
    assert_eq!(report.overall, Tally { wins: 3, total: 5 });
    assert_eq!(report.overall.win_rate(), Some(60.0));
    let markets: Vec<_> = report.by_market.iter().map(|s| (s.key, s.value)).collect();
    assert_eq!(
        markets,
        vec![
            (Market::Btts, Tally { wins: 2, total: 3 }),
            (Market::Over25, Tally { wins: 1, total: 2 }),
        ]
    );
}

#[test]
fn lie_index_examples() {
    let picks = ledger(&[
        row(1, "12:00", 80, 40, "1-1", "W"),
        row(2, "12:00", 30, 90, "1-0", "L"),
    ]);
    let report = lie_index(&picks, Some(day("2025-03-08"))).unwrap();
    assert_eq!(report.overall.sum, 20 + 90);
    assert_eq!(report.overall.mean(), Some(55.0));
}

#[test]
fn all_time_patterns_need_ten_samples() {
    let mut rows: Vec<String> = (0..3)
        .map(|i| row(100 + i, "12:00", 82, 40, "1-1", "W"))
        .collect();
    rows.extend((0..10).map(|i| {
        let (score, result) = if i < 6 { ("1-1", "W") } else { ("0-1", "L") };
        row(200 + i, "12:00", 72, 40, score, result)
    }));
    let picks = ledger(&rows);

    let query = PatternQuery {
        date: None,
        min_samples: 10,
        top: 5,
    };
    let ranked = rank_patterns(&picks, &query);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].band, Band::From70);
    assert_eq!(ranked[0].tally, Tally { wins: 6, total: 10 });

    let daily = rank_patterns(
        &picks,
        &PatternQuery {
            date: Some(day("2025-03-08")),
            min_samples: 1,
            top: 5,
        },
    );
    assert_eq!(daily[0].band, Band::From80);
}

#[test]
fn recommendations_and_top_split_from_ledger() {
    let picks = ledger(&[
        row(1, "20:00", 75, 50, "1-1", "W"),
        row(2, "14:00", 74, 50, "1-1", "W"),
        row(3, "12:00", 61, 50, "1-1", "W"),
        row(4, "12:00", 73, 50, "1-0", "L"),
        row(5, "13:00", 72, 50, "1-1", "W"),
        row(6, "18:00", 40, 50, "1-0", "L"),
        row(7, "18:30", 71, 50, "1-1", "W"),
    ]);

    let recs = recommendations(&picks, day("2025-03-08"));
    assert_eq!(recs.len(), 6);
    assert!(recs[..5].iter().all(|p| p.confidence() == Confidence::Strong));
    assert_eq!(recs[0].match_id().as_str(), "4");
    assert_eq!(recs[5].match_id().as_str(), "3");

    let split = top_split(&picks, day("2025-03-08")).unwrap();
    assert_eq!(split.top.total, TOP_PICKS);
    assert_eq!(split.top, Tally { wins: 4, total: 5 });
    assert_eq!(split.rest, Tally { wins: 1, total: 2 });
    assert_eq!(split.overall, Tally { wins: 5, total: 7 });
}

#[test]
fn empty_ledger_reports_no_data() {
    let picks = ledger(&[row(1, "12:00", 72, 50, "", "pending")]);
    assert!(accuracy(&picks, None).is_none());
    assert!(lie_index(&picks, None).is_none());
    assert!(top_split(&picks, day("2025-03-08")).is_none());
    let query = PatternQuery {
        date: None,
        min_samples: 1,
        top: 5,
    };
    assert!(rank_patterns(&picks, &query).is_empty());
}
