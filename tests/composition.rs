// Composition tests — chaining modules the way the CLI does.
//
//   corpus -> TF-IDF -> terminal table
//   staff sheet -> report -> timestamped sink
//   colors -> mix -> contrast
//   lazy sequence -> chunks
//
// No network or filesystem access.

use std::io::Write;

use chrono::NaiveDate;
use homework::color::Color;
use homework::features::tfidf::TfidfVectorizer;
use homework::features::traits::Vectorizer;
use homework::lazy::{chunked, LazySeq};
use homework::output::{format_weight, terminal, truncate_chars};
use homework::pokemon::{BasePokemon, EmojiDisplay, PokeType, Pokemon};
use homework::salary::report::{department_report, read_employees, write_report_to};
use homework::stamp::TimestampWriter;

fn plain() {
    colored::control::set_override(false);
}

#[test]
fn tfidf_table_lists_every_term() {
    plain();
    let corpus = [
        "Crock Pot Pasta Never boil pasta again",
        "Pasta Pomodoro Fresh ingredients Parmesan to taste",
    ];
    let mut vectorizer = TfidfVectorizer::new();
    let matrix: Vec<Vec<String>> = vectorizer
        .fit_transform(&corpus)
        .into_iter()
        .map(|row| row.into_iter().map(format_weight).collect())
        .collect();

    let mut buf = Vec::new();
    terminal::display_matrix(&mut buf, "TF-IDF", vectorizer.feature_names(), &matrix).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.contains("2 documents x 12 terms"));
    assert!(text.contains("ingredients"));
    assert!(text.contains("0.286"));
    assert!(text.contains("0.143"));
}

#[test]
fn report_through_timestamp_writer() {
    let sheet = "ФИО полностью;Департамент;Отдел;Должность;Оценка;Оклад\n\
                 Иванов Иван;Разработка;Бэкенд;Инженер;4.5;100000\n";
    let employees = read_employees(sheet.as_bytes()).unwrap();
    let report = department_report(&employees);

    let clock = || {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap()
    };
    let mut stamped = TimestampWriter::with_clock(Vec::new(), clock);
    write_report_to(&mut stamped, &report).unwrap();
    stamped.flush().unwrap();

    let text = String::from_utf8(stamped.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.starts_with("[2024-01-02 03:04:05]: ")));
    assert!(lines[1].ends_with("Разработка;1;100000;100000;100000.0"));
}

#[test]
fn mixing_then_contrast() {
    let mix: Color = ["255,0,0", "0,255,0", "#0000ff"]
        .iter()
        .map(|s| s.parse::<Color>().unwrap())
        .sum();
    assert_eq!(mix, Color::rgb(255, 255, 255));

    // Full contrast is the identity
    assert_eq!(mix.contrast(1.0).unwrap(), mix);
    // Zero contrast collapses to (just under) mid-grey
    assert_eq!(mix.contrast(0.0).unwrap(), Color::rgb(127, 127, 127));
}

#[test]
fn mixing_saturates_and_dedups() {
    let orange = Color::new(255, 165, 0).unwrap();
    let sum = orange + orange;
    assert_eq!(sum, Color::rgb(255, 255, 0));

    let set: std::collections::HashSet<Color> = [orange, orange, sum].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn bad_color_strings() {
    assert!("1,2".parse::<Color>().is_err());
    assert!("1,2,300".parse::<Color>().is_err());
    assert!("#12345".parse::<Color>().is_err());
    assert!("#gg0000".parse::<Color>().is_err());
}

#[test]
fn lazy_chunks_evaluate_incrementally() {
    let seq = LazySeq::new(1..=7u32, |x: u32| x * 10);
    let mut chunks = chunked(seq.iter(), 3).unwrap();

    assert_eq!(chunks.next(), Some(vec![10, 20, 30]));
    assert_eq!(seq.evaluated(), 3);
    assert_eq!(chunks.next(), Some(vec![40, 50, 60]));
    assert_eq!(chunks.next(), Some(vec![70]));
    assert_eq!(chunks.next(), None);
    assert_eq!(seq.evaluated(), 7);
}

#[test]
fn pokemon_renderings() {
    let base = BasePokemon::new("Pikachu", PokeType::Electric);
    let fancy = Pokemon::new("Pikachu", PokeType::Electric);
    assert_eq!(base.to_string(), "Pikachu/electric");
    assert_eq!(fancy.emoji_label(), fancy.to_string());
    assert!("fire".parse::<PokeType>().is_err());
}

#[test]
fn truncation_respects_char_boundaries() {
    assert_eq!(truncate_chars("Разработка", 4), "Разр...");
    assert_eq!(truncate_chars("short", 10), "short");
}
