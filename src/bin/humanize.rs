use anyhow::{Context, Result};
use humanizer_lib::init_logging;
use humanizer_lib::models::{Achievement, ActivityEvent, Backend, HumanizeResponse};
use humanizer_lib::services::achievements::{AchievementTracker, FileAchievements};
use humanizer_lib::services::config_store::ConfigStore;
use humanizer_lib::services::humanizer::{humanize_with_rng, HumanizeLevel, Humanizer};
use humanizer_lib::services::text_processor::{calculate_similarity, get_text_statistics, normalize_punctuation};
use humanizer_lib::services::text_store::{JsonTextStore, TextStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::io::Read;
use std::time::Instant;

const USAGE: &str = "Usage:\n  humanize <path|-> [--level <1-5>] [--remote] [--seed <n>] [--stats] [--save] [--out <json_path>]\n  humanize --search <query>\n  humanize --achievements\n\nNotes:\n  - `-` reads the text from stdin.\n  - Levels outside 1-5 are clamped; without --level the configured default is used.\n  - `--remote` needs GEMINI_API_KEY (or a key in config.json) and falls back to local rules on failure.\n  - `--seed` makes the local rewrite reproducible and implies local processing.\n  - Saved texts and achievement progress live under HUMANIZER_DATA_DIR (default: the user data directory).";

const NO_DATA_DIR: &str = "no user data directory on this platform; set HUMANIZER_DATA_DIR";
const PREVIEW_CHARS: usize = 60;

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin failed")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("read file failed: {}", path))
}

fn open_texts() -> Result<JsonTextStore> {
    JsonTextStore::open_default()
        .context(NO_DATA_DIR)?
        .context("open saved texts failed")
}

fn open_tracker() -> Result<FileAchievements> {
    FileAchievements::open_default().context(NO_DATA_DIR)
}

fn report_unlocked(unlocked: &[Achievement]) {
    for a in unlocked {
        eprintln!("Achievement unlocked: {} (+{}) - {}", a.name, a.points, a.description);
    }
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}

fn run_search(args: &[String]) -> Result<()> {
    let query = parse_arg_value(args, "--search").context("--search expects a query")?;
    let texts = open_texts()?;
    let mut tracker = open_tracker()?;

    let hits = texts.search(&query);
    for saved in &hits {
        println!(
            "{}  {}  L{}  {}",
            saved.id,
            saved.created_at,
            saved.level,
            preview(&saved.humanized_text)
        );
    }
    eprintln!("{} of {} saved texts match {:?}", hits.len(), texts.len(), query);

    report_unlocked(&tracker.track_event(ActivityEvent::TextSearched));
    Ok(())
}

fn show_achievements() -> Result<()> {
    let tracker = open_tracker()?;
    let progress = tracker.tracker().rank_progress();
    let stats = tracker.tracker().stats();

    println!(
        "{} - {} points, {}/{} unlocked",
        progress.current_rank, stats.total_points, stats.unlocked, stats.total
    );
    if let Some(next) = &progress.next_rank {
        println!("{} more points to {} ({:.0}%)", progress.points_needed, next, progress.progress_percent);
    }
    for a in tracker.tracker().all() {
        let mark = if a.unlocked { "x" } else { " " };
        println!(
            "[{}] {:<22} {:>3} pts  {}/{}  {}",
            mark, a.name, a.points, a.progress, a.progress_max, a.description
        );
    }
    Ok(())
}

fn show_credits() -> Result<()> {
    println!("humanize {} - rewrites machine-sounding prose, one sentence at a time.", env!("CARGO_PKG_VERSION"));
    let mut tracker = open_tracker()?;
    report_unlocked(&tracker.track_event(ActivityEvent::EasterEggFound));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    init_logging();

    if has_flag(&args, "--search") {
        return run_search(&args);
    }
    if has_flag(&args, "--achievements") {
        return show_achievements();
    }
    if has_flag(&args, "--credits") {
        return show_credits();
    }

    let path = args[1].clone();
    let seed: Option<u64> = parse_arg_value(&args, "--seed").and_then(|s| s.parse().ok());
    let use_remote = has_flag(&args, "--remote") && seed.is_none();
    let show_stats = has_flag(&args, "--stats");
    let save = has_flag(&args, "--save");
    let out_path = parse_arg_value(&args, "--out");

    let store = ConfigStore::open_default();
    let config = match store.as_ref().map(ConfigStore::load) {
        Some(Ok(config)) => config,
        Some(Err(e)) => {
            eprintln!("Ignoring unreadable config: {}", e);
            Default::default()
        }
        None => Default::default(),
    };

    let level = match parse_arg_value(&args, "--level") {
        Some(raw) => {
            let n: i64 = raw
                .parse()
                .with_context(|| format!("--level expects an integer, got {:?}", raw))?;
            HumanizeLevel::clamped(n)
        }
        None => config.default_level,
    };

    // open before rewriting so a bad data file fails fast
    let mut texts = if save { Some(open_texts()?) } else { None };

    let original = normalize_punctuation(&read_input(&path)?);
    let mut tracker = open_tracker()?;
    let mut unlocked = Vec::new();
    if path != "-" {
        unlocked.extend(tracker.track_event(ActivityEvent::FileUploaded));
    }

    let start = Instant::now();
    let (humanized, backend) = match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            (humanize_with_rng(&original, level, &mut rng), Backend::Local)
        }
        None => {
            let humanizer = Humanizer::from_config(store.as_ref());
            if use_remote && !humanizer.has_remote() {
                eprintln!("No API key configured; using local rules.");
            }
            humanizer.humanize_reporting(&original, level, use_remote).await
        }
    };
    let elapsed_ms = start.elapsed().as_millis() as i64;

    if !original.trim().is_empty() {
        unlocked.extend(tracker.track_humanization(&original, level));
    }

    println!("{}", humanized);

    let statistics_before = get_text_statistics(&original);
    let statistics_after = get_text_statistics(&humanized);
    let similarity = calculate_similarity(&original, &humanized);

    if show_stats {
        eprintln!();
        eprintln!("Level: {}  Backend: {:?}  Time: {} ms", level, backend, elapsed_ms);
        eprintln!(
            "Before: words={} sentences={} avg_sentence={:.1} avg_word={:.2}",
            statistics_before.word_count,
            statistics_before.sentence_count,
            statistics_before.avg_sentence_length,
            statistics_before.avg_word_length
        );
        eprintln!(
            "After:  words={} sentences={} avg_sentence={:.1} avg_word={:.2}",
            statistics_after.word_count,
            statistics_after.sentence_count,
            statistics_after.avg_sentence_length,
            statistics_after.avg_word_length
        );
        eprintln!("Similarity: {:.1}%", similarity);
    }

    if let Some(texts) = texts.as_mut() {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), serde_json::json!(path.clone()));
        metadata.insert("backend".to_string(), serde_json::to_value(backend)?);
        let id = texts
            .save(&original, &humanized, level, metadata)
            .context("save text failed")?;
        unlocked.extend(tracker.track_event(ActivityEvent::TextSaved));
        eprintln!("Saved as {} in {}", id, texts.file().display());
    }

    report_unlocked(&unlocked);

    if let Some(out_path) = out_path {
        let out = HumanizeResponse {
            original,
            humanized,
            level,
            backend,
            statistics_before,
            statistics_after,
            similarity,
            elapsed_ms,
            unlocked_achievements: unlocked,
        };

        let json = serde_json::to_string_pretty(&out)?;
        std::fs::write(&out_path, json).with_context(|| format!("write out failed: {}", out_path))?;
        eprintln!("Wrote JSON: {}", out_path);
    }

    Ok(())
}
