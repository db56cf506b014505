//! Roster Builder CLI
//!
//! Squad feed (JSON/CSV) → MessagePack+LZ4 roster cache
//! Roster cache inspection and scripted lineup replay

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "roster_builder")]
#[command(about = "Build lineup rosters from squad feeds and replay lineup scripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build roster cache from a JSON squad feed
    Json {
        /// Input feed JSON path
        #[arg(long)]
        r#in: PathBuf,

        /// Club name stamped on every player
        #[arg(long)]
        club: String,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        #[arg(long, default_value = roster_builder::ROSTER_SCHEMA_VERSION)]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Build roster cache from a CSV squad feed
    Csv {
        /// Input CSV path (id,name,position,nationality,market_value,rating,image_url)
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        club: String,

        #[arg(long)]
        out: PathBuf,

        #[arg(long, default_value = roster_builder::ROSTER_SCHEMA_VERSION)]
        schema_version: String,

        #[arg(long, default_value = "false")]
        verify: bool,

        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Print the players and position counts of a roster cache or JSON roster
    Inspect {
        #[arg(long)]
        roster: PathBuf,
    },

    /// Replay a JSON event script and print the final lineup
    Replay {
        /// JSON array of lineup events
        #[arg(long)]
        script: PathBuf,

        /// Roster cache or JSON roster (default: built-in squad)
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Lineup config YAML (default: LINEUP_PROFILE or defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Json { r#in, club, out, schema_version, verify, metadata } => {
            println!("🔨 Building roster cache from JSON feed...");
            println!("   Input:  {}", r#in.display());
            println!("   Output: {}", out.display());
            println!("   Club:   {}", club);

            let players = roster_builder::read_feed_json(&r#in, &club)?;
            let meta = roster_builder::build_roster_cache(&players, &club, &out, &schema_version)?;
            finish_build(&out, &meta, verify, metadata)?;
        }

        Commands::Csv { csv, club, out, schema_version, verify, metadata } => {
            println!("🔨 Building roster cache from CSV feed...");
            println!("   CSV Input: {}", csv.display());
            println!("   Output:    {}", out.display());
            println!("   Club:      {}", club);

            let (players, stats) = roster_builder::read_feed_csv(&csv, &club)?;
            println!("   Rows: {} total, {} parsed, {} failed", stats.total_rows, stats.parsed, stats.failed);
            let meta = roster_builder::build_roster_cache(&players, &club, &out, &schema_version)?;
            finish_build(&out, &meta, verify, metadata)?;
        }

        Commands::Inspect { roster } => {
            let players = roster_builder::load_roster(&roster)?.into_players();
            println!("📋 {} ({} players)", roster.display(), players.len());
            for player in &players {
                println!("   {:>4}  {:<4} {:>3}  {}", player.id, player.position, player.rating, player.name);
            }

            let mut summary: Vec<_> = roster_builder::position_summary(&players).into_iter().collect();
            summary.sort();
            println!("\n   By position:");
            for (position, count) in summary {
                println!("   {:<4} {}", position, count);
            }
        }

        Commands::Replay { script, roster, config, json } => {
            let roster = match roster {
                Some(path) => roster_builder::load_roster(&path)?,
                None => lineup_core::StaticRoster::default_squad(),
            };
            let config = match config {
                Some(path) => lineup_core::LineupConfig::load_yaml(&path)
                    .with_context(|| format!("Failed to load config: {}", path.display()))?,
                None => lineup_core::LineupConfig::from_env_or_default(),
            };
            let script_json = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script: {}", script.display()))?;

            let report = roster_builder::replay_script(&config, &roster, &script_json)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_replay(&report);
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn finish_build(
    out: &std::path::Path,
    meta: &roster_builder::CacheMetadata,
    verify: bool,
    metadata: Option<PathBuf>,
) -> Result<()> {
    print_metadata(meta);

    if verify {
        println!("\n🔍 Verifying cache integrity...");
        if !roster_builder::verify_roster_cache(out, &meta.checksum)? {
            anyhow::bail!("❌ Cache verification failed - checksum mismatch!");
        }
        println!("✅ Cache verification passed");
    }

    if let Some(path) = metadata {
        std::fs::write(&path, serde_json::to_string_pretty(meta)?)?;
        println!("\n📄 Metadata saved to: {}", path.display());
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &roster_builder::CacheMetadata) {
    println!("\n✅ Roster cache built successfully!");
    println!("   Players:         {}", meta.player_count);
    println!("   Original size:   {} bytes", meta.original_size);
    println!("   Compressed size: {} bytes", meta.compressed_size);
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn print_replay(report: &roster_builder::ReplayReport) {
    println!("▶️  Replayed {} events ({} ignored)", report.outcomes.len(), report.ignored_count());
    let snapshot = &report.snapshot;
    println!("   Formation: {}", snapshot.formation);
    println!("   Average rating: {:.1}", snapshot.average_rating);
    println!("\n   Lineup:");
    for placement in &snapshot.lineup {
        println!(
            "   {:<38} {:<24} ({:>5.1}, {:>5.1}) {}",
            placement.placement_id,
            placement.player.name,
            placement.field_position.x,
            placement.field_position.y,
            placement.detected_position
        );
    }
    println!("\n   Bench:");
    for entry in &snapshot.bench {
        println!("   #{:<2} {}", entry.bench_index, entry.player.name);
    }
    if let Some(status) = &snapshot.status {
        println!("\n   Last status: {}", status.text);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("roster_builder CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
