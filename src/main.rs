use clap::Parser;
use pic_organizer::collision::CollisionCheck;
use pic_organizer::config::{confirm, OrganizerConfig, TransferMode};
use pic_organizer::organizer::organize_tree;
use pic_organizer::resolver::FallbackPolicy;
use std::io;
use std::path::PathBuf;

/// Sort JPEG photos into a year/month/day directory tree by capture date

#[derive(Parser, Debug)]
#[command(name = "pic-organizer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source path - where all the images are located
    #[arg(long = "src")]
    src: PathBuf,

    /// Destination path - where all the images are meant to be
    #[arg(long = "dst")]
    dst: PathBuf,

    /// Move files instead of copying them
    #[arg(long = "move")]
    move_files: bool,

    /// Do not ask for confirmation before starting
    #[arg(short, long)]
    yes: bool,

    /// Fall back to the next source when an ISO-8601 timestamp is malformed
    #[arg(long)]
    lenient_parse: bool,

    /// Probe for existing files even in freshly created directories
    #[arg(long)]
    always_check_collisions: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn to_config(&self) -> OrganizerConfig {
        let mut config = OrganizerConfig::new(&self.src, &self.dst);
        if self.move_files {
            config.mode = TransferMode::Move;
        }
        if self.lenient_parse {
            config.fallback_policy = FallbackPolicy::FallbackOnAny;
        }
        if self.always_check_collisions {
            config.collision_check = CollisionCheck::Always;
        }
        config
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn print_banner(config: &OrganizerConfig) {
    println!("-------------------------------");
    println!("pic-organizer");
    println!("-------------------------------");
    println!("source\t{}", config.source.display());
    println!("target\t{}", config.destination.display());
    println!("files\tare {}", config.mode.past_tense());
    println!("-------------------------------");
}

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);
    let config = args.to_config();

    print_banner(&config);
    if !args.yes {
        match confirm(&mut io::stdin().lock(), &mut io::stdout()) {
            Ok(true) => {}
            Ok(false) => {
                println!("\nthen - so long and farewell ...");
                return;
            }
            Err(e) => {
                eprintln!("✗ {:#}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("\nERROR: {}", error);
        }
        std::process::exit(1);
    }

    // Organize photos
    match organize_tree(&config) {
        Ok(result) => {
            println!(
                "... finished after {:.3} seconds",
                result.elapsed.as_secs_f64()
            );
            println!("  Total files: {}", result.total_files);
            println!("  Organized: {}", result.organized_files);
            println!("  Skipped: {}", result.skipped_files);

            if !result.errors.is_empty() {
                println!("\nErrors:");
                for error in &result.errors {
                    println!("  - {}", error);
                }
            }
        }
        Err(e) => {
            eprintln!("✗ Failed to organize photos: {:#}", e);
            std::process::exit(1);
        }
    }
}
