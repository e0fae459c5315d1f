use clap::{Parser, Subcommand};
use spr_core::{
    config::{resolve_media_dir, resolve_pose_catalog},
    ConditionCatalog, PoseCatalog, RecommendationService,
};
use spr_media::MediaStore;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spr")]
#[command(about = "SPR symptom-to-pose recommender CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a symptom description and print recommendations
    Ask {
        /// Free-text symptom description
        statement: String,
        /// Pose catalog CSV path (searched if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Media root directory (searched if omitted)
        #[arg(long)]
        media_dir: Option<PathBuf>,
        /// Skip image lookup entirely
        #[arg(long)]
        no_media: bool,
        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },
    /// List known conditions and shortform aliases
    Conditions,
    /// List poses defined in the catalog
    Poses {
        /// Pose catalog CSV path (searched if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Ask {
            statement,
            catalog,
            media_dir,
            no_media,
            json,
        }) => {
            let catalog_path = resolve_pose_catalog(catalog)?;
            let poses = PoseCatalog::load(&catalog_path)?;

            let media = if no_media {
                None
            } else {
                match resolve_media_dir(media_dir) {
                    Ok(dir) => Some(MediaStore::open(&dir)?),
                    Err(e) => {
                        eprintln!("Running without media: {e}");
                        None
                    }
                }
            };

            let service = RecommendationService::new(ConditionCatalog::builtin(), poses, media);
            let groups = service.recommend(&statement);

            if json {
                println!("{}", serde_json::to_string_pretty(&ask_json(&groups))?);
            } else if groups.is_empty() {
                println!("No recommendation found.");
            } else {
                for group in &groups {
                    println!("{}:", group.term);
                    for rec in &group.recommendations {
                        let image = match &rec.image {
                            Some(_) => "image attached",
                            None => "no image",
                        };
                        println!("  - {} ({}, {})", rec.pose, rec.record.video, image);
                        println!("    {}", rec.record.steps);
                    }
                }
            }
        }
        Some(Commands::Conditions) => {
            let catalog = ConditionCatalog::builtin();
            for entry in catalog.entries() {
                let poses: Vec<&str> = entry.poses().iter().map(|p| p.as_str()).collect();
                println!("{}: {}", entry.key(), poses.join(", "));
            }
            for alias in catalog.aliases() {
                println!("{} -> {}", alias.key(), alias.canonical());
            }
        }
        Some(Commands::Poses { catalog }) => {
            let catalog_path = resolve_pose_catalog(catalog)?;
            let poses = PoseCatalog::load(&catalog_path)?;
            for key in poses.keys() {
                println!("{key}");
            }
        }
        None => {
            println!("Use 'spr --help' for commands");
        }
    }

    Ok(())
}

fn ask_json(groups: &[spr_core::RecommendationGroup]) -> serde_json::Value {
    serde_json::json!({
        "found": !groups.is_empty(),
        "groups": groups
            .iter()
            .map(|group| {
                serde_json::json!({
                    "term": group.term,
                    "kind": group.kind,
                    "recommendations": group
                        .recommendations
                        .iter()
                        .map(|rec| {
                            serde_json::json!({
                                "pose": rec.pose.as_str(),
                                "steps": rec.record.steps,
                                "video": rec.record.video,
                                "image": rec.image.as_ref().map(|img| {
                                    serde_json::json!({
                                        "media_type": img.media_type,
                                        "data": img.data,
                                    })
                                }),
                            })
                        })
                        .collect::<Vec<_>>(),
                })
            })
            .collect::<Vec<_>>(),
    })
}
