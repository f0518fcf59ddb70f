use beehive::{
    Catalog,
    domain::{GalleryFilter, navigation},
};
use clap::Parser;
use tracing::instrument;

use super::{
    Context,
    terminal::{Colorize, wrap},
};

#[derive(Debug, Parser)]
pub struct Command {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: CatalogCommand,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Parser)]
enum CatalogCommand {
    /// List rooms, rates and booking information
    Rooms,

    /// List amenities by group
    Amenities,

    /// List nearby attractions
    Attractions,

    /// List bee keeping activities
    BeeKeeping,

    /// List gallery photos
    Gallery {
        /// Only show one category (All, Rooms, Property, Bee Keeping,
        /// Surroundings)
        #[arg(long, default_value = "All")]
        category: GalleryFilter,
    },

    /// List the site's sections
    Sections,
}

impl Command {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, context: &Context) -> anyhow::Result<()> {
        let catalog = context.catalog()?;

        match self.output {
            OutputFormat::Json => Self::output_json(&catalog, &self.command),
            OutputFormat::Table => {
                Self::output_table(&catalog, &self.command);
                Ok(())
            }
        }
    }

    fn output_json(catalog: &Catalog, command: &CatalogCommand) -> anyhow::Result<()> {
        let value = match command {
            CatalogCommand::Rooms => serde_json::json!({
                "rooms": catalog.rooms,
                "booking_info": catalog.booking_info,
            }),
            CatalogCommand::Amenities => serde_json::to_value(&catalog.amenities)?,
            CatalogCommand::Attractions => serde_json::to_value(&catalog.attractions)?,
            CatalogCommand::BeeKeeping => serde_json::to_value(&catalog.activities)?,
            CatalogCommand::Gallery { category } => {
                serde_json::to_value(catalog.gallery(*category).collect::<Vec<_>>())?
            }
            CatalogCommand::Sections => serde_json::to_value(navigation::SECTIONS)?,
        };

        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    fn output_table(catalog: &Catalog, command: &CatalogCommand) {
        match command {
            CatalogCommand::Rooms => {
                for room in &catalog.rooms {
                    println!(
                        "{}  {}",
                        room.title.heading(),
                        format!(
                            "${}/night · up to {} guests · {} m²",
                            room.price_per_night, room.capacity, room.size_m2
                        )
                        .dim()
                    );
                    print_wrapped(&room.description, 2);
                    println!("  {}", room.amenities.join(", ").info());
                    println!(
                        "  {}",
                        format!("--room {}", room.inquiry_value).dim()
                    );
                    println!();
                }
                for info in &catalog.booking_info {
                    println!("{}: {}", info.title.heading(), info.details.join(" · "));
                }
            }
            CatalogCommand::Amenities => {
                for group in &catalog.amenities {
                    println!("{}", group.category.heading());
                    for item in &group.items {
                        println!("  • {item}");
                    }
                    println!();
                }
            }
            CatalogCommand::Attractions => {
                for attraction in &catalog.attractions {
                    println!(
                        "{}  {}",
                        attraction.name.heading(),
                        format!("{} · {}", attraction.distance, attraction.travel_time).dim()
                    );
                    print_wrapped(&attraction.description, 2);
                }
            }
            CatalogCommand::BeeKeeping => {
                for activity in &catalog.activities {
                    println!(
                        "{}  {}",
                        activity.title.heading(),
                        format!("{} · {}", activity.duration, activity.price).dim()
                    );
                    print_wrapped(&activity.description, 2);
                    for included in &activity.included {
                        println!("  ✓ {included}");
                    }
                    println!();
                }
                println!(
                    "{}",
                    "Add --bee-keeping to your inquiry to book a session.".dim()
                );
            }
            CatalogCommand::Gallery { category } => {
                let mut images = catalog.gallery(*category).peekable();
                if images.peek().is_none() {
                    println!("{}", "No images found in this category.".dim());
                    return;
                }
                for image in images {
                    println!(
                        "{:<14} {}  {}",
                        image.category.to_string().info(),
                        image.src,
                        image.alt.dim()
                    );
                }
            }
            CatalogCommand::Sections => {
                for link in navigation::SECTIONS {
                    println!("{:<12} {}", link.name, link.href.dim());
                }
                println!(
                    "\n{} {}",
                    navigation::BOOK_NOW.name.success(),
                    navigation::BOOK_NOW.href.dim()
                );
            }
        }
    }
}

fn print_wrapped(text: &str, indent: usize) {
    let padding = " ".repeat(indent);
    for line in wrap(text, indent) {
        println!("{padding}{line}");
    }
}
