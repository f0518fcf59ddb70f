//! The villa's static site content.
//!
//! Rooms, amenities, nearby attractions, bee keeping activities and the
//! photo gallery are plain data. The built-in catalog matches the live
//! site; a YAML file with the same shape can replace it.

use std::{fmt, io, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::inquiry::RoomType;

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Nightly rate in US dollars.
    pub price_per_night: u32,
    /// Maximum number of guests.
    pub capacity: u8,
    /// Floor area in square metres.
    pub size_m2: u32,
    /// What the room includes.
    pub amenities: Vec<String>,
    /// The value the inquiry form submits for this room.
    pub inquiry_value: RoomType,
}

/// A block of practical booking information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    /// Heading.
    pub title: String,
    /// One line per detail.
    pub details: Vec<String>,
}

/// A named group of amenities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmenityGroup {
    /// Group heading, e.g. "Room Amenities".
    pub category: String,
    /// Amenity names.
    pub items: Vec<String>,
}

/// A place worth visiting near the villa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attraction {
    /// Name.
    pub name: String,
    /// Distance from the villa, as displayed.
    pub distance: String,
    /// Travel time, as displayed.
    pub travel_time: String,
    /// Short description.
    pub description: String,
}

/// A bookable bee keeping session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Name.
    pub title: String,
    /// Duration, as displayed.
    pub duration: String,
    /// Short description.
    pub description: String,
    /// What is included.
    pub included: Vec<String>,
    /// Price, as displayed.
    pub price: String,
}

/// The categories gallery images are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GalleryCategory {
    /// Room interiors.
    Rooms,
    /// The villa and its grounds.
    Property,
    /// The bee keeping experience.
    #[serde(rename = "Bee Keeping")]
    BeeKeeping,
    /// The surrounding landscape.
    Surroundings,
}

impl GalleryCategory {
    /// All categories, in the order the filter buttons show them.
    pub const ALL: [Self; 4] = [
        Self::Rooms,
        Self::Property,
        Self::BeeKeeping,
        Self::Surroundings,
    ];

    /// The display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rooms => "Rooms",
            Self::Property => "Property",
            Self::BeeKeeping => "Bee Keeping",
            Self::Surroundings => "Surroundings",
        }
    }
}

impl fmt::Display for GalleryCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which gallery images to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GalleryFilter {
    /// Every image.
    #[default]
    All,
    /// Only images in one category.
    Category(GalleryCategory),
}

impl GalleryFilter {
    /// Every filter, "All" first.
    pub fn options() -> impl Iterator<Item = Self> {
        std::iter::once(Self::All).chain(GalleryCategory::ALL.into_iter().map(Self::Category))
    }

    /// Whether an image in `category` passes this filter.
    #[must_use]
    pub fn matches(self, category: GalleryCategory) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for GalleryFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Category(category) => category.fmt(f),
        }
    }
}

/// Error returned when parsing an unknown gallery filter.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown gallery category '{0}' (expected one of: All, Rooms, Property, Bee Keeping, Surroundings)")]
pub struct UnknownCategoryError(String);

impl FromStr for GalleryFilter {
    type Err = UnknownCategoryError;

    /// Parses a filter name, ignoring case, spaces, dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        Self::options()
            .find(|filter| filter.to_string().replace(' ', "").to_lowercase() == normalized)
            .ok_or_else(|| UnknownCategoryError(s.to_string()))
    }
}

/// A photo in the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Image path on the site.
    pub src: String,
    /// Alternative text.
    pub alt: String,
    /// Category used for filtering.
    pub category: GalleryCategory,
}

/// Failure to load a catalog file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    /// The file is not a valid catalog.
    #[error("failed to parse catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// All of the villa's static content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Rooms, in display order.
    pub rooms: Vec<Room>,
    /// Practical booking information.
    #[serde(default)]
    pub booking_info: Vec<BookingInfo>,
    /// Amenities by group.
    #[serde(default)]
    pub amenities: Vec<AmenityGroup>,
    /// Nearby attractions.
    #[serde(default)]
    pub attractions: Vec<Attraction>,
    /// Bee keeping sessions.
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Gallery photos.
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Loads a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// catalog.
    #[instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Self = serde_yaml::from_str(&content)?;
        tracing::debug!(
            rooms = catalog.rooms.len(),
            images = catalog.gallery.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// The gallery images passing `filter`, in catalog order.
    ///
    /// An empty result is valid; the gallery then shows "No images found in
    /// this category".
    pub fn gallery(&self, filter: GalleryFilter) -> impl Iterator<Item = &GalleryImage> {
        self.gallery
            .iter()
            .filter(move |image| filter.matches(image.category))
    }

    /// The room a form's room preference refers to, if it is a known one.
    #[must_use]
    pub fn room_by_value(&self, value: &str) -> Option<&Room> {
        let room_type = RoomType::from_value(value)?;
        self.rooms.iter().find(|room| room.inquiry_value == room_type)
    }

    /// The content shown on the live site.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            rooms: builtin_rooms(),
            booking_info: builtin_booking_info(),
            amenities: builtin_amenities(),
            attractions: builtin_attractions(),
            activities: builtin_activities(),
            gallery: builtin_gallery(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn builtin_rooms() -> Vec<Room> {
    const BASE: [&str; 4] = ["Wi-Fi", "Air Conditioning", "Private Bathroom", "Hot Water"];

    let room = |id: &str,
                room_type: RoomType,
                description: &str,
                capacity: u8,
                size_m2: u32,
                extras: &[&str]| Room {
        id: id.to_string(),
        title: room_type.title().to_string(),
        description: description.to_string(),
        price_per_night: 18,
        capacity,
        size_m2,
        amenities: strings(&BASE).into_iter().chain(strings(extras)).collect(),
        inquiry_value: room_type,
    };

    vec![
        room(
            "standard-twin-1",
            RoomType::StandardTwin,
            "Comfortable room with twin beds, perfect for friends or travelers exploring Kandy's \
             attractions.",
            2,
            30,
            &[],
        ),
        room(
            "standard-twin-2",
            RoomType::DeluxeTwin,
            "Spacious room with twin beds and enhanced amenities, featuring garden views and \
             eco-friendly design.",
            2,
            35,
            &["Garden View", "Mini Fridge"],
        ),
        room(
            "standard-twin-3",
            RoomType::PremiumTwin,
            "Premium room with twin beds, private balcony and stunning mountain views of the \
             Kandy hills.",
            2,
            40,
            &["Mountain View", "Balcony", "Mini Fridge"],
        ),
        room(
            "standard-twin-4",
            RoomType::LuxurySuite,
            "Our most luxurious room with twin beds, separate sitting area and panoramic views \
             of the surrounding nature.",
            3,
            50,
            &[
                "Panoramic View",
                "Sitting Area",
                "Mini Fridge",
                "Tea/Coffee Station",
            ],
        ),
    ]
}

fn builtin_booking_info() -> Vec<BookingInfo> {
    [
        ("Check-in/out", ["Check-in: 2:00 PM", "Check-out: 11:00 AM"]),
        (
            "Complimentary",
            ["Daily breakfast included", "Welcome refreshments"],
        ),
        (
            "Flexible Booking",
            ["Free cancellation 48hrs", "Extended stay discounts"],
        ),
        ("Premium Service", ["24/7 concierge", "Extra bed available"]),
    ]
    .into_iter()
    .map(|(title, details)| BookingInfo {
        title: title.to_string(),
        details: strings(&details),
    })
    .collect()
}

fn builtin_amenities() -> Vec<AmenityGroup> {
    let group = |category: &str, items: &[&str]| AmenityGroup {
        category: category.to_string(),
        items: strings(items),
    };

    vec![
        group(
            "Room Amenities",
            &[
                "Free High-Speed Wi-Fi",
                "Air Conditioning",
                "Hot Water",
                "Private Bathroom",
                "Smart TV",
                "Coffee/Tea Maker",
            ],
        ),
        group(
            "Property Amenities",
            &[
                "Free Parking",
                "Restaurant",
                "Garden",
                "Terrace",
                "Bicycle Rental",
                "First Aid Kit",
            ],
        ),
        group(
            "Special Features",
            &[
                "Bee Keeping Experience",
                "Fresh Local Honey Tasting",
                "Family Friendly",
                "Airport Transfer (Payable)",
            ],
        ),
    ]
}

fn builtin_attractions() -> Vec<Attraction> {
    [
        (
            "Temple of the Sacred Tooth Relic",
            "4.8 km",
            "12 minutes",
            "One of Sri Lanka's most sacred Buddhist sites, housing a tooth relic of Lord Buddha.",
        ),
        (
            "Kandy Lake (Bogambara Lake)",
            "4.3 km",
            "11 minutes",
            "A scenic artificial lake in the heart of the city, perfect for evening walks and \
             cultural shows.",
        ),
        (
            "Royal Botanical Gardens Peradeniya",
            "2.1 km",
            "6 minutes",
            "Extensive gardens featuring diverse plant species, orchid house, and beautiful \
             walking paths.",
        ),
        (
            "Kandy City Center",
            "5.2 km",
            "14 minutes",
            "Modern shopping complex with local and international brands, restaurants, and \
             entertainment.",
        ),
        (
            "Bahirawakanda Vihara Buddha Statue",
            "5.8 km",
            "16 minutes",
            "Giant white Buddha statue offering panoramic views of Kandy city and surrounding \
             hills.",
        ),
        (
            "Udawattakele Forest Reserve",
            "6.1 km",
            "17 minutes",
            "Historic forest sanctuary in the heart of Kandy, perfect for nature walks and bird \
             watching.",
        ),
    ]
    .into_iter()
    .map(|(name, distance, travel_time, description)| Attraction {
        name: name.to_string(),
        distance: distance.to_string(),
        travel_time: travel_time.to_string(),
        description: description.to_string(),
    })
    .collect()
}

fn builtin_activities() -> Vec<Activity> {
    [
        (
            "Hive Inspection",
            "1 hour",
            "Learn about hive structure and bee colony organization",
            ["Protective gear provided", "Expert guidance", "Photo opportunities"],
            "LKR 2,500",
        ),
        (
            "Honey Extraction",
            "1.5 hours",
            "Participate in the honey harvesting process",
            ["Hands-on experience", "Honey tasting", "Take-home honey jar"],
            "LKR 3,500",
        ),
        (
            "Educational Workshop",
            "2 hours",
            "Comprehensive introduction to beekeeping",
            ["Theory session", "Live demonstration", "Q&A session"],
            "LKR 4,000",
        ),
    ]
    .into_iter()
    .map(|(title, duration, description, included, price)| Activity {
        title: title.to_string(),
        duration: duration.to_string(),
        description: description.to_string(),
        included: strings(&included),
        price: price.to_string(),
    })
    .collect()
}

fn builtin_gallery() -> Vec<GalleryImage> {
    use GalleryCategory::{BeeKeeping, Property, Rooms, Surroundings};

    [
        ("DSC_8888.jpg", "Exterior view of the villa", Property),
        ("DSC_8873_hdr.jpg", "Panoramic view of the villa with landscaped gardens", Property),
        ("DSC_8882_hdr.jpg", "Villa exterior with traditional Sri Lankan architecture", Property),
        ("DSC_8876_hdr.jpg", "Property grounds with lush greenery", Property),
        ("DSC_8883_hdr.jpg", "The villa in its natural setting", Property),
        ("DSC_8818_hdr.jpg", "Wide view of the villa among the trees", Property),
        ("DSC_8812_hdr.jpg", "The villa against the mountain backdrop", Property),
        ("DSC_8845_hdr.jpg", "Landscape of the property and villa buildings", Property),
        ("DSC_8828_hdr.jpg", "Villa grounds where architecture meets nature", Property),
        ("standard-twin.jpg", "Standard Twin Room with modern amenities", Rooms),
        ("_Image.jpg", "Room interior with traditional Sri Lankan decor", Rooms),
        ("_Image (1).jpg", "Spacious room with panoramic windows", Rooms),
        ("_Image (2).jpg", "Guest room featuring local craftsmanship", Rooms),
        ("_Image (3).jpg", "Room with balcony access and mountain views", Rooms),
        ("_Image (4).jpg", "Cozy room with traditional furniture", Rooms),
        ("_Image (5).jpg", "Bright room with garden access", Rooms),
        ("_Image (6).jpg", "Guest room prepared for arrival", Rooms),
        ("beekeeping-1.jpg", "Beekeepers working a hive in protective gear", BeeKeeping),
        ("beekeeping-2.jpg", "Close-up of honeycomb and the bee colony", BeeKeeping),
        ("beekeeping-3.jpg", "Beekeeper using a smoker at the hive", BeeKeeping),
        ("beekeeping-4.jpg", "Fresh honeycomb with pure honey", BeeKeeping),
        ("beekeeping-5.jpg", "Guests learning about hive maintenance", BeeKeeping),
        ("DSC_8868_stack.jpg", "Hills surrounding the villa", Surroundings),
        ("DSC_8863_stack.jpg", "Tea country near Kandy", Surroundings),
        ("DSC_8860_hdr_genErase.jpg", "Morning mist over the valley", Surroundings),
        ("DSC_8865_stack.jpg", "Forest path close to the property", Surroundings),
        ("DSC_8857_stack.jpg", "View across the Kandy hills", Surroundings),
        ("DSC_8833.jpg", "Local flora in the garden", Surroundings),
        ("DSC_8835.jpg", "Evening light over the surroundings", Surroundings),
    ]
    .into_iter()
    .map(|(file, alt, category)| GalleryImage {
        src: format!("/images/gallery/{file}"),
        alt: alt.to_string(),
        category,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;

    #[test]
    fn all_filter_shows_every_image() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.gallery(GalleryFilter::All).count(),
            catalog.gallery.len()
        );
    }

    #[test]
    fn category_filter_partitions_gallery() {
        let catalog = Catalog::builtin();

        let total: usize = GalleryCategory::ALL
            .into_iter()
            .map(|category| catalog.gallery(GalleryFilter::Category(category)).count())
            .sum();
        assert_eq!(total, catalog.gallery.len());

        assert!(
            catalog
                .gallery(GalleryFilter::Category(GalleryCategory::BeeKeeping))
                .all(|image| image.category == GalleryCategory::BeeKeeping)
        );
    }

    #[test]
    fn filter_on_empty_category_yields_nothing() {
        let catalog = Catalog {
            gallery: Catalog::builtin()
                .gallery
                .into_iter()
                .filter(|image| image.category != GalleryCategory::Rooms)
                .collect(),
            ..Catalog::builtin()
        };

        assert_eq!(
            catalog
                .gallery(GalleryFilter::Category(GalleryCategory::Rooms))
                .count(),
            0
        );
    }

    #[test_case("All", GalleryFilter::All; "all")]
    #[test_case("rooms", GalleryFilter::Category(GalleryCategory::Rooms); "lowercase")]
    #[test_case("Bee Keeping", GalleryFilter::Category(GalleryCategory::BeeKeeping); "display name")]
    #[test_case("bee-keeping", GalleryFilter::Category(GalleryCategory::BeeKeeping); "kebab case")]
    #[test_case("SURROUNDINGS", GalleryFilter::Category(GalleryCategory::Surroundings); "uppercase")]
    fn parse_filter(input: &str, expected: GalleryFilter) {
        assert_eq!(input.parse::<GalleryFilter>().unwrap(), expected);
    }

    #[test]
    fn parse_unknown_filter_fails() {
        assert!("Pool".parse::<GalleryFilter>().is_err());
    }

    #[test]
    fn every_room_type_has_a_room() {
        let catalog = Catalog::builtin();
        for room_type in RoomType::ALL {
            let room = catalog.room_by_value(room_type.value()).unwrap();
            assert_eq!(room.title, room_type.title());
        }
        assert!(catalog.room_by_value("penthouse").is_none());
    }

    #[test]
    fn luxury_suite_sleeps_three() {
        let catalog = Catalog::builtin();
        let suite = catalog.room_by_value("luxury-suite").unwrap();

        assert_eq!(suite.capacity, 3);
        assert!(suite.amenities.contains(&"Tea/Coffee Station".to_string()));
        assert!(suite.amenities.starts_with(&strings(&["Wi-Fi"])));
    }

    #[test]
    fn load_reads_yaml_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"rooms:
  - id: garden-room
    title: Garden Room
    description: Ground floor.
    price_per_night: 25
    capacity: 2
    size_m2: 28
    amenities: [Wi-Fi]
    inquiry_value: standard-twin
gallery:
  - src: /images/a.jpg
    alt: A hive
    category: Bee Keeping
",
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();

        assert_eq!(catalog.rooms.len(), 1);
        assert_eq!(
            catalog.room_by_value("standard-twin").unwrap().title,
            "Garden Room"
        );
        assert!(catalog.attractions.is_empty());
        assert_eq!(
            catalog
                .gallery(GalleryFilter::Category(GalleryCategory::BeeKeeping))
                .count(),
            1
        );
    }

    #[test]
    fn load_rejects_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"rooms: 12\n").unwrap();

        let error = Catalog::load(file.path()).unwrap_err();
        assert!(matches!(error, LoadError::Yaml(_)));
    }

    #[test]
    fn load_missing_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let error = Catalog::load(&tmp.path().join("catalog.yaml")).unwrap_err();
        assert!(matches!(error, LoadError::Io(_)));
    }
}
