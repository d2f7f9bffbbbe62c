#![forbid(unsafe_code)]

//! The fixed set of treasure notes.

use serde::Serialize;

/// One treasure note: what the note says, where it leads, and a picture.
///
/// Records have no identity beyond their position in [`TREASURE_NOTES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Text of the note. This is the field searched by the filter.
    pub note: &'static str,
    /// Human-readable place name.
    pub location: &'static str,
    /// External placeholder image URL.
    pub image: &'static str,
}

/// All records, in display order.
pub const TREASURE_NOTES: [Record; 3] = [
    Record {
        note: "Под старым дубом у реки, где ветер шепчет тайны.",
        location: "Река Светлая",
        image: "https://placehold.co/600x400?text=Old+Oak+By+The+River",
    },
    Record {
        note: "В центре города, рядом с фонтаном, где собираются голуби.",
        location: "Центральная площадь",
        image: "https://placehold.co/600x400?text=Fountain+In+The+City+Center",
    },
    Record {
        note: "На вершине холма, где стоит заброшенная мельница.",
        location: "Холм Мечтаний",
        image: "https://placehold.co/600x400?text=Hill+With+Old+Mill",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_records() {
        assert_eq!(TREASURE_NOTES.len(), 3);
    }

    #[test]
    fn image_urls_have_no_padding() {
        for record in &TREASURE_NOTES {
            assert_eq!(record.image, record.image.trim());
            assert!(record.image.starts_with("https://placehold.co/"));
        }
    }

    #[test]
    fn record_serializes_with_field_names() {
        let json = serde_json::to_string(&TREASURE_NOTES[2]).unwrap();
        assert!(json.contains("\"location\":\"Холм Мечтаний\""));
        assert!(json.contains("\"note\":"));
        assert!(json.contains("\"image\":"));
    }
}
