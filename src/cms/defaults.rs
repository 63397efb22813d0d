//! Default site copy seeded on first open.

use super::{ContentEntry, ContentKind};

/// The site's default content table.
pub fn default_entries() -> Vec<ContentEntry> {
    use ContentKind::*;

    let rows: [(&str, ContentKind, &str, &str, &str); 12] = [
        (
            "home.hero.title",
            Text,
            "Precision billiards equipment, from felt to finish",
            "Homepage hero title",
            "home",
        ),
        (
            "home.hero.subtitle",
            Text,
            "Tables, cues, and coaching trusted by clubs nationwide",
            "Homepage hero subtitle",
            "home",
        ),
        (
            "home.hero.image",
            Image,
            "/assets/hero-table.jpg",
            "Homepage hero image",
            "home",
        ),
        (
            "stores.intro.title",
            Text,
            "Visit a showroom",
            "Stores page intro title",
            "stores",
        ),
        (
            "stores.intro.body",
            RichText,
            "<p>Try every table in person. Our specialists will walk you through cloth, slate, and cushion options.</p>",
            "Stores page intro body",
            "stores",
        ),
        (
            "training.intro.title",
            Text,
            "Train with certified coaches",
            "Training page intro title",
            "training",
        ),
        (
            "training.intro.video",
            Video,
            "/assets/training-overview.mp4",
            "Training overview video",
            "training",
        ),
        (
            "products.intro.title",
            Text,
            "Professional-grade cues and accessories",
            "Products page intro title",
            "products",
        ),
        (
            "franchise.pitch.title",
            Text,
            "Open your own club",
            "Franchise pitch title",
            "franchise",
        ),
        (
            "franchise.pitch.body",
            RichText,
            "<p>Join a network of profitable billiards clubs with full equipment and training support.</p>",
            "Franchise pitch body",
            "franchise",
        ),
        (
            "contact.form.title",
            Text,
            "Talk to a specialist",
            "Contact form title",
            "contact",
        ),
        (
            "booking.form.title",
            Text,
            "Book a table or a lesson",
            "Booking form title",
            "booking",
        ),
    ];

    rows.into_iter()
        .map(|(key, kind, value, label, category)| {
            ContentEntry::new(key, kind, value, label, category)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_are_unique() {
        let entries = default_entries();
        let mut keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), entries.len());
    }

    #[test]
    fn defaults_use_dotted_keys() {
        for entry in default_entries() {
            assert!(entry.key.contains('.'), "key {} is not dotted", entry.key);
        }
    }
}
