//! Achievement catalog and idempotent unlock bookkeeping.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainCode;

// Catalog ids granted by the engine's built-in unlock rules.
pub const ACH_FIRST_SESSION: &str = "langkah-pertama";
pub const ACH_GOLD_STAR: &str = "bintang-emas";
pub const ACH_DILIGENT: &str = "rajin-berlatih";
pub const ACH_EXPLORER: &str = "penjelajah-chc";

/// Badge rarity tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Catalog entry. Static data; the earned state lives in the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rarity: Rarity,
}

/// Notification payload surfaced exactly once per successful grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementNotice {
    pub spec: AchievementSpec,
    pub earned_date: DateTime<Utc>,
}

/// Outcome of a grant call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOutcome {
    /// The id was already held; nothing changed and the caller must not
    /// re-notify.
    AlreadyHeld,
    /// The id was granted; surface this notice once.
    Granted(AchievementNotice),
    /// The id is outside the catalog. It was recorded in the held set, but
    /// there is no metadata to show.
    Uncataloged,
}

/// Catalog plus held set.
///
/// The held set may contain ids the catalog does not know; collected ids
/// are a superset of the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementBook {
    catalog: Vec<AchievementSpec>,
    held: BTreeMap<String, DateTime<Utc>>,
}

impl AchievementBook {
    #[must_use]
    pub const fn new(catalog: Vec<AchievementSpec>) -> Self {
        Self {
            catalog,
            held: BTreeMap::new(),
        }
    }

    /// Grant a badge by id. Once earned, a badge is never un-earned;
    /// granting an already-held id changes nothing.
    pub fn grant(&mut self, id: &str, now: DateTime<Utc>) -> GrantOutcome {
        if self.held.contains_key(id) {
            return GrantOutcome::AlreadyHeld;
        }
        self.held.insert(id.to_string(), now);
        match self.catalog.iter().find(|spec| spec.id == id) {
            Some(spec) => GrantOutcome::Granted(AchievementNotice {
                spec: spec.clone(),
                earned_date: now,
            }),
            None => GrantOutcome::Uncataloged,
        }
    }

    #[must_use]
    pub fn is_held(&self, id: &str) -> bool {
        self.held.contains_key(id)
    }

    /// Every collected id with its earn date, including uncataloged ones.
    pub fn held(&self) -> impl Iterator<Item = (&str, DateTime<Utc>)> {
        self.held.iter().map(|(id, date)| (id.as_str(), *date))
    }

    /// Earned catalog achievements in catalog order.
    #[must_use]
    pub fn earned(&self) -> Vec<AchievementNotice> {
        self.catalog
            .iter()
            .filter_map(|spec| {
                self.held.get(&spec.id).map(|date| AchievementNotice {
                    spec: spec.clone(),
                    earned_date: *date,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn catalog(&self) -> &[AchievementSpec] {
        &self.catalog
    }

    /// The built-in catalog backing the engine's unlock rules.
    #[must_use]
    pub fn default_catalog() -> Vec<AchievementSpec> {
        let mut catalog = vec![
            spec(
                ACH_FIRST_SESSION,
                "Langkah Pertama",
                "Selesaikan permainan pertamamu",
                Rarity::Common,
            ),
            spec(
                ACH_GOLD_STAR,
                "Bintang Emas",
                "Raih skor 90 atau lebih dalam satu permainan",
                Rarity::Rare,
            ),
            spec(
                ACH_DILIGENT,
                "Rajin Berlatih",
                "Mainkan satu kemampuan sepuluh kali",
                Rarity::Epic,
            ),
            spec(
                ACH_EXPLORER,
                "Penjelajah CHC",
                "Mainkan semua delapan kemampuan",
                Rarity::Legendary,
            ),
        ];
        for code in DomainCode::ALL {
            catalog.push(spec(
                &domain_debut_id(code),
                &format!("Debut {}", code.display_name()),
                "Permainan pertama di kemampuan ini",
                Rarity::Common,
            ));
        }
        catalog
    }
}

/// Id of the first-session badge for one domain.
#[must_use]
pub fn domain_debut_id(code: DomainCode) -> String {
    format!("debut-{}", code.key())
}

fn spec(id: &str, name: &str, description: &str, rarity: Rarity) -> AchievementSpec {
    AchievementSpec {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        rarity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, minute, 0)
            .single()
            .expect("valid fixture date")
    }

    #[test]
    fn grants_are_idempotent() {
        let mut book = AchievementBook::new(AchievementBook::default_catalog());
        let first = book.grant(ACH_GOLD_STAR, at(0));
        assert!(matches!(first, GrantOutcome::Granted(_)));
        let second = book.grant(ACH_GOLD_STAR, at(5));
        assert_eq!(second, GrantOutcome::AlreadyHeld);

        let earned = book.earned();
        assert_eq!(earned.len(), 1);
        // The original earn date survives the duplicate grant.
        assert_eq!(earned[0].earned_date, at(0));
    }

    #[test]
    fn uncataloged_ids_are_collected_without_a_notice() {
        let mut book = AchievementBook::new(AchievementBook::default_catalog());
        assert_eq!(book.grant("badge-dari-promo", at(0)), GrantOutcome::Uncataloged);
        assert!(book.is_held("badge-dari-promo"));
        assert!(book.earned().is_empty());
        assert_eq!(book.grant("badge-dari-promo", at(1)), GrantOutcome::AlreadyHeld);
    }

    #[test]
    fn default_catalog_covers_every_domain_debut() {
        let catalog = AchievementBook::default_catalog();
        for code in DomainCode::ALL {
            let id = domain_debut_id(code);
            assert!(catalog.iter().any(|spec| spec.id == id), "missing {id}");
        }
    }
}
