//! The condition catalog: condition identifiers mapped to recommended poses.
//!
//! The catalog is a static, embedded table established at process start and
//! never mutated afterwards. Canonical entries are kept in *declaration
//! order*, which is the documented tie-break order for phrase matching and
//! for fuzzy candidates: when two identifiers could both win, the one
//! declared first in [`ConditionCatalog::builtin`] does.
//!
//! Shortforms (`bp`, `hbp`, `ra`, ...) are held in a separate alias map that
//! resolves to a canonical entry, so a pose list is only ever declared once.

use spr_types::{ConditionKey, PoseKey};
use std::collections::HashMap;

/// One canonical condition with its ordered pose recommendations.
#[derive(Debug, Clone)]
pub struct ConditionEntry {
    key: ConditionKey,
    poses: Vec<PoseKey>,
}

impl ConditionEntry {
    pub fn key(&self) -> &ConditionKey {
        &self.key
    }

    /// Recommended poses, in recommendation-priority order.
    pub fn poses(&self) -> &[PoseKey] {
        &self.poses
    }
}

/// A shortform identifier pointing at a canonical condition.
#[derive(Debug, Clone)]
pub struct ConditionAlias {
    key: ConditionKey,
    canonical: ConditionKey,
}

impl ConditionAlias {
    pub fn key(&self) -> &ConditionKey {
        &self.key
    }

    pub fn canonical(&self) -> &ConditionKey {
        &self.canonical
    }
}

/// Read-only catalog of conditions and their recommended poses.
#[derive(Debug, Clone, Default)]
pub struct ConditionCatalog {
    entries: Vec<ConditionEntry>,
    index: HashMap<String, usize>,
    aliases: Vec<ConditionAlias>,
    alias_index: HashMap<String, usize>,
}

impl ConditionCatalog {
    /// The builtin condition table.
    ///
    /// Groupings follow the clinical categories the recommendations were
    /// curated under; order within the table is load-bearing (see module
    /// docs) and must stay stable across releases.
    pub fn builtin() -> Self {
        let mut catalog = Self::default();

        // Mental health
        catalog.declare("stress", &["child_s_pose", "cat-cow_pose"]);
        catalog.declare("anxiety", &["breathing_exercises", "savasana"]);
        catalog.declare(
            "depression",
            &["sun_salutation", "warrior_i_pose", "triangle_pose"],
        );
        catalog.declare(
            "insomnia",
            &["child_s_pose", "legs_up_the_wall_pose", "savasana"],
        );
        catalog.declare("ptsd", &["tree_pose", "mountain_pose", "eagle_pose"]);

        // Chronic pain
        catalog.declare("back_pain", &["knee_to_chest", "downward_facing_dog_pose"]);
        catalog.declare("neck_pain", &["neck_rolls", "shoulder_rolls", "arm_circles"]);
        catalog.declare(
            "headaches",
            &["child_s_pose", "legs_up_the_wall_pose", "savasana"],
        );
        catalog.declare(
            "arthritis",
            &["gentle_stretching", "triangle_pose", "breathing_exercises"],
        );
        catalog.declare(
            "fibromyalgia",
            &["child_s_pose", "gentle_stretching", "deep_breathing_exercises"],
        );

        // Cardiovascular disease
        catalog.declare(
            "heart_disease",
            &[
                "deep_breathing_exercises",
                "legs_up_the_wall_pose",
                "bridge_pose",
            ],
        );
        catalog.declare(
            "high_blood_pressure",
            &[
                "deep_breathing_exercises",
                "reclining_bound_angle_pose",
                "bridge_pose",
            ],
        );
        catalog.declare(
            "high_cholesterol",
            &["sun_salutation", "warrior_i_pose", "triangle_pose"],
        );
        catalog.declare(
            "stroke",
            &["deep_breathing_exercises", "cat-cow_pose", "bridge_pose"],
        );

        // Respiratory disease
        catalog.declare(
            "asthma",
            &["deep_breathing_exercises", "cat-cow_pose", "bridge_pose"],
        );
        catalog.declare(
            "copd",
            &["deep_breathing_exercises", "cat-cow_pose", "bridge_pose"],
        );
        catalog.declare(
            "bronchitis",
            &["deep_breathing_exercises", "cat-cow_pose", "bridge_pose"],
        );
        catalog.declare(
            "pneumonia",
            &["deep_breathing_exercises", "cat-cow_pose", "bridge_pose"],
        );

        // Digestive disorders
        catalog.declare("constipation", &["cat-cow_pose", "twist_pose", "bridge_pose"]);
        catalog.declare(
            "diarrhea",
            &["child_s_pose", "legs_up_the_wall_pose", "savasana"],
        );
        catalog.declare(
            "ibs",
            &["deep_breathing_exercises", "twisting_poses", "bridge_pose"],
        );
        catalog.declare(
            "gerd",
            &["bridge_pose", "cat-cow_pose", "downward_facing_dog_pose"],
        );
        catalog.declare(
            "ulcers",
            &["child_s_pose", "legs_up_the_wall_pose", "savasana"],
        );

        // Hormonal imbalances
        catalog.declare(
            "menopause",
            &["deep_breathing_exercises", "child_s_pose", "bridge_pose"],
        );
        catalog.declare(
            "thyroid_disorders",
            &[
                "deep_breathing_exercises",
                "shoulder_stand_pose",
                "bridge_pose",
            ],
        );
        catalog.declare(
            "pcos",
            &["deep_breathing_exercises", "cobra_pose", "bridge_pose"],
        );
        catalog.declare(
            "pms",
            &["deep_breathing_exercises", "child_s_pose", "bridge_pose"],
        );

        // Autoimmune diseases
        catalog.declare(
            "lupus",
            &["deep_breathing_exercises", "sun_salutation", "bridge_pose"],
        );
        catalog.declare(
            "rheumatoid_arthritis",
            &["gentle-stretches", "savasana", "breathing_exercises"],
        );
        catalog.declare(
            "multiple_sclerosis",
            &["gentle-stretches", "legs_up_the_wall_pose"],
        );
        catalog.declare(
            "hashimotos_thyroiditis",
            &[
                "deep_breathing_exercises",
                "shoulder_stand_pose",
                "bridge_pose",
            ],
        );
        catalog.declare(
            "crohns_disease",
            &["deep_breathing_exercises", "child_s_pose", "bridge_pose"],
        );
        catalog.declare(
            "ulcerative_colitis",
            &["deep_breathing_exercises", "supine_twist_pose", "bridge_pose"],
        );

        // Shortforms
        catalog.declare_alias("mental stress", "stress");
        catalog.declare_alias("bp", "back_pain");
        catalog.declare_alias("hbp", "high_blood_pressure");
        catalog.declare_alias("ra", "rheumatoid_arthritis");

        catalog
    }

    fn declare(&mut self, key: &str, poses: &[&str]) {
        let key = ConditionKey::new(key).expect("builtin condition key is non-empty");
        let poses = poses
            .iter()
            .map(|p| PoseKey::new(p).expect("builtin pose key is non-empty"))
            .collect();

        debug_assert!(
            !self.index.contains_key(key.as_str()),
            "duplicate builtin condition {key}"
        );
        self.index.insert(key.as_str().to_string(), self.entries.len());
        self.entries.push(ConditionEntry { key, poses });
    }

    fn declare_alias(&mut self, alias: &str, canonical: &str) {
        let key = ConditionKey::new(alias).expect("builtin alias key is non-empty");
        let canonical = ConditionKey::new(canonical).expect("builtin canonical key is non-empty");

        debug_assert!(
            self.index.contains_key(canonical.as_str()),
            "alias {key} points at undeclared condition {canonical}"
        );
        self.alias_index
            .insert(key.as_str().to_string(), self.aliases.len());
        self.aliases.push(ConditionAlias { key, canonical });
    }

    /// Looks up a term (canonical identifier or alias) and resolves it to a
    /// canonical entry. Returns `None` for unknown terms.
    pub fn lookup(&self, term: &str) -> Option<&ConditionEntry> {
        if let Some(&idx) = self.index.get(term) {
            return Some(&self.entries[idx]);
        }
        let alias = &self.aliases[*self.alias_index.get(term)?];
        let idx = *self
            .index
            .get(alias.canonical.as_str())
            .expect("alias resolves to a declared condition");
        Some(&self.entries[idx])
    }

    /// Whether a term is an exact catalog key (canonical or alias).
    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term) || self.alias_index.contains_key(term)
    }

    /// Canonical entries, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &ConditionEntry> {
        self.entries.iter()
    }

    /// Aliases, in declaration order.
    pub fn aliases(&self) -> impl Iterator<Item = &ConditionAlias> {
        self.aliases.iter()
    }

    /// Every multi-word identifier (canonical first, then aliases), in
    /// declaration order, paired with the entry it resolves to. This is the
    /// scan order of the phrase matcher.
    pub fn multi_word_identifiers(
        &self,
    ) -> impl Iterator<Item = (&ConditionKey, &ConditionEntry)> {
        let canonical = self
            .entries
            .iter()
            .filter(|e| e.key.is_multi_word())
            .map(|e| (&e.key, e));
        let aliased = self
            .aliases
            .iter()
            .filter(|a| a.key.is_multi_word())
            .filter_map(|a| Some((&a.key, self.lookup(a.canonical.as_str())?)));
        canonical.chain(aliased)
    }

    /// Every identifier the fuzzy matcher may propose (canonical first, then
    /// aliases), in declaration order.
    pub fn fuzzy_candidates(&self) -> impl Iterator<Item = &ConditionKey> {
        self.entries
            .iter()
            .map(|e| &e.key)
            .chain(self.aliases.iter().map(|a| &a.key))
    }

    /// Number of canonical entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sanity-check the catalog against a set of known pose keys, warning
    /// about any recommendation that will silently resolve to nothing.
    pub fn warn_dangling_poses(&self, known: impl Fn(&PoseKey) -> bool) {
        for entry in &self.entries {
            for pose in &entry.poses {
                if !known(pose) {
                    tracing::warn!(
                        condition = %entry.key,
                        pose = %pose,
                        "condition recommends a pose with no catalog record"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_populated() {
        let catalog = ConditionCatalog::builtin();
        assert_eq!(catalog.len(), 33);
        assert_eq!(catalog.aliases().count(), 4);
    }

    #[test]
    fn lookup_resolves_canonical_keys() {
        let catalog = ConditionCatalog::builtin();
        let entry = catalog.lookup("back_pain").unwrap();
        assert_eq!(entry.key().as_str(), "back_pain");
        assert_eq!(entry.poses()[0].as_str(), "knee_to_chest");
    }

    #[test]
    fn lookup_resolves_aliases_to_canonical_entries() {
        let catalog = ConditionCatalog::builtin();
        let via_alias = catalog.lookup("bp").unwrap();
        let canonical = catalog.lookup("back_pain").unwrap();
        assert_eq!(via_alias.key(), canonical.key());
        assert_eq!(via_alias.poses(), canonical.poses());
    }

    #[test]
    fn lookup_rejects_unknown_terms() {
        let catalog = ConditionCatalog::builtin();
        assert!(catalog.lookup("unicorn_flu").is_none());
        assert!(!catalog.contains("unicorn_flu"));
        assert!(catalog.contains("hbp"));
    }

    #[test]
    fn multi_word_scan_order_is_declaration_order() {
        let catalog = ConditionCatalog::builtin();
        let keys: Vec<&str> = catalog
            .multi_word_identifiers()
            .map(|(k, _)| k.as_str())
            .collect();

        assert_eq!(keys.first().copied(), Some("back_pain"));
        // Aliases come after every canonical multi-word identifier.
        assert_eq!(keys.last().copied(), Some("mental_stress"));
        assert!(keys.contains(&"high_blood_pressure"));
        assert!(!keys.contains(&"stress"));
    }

    #[test]
    fn fuzzy_candidates_cover_aliases() {
        let catalog = ConditionCatalog::builtin();
        let keys: Vec<&str> = catalog.fuzzy_candidates().map(|k| k.as_str()).collect();
        assert!(keys.contains(&"asthma"));
        assert!(keys.contains(&"ra"));
        assert_eq!(keys.len(), 33 + 4);
    }

    #[test]
    fn pose_order_is_preserved() {
        let catalog = ConditionCatalog::builtin();
        let entry = catalog.lookup("depression").unwrap();
        let poses: Vec<&str> = entry.poses().iter().map(|p| p.as_str()).collect();
        assert_eq!(
            poses,
            vec!["sun_salutation", "warrior_i_pose", "triangle_pose"]
        );
    }
}
