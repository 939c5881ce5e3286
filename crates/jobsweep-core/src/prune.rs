use crate::constants::pipelines;
use crate::errors::ConfigError;
use regex::Regex;
use std::collections::HashMap;

/// Dropseqtools leaves one intermediate BAM per tagging/filtering step
/// next to the final outputs. Dropping them before the results mirror
/// dramatically reduces upload and storage volume.
const DROPSEQTOOLS_SUFFIXES: &[&str] = &[
    r".sam$",
    r".tagged([\d]+-[\d]+).bam$",
    r".tagged([\d]+-[\d]+).tagged([\d]+-[\d]+).bam$",
    r".tagged([\d]+-[\d]+).tagged([\d]+-[\d]+).filtered.trimmed_smart.bam$",
    r".tagged([\d]+-[\d]+).tagged([\d]+-[\d]+).filtered.trimmed_smart.polyA_filtered.bam$",
    r".tagged([\d]+-[\d]+).tagged([\d]+-[\d]+).filtered.trimmed_smart.polyA_filtered.STARAligned.out.bam$",
    r".tagged([\d]+-[\d]+).tagged([\d]+-[\d]+).filtered.trimmed_smart.polyA_filtered.STARUnmapped.out.mate1$",
    r".tagged([\d]+-[\d]+).tagged([\d]+-[\d]+).filtered.trimmed_smart.polyA_filtered.STARAligned.out.namesorted.bam$",
    r".tagged([\d]+-[\d]+).tagged([\d]+-[\d]+).filtered.trimmed_smart.polyA_filtered.STARAligned.out.namesorted.merged.bam$",
    r".tagged([\d]+-[\d]+).tagged([\d]+-[\d]+).filtered.trimmed_smart.polyA_filtered.STARAligned.out.namesorted.merged.TaggedGeneExon.bam$",
];

/// Declarative mapping from pipeline identifier to the ordered list of
/// filename-suffix matchers for disposable intermediates. An unknown
/// pipeline yields no matchers, so pruning is a no-op rather than an
/// error at that level; rejecting unknown pipelines outright is the
/// job of startup configuration validation.
#[derive(Debug, Clone)]
pub struct PruneRules {
    rules: HashMap<String, Vec<Regex>>,
}

impl PruneRules {
    pub fn built_in() -> Self {
        let mut rules = HashMap::new();
        let dropseq = DROPSEQTOOLS_SUFFIXES
            .iter()
            .map(|suffix| compile_suffix(suffix))
            .collect::<Result<Vec<_>, _>>()
            .unwrap_or_default();
        rules.insert(pipelines::DROPSEQTOOLS.to_string(), dropseq);
        // Cellranger keeps its intermediates; nothing to prune yet.
        rules.insert(pipelines::CELLRANGER.to_string(), Vec::new());
        Self { rules }
    }

    /// Built-in rules extended/overridden by configured suffix lists.
    pub fn with_overrides(
        overrides: &HashMap<String, Vec<String>>,
    ) -> Result<Self, ConfigError> {
        let mut combined = Self::built_in();
        for (pipeline, suffixes) in overrides {
            let compiled = suffixes
                .iter()
                .map(|suffix| {
                    compile_suffix(suffix).map_err(|source| ConfigError::InvalidPrunePattern {
                        pipeline: pipeline.clone(),
                        pattern: suffix.clone(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            combined.rules.insert(pipeline.clone(), compiled);
        }
        Ok(combined)
    }

    pub fn knows(&self, pipeline: &str) -> bool {
        self.rules.contains_key(pipeline)
    }

    pub fn known_pipelines(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn matchers_for(&self, pipeline: &str) -> &[Regex] {
        self.rules.get(pipeline).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_disposable(&self, pipeline: &str, file_name: &str) -> bool {
        self.matchers_for(pipeline)
            .iter()
            .any(|matcher| matcher.is_match(file_name))
    }
}

fn compile_suffix(suffix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"^[\w\d]+{}", suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropseqtools_matches_intermediates() {
        let rules = PruneRules::built_in();
        assert!(rules.is_disposable(pipelines::DROPSEQTOOLS, "sample1.sam"));
        assert!(rules.is_disposable(pipelines::DROPSEQTOOLS, "sample1.tagged1-4.bam"));
        assert!(rules.is_disposable(
            pipelines::DROPSEQTOOLS,
            "sample1.tagged1-4.tagged5-8.filtered.trimmed_smart.bam"
        ));
    }

    #[test]
    fn test_dropseqtools_keeps_final_outputs() {
        let rules = PruneRules::built_in();
        assert!(!rules.is_disposable(pipelines::DROPSEQTOOLS, "sample1.bam"));
        assert!(!rules.is_disposable(pipelines::DROPSEQTOOLS, "expression_matrix.tsv"));
        assert!(!rules.is_disposable(pipelines::DROPSEQTOOLS, "summary.txt"));
    }

    #[test]
    fn test_suffix_must_not_match_bare() {
        // At least one word character must precede the suffix.
        let rules = PruneRules::built_in();
        assert!(!rules.is_disposable(pipelines::DROPSEQTOOLS, ".sam"));
    }

    #[test]
    fn test_unknown_pipeline_prunes_nothing() {
        let rules = PruneRules::built_in();
        assert!(rules.matchers_for("starsolo").is_empty());
        assert!(!rules.is_disposable("starsolo", "sample1.sam"));
    }

    #[test]
    fn test_cellranger_has_empty_rule_set() {
        let rules = PruneRules::built_in();
        assert!(rules.knows(pipelines::CELLRANGER));
        assert!(rules.matchers_for(pipelines::CELLRANGER).is_empty());
    }

    #[test]
    fn test_overrides_add_new_pipeline() {
        let mut overrides = HashMap::new();
        overrides.insert("starsolo".to_string(), vec![r".Unmapped.out$".to_string()]);
        let rules = PruneRules::with_overrides(&overrides).unwrap();
        assert!(rules.knows("starsolo"));
        assert!(rules.is_disposable("starsolo", "sample1.Unmapped.out"));
        // Built-ins survive the merge.
        assert!(rules.is_disposable(pipelines::DROPSEQTOOLS, "sample1.sam"));
    }

    #[test]
    fn test_invalid_override_pattern_is_config_error() {
        let mut overrides = HashMap::new();
        overrides.insert("broken".to_string(), vec![r"([unclosed$".to_string()]);
        assert!(PruneRules::with_overrides(&overrides).is_err());
    }
}
