use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::adapters::st::{decode_source, StSourceParser};
use crate::descriptions::{DescriptionResolver, DescriptionTable};
use crate::domain::{CoverageReport, MapStatistics, RegisterMap};
use crate::ports::RegisterMapSource;

/// 一次提取的完整结果
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExtractOutcome {
    pub map: RegisterMap,
    pub coverage: CoverageReport,
    pub statistics: MapStatistics,
}

/// Application layer use case: source parsing + description resolution.
/// The engine never fails; this is where an unusable (empty) result is rejected.
#[derive(Debug, Clone)]
pub struct MapService<S: RegisterMapSource> {
    source: S,
    resolver: DescriptionResolver,
}

impl Default for MapService<StSourceParser> {
    fn default() -> Self {
        Self::new(StSourceParser::default(), DescriptionResolver::default())
    }
}

impl<S: RegisterMapSource> MapService<S> {
    pub fn new(source: S, resolver: DescriptionResolver) -> Self {
        Self { source, resolver }
    }

    /// Parse both register classes, attach descriptions and build statistics.
    pub fn extract(&self, text: &str, table: &DescriptionTable) -> Result<ExtractOutcome> {
        let mut map = self.source.parse(text);
        if map.is_empty() {
            bail!(
                "no register statements found in {} source",
                self.source.source_kind()
            );
        }

        let coverage = self.resolver.annotate(&mut map.registers, table);
        if coverage.unresolved > 0 {
            warn!(
                "{} of {} variables have no description",
                coverage.unresolved,
                coverage.total()
            );
        }
        debug!(
            "extracted {} registers in {} sections",
            map.registers.len(),
            map.sections.len()
        );

        let mut statistics = MapStatistics::from_map(&map);
        statistics.coverage = coverage.clone();
        Ok(ExtractOutcome {
            map,
            coverage,
            statistics,
        })
    }

    /// Read, decode and extract a source file.
    pub fn extract_file(&self, path: &Path, table: &DescriptionTable) -> Result<ExtractOutcome> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read source file: {}", path.display()))?;
        let text = decode_source(&bytes);
        self.extract(&text, table)
            .with_context(|| format!("failed to extract register map from: {}", path.display()))
    }
}
