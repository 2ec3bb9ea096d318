// src/services/pairing_service.rs
//
// Pairing Engine
//
// Consumes the old and new directory listings, groups parsed releases by
// identity key and resolves which (source, target) pairs need a patch.
//
// RULES:
// - Malformed filenames are skipped, never reported as errors
// - New-side records without an old-side group have nothing to patch from
// - Version ties keep the first-seen candidate
// - Equal highest versions on both sides mean there is nothing to patch
// - Only a naming template error aborts the pass

use std::collections::HashMap;
use std::path::Path;

use crate::config::PatchConfig;
use crate::domain::pairing::{ReleaseGroup, ResolvedPair};
use crate::error::AppResult;
use crate::services::naming_service::PatchNameTemplate;
use crate::services::parser_service::ReleaseParser;
use crate::services::shell_safety::is_cmd_safe;

pub struct PairingService {
    parser: ReleaseParser,
    template: PatchNameTemplate,
}

impl PairingService {
    pub fn new(config: &PatchConfig) -> Self {
        Self {
            parser: ReleaseParser::default(),
            template: PatchNameTemplate::new(config.patch_name_template.clone()),
        }
    }

    /// Resolves the minimal set of (source, target) pairs needing a patch.
    ///
    /// Output is sorted by source path so downstream artifact and script
    /// generation is deterministic regardless of grouping order.
    pub fn resolve(
        &self,
        old_dir: &Path,
        old_listing: &[String],
        new_dir: &Path,
        new_listing: &[String],
    ) -> AppResult<Vec<ResolvedPair>> {
        let mut groups: HashMap<String, ReleaseGroup> = HashMap::new();

        for entry in old_listing {
            if let Some(release) = self.parser.parse(entry, old_dir) {
                log::debug!(
                    "Found potential source file: {}",
                    release.full_path.display()
                );
                groups
                    .entry(release.identity_key())
                    .or_default()
                    .old
                    .push(release);
            }
        }

        for entry in new_listing {
            if let Some(release) = self.parser.parse(entry, new_dir) {
                match groups.get_mut(&release.identity_key()) {
                    Some(group) => {
                        log::debug!(
                            "Found potential target file: {}",
                            release.full_path.display()
                        );
                        group.new.push(release);
                    }
                    None => {
                        // No matching source, so there is nothing to patch from.
                        log::debug!(
                            "Ignoring target file with no equivalent source: {}",
                            release.full_path.display()
                        );
                    }
                }
            }
        }

        let mut pairs = Vec::new();
        for (identity_key, group) in &groups {
            let (source, target) = match (group.highest_old(), group.highest_new()) {
                (Some(source), Some(target)) => (source, target),
                _ => continue,
            };

            if source.version == target.version {
                log::debug!(
                    "Source and target versions of {} are both {}, ignoring the group",
                    identity_key,
                    target.version
                );
                continue;
            }

            let patch_filename = self.template.render(source, target)?;
            let is_shell_safe = is_cmd_safe(&source.basename()) && is_cmd_safe(&target.basename());

            log::debug!(
                "Queued: {} -> {}, patch name: {}",
                source.full_path.display(),
                target.full_path.display(),
                patch_filename
            );

            pairs.push(ResolvedPair {
                source: source.clone(),
                target: target.clone(),
                patch_filename,
                identity_key: identity_key.clone(),
                is_shell_safe,
            });
        }

        pairs.sort_by(|a, b| a.source.full_path.cmp(&b.source.full_path));
        Ok(pairs)
    }
}
